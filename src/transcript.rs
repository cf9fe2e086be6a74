use std::collections::HashSet;

use crate::course::CourseCode;

/// The set of courses a student has completed.
///
/// Duplicates collapse and order is irrelevant; membership is
/// case-insensitive via [`CourseCode`] normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    courses: HashSet<CourseCode>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, course: impl AsRef<str>) {
        self.courses.insert(CourseCode::new(course));
    }

    pub fn contains(&self, course: &CourseCode) -> bool {
        self.courses.contains(course)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CourseCode> {
        self.courses.iter()
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for Transcript {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            courses: iter.into_iter().map(CourseCode::new).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_transcript_is_empty() {
        let transcript = Transcript::default();
        assert!(transcript.is_empty());
    }

    #[test]
    fn add_inserts_course() {
        let mut transcript = Transcript::new();

        transcript.add("COMP1511");

        assert!(transcript.contains(&CourseCode::new("COMP1511")));
    }

    #[test]
    fn duplicates_collapse() {
        let transcript: Transcript = ["COMP1511", "comp1511", "COMP1521"].into_iter().collect();

        assert_eq!(transcript.len(), 2);
    }

    #[test]
    fn membership_ignores_case() {
        let transcript: Transcript = ["comp1511"].into_iter().collect();

        assert!(transcript.contains(&CourseCode::new("COMP1511")));
    }

    #[test]
    fn missing_course_is_not_contained() {
        let transcript = Transcript::new();

        assert!(!transcript.contains(&CourseCode::new("COMP1511")));
    }
}
