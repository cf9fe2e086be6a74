use std::fmt;

/// A course code, e.g. "COMP1511".
///
/// Stored lowercased so that comparison and hashing are case-insensitive;
/// `Display` renders the conventional uppercase form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CourseCode(String);

impl CourseCode {
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_ascii_lowercase())
    }

    /// Normalized (lowercase) form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Leading alphabetic prefix, e.g. "comp" for "comp1511".
    pub fn faculty(&self) -> &str {
        let end = self
            .0
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(self.0.len());
        &self.0[..end]
    }

    /// First digit of the numeric part, e.g. 1 for "comp1511".
    pub fn level(&self) -> Option<u32> {
        self.0
            .chars()
            .find(char::is_ascii_digit)
            .and_then(|c| c.to_digit(10))
    }
}

impl fmt::Display for CourseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_ascii_uppercase())
    }
}

impl From<&str> for CourseCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_is_case_insensitive() {
        assert_eq!(CourseCode::new("COMP1511"), CourseCode::new("comp1511"));
    }

    #[test]
    fn faculty_is_alpha_prefix() {
        assert_eq!(CourseCode::new("COMP1511").faculty(), "comp");
        assert_eq!(CourseCode::new("DPST1091").faculty(), "dpst");
    }

    #[test]
    fn level_is_first_digit() {
        assert_eq!(CourseCode::new("COMP1511").level(), Some(1));
        assert_eq!(CourseCode::new("COMP4961").level(), Some(4));
        assert_eq!(CourseCode::new("comp").level(), None);
    }

    #[test]
    fn display_renders_uppercase() {
        assert_eq!(CourseCode::new("comp1511").to_string(), "COMP1511");
    }
}
