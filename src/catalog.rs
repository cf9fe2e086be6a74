use std::{
    collections::{BTreeMap, HashMap},
    sync::LazyLock,
};

use tracing::debug;

use crate::{
    condition::{Condition, parse},
    course::CourseCode,
    error::Error,
    transcript::Transcript,
};

/// Flat-rate assumption for courses without an explicit credit value.
const DEFAULT_UOC: u32 = 6;

/// Per-course units-of-credit values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreditTable {
    overrides: HashMap<CourseCode, u32>,
}

impl CreditTable {
    pub fn credit_of(&self, course: &CourseCode) -> u32 {
        self.overrides.get(course).copied().unwrap_or(DEFAULT_UOC)
    }

    pub fn set(&mut self, course: impl AsRef<str>, uoc: u32) {
        self.overrides.insert(CourseCode::new(course), uoc);
    }
}

/// The rule table: course code -> handbook condition text, plus credit values.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    conditions: BTreeMap<CourseCode, String>,
    credits: CreditTable,
}

static BUILTIN: LazyLock<Catalog> = LazyLock::new(|| {
    Catalog::from_json(include_str!("../data/conditions.json"))
        .expect("embedded conditions.json is well-formed")
});

impl Catalog {
    /// The compile-time embedded COMP handbook excerpt.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    /// Build from a JSON object of course code -> condition text.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let raw: BTreeMap<String, String> = serde_json::from_str(json)?;
        Ok(raw.into_iter().collect())
    }

    pub fn insert(&mut self, course: impl AsRef<str>, condition: impl Into<String>) {
        self.conditions
            .insert(CourseCode::new(course), condition.into());
    }

    pub fn set_credit(&mut self, course: impl AsRef<str>, uoc: u32) {
        self.credits.set(course, uoc);
    }

    pub fn credits(&self) -> &CreditTable {
        &self.credits
    }

    /// The parsed condition for `target`, or `None` if the catalog has no
    /// entry for it.
    pub fn condition(&self, target: &CourseCode) -> Result<Option<Condition>, Error> {
        match self.conditions.get(target) {
            None => Ok(None),
            Some(expr) => parse::parse_cached(expr)
                .map(Some)
                .map_err(|reason| Error::Parse {
                    course: target.to_string(),
                    reason,
                }),
        }
    }

    /// Like [`Catalog::is_unlocked`], but surfaces condition parse failures.
    pub fn try_unlock(&self, transcript: &Transcript, target: &CourseCode) -> Result<bool, Error> {
        match self.condition(target)? {
            // Unknown courses are never unlocked
            None => {
                debug!(course = %target, "course not in catalog, treating as locked");
                Ok(false)
            }
            Some(condition) => Ok(condition.evaluate(transcript, target, &self.credits)),
        }
    }

    /// Whether `target`'s enrollment requirements are satisfied by
    /// `completed`. Total over its inputs: unknown targets and malformed
    /// catalog entries both come back locked.
    pub fn is_unlocked<S: AsRef<str>>(&self, completed: &[S], target: &str) -> bool {
        let transcript: Transcript = completed.iter().map(|course| course.as_ref()).collect();
        let target = CourseCode::new(target);

        match self.try_unlock(&transcript, &target) {
            Ok(unlocked) => unlocked,
            Err(err) => {
                debug!(course = %target, %err, "condition unusable, treating as locked");
                false
            }
        }
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            conditions: iter
                .into_iter()
                .map(|(course, condition)| (CourseCode::new(course), condition.into()))
                .collect(),
            credits: CreditTable::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_course_is_locked() {
        let catalog = Catalog::default();

        assert!(!catalog.is_unlocked(&["COMP1511"], "COMP9999"));
    }

    #[test]
    fn empty_condition_unlocks() {
        let catalog: Catalog = [("COMP1511", "")].into_iter().collect();

        assert!(catalog.is_unlocked::<&str>(&[], "COMP1511"));
    }

    #[test]
    fn from_json_builds_rule_table() {
        let catalog = Catalog::from_json(r#"{"COMP3153": "Prerequisite: MATH1081"}"#).unwrap();

        assert!(catalog.is_unlocked(&["MATH1081"], "COMP3153"));
        assert!(!catalog.is_unlocked(&["COMP1511"], "COMP3153"));
    }

    #[test]
    fn from_json_rejects_malformed_json() {
        assert!(Catalog::from_json("not json").is_err());
    }

    #[test]
    fn malformed_condition_surfaces_parse_error() {
        let catalog: Catalog = [("COMP1511", "and and and")].into_iter().collect();
        let transcript = Transcript::new();

        let err = catalog
            .try_unlock(&transcript, &CourseCode::new("COMP1511"))
            .unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));

        // the total surface falls back to locked
        assert!(!catalog.is_unlocked::<&str>(&[], "COMP1511"));
    }

    #[test]
    fn condition_lookup_is_case_insensitive() {
        let catalog: Catalog = [("comp3153", "MATH1081")].into_iter().collect();

        assert!(catalog.is_unlocked(&["math1081"], "COMP3153"));
    }

    #[test]
    fn credit_overrides_feed_uoc_thresholds() {
        let mut catalog: Catalog = [("COMP4161", "Completion of 18 units of credit")]
            .into_iter()
            .collect();
        catalog.set_credit("COMP1511", 12);

        assert!(catalog.is_unlocked(&["COMP1511", "COMP1521"], "COMP4161"));
        assert!(!catalog.is_unlocked(&["COMP1521", "COMP2521"], "COMP4161"));
    }

    #[test]
    fn builtin_catalog_parses() {
        let catalog = Catalog::builtin();

        assert!(
            catalog
                .condition(&CourseCode::new("COMP4161"))
                .unwrap()
                .is_some()
        );
    }
}
