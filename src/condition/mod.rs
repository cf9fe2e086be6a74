use std::{collections::HashMap, sync::LazyLock};

use parking_lot::Mutex;

use crate::course::CourseCode;

pub mod evaluate;
pub mod parse;

/// An enrollment requirement, parsed from handbook-style condition text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// No prerequisite; always satisfied.
    Empty,
    Course(CourseCode),
    /// Bare 4-digit code; the faculty prefix comes from the target course.
    ImpliedCourse(String),
    And(Vec<Condition>),
    Or(Vec<Condition>),
    /// Minimum completed units of credit, optionally restricted to a category.
    Uoc {
        amount: u32,
        category: Option<Category>,
    },
}

/// Restricts which completed courses count toward a UOC threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Category {
    Comp,
    CompLevel(u32),
    Courses(Vec<CourseCode>),
}

// Cache: raw condition text -> parsed condition
pub(crate) static CONDITION_CACHE: LazyLock<Mutex<HashMap<String, Condition>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));
