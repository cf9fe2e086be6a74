//! Course prerequisite checker.
//!
//! Decides whether a target course's enrollment requirements are satisfied
//! by a set of completed courses. Requirements are handbook-style condition
//! strings ("Prerequisite: MATH1081 and (COMP1511 or DPST1091)",
//! "Completion of 18 units of credit", ...) parsed into a [`Condition`] tree
//! and evaluated against a [`Transcript`].
//!
//! ```
//! use unlocked::is_unlocked;
//!
//! assert!(is_unlocked(&[], "COMP1511"));
//! assert!(is_unlocked(&["MATH1081"], "COMP3153"));
//! assert!(!is_unlocked(&["COMP1511"], "COMP3153"));
//! ```

pub mod catalog;
pub mod condition;
pub mod course;
pub mod error;
pub mod transcript;

pub use catalog::{Catalog, CreditTable};
pub use condition::{Category, Condition};
pub use course::CourseCode;
pub use error::Error;
pub use transcript::Transcript;

/// Whether `target`'s prerequisites are satisfied by `completed`, per the
/// embedded handbook catalog. See [`Catalog::is_unlocked`].
pub fn is_unlocked(completed: &[&str], target: &str) -> bool {
    Catalog::builtin().is_unlocked(completed, target)
}
