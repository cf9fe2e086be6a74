use crate::{
    catalog::CreditTable,
    condition::{Category, Condition},
    course::CourseCode,
    transcript::Transcript,
};

impl Condition {
    /// Evaluate against a transcript, pure and without side effects.
    ///
    /// `target` supplies the faculty prefix for implied course codes;
    /// `credits` supplies per-course UOC values for threshold conditions.
    pub fn evaluate(
        &self,
        transcript: &Transcript,
        target: &CourseCode,
        credits: &CreditTable,
    ) -> bool {
        match self {
            Condition::Empty => true,
            Condition::Course(course) => transcript.contains(course),
            Condition::ImpliedCourse(digits) => {
                let course = CourseCode::new(format!("{}{}", target.faculty(), digits));
                transcript.contains(&course)
            }
            // All must pass (short-circuits on first false)
            Condition::And(terms) => terms
                .iter()
                .all(|term| term.evaluate(transcript, target, credits)),
            // At least one must pass (short-circuits on first true)
            Condition::Or(terms) => terms
                .iter()
                .any(|term| term.evaluate(transcript, target, credits)),
            Condition::Uoc { amount, category } => {
                let total: u32 = transcript
                    .iter()
                    .filter(|course| category.as_ref().is_none_or(|cat| cat.admits(course)))
                    .map(|course| credits.credit_of(course))
                    .sum();
                total >= *amount
            }
        }
    }
}

impl Category {
    fn admits(&self, course: &CourseCode) -> bool {
        match self {
            Category::Comp => course.faculty() == "comp",
            Category::CompLevel(level) => {
                course.faculty() == "comp" && course.level() == Some(*level)
            }
            Category::Courses(courses) => courses.contains(course),
        }
    }
}
