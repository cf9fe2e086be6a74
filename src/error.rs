use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to parse condition for course {course}: {reason}")]
    Parse { course: String, reason: String },

    #[error("malformed catalog json: {0}")]
    Catalog(#[from] serde_json::Error),
}
