#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("malformed json input: {0}")]
    Json(#[from] serde_json::Error),
}
