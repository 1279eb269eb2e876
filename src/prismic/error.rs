#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Status code: {0}")]
    StatusCode(String),

    #[error("Repository {0} has no master ref")]
    NoMasterRef(String),

    #[error("Invalid url: {0}")]
    InvalidUrl(String),
}
