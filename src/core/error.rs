use std::io;

#[derive(thiserror::Error, Debug)]
pub enum WorkbenchError {
    #[error("config error: {0}")]
    Config(String),
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("report error: {0}")]
    Report(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<rusqlite::Error> for WorkbenchError {
    fn from(err: rusqlite::Error) -> Self {
        WorkbenchError::Persistence(err.to_string())
    }
}

impl From<serde_json::Error> for WorkbenchError {
    fn from(err: serde_json::Error) -> Self {
        WorkbenchError::Persistence(err.to_string())
    }
}
