use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("Invalid mode: {0}. Use \"summarize_commits\" or \"generate_changelog\".")]
    InvalidMode(String),
    #[error("{0}")]
    Precondition(String),
    #[error("host API error: {0}")]
    Host(String),
    #[error("language model error: {0}")]
    LanguageModel(String),
    #[error("version control error: {0}")]
    VersionControl(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
