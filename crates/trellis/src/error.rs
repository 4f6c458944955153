use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(PartialEq, Eq, Error, Debug, Clone)]
pub enum Error {
    #[error("focus: {0}")]
    Focus(String),
    #[error("render: {0}")]
    Render(String),
    #[error("runloop: {0}")]
    RunLoop(String),
    #[error("internal: {0}")]
    Internal(String),
    #[error("invalid: {0}")]
    Invalid(String),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::RunLoop(e.to_string())
    }
}
