/// Failures that stop the wizard. Per-file copy errors are not in here: they are tallied
/// as [`crate::copier::CopyOutcome::Failed`] and the batch keeps going.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Ctrl+C, inside a prompt or while walking and copying.
    #[error("operation interrupted by the user")]
    Interrupted,

    /// Esc while a prompt was waiting for input.
    #[error("operation cancelled by the user")]
    Cancelled,

    #[error("prompt failed: {0}")]
    Prompt(inquire::InquireError),

    #[error("{when} \"{}\": {source}", path.display())]
    Io {
        path: std::path::PathBuf,
        when: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write report: {0}")]
    Report(#[from] serde_json::Error),
}

impl From<inquire::InquireError> for Error {
    fn from(err: inquire::InquireError) -> Self {
        match err {
            inquire::InquireError::OperationInterrupted => Error::Interrupted,
            inquire::InquireError::OperationCanceled => Error::Cancelled,
            other => Error::Prompt(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
