use thiserror::Error;

/// Why a profile could not be loaded. Users only ever see one message for
/// all of these; the variants exist for the logs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProfileError {
    #[error("profile not found")]
    NotFound,

    #[error("profile API returned status {status}")]
    Upstream { status: u16 },

    #[error("profile request failed: {0}")]
    Network(String),

    #[error("invalid profile payload: {0}")]
    InvalidProfile(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PresentationError {
    #[error("unknown theme: {0}")]
    UnknownTheme(String),

    #[error("unknown template: {0}")]
    UnknownTemplate(String),
}

impl From<worker::Error> for ProfileError {
    fn from(err: worker::Error) -> Self {
        ProfileError::Network(err.to_string())
    }
}
