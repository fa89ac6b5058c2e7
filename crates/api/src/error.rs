#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Unknown profile: {0}")]
    UnknownProfile(String),
    #[error("Profile already exists: {0}")]
    DuplicateProfile(String),
    #[error("Preset profiles are read-only: {0}")]
    ReadOnlyProfile(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
