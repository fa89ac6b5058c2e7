use mapscope_api::ApiError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MappingError {
    #[error("Malformed type encoding '{encoding}': {reason}")]
    MalformedTypeEncoding { encoding: String, reason: String },
    #[error("Malformed method signature '{signature}': {reason}")]
    MalformedMethodSignature { signature: String, reason: String },
    #[error("Parse error at line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: Box<MappingError>,
    },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Profile error: {0}")]
    Profile(#[from] ApiError),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl MappingError {
    pub(crate) fn type_encoding(encoding: &str, reason: impl Into<String>) -> Self {
        MappingError::MalformedTypeEncoding {
            encoding: encoding.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn signature(signature: &str, reason: impl Into<String>) -> Self {
        MappingError::MalformedMethodSignature {
            signature: signature.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn at_line(self, line: usize) -> Self {
        MappingError::Parse {
            line,
            source: Box::new(self),
        }
    }
}

pub type Result<T> = std::result::Result<T, MappingError>;
