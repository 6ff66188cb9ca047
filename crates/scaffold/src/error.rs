use scaffold_core::envelope::EnvelopeError;
use scaffold_core::request::{Provider, ValidationError};

/// Why a generation request failed
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Bad or missing request fields, fixable by the user
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The provider has no registered adapter on this server
    #[error("{} models are not available on this server.", .0.display_name())]
    ProviderUnavailable(Provider),

    /// The provider answered with an error or an unreadable envelope
    #[error("{0}")]
    ProviderApi(String),

    #[error("Network error: {0}")]
    Network(String),
}

impl Error {
    /// Whether the caller, rather than the provider, is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::Validation(_) | Error::ProviderUnavailable(_))
    }

    /// Prefix provider and network messages with `context`.
    pub fn context(self, context: &str) -> Self {
        match self {
            Error::ProviderApi(message) => Error::ProviderApi(format!("{context}: {message}")),
            Error::Network(message) => Error::Network(format!("{context}: {message}")),
            other => other,
        }
    }
}

impl From<EnvelopeError> for Error {
    fn from(err: EnvelopeError) -> Self {
        Error::ProviderApi(err.to_string())
    }
}
