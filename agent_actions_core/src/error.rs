use thiserror::Error;

/// Construction-time failure in a concrete client.
///
/// A client missing its credentials or pointed at a malformed URL is
/// unusable, so these propagate hard instead of flowing through the
/// string-only invocation channel.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid base URL `{url}`: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("missing credential: {0}")]
    MissingCredential(&'static str),
}
