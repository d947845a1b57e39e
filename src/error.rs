//! Error types for the Atlas manifest exporter

use thiserror::Error;

use crate::atlas::CloudProvider;

/// Result type alias using the exporter's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Exporter error types
#[derive(Error, Debug)]
pub enum Error {
    /// Requested schema, resource or version does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Listing or get call against the control plane failed
    #[error("failed to fetch {kind}{}: {source}", provider_suffix(.provider))]
    Upstream {
        kind: String,
        provider: Option<CloudProvider>,
        #[source]
        source: Box<Error>,
    },

    /// Control plane answered with a non-success status
    #[error("Atlas API returned {status}: {body}")]
    Api { status: u16, body: String },

    /// Transport level HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Malformed CRD or schema on the schema-driven path
    #[error("translation setup error: {0}")]
    TranslationSetup(String),

    /// A single object could not be translated
    #[error("translation error: {0}")]
    Translation(String),

    /// YAML encoding or decoding error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_yaml::Error),

    /// JSON encoding or decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn provider_suffix(provider: &Option<CloudProvider>) -> String {
    provider
        .map(|p| format!(" for provider {}", p))
        .unwrap_or_default()
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Error::NotFound(msg.into())
    }

    /// Create a translation setup error
    pub fn translation_setup(msg: impl Into<String>) -> Self {
        Error::TranslationSetup(msg.into())
    }

    /// Create a translation error
    pub fn translation(msg: impl Into<String>) -> Self {
        Error::Translation(msg.into())
    }

    /// Wrap a control plane failure with the resource kind and provider it was fetching
    pub fn upstream(kind: impl Into<String>, provider: Option<CloudProvider>, source: Error) -> Self {
        Error::Upstream {
            kind: kind.into(),
            provider,
            source: Box::new(source),
        }
    }

    /// Whether this error means the requested item does not exist
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::NotFound(_) => true,
            Error::Api { status, .. } => *status == 404,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_error_names_kind_and_provider() {
        let err = Error::upstream(
            "network peering",
            Some(CloudProvider::Azure),
            Error::Api {
                status: 500,
                body: "boom".to_string(),
            },
        );
        let msg = err.to_string();
        assert!(msg.contains("network peering"));
        assert!(msg.contains("AZURE"));
        assert!(msg.contains("boom"));
    }

    #[test]
    fn not_found_sentinel() {
        assert!(Error::not_found("crd Group").is_not_found());
        assert!(Error::Api {
            status: 404,
            body: String::new()
        }
        .is_not_found());
        assert!(!Error::config("bad").is_not_found());
    }
}
