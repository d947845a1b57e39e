//! MongoDB Atlas control plane access
//!
//! Source resource models, the client seam used by the exporters, a reqwest
//! implementation of that seam and the paginating fetchers built on top.

mod client;
mod fetch;
mod http;
pub mod models;

pub use client::*;
pub use fetch::*;
pub use http::*;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Cloud providers that partition network containers and peerings
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CloudProvider {
    #[serde(rename = "AWS")]
    Aws,
    #[serde(rename = "AZURE")]
    Azure,
    #[serde(rename = "GCP")]
    Gcp,
}

impl CloudProvider {
    /// Every provider, in listing order
    pub const ALL: [CloudProvider; 3] = [CloudProvider::Aws, CloudProvider::Azure, CloudProvider::Gcp];

    /// Atlas provider tag (`AWS`, `AZURE`, `GCP`)
    pub fn as_str(&self) -> &'static str {
        match self {
            CloudProvider::Aws => "AWS",
            CloudProvider::Azure => "AZURE",
            CloudProvider::Gcp => "GCP",
        }
    }

    /// Parse an Atlas provider tag, case-insensitively
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_uppercase().as_str() {
            "AWS" => Some(CloudProvider::Aws),
            "AZURE" => Some(CloudProvider::Azure),
            "GCP" => Some(CloudProvider::Gcp),
            _ => None,
        }
    }
}

impl fmt::Display for CloudProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_tags_parse_case_insensitively() {
        assert_eq!(CloudProvider::from_tag("aws"), Some(CloudProvider::Aws));
        assert_eq!(CloudProvider::from_tag("Azure"), Some(CloudProvider::Azure));
        assert_eq!(CloudProvider::from_tag("GCP"), Some(CloudProvider::Gcp));
        assert_eq!(CloudProvider::from_tag("TENANT"), None);
    }
}
