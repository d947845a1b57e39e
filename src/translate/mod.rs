//! Schema-driven translation for kinds without a curated converter
//!
//! Generated CRDs are embedded per operator version ([`provider`]); a
//! [`Translator`] pairs one of them with a pinned Atlas API version tag.

mod exporters;
mod provider;
mod translator;

pub use exporters::*;
pub use provider::*;
pub use translator::*;

/// API group of generated CRDs
pub const GENERATED_API_GROUP: &str = "atlas.generated.mongodb.com";

/// Atlas API version tag the embedded CRDs are generated from
pub const DEFAULT_API_VERSION_TAG: &str = "v20250312";
