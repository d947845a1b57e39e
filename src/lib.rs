//! Atlas Kubernetes Exporter
//!
//! Exports the state of a MongoDB Atlas project as Atlas Kubernetes Operator
//! manifests: fetch every configured kind, convert it into its custom
//! resource (plus companion secrets) and emit a multi-document YAML stream.

pub mod adapters;
pub mod atlas;
pub mod config;
pub mod crd;
pub mod error;
pub mod export;
pub mod naming;
pub mod translate;

pub use error::{Error, Result};
