//! Export run configuration
//!
//! Loaded from a YAML file; every field except `projectId` has a default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::adapters::ApiCredentials;
use crate::atlas::{DEFAULT_BASE_URL, MAX_PAGE_SIZE};
use crate::error::{Error, Result};
use crate::export::{ExportKind, GeneratedKind};
use crate::translate::DEFAULT_API_VERSION_TAG;

/// Everything one export run needs besides the access token
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExportConfig {
    /// Namespace written to every manifest
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Operator version the manifests target
    #[serde(default = "default_operator_version")]
    pub operator_version: String,

    /// Link resources by external project id instead of in-cluster reference
    #[serde(default)]
    pub independent_resources: bool,

    /// Embed secret material instead of placeholders
    #[serde(default)]
    pub include_secrets: bool,

    /// Atlas project to export
    #[serde(default)]
    pub project_id: String,

    /// Curated kinds to export
    #[serde(default = "default_kinds")]
    pub kinds: Vec<ExportKind>,

    /// Kinds translated from generated CRDs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_driven: Option<SchemaDrivenConfig>,

    /// Items requested per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Atlas Admin API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Programmatic API key written to the connection secret
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<ApiCredentials>,
}

/// Schema-driven export settings
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SchemaDrivenConfig {
    /// Operator version whose embedded CRDs are used
    #[serde(default = "default_operator_version")]
    pub crd_version: String,

    /// Atlas API version tag nested under `spec`
    #[serde(default = "default_api_version_tag")]
    pub api_version_tag: String,

    /// Generated kinds to export
    #[serde(default = "default_generated_kinds")]
    pub kinds: Vec<GeneratedKind>,
}

fn default_namespace() -> String {
    "default".to_string()
}

fn default_operator_version() -> String {
    "2.10.0".to_string()
}

fn default_kinds() -> Vec<ExportKind> {
    ExportKind::ALL.to_vec()
}

fn default_page_size() -> u32 {
    MAX_PAGE_SIZE
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_api_version_tag() -> String {
    DEFAULT_API_VERSION_TAG.to_string()
}

fn default_generated_kinds() -> Vec<GeneratedKind> {
    GeneratedKind::ALL.to_vec()
}

impl Default for SchemaDrivenConfig {
    fn default() -> Self {
        Self {
            crd_version: default_operator_version(),
            api_version_tag: default_api_version_tag(),
            kinds: default_generated_kinds(),
        }
    }
}

impl ExportConfig {
    /// Defaults for exporting one project
    pub fn for_project(project_id: impl Into<String>) -> Self {
        Self {
            namespace: default_namespace(),
            operator_version: default_operator_version(),
            independent_resources: false,
            include_secrets: false,
            project_id: project_id.into(),
            kinds: default_kinds(),
            schema_driven: None,
            page_size: default_page_size(),
            base_url: default_base_url(),
            credentials: None,
        }
    }

    /// Load and validate a configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: ExportConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Reject values the export cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.project_id.trim().is_empty() {
            return Err(Error::config("projectId is required"));
        }
        if self.namespace.trim().is_empty() {
            return Err(Error::config("namespace must not be empty"));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&self.page_size) {
            return Err(Error::config(format!(
                "pageSize must be between 1 and {}, got {}",
                MAX_PAGE_SIZE, self.page_size
            )));
        }
        if let Some(schema_driven) = &self.schema_driven {
            if schema_driven.api_version_tag.trim().is_empty() {
                return Err(Error::config("schemaDriven.apiVersionTag must not be empty"));
            }
        }
        Ok(())
    }

    /// Whether a curated kind is selected
    pub fn exports(&self, kind: ExportKind) -> bool {
        self.kinds.contains(&kind)
    }

    /// Whether a generated kind is selected
    pub fn exports_generated(&self, kind: GeneratedKind) -> bool {
        self.schema_driven
            .as_ref()
            .is_some_and(|s| s.kinds.contains(&kind))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn minimal_file_gets_defaults() {
        let file = write_config("projectId: 6500000000000000000000aa\n");
        let config = ExportConfig::from_file(file.path()).unwrap();

        assert_eq!(config, ExportConfig::for_project("6500000000000000000000aa"));
        assert_eq!(config.namespace, "default");
        assert_eq!(config.operator_version, "2.10.0");
        assert_eq!(config.page_size, 500);
        assert!(!config.independent_resources);
        assert!(config.exports(ExportKind::NetworkPeering));
        assert!(!config.exports_generated(GeneratedKind::Group));
        config.validate().unwrap();
    }

    #[test]
    fn full_file_parses() {
        let file = write_config(
            r#"
namespace: atlas
operatorVersion: 2.11.0
independentResources: true
includeSecrets: true
projectId: 6500000000000000000000aa
kinds: [project, thirdPartyIntegration]
pageSize: 100
credentials:
  orgId: org-1
  publicApiKey: pub
  privateApiKey: priv
schemaDriven:
  kinds: [Cluster]
"#,
        );
        let config = ExportConfig::from_file(file.path()).unwrap();

        assert_eq!(config.kinds, vec![ExportKind::Project, ExportKind::ThirdPartyIntegration]);
        assert!(config.independent_resources);
        assert_eq!(config.credentials.as_ref().map(|c| c.org_id.as_str()), Some("org-1"));
        let schema_driven = config.schema_driven.clone().unwrap();
        assert_eq!(schema_driven.api_version_tag, "v20250312");
        assert_eq!(schema_driven.crd_version, "2.10.0");
        assert!(config.exports_generated(GeneratedKind::Cluster));
        assert!(!config.exports_generated(GeneratedKind::Group));
        config.validate().unwrap();
    }

    #[test]
    fn validation_rejects_bad_values() {
        let mut config = ExportConfig::for_project("");
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        config.project_id = "p".to_string();
        config.page_size = 0;
        assert!(config.validate().is_err());
        config.page_size = 501;
        assert!(config.validate().is_err());

        config.page_size = 500;
        config.namespace = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn unknown_kind_is_a_parse_error() {
        let file = write_config("projectId: p\nkinds: [backup]\n");
        assert!(matches!(
            ExportConfig::from_file(file.path()),
            Err(Error::Serialization(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            ExportConfig::from_file("/nonexistent/export.yaml"),
            Err(Error::Io(_))
        ));
    }
}
