//! Kubernetes envelope for a converted dashboard

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::Serialize;

use crate::dashboard::DashboardModel;
use crate::error::{ManifestError, Result};

/// API group/version of the `GrafanaDashboard` custom resource
pub const API_VERSION: &str = "k8s.kevingomez.fr/v1";

pub const KIND: &str = "GrafanaDashboard";

/// Identity of the resource wrapping a dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestOptions {
    pub name: String,
    pub folder: String,
    pub namespace: Option<String>,
}

impl ManifestOptions {
    pub fn new(name: impl Into<String>, folder: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            folder: folder.into(),
            namespace: None,
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Check the required fields are set
    pub fn validate(&self) -> Result<()> {
        if self.folder.is_empty() {
            return Err(ManifestError::MissingFolder);
        }

        if self.name.is_empty() {
            return Err(ManifestError::MissingName);
        }

        Ok(())
    }
}

/// A `GrafanaDashboard` resource
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardManifest {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    pub folder: String,
    pub spec: DashboardModel,
}

impl DashboardManifest {
    pub fn new(options: &ManifestOptions, spec: DashboardModel) -> Result<Self> {
        options.validate()?;

        Ok(Self {
            api_version: API_VERSION.to_string(),
            kind: KIND.to_string(),
            metadata: ObjectMeta {
                name: Some(options.name.clone()),
                namespace: options.namespace.clone().filter(|ns| !ns.is_empty()),
                ..Default::default()
            },
            folder: options.folder.clone(),
            spec,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_requires_folder() {
        let options = ManifestOptions::new("web", "");
        assert_eq!(options.validate(), Err(ManifestError::MissingFolder));
    }

    #[test]
    fn test_validate_requires_name() {
        let options = ManifestOptions::new("", "Team");
        assert_eq!(options.validate(), Err(ManifestError::MissingName));
    }

    #[test]
    fn test_new_manifest() {
        let options = ManifestOptions::new("web", "Team").with_namespace("monitoring");
        let manifest = DashboardManifest::new(&options, DashboardModel::default()).unwrap();

        assert_eq!(manifest.api_version, API_VERSION);
        assert_eq!(manifest.kind, KIND);
        assert_eq!(manifest.metadata.name.as_deref(), Some("web"));
        assert_eq!(manifest.metadata.namespace.as_deref(), Some("monitoring"));
        assert_eq!(manifest.folder, "Team");
    }

    #[test]
    fn test_empty_namespace_is_omitted() {
        let options = ManifestOptions::new("web", "Team").with_namespace("");
        let manifest = DashboardManifest::new(&options, DashboardModel::default()).unwrap();

        assert!(manifest.metadata.namespace.is_none());
    }
}
