//! Project and client catalog file.
//!
//! ```toml
//! [[projects]]
//! id = "0005"
//! code = "Support"
//! sub_code = "Ongoing"
//! description = "Engineering support to individual clients"
//!
//! [[clients]]
//! id = "0001"
//! code = "aba"
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Format, Toml};
use serde::Deserialize;

use hours_core::{Client, ClientCatalog, Project, ProjectCatalog};

#[derive(Debug, Default, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    projects: Vec<Project>,
    #[serde(default)]
    clients: Vec<Client>,
}

/// The loaded project and client directories.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub projects: ProjectCatalog,
    pub clients: ClientCatalog,
}

impl Catalog {
    /// Reads and indexes the catalog file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("invalid catalog {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let file: CatalogFile = Figment::from(Toml::string(content))
            .extract()
            .context("failed to parse catalog")?;

        let projects = ProjectCatalog::new(file.projects)?;
        let clients = ClientCatalog::new(file.clients)?;
        tracing::debug!(
            projects = projects.len(),
            clients = clients.len(),
            "loaded catalog"
        );
        Ok(Self { projects, clients })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    use hours_core::{ClientDirectory, ProjectDirectory};

    pub(crate) const SAMPLE_CATALOG: &str = r#"
[[projects]]
id = "0002"
code = "Out"

[[projects]]
id = "0005"
code = "Support"
sub_code = "Ongoing"
description = "Engineering support to individual clients"

[[projects]]
id = "0006"
code = "Support"
sub_code = "Setup"
requires_client = true

[[clients]]
id = "0001"
code = "aba"

[[clients]]
id = "0002"
code = "chemonics"
"#;

    #[test]
    fn parses_sample_catalog() {
        let catalog = Catalog::from_toml(SAMPLE_CATALOG).unwrap();
        assert_eq!(catalog.projects.len(), 3);
        assert_eq!(catalog.clients.len(), 2);

        let setup = catalog.projects.get_by_code("Support: Setup").unwrap();
        assert!(setup.requires_client);
        assert_eq!(catalog.clients.get_by_code("ABA").unwrap().id.as_str(), "0001");
    }

    #[test]
    fn empty_catalog_is_valid() {
        let catalog = Catalog::from_toml("").unwrap();
        assert!(catalog.projects.is_empty());
        assert!(catalog.clients.is_empty());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let content = r#"
[[projects]]
id = "1"
code = "Out"

[[projects]]
id = "1"
code = "Overhead"
"#;
        let err = Catalog::from_toml(content).unwrap_err();
        assert!(err.to_string().contains("duplicate project id: 1"), "{err}");
    }

    #[test]
    fn rejects_empty_ids() {
        let content = r#"
[[clients]]
id = ""
code = "aba"
"#;
        assert!(Catalog::from_toml(content).is_err());
    }

    #[test]
    fn missing_file_names_path() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("catalog.toml");
        let err = Catalog::load(&path).unwrap_err();
        assert!(err.to_string().contains("failed to read catalog"), "{err}");
    }
}
