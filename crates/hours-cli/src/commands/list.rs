//! Catalog listing commands (`hours projects`, `hours clients`).

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;

use hours_core::{Client, Project};

use crate::{Catalog, Config};

pub fn projects<W: Write>(writer: &mut W, config: &Config, json: bool) -> Result<()> {
    let catalog = Catalog::load(&config.catalog_path)?;
    let projects: Vec<&Project> = catalog.projects.iter().collect();

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&projects)?)?;
    } else {
        write!(writer, "{}", format_projects(&projects))?;
    }
    Ok(())
}

pub fn clients<W: Write>(writer: &mut W, config: &Config, json: bool) -> Result<()> {
    let catalog = Catalog::load(&config.catalog_path)?;
    let clients: Vec<&Client> = catalog.clients.iter().collect();

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&clients)?)?;
    } else {
        write!(writer, "{}", format_clients(&clients))?;
    }
    Ok(())
}

/// Format projects for human-readable output, one tag per line.
pub fn format_projects(projects: &[&Project]) -> String {
    let mut output = String::new();

    if projects.is_empty() {
        writeln!(output, "No projects in catalog.").unwrap();
        return output;
    }

    let width = projects.iter().map(|p| p.tag().len()).max().unwrap_or(0);
    for project in projects {
        let mut notes = Vec::new();
        if project.requires_client {
            notes.push("[client required]".to_string());
        }
        if let Some(description) = &project.description {
            notes.push(description.clone());
        }
        let line = format!(
            "{:<6}  {:<width$}  {}",
            project.id.as_str(),
            project.tag(),
            notes.join(" ")
        );
        writeln!(output, "{}", line.trim_end()).unwrap();
    }

    output
}

/// Format clients for human-readable output.
pub fn format_clients(clients: &[&Client]) -> String {
    let mut output = String::new();

    if clients.is_empty() {
        writeln!(output, "No clients in catalog.").unwrap();
        return output;
    }

    for client in clients {
        writeln!(output, "{:<6}  {}", client.id.as_str(), client.tag()).unwrap();
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;

    use crate::catalog::tests::SAMPLE_CATALOG;

    #[test]
    fn test_format_projects() {
        let catalog = Catalog::from_toml(SAMPLE_CATALOG).unwrap();
        let projects: Vec<&Project> = catalog.projects.iter().collect();

        assert_snapshot!(format_projects(&projects), @r"
        0002    #Out
        0005    #Support: Ongoing  Engineering support to individual clients
        0006    #Support: Setup    [client required]
        ");
    }

    #[test]
    fn test_format_clients() {
        let catalog = Catalog::from_toml(SAMPLE_CATALOG).unwrap();
        let clients: Vec<&Client> = catalog.clients.iter().collect();

        assert_snapshot!(format_clients(&clients), @r"
        0001    @aba
        0002    @chemonics
        ");
    }

    #[test]
    fn test_empty_catalog() {
        assert_eq!(format_projects(&[]), "No projects in catalog.\n");
        assert_eq!(format_clients(&[]), "No clients in catalog.\n");
    }

    #[test]
    fn test_projects_json() {
        let temp = tempfile::tempdir().unwrap();
        let catalog_path = temp.path().join("catalog.toml");
        std::fs::write(&catalog_path, SAMPLE_CATALOG).unwrap();
        let config = Config {
            catalog_path,
            user_id: "local".to_string(),
        };

        let mut output = Vec::new();
        projects(&mut output, &config, true).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(json[1]["sub_code"], "Ongoing");
        assert_eq!(json[2]["requires_client"], true);
        assert!(json[0].get("sub_code").is_none());
    }
}
