//! Parse failures reported to the caller.
//!
//! Every failure is recoverable: the entry text is the only thing a user can
//! change, so each variant carries the offending input verbatim.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::types::{ClientId, ProjectId};

/// A time entry could not be parsed or resolved.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No valid duration token was found.
    #[error("an entry must include a duration")]
    NoDuration { input: String },

    /// More than one valid duration token was found.
    #[error("an entry can only have one duration")]
    MultipleDurations { input: String },

    /// No project tag was found.
    #[error("an entry must include a project code")]
    NoProject { input: String },

    /// More than one project tag was found.
    #[error("an entry can only have one project code")]
    MultipleProjects { input: String },

    /// The project tag resolved to no project, or to several.
    #[error("the project code \"{code}\" doesn't match a known project")]
    ProjectNotFound { input: String, code: String },

    /// More than one client tag was found.
    #[error("an entry can only include one client code")]
    MultipleClients { input: String },

    /// The client tag resolved to no client.
    #[error("the client code \"{code}\" doesn't match a known client")]
    ClientNotFound { input: String, code: String },
}

impl ParseError {
    pub const fn kind(&self) -> ParseErrorKind {
        match self {
            Self::NoDuration { .. } => ParseErrorKind::NoDuration,
            Self::MultipleDurations { .. } => ParseErrorKind::MultipleDurations,
            Self::NoProject { .. } => ParseErrorKind::NoProject,
            Self::MultipleProjects { .. } => ParseErrorKind::MultipleProjects,
            Self::ProjectNotFound { .. } => ParseErrorKind::ProjectNotFound,
            Self::MultipleClients { .. } => ParseErrorKind::MultipleClients,
            Self::ClientNotFound { .. } => ParseErrorKind::ClientNotFound,
        }
    }

    pub const fn stage(&self) -> Stage {
        self.kind().stage()
    }

    /// The raw entry text that failed to parse.
    pub fn input(&self) -> &str {
        match self {
            Self::NoDuration { input }
            | Self::MultipleDurations { input }
            | Self::NoProject { input }
            | Self::MultipleProjects { input }
            | Self::ProjectNotFound { input, .. }
            | Self::MultipleClients { input }
            | Self::ClientNotFound { input, .. } => input,
        }
    }
}

/// Stable machine-readable tag for a [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParseErrorKind {
    NoDuration,
    MultipleDurations,
    NoProject,
    ProjectNotFound,
    MultipleProjects,
    ClientNotFound,
    MultipleClients,
}

impl ParseErrorKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NoDuration => "NO_DURATION",
            Self::MultipleDurations => "MULTIPLE_DURATIONS",
            Self::NoProject => "NO_PROJECT",
            Self::ProjectNotFound => "PROJECT_NOT_FOUND",
            Self::MultipleProjects => "MULTIPLE_PROJECTS",
            Self::ClientNotFound => "CLIENT_NOT_FOUND",
            Self::MultipleClients => "MULTIPLE_CLIENTS",
        }
    }

    pub const fn stage(&self) -> Stage {
        match self {
            Self::NoDuration | Self::MultipleDurations => Stage::Duration,
            Self::NoProject | Self::ProjectNotFound | Self::MultipleProjects => Stage::Project,
            Self::ClientNotFound | Self::MultipleClients => Stage::Client,
        }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Pipeline stages, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Duration,
    Project,
    Client,
}

/// A project or client catalog could not be built.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate project id: {id}")]
    DuplicateProjectId { id: ProjectId },

    #[error("duplicate client id: {id}")]
    DuplicateClientId { id: ClientId },

    /// Two clients share a code, ignoring case.
    #[error("duplicate client code: {code}")]
    DuplicateClientCode { code: String },

    #[error("entry {id} has an empty code")]
    EmptyCode { id: String },

    /// The code contains characters a tag cannot match, so the entry could
    /// never be referenced.
    #[error("entry {id} has code {code:?}, which cannot be written as a tag")]
    UntypeableCode { id: String, code: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_tags_are_stable() {
        let err = ParseError::ProjectNotFound {
            input: "1h #nope".to_string(),
            code: "nope".to_string(),
        };
        assert_eq!(err.kind().as_str(), "PROJECT_NOT_FOUND");
        assert_eq!(err.stage(), Stage::Project);
        assert_eq!(err.input(), "1h #nope");
        assert_eq!(
            err.to_string(),
            "the project code \"nope\" doesn't match a known project"
        );
    }

    #[test]
    fn stages_are_ordered() {
        assert!(Stage::Duration < Stage::Project);
        assert!(Stage::Project < Stage::Client);
        assert_eq!(ParseErrorKind::MultipleClients.stage(), Stage::Client);
        assert_eq!(ParseErrorKind::NoDuration.stage(), Stage::Duration);
    }

    #[test]
    fn kind_serializes_as_tag() {
        let json = serde_json::to_string(&ParseErrorKind::MultipleDurations).unwrap();
        assert_eq!(json, "\"MULTIPLE_DURATIONS\"");
    }

    #[test]
    fn catalog_error_messages() {
        let errors = [
            CatalogError::DuplicateProjectId {
                id: ProjectId::new("0001").unwrap(),
            },
            CatalogError::DuplicateClientId {
                id: ClientId::new("0002").unwrap(),
            },
            CatalogError::DuplicateClientCode {
                code: "ABA".to_string(),
            },
            CatalogError::EmptyCode {
                id: "x".to_string(),
            },
            CatalogError::UntypeableCode {
                id: "0008".to_string(),
                code: "Tech wealth".to_string(),
            },
        ];
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();

        insta::assert_snapshot!(messages.join("\n"), @r#"
        duplicate project id: 0001
        duplicate client id: 0002
        duplicate client code: ABA
        entry x has an empty code
        entry 0008 has code "Tech wealth", which cannot be written as a tag
        "#);
    }
}
