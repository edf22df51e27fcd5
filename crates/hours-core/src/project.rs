//! Projects, the project directory, and project tag extraction.
//!
//! A project tag is `#code` or `#code: subcode`, bounded by whitespace or the
//! ends of the text. `#Ongoing` may stand in for `#Support: Ongoing` when the
//! sub code alone is unambiguous.

use std::collections::HashMap;
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::CatalogError;
use crate::error::ParseError;
use crate::text::is_word_bounded;
use crate::types::ProjectId;

static PROJECT_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"#(?P<code>[A-Za-z0-9-]+(?::\s*[A-Za-z0-9-]+)?)").unwrap()
});

/// A project time can be booked against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub requires_client: bool,
}

impl Project {
    pub fn new(id: ProjectId, code: impl Into<String>) -> Self {
        Self {
            id,
            code: code.into(),
            sub_code: None,
            description: None,
            requires_client: false,
        }
    }

    #[must_use]
    pub fn with_sub_code(mut self, sub_code: impl Into<String>) -> Self {
        self.sub_code = Some(sub_code.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub const fn requiring_client(mut self) -> Self {
        self.requires_client = true;
        self
    }

    /// The tag a user would type for this project, e.g. `#Support: Ongoing`.
    pub fn tag(&self) -> String {
        match &self.sub_code {
            Some(sub_code) => format!("#{}: {sub_code}", self.code),
            None => format!("#{}", self.code),
        }
    }
}

/// Read-only project lookup.
pub trait ProjectDirectory: Send + Sync {
    /// Resolves tag text such as `Support: Ongoing`, `out` or `Ongoing`.
    ///
    /// Returns `None` both when nothing matches and when several projects do.
    fn get_by_code(&self, code: &str) -> Option<&Project>;

    fn get_by_id(&self, id: &ProjectId) -> Option<&Project>;
}

/// Splits `Support: Ongoing` into `("Support", Some("Ongoing"))`.
///
/// A leading `#` is ignored.
pub fn split_project_code(text: &str) -> (&str, Option<&str>) {
    let text = text.trim().trim_start_matches('#');
    match text.split_once(':') {
        Some((code, sub_code)) => (code.trim(), Some(sub_code.trim())),
        None => (text, None),
    }
}

/// True if `code` only uses characters a `#code` tag can match.
fn is_tag_code(code: &str) -> bool {
    code.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// In-memory [`ProjectDirectory`] indexed at construction.
#[derive(Debug, Clone, Default)]
pub struct ProjectCatalog {
    projects: Vec<Project>,
    by_id: HashMap<ProjectId, usize>,
    by_code: HashMap<String, Vec<usize>>,
    by_sub_code: HashMap<String, Vec<usize>>,
}

impl ProjectCatalog {
    /// Builds the catalog, rejecting empty codes and duplicate ids.
    pub fn new(projects: Vec<Project>) -> Result<Self, CatalogError> {
        let mut by_id = HashMap::with_capacity(projects.len());
        let mut by_code: HashMap<String, Vec<usize>> = HashMap::new();
        let mut by_sub_code: HashMap<String, Vec<usize>> = HashMap::new();

        for (index, project) in projects.iter().enumerate() {
            if project.code.trim().is_empty() {
                return Err(CatalogError::EmptyCode {
                    id: project.id.to_string(),
                });
            }
            for code in std::iter::once(&project.code).chain(&project.sub_code) {
                if !is_tag_code(code) {
                    return Err(CatalogError::UntypeableCode {
                        id: project.id.to_string(),
                        code: code.clone(),
                    });
                }
            }
            if by_id.insert(project.id.clone(), index).is_some() {
                return Err(CatalogError::DuplicateProjectId {
                    id: project.id.clone(),
                });
            }
            by_code
                .entry(project.code.to_lowercase())
                .or_default()
                .push(index);
            if let Some(sub_code) = &project.sub_code {
                by_sub_code
                    .entry(sub_code.to_lowercase())
                    .or_default()
                    .push(index);
            }
        }

        tracing::debug!(count = projects.len(), "built project catalog");
        Ok(Self {
            projects,
            by_id,
            by_code,
            by_sub_code,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter()
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    fn indexed<'a>(
        index: &'a HashMap<String, Vec<usize>>,
        key: &str,
    ) -> impl Iterator<Item = usize> + 'a {
        index.get(&key.to_lowercase()).into_iter().flatten().copied()
    }
}

impl ProjectDirectory for ProjectCatalog {
    fn get_by_code(&self, code: &str) -> Option<&Project> {
        let (code, sub_code) = split_project_code(code);

        let matches: Vec<usize> = match sub_code {
            Some(sub_code) => Self::indexed(&self.by_code, code)
                .filter(|&i| {
                    self.projects[i]
                        .sub_code
                        .as_deref()
                        .is_some_and(|s| s.to_lowercase() == sub_code.to_lowercase())
                })
                .collect(),
            None => Self::indexed(&self.by_code, code)
                .filter(|&i| self.projects[i].sub_code.is_none())
                .chain(Self::indexed(&self.by_sub_code, code))
                .collect(),
        };

        match matches.as_slice() {
            [index] => Some(&self.projects[*index]),
            [] => None,
            _ => {
                tracing::debug!(code, ?sub_code, count = matches.len(), "ambiguous project code");
                None
            }
        }
    }

    fn get_by_id(&self, id: &ProjectId) -> Option<&Project> {
        self.by_id.get(id).map(|&i| &self.projects[i])
    }
}

/// A project tag found in an entry, with the project it resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedProjectReference<'a> {
    /// The tag as typed, e.g. `#Support: Ongoing`.
    pub matched_text: String,
    /// Byte range of `matched_text` within the input.
    pub span: Range<usize>,
    pub project: &'a Project,
}

/// Finds the single project tag in `input` and resolves it.
pub fn extract_project<'a, D>(
    input: &str,
    projects: &'a D,
) -> Result<ExtractedProjectReference<'a>, ParseError>
where
    D: ProjectDirectory + ?Sized,
{
    let mut tags = PROJECT_TAG_RE.captures_iter(input).filter_map(|caps| {
        let whole = caps.get(0)?;
        let code = caps.name("code")?;
        is_word_bounded(input, &whole.range()).then_some((whole, code))
    });

    let Some((whole, code)) = tags.next() else {
        return Err(ParseError::NoProject {
            input: input.to_string(),
        });
    };
    if tags.next().is_some() {
        return Err(ParseError::MultipleProjects {
            input: input.to_string(),
        });
    }

    let Some(project) = projects.get_by_code(code.as_str()) else {
        tracing::debug!(code = code.as_str(), "project code did not resolve");
        return Err(ParseError::ProjectNotFound {
            input: input.to_string(),
            code: code.as_str().to_string(),
        });
    };

    tracing::debug!(tag = whole.as_str(), project = %project.id, "resolved project");
    Ok(ExtractedProjectReference {
        matched_text: whole.as_str().to_string(),
        span: whole.range(),
        project,
    })
}
