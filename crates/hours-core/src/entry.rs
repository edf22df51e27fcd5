//! Time entries and the pipeline that assembles them from free text.
//!
//! Parsing runs duration, then project, then client extraction and stops at
//! the first failure, so an entry with several problems always reports the
//! earliest stage's error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::{Client, ClientDirectory, ExtractedClientReference, extract_client};
use crate::duration::{ExtractedDuration, extract_duration};
use crate::error::ParseError;
use crate::project::{ExtractedProjectReference, Project, ProjectDirectory, extract_project};
use crate::text::{remove_literals, strip_spans};
use crate::types::{CalendarDate, TimeEntryId, UserId};

/// Source of identifiers for new time entries.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> TimeEntryId;
}

/// Random UUID identifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> TimeEntryId {
        TimeEntryId::generate()
    }
}

/// Source of creation timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// What a user typed for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntryInput {
    pub user_id: UserId,
    pub date: CalendarDate,
    pub raw_text: String,
    /// Generated when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TimeEntryId>,
    /// Taken from the assembler's clock when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl TimeEntryInput {
    pub fn new(user_id: UserId, date: CalendarDate, raw_text: impl Into<String>) -> Self {
        Self {
            user_id,
            date,
            raw_text: raw_text.into(),
            id: None,
            timestamp: None,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: TimeEntryId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub const fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// A parsed and resolved time entry.
///
/// Entries are never edited in place; changing the text produces a new entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntry {
    pub id: TimeEntryId,
    pub user_id: UserId,
    pub date: CalendarDate,
    /// Minutes, always greater than zero.
    pub duration: u32,
    pub project: Project,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<Client>,
    /// The input with the duration and tags removed.
    pub description: String,
    pub raw_text: String,
    pub timestamp: DateTime<Utc>,
}

impl TimeEntry {
    /// Re-embeds the parsed fields as entry text, e.g.
    /// `60min #Support: Ongoing @aba update geography`.
    ///
    /// Parsing the result against the same directories yields the same
    /// duration, project and client.
    pub fn canonical_text(&self) -> String {
        let mut parts = vec![format!("{}min", self.duration), self.project.tag()];
        if let Some(client) = &self.client {
            parts.push(client.tag());
        }
        if !self.description.is_empty() {
            parts.push(self.description.clone());
        }
        parts.join(" ")
    }
}

/// Everything extracted from one entry text, before it becomes a [`TimeEntry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedText<'a> {
    pub duration: ExtractedDuration,
    pub project: ExtractedProjectReference<'a>,
    pub client: Option<ExtractedClientReference<'a>>,
    pub description: String,
}

/// Turns entry text into [`TimeEntry`] values against fixed directories.
///
/// Holds no mutable state; one assembler can serve any number of callers.
pub struct TimeEntryAssembler<'a> {
    projects: &'a dyn ProjectDirectory,
    clients: &'a dyn ClientDirectory,
    ids: Box<dyn IdGenerator + 'a>,
    clock: Box<dyn Clock + 'a>,
}

impl<'a> TimeEntryAssembler<'a> {
    /// Creates an assembler with UUID ids and the system clock.
    pub fn new(projects: &'a dyn ProjectDirectory, clients: &'a dyn ClientDirectory) -> Self {
        Self {
            projects,
            clients,
            ids: Box::new(UuidGenerator),
            clock: Box::new(SystemClock),
        }
    }

    #[must_use]
    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'a) -> Self {
        self.ids = Box::new(ids);
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'a) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Extracts duration, project and client from `raw_text`, in that order.
    pub fn parse_text(&self, raw_text: &str) -> Result<ParsedText<'a>, ParseError> {
        let result = self.extract(raw_text);
        if let Err(err) = &result {
            tracing::debug!(kind = %err.kind(), input = raw_text, "entry rejected");
        }
        result
    }

    fn extract(&self, raw_text: &str) -> Result<ParsedText<'a>, ParseError> {
        let duration = extract_duration(raw_text)?;
        let project = extract_project(raw_text, self.projects)?;
        let client = extract_client(raw_text, self.clients)?;

        let mut spans = vec![duration.span.clone(), project.span.clone()];
        let mut matched = vec![duration.matched_text.as_str(), project.matched_text.as_str()];
        if let Some(client) = &client {
            spans.push(client.span.clone());
            matched.push(client.matched_text.as_str());
        }
        // The matched text must not survive anywhere, even inside another word.
        let description = remove_literals(&strip_spans(raw_text, &spans), &matched);

        Ok(ParsedText {
            duration,
            project,
            client,
            description,
        })
    }

    /// Parses `input.raw_text` and builds the resulting [`TimeEntry`].
    pub fn from_input(&self, input: TimeEntryInput) -> Result<TimeEntry, ParseError> {
        let parsed = self.parse_text(&input.raw_text)?;

        let entry = TimeEntry {
            id: input.id.unwrap_or_else(|| self.ids.next_id()),
            user_id: input.user_id,
            date: input.date,
            duration: parsed.duration.minutes,
            project: parsed.project.project.clone(),
            client: parsed.client.map(|c| c.client.clone()),
            description: parsed.description,
            raw_text: input.raw_text,
            timestamp: input.timestamp.unwrap_or_else(|| self.clock.now()),
        };
        tracing::debug!(
            id = %entry.id,
            minutes = entry.duration,
            project = %entry.project.id,
            "assembled time entry"
        );
        Ok(entry)
    }
}
