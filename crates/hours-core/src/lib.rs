//! Core domain logic for free-text time entries.
//!
//! An entry such as `1h #Support: Ongoing @aba update geography` is parsed into
//! a [`TimeEntry`]:
//! - Duration: one whitespace-delimited token (`1:15`, `1h30`, `45m`, `1.25`)
//! - Project: one `#code` or `#code: subcode` tag, resolved via a [`ProjectDirectory`]
//! - Client: at most one `@code` tag, resolved via a [`ClientDirectory`]
//! - Description: whatever text remains
//!
//! A [`DoneEntry`] records finished work as free text, without a duration or tags.

pub mod client;
pub mod done;
pub mod duration;
pub mod entry;
mod error;
pub mod project;
mod text;
mod types;

pub use client::{Client, ClientCatalog, ClientDirectory, ExtractedClientReference};
pub use done::DoneEntry;
pub use duration::{DurationFormat, ExtractedDuration};
pub use entry::{
    Clock, IdGenerator, ParsedText, SystemClock, TimeEntry, TimeEntryAssembler, TimeEntryInput,
    UuidGenerator,
};
pub use error::{CatalogError, ParseError, ParseErrorKind, Stage};
pub use project::{ExtractedProjectReference, Project, ProjectCatalog, ProjectDirectory};
pub use types::{
    CalendarDate, ClientId, DoneEntryId, ProjectId, TimeEntryId, UserId, ValidationError,
};
