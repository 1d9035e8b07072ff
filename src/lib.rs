//! Kinovault — person metadata from kinopoisk.dev, shaped for note templates.
//!
//! Two pipelines do the real work: [`normalize`] turns a full person record
//! into a template-ready [`NoteRecord`] (sanitized, link-formatted,
//! array-shaped for frontmatter embedding, related persons resolved through
//! an injected [`PersonFetcher`]), and [`rank`] orders search candidates for
//! the selection UI. [`KinopoiskClient`] is the HTTP collaborator behind
//! both; note storage, template substitution, and UI belong to the caller.

pub mod config;
pub mod error;
pub mod links;
pub mod normalize;
pub mod provider;
pub mod rank;
pub mod resolver;
pub mod sanitize;
pub mod types;

pub use config::Settings;
pub use error::Error;
pub use normalize::normalize;
pub use provider::KinopoiskClient;
pub use rank::rank;
pub use resolver::{resolve_all, PersonFetcher};
pub use types::{FullPersonRecord, NoteRecord, PersonStub, SearchCandidate, StubKind};
