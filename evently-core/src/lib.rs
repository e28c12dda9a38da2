//! Core types for evently.
//!
//! This crate provides everything the front ends share:
//! - `Event`, `Category` and `User` records as served by the backend
//! - `query` for filtering events and resolving category names
//! - `datetime` for local form and display strings
//! - `draft` for the create/edit payloads
//! - `config` for the on-disk configuration

pub mod catalog;
pub mod config;
pub mod criteria;
pub mod datetime;
pub mod draft;
pub mod error;
pub mod event;
pub mod normalize;
pub mod query;

// Re-export the common types at crate root for convenience
pub use catalog::Catalog;
pub use criteria::FilterCriteria;
pub use draft::EventDraft;
pub use error::{EventlyError, EventlyResult};
pub use event::{Category, Event, User};
pub use query::{EventQueryEngine, UnknownCategory};
