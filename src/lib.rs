//! cad-names library for inspecting and uniquifying CAD object names.
//!
//! The host CAD document is reached through the [`document::Document`]
//! trait; [`json_document::JsonDocument`] is an in-memory implementation
//! backed by a JSON file. The core workflow has three phases:
//!
//! 1. **Collection**: Gather the working set for a scope and filters
//! 2. **Census**: Count names and find duplicate groups
//! 3. **Renaming**: Plan unique names deterministically and write them back
//!
//! # Example
//!
//! ```
//! use cad_names::document::Document;
//! use cad_names::json_document::{DocumentObject, JsonDocument};
//! use cad_names::renamer::{rename_unique, RenameOptions};
//!
//! let mut doc = JsonDocument::from_objects(vec![
//!     DocumentObject::new("a", Some("Wall")),
//!     DocumentObject::new("b", Some("Wall")),
//!     DocumentObject::new("c", Some("Door")),
//! ]);
//!
//! let outcome = rename_unique(&mut doc, &RenameOptions::default());
//! assert_eq!(outcome.renamed, 1);
//! assert_eq!(doc.name(&"b".into()).as_deref(), Some("Wall 001"));
//! ```

pub mod census;
pub mod cli;
pub mod document;
pub mod json_document;
pub mod renamer;
pub mod report;
pub mod toolbox;
pub mod uniquifier;
pub mod working_set;

// Re-export commonly used types at crate root
pub use census::{CensusSummary, NameCensus};
pub use document::{Document, DocumentError, ObjectId, Scope};
pub use renamer::{RenameOptions, RenameOutcome, rename_unique};
pub use uniquifier::{SuffixPattern, next_unique_name};
