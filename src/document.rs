//! Host document interface.
//!
//! The CAD host owns every object, its attributes and the viewport. This module
//! describes the narrow surface the naming tools need from it: listing objects
//! for a scope, reading and writing names, reading descriptions and visibility
//! flags, and a redraw suspension hint for batch edits.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// Name used in place of an empty object name.
pub const FALLBACK_NAME: &str = "Object";

/// Opaque identifier of a document object. Ordered by string comparison.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObjectId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Which objects an operation starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    #[default]
    AllModelSpace,
    CurrentSelection,
}

/// Host-level listing filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectFilter {
    pub include_hidden: bool,
    pub include_locked: bool,
    pub include_grips: bool,
    pub include_lights: bool,
}

impl Default for ObjectFilter {
    fn default() -> Self {
        Self {
            include_hidden: true,
            include_locked: true,
            include_grips: false,
            include_lights: false,
        }
    }
}

/// Errors reported by the host when an object cannot be modified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("object {0} no longer exists in the document")]
    ObjectNotFound(ObjectId),

    #[error("object {0} is read-only")]
    ReadOnly(ObjectId),

    #[error("failed to write document: {0}")]
    Io(String),
}

/// The slice of the CAD host's scripting API used by the naming tools.
pub trait Document {
    /// Objects in `scope` that pass `filter`, in host iteration order.
    fn list_objects(&self, scope: Scope, filter: &ObjectFilter) -> Vec<ObjectId>;

    /// Current name, `None` when the object is unnamed or unknown.
    fn name(&self, id: &ObjectId) -> Option<String>;

    fn set_name(&mut self, id: &ObjectId, name: &str) -> Result<(), DocumentError>;

    fn description(&self, id: &ObjectId) -> Option<String>;

    fn is_hidden(&self, id: &ObjectId) -> bool;

    fn is_locked(&self, id: &ObjectId) -> bool;

    /// Every named object in the document, regardless of space, visibility or selection.
    fn named_objects(&self) -> Vec<(ObjectId, String)>;

    /// Every name currently assigned anywhere in the document.
    fn all_names(&self) -> HashSet<String> {
        self.named_objects()
            .into_iter()
            .map(|(_, name)| name)
            .collect()
    }

    fn suspend_redraw(&mut self) {}

    fn resume_redraw(&mut self) {}

    /// Commits pending edits to wherever the host keeps them.
    fn flush(&mut self) -> Result<(), DocumentError> {
        Ok(())
    }
}

/// Returns the name used for counting and renaming: the raw name, or
/// [`FALLBACK_NAME`] when it is missing or blank.
pub fn effective_name(raw: Option<&str>) -> &str {
    match raw {
        Some(name) if !name.trim().is_empty() => name,
        _ => FALLBACK_NAME,
    }
}

/// True when the object carries a non-blank name.
pub fn is_named(raw: Option<&str>) -> bool {
    raw.is_some_and(|name| !name.trim().is_empty())
}

/// Suspends redraw for as long as the guard lives.
///
/// Derefs to the wrapped document so edits go through the guard. Redraw is
/// resumed on drop, including early returns and unwinding.
pub struct RedrawGuard<'a, D: Document + ?Sized> {
    doc: &'a mut D,
}

impl<'a, D: Document + ?Sized> RedrawGuard<'a, D> {
    pub fn new(doc: &'a mut D) -> Self {
        doc.suspend_redraw();
        Self { doc }
    }
}

impl<D: Document + ?Sized> std::ops::Deref for RedrawGuard<'_, D> {
    type Target = D;

    fn deref(&self) -> &D {
        self.doc
    }
}

impl<D: Document + ?Sized> std::ops::DerefMut for RedrawGuard<'_, D> {
    fn deref_mut(&mut self) -> &mut D {
        self.doc
    }
}

impl<D: Document + ?Sized> Drop for RedrawGuard<'_, D> {
    fn drop(&mut self) {
        self.doc.resume_redraw();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_name_falls_back_for_blank_names() {
        assert_eq!(effective_name(None), "Object");
        assert_eq!(effective_name(Some("")), "Object");
        assert_eq!(effective_name(Some("   ")), "Object");
        assert_eq!(effective_name(Some("Wall")), "Wall");
    }

    #[test]
    fn effective_name_keeps_surrounding_whitespace_of_real_names() {
        assert_eq!(effective_name(Some(" Wall ")), " Wall ");
    }

    #[test]
    fn is_named_rejects_blank() {
        assert!(!is_named(None));
        assert!(!is_named(Some(" \t")));
        assert!(is_named(Some("Door")));
    }

    #[test]
    fn object_ids_order_as_strings() {
        let mut ids = vec![ObjectId::from("b"), ObjectId::from("A"), ObjectId::from("a")];
        ids.sort();
        let ids: Vec<_> = ids.iter().map(ObjectId::as_str).collect();
        assert_eq!(ids, vec!["A", "a", "b"]);
    }

    #[test]
    fn default_filter_excludes_grips_and_lights() {
        let filter = ObjectFilter::default();
        assert!(filter.include_hidden);
        assert!(filter.include_locked);
        assert!(!filter.include_grips);
        assert!(!filter.include_lights);
    }
}
