//! Working set collection.
//!
//! Asks the host for the objects in scope, then applies the per-operation
//! filters: hidden or locked objects, unnamed objects and an optional name
//! glob.

use crate::document::{Document, ObjectFilter, ObjectId, Scope, effective_name, is_named};

/// Options shared by every report and rename operation.
#[derive(Debug, Clone)]
pub struct WorkingSetOptions {
    pub scope: Scope,
    /// Keep objects without a name. They count as the fallback name.
    pub include_unnamed: bool,
    /// Keep hidden and locked objects.
    pub include_hidden: bool,
    /// Only keep objects whose effective name matches this glob.
    pub name_pattern: Option<glob::Pattern>,
}

impl Default for WorkingSetOptions {
    fn default() -> Self {
        Self {
            scope: Scope::AllModelSpace,
            include_unnamed: true,
            include_hidden: true,
            name_pattern: None,
        }
    }
}

impl WorkingSetOptions {
    pub fn selected_only(mut self, selected: bool) -> Self {
        self.scope = if selected {
            Scope::CurrentSelection
        } else {
            Scope::AllModelSpace
        };
        self
    }
}

/// An object of the working set together with its name at collection time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: ObjectId,
    pub name: Option<String>,
}

impl Member {
    pub fn effective_name(&self) -> &str {
        effective_name(self.name.as_deref())
    }
}

/// Collects the working set in host iteration order.
///
/// The host listing always includes hidden and locked objects; the
/// `include_hidden` option is applied afterwards so that locked objects are
/// dropped along with hidden ones.
pub fn collect<D: Document + ?Sized>(doc: &D, options: &WorkingSetOptions) -> Vec<Member> {
    doc.list_objects(options.scope, &ObjectFilter::default())
        .into_iter()
        .filter(|id| options.include_hidden || !(doc.is_hidden(id) || doc.is_locked(id)))
        .map(|id| {
            let name = doc.name(&id);
            Member { id, name }
        })
        .filter(|m| options.include_unnamed || is_named(m.name.as_deref()))
        .filter(|m| {
            options
                .name_pattern
                .as_ref()
                .is_none_or(|p| p.matches(m.effective_name()))
        })
        .collect()
}
