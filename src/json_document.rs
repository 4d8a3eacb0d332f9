//! In-memory document backed by a JSON file.
//!
//! Stands in for a live CAD session: objects are loaded from a JSON file,
//! edited in memory through the [`Document`] trait, and written back on
//! [`Document::flush`]. Objects flagged as `reference` behave like objects
//! attached from a worksession reference and refuse renames.

use crate::document::{Document, DocumentError, ObjectFilter, ObjectId, Scope};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    #[default]
    Geometry,
    Grip,
    Light,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Space {
    #[default]
    Model,
    Page,
}

/// One object record as stored in the document file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentObject {
    pub id: ObjectId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub kind: ObjectKind,
    #[serde(default)]
    pub space: Space,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub selected: bool,
    #[serde(default)]
    pub reference: bool,
}

impl DocumentObject {
    /// A visible, unselected model-space geometry object.
    pub fn new(id: impl Into<String>, name: Option<&str>) -> Self {
        Self {
            id: ObjectId::new(id),
            name: name.map(str::to_string),
            description: None,
            kind: ObjectKind::Geometry,
            space: Space::Model,
            hidden: false,
            locked: false,
            selected: false,
            reference: false,
        }
    }

    fn passes(&self, filter: &ObjectFilter) -> bool {
        if !filter.include_hidden && self.hidden {
            return false;
        }
        if !filter.include_locked && self.locked {
            return false;
        }
        match self.kind {
            ObjectKind::Grip => filter.include_grips,
            ObjectKind::Light => filter.include_lights,
            ObjectKind::Geometry => true,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct DocumentFile {
    #[serde(default)]
    objects: Vec<DocumentObject>,
}

/// A document held in memory, optionally tied to the file it was loaded from.
#[derive(Debug, Default)]
pub struct JsonDocument {
    path: Option<PathBuf>,
    objects: Vec<DocumentObject>,
    dirty: bool,
    redraw_depth: usize,
    redraw_suspensions: usize,
}

impl JsonDocument {
    pub fn from_objects(objects: Vec<DocumentObject>) -> Self {
        Self {
            objects,
            ..Self::default()
        }
    }

    /// Loads a document file. The path is remembered for [`Document::flush`].
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let file: DocumentFile = serde_json::from_str(&source)
            .with_context(|| format!("Failed to parse document {}", path.display()))?;

        Ok(Self {
            path: Some(path.to_path_buf()),
            objects: file.objects,
            ..Self::default()
        })
    }

    /// Writes all objects to `path` as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = DocumentFile {
            objects: self.objects.clone(),
        };
        let mut json = serde_json::to_string_pretty(&file)?;
        json.push('\n');
        std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn objects(&self) -> &[DocumentObject] {
        &self.objects
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Number of times redraw was suspended from the fully-enabled state.
    pub fn redraw_suspensions(&self) -> usize {
        self.redraw_suspensions
    }

    pub fn redraw_enabled(&self) -> bool {
        self.redraw_depth == 0
    }

    fn find(&self, id: &ObjectId) -> Option<&DocumentObject> {
        self.objects.iter().find(|o| &o.id == id)
    }
}

impl Document for JsonDocument {
    fn list_objects(&self, scope: Scope, filter: &ObjectFilter) -> Vec<ObjectId> {
        self.objects
            .iter()
            .filter(|o| match scope {
                Scope::AllModelSpace => o.space == Space::Model,
                Scope::CurrentSelection => o.selected,
            })
            .filter(|o| o.passes(filter))
            .map(|o| o.id.clone())
            .collect()
    }

    fn name(&self, id: &ObjectId) -> Option<String> {
        self.find(id).and_then(|o| o.name.clone())
    }

    fn set_name(&mut self, id: &ObjectId, name: &str) -> Result<(), DocumentError> {
        let object = self
            .objects
            .iter_mut()
            .find(|o| &o.id == id)
            .ok_or_else(|| DocumentError::ObjectNotFound(id.clone()))?;

        if object.reference {
            return Err(DocumentError::ReadOnly(id.clone()));
        }

        object.name = Some(name.to_string());
        self.dirty = true;
        Ok(())
    }

    fn description(&self, id: &ObjectId) -> Option<String> {
        self.find(id).and_then(|o| o.description.clone())
    }

    fn is_hidden(&self, id: &ObjectId) -> bool {
        self.find(id).is_some_and(|o| o.hidden)
    }

    fn is_locked(&self, id: &ObjectId) -> bool {
        self.find(id).is_some_and(|o| o.locked)
    }

    fn named_objects(&self) -> Vec<(ObjectId, String)> {
        self.objects
            .iter()
            .filter_map(|o| {
                o.name
                    .as_ref()
                    .filter(|name| !name.is_empty())
                    .map(|name| (o.id.clone(), name.clone()))
            })
            .collect()
    }

    fn suspend_redraw(&mut self) {
        if self.redraw_depth == 0 {
            self.redraw_suspensions += 1;
        }
        self.redraw_depth += 1;
    }

    fn resume_redraw(&mut self) {
        self.redraw_depth = self.redraw_depth.saturating_sub(1);
    }

    fn flush(&mut self) -> Result<(), DocumentError> {
        if !self.dirty {
            return Ok(());
        }
        if let Some(path) = self.path.clone() {
            self.save(&path)
                .map_err(|e| DocumentError::Io(format!("{:#}", e)))?;
        }
        self.dirty = false;
        Ok(())
    }
}
