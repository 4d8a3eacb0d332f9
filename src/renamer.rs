//! Duplicate renaming.
//!
//! The rename pass works in two phases:
//!
//! 1. **Planning** ([`plan`]): pure. Takes the working set and every name in
//!    the document, and decides a new name for each duplicate-group member.
//! 2. **Applying** ([`rename_unique`]): writes planned names through the host
//!    with redraw suspended, skipping objects the host refuses to rename.
//!
//! Members are visited in `(name, id)` order, so the same document always
//! produces the same plan regardless of host iteration order. Within each
//! duplicate group the first member keeps the bare name when nothing outside
//! the group uses it; every other member gets the next free suffix.

use crate::census::{CensusSummary, NameCensus};
use crate::document::{Document, ObjectId, RedrawGuard};
use crate::uniquifier::{SuffixCursor, SuffixPattern, UsedNames, next_unique_name};
use crate::working_set::{self, Member, WorkingSetOptions};
use colored::Colorize;
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct RenameOptions {
    pub working_set: WorkingSetOptions,
    pub suffix: SuffixPattern,
    /// Plan and report only; never touch the document.
    pub dry_run: bool,
}

/// How a rename pass ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenameStatus {
    /// The working set was empty.
    NoObjects,
    /// Every name in the working set was already unique.
    NoDuplicates,
    Completed,
}

/// A single planned name change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedRename {
    pub id: ObjectId,
    /// Raw name before the pass, `None` if unnamed.
    pub from: Option<String>,
    pub to: String,
}

/// A planned rename the host rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenameFailure {
    #[serde(flatten)]
    pub rename: PlannedRename,
    pub error: String,
}

/// Result of [`rename_unique`].
#[derive(Debug, Clone, Serialize)]
pub struct RenameOutcome {
    pub status: RenameStatus,
    pub dry_run: bool,
    pub summary: CensusSummary,
    /// Census of the working set taken before any rename.
    pub census: NameCensus,
    /// Every planned change, in traversal order.
    pub planned: Vec<PlannedRename>,
    /// Names written to the document.
    pub renamed: usize,
    /// Names that differ from the plan; equals `renamed` in a clean apply run.
    pub would_rename: usize,
    pub failures: Vec<RenameFailure>,
}

impl RenameOutcome {
    fn without_changes(status: RenameStatus, census: NameCensus, dry_run: bool) -> Self {
        Self {
            status,
            dry_run,
            summary: census.summary(),
            census,
            planned: Vec::new(),
            renamed: 0,
            would_rename: 0,
            failures: Vec::new(),
        }
    }
}

/// Builds the census of a working set, counting unnamed members under the fallback name.
pub fn census_of(members: &[Member]) -> NameCensus {
    NameCensus::from_names(members.iter().map(Member::effective_name))
}

/// Decides new names for every duplicate-group member of `members`.
///
/// `document_names` must list every named object in the whole document.
/// Names held by objects outside the duplicate groups are reserved up front,
/// so generated names never collide with anything in the document.
pub fn plan(
    members: &[Member],
    census: &NameCensus,
    document_names: &[(ObjectId, String)],
    pattern: &SuffixPattern,
) -> Vec<PlannedRename> {
    let mut to_process: Vec<&Member> = members
        .iter()
        .filter(|m| census.is_duplicate(m.effective_name()))
        .collect();
    let processed_ids: HashSet<&ObjectId> = to_process.iter().map(|m| &m.id).collect();

    let mut used: UsedNames = document_names
        .iter()
        .filter(|(id, _)| !processed_ids.contains(id))
        .map(|(_, name)| name.as_str())
        .collect();
    used.extend(
        census
            .iter()
            .filter(|&(_, count)| count == 1)
            .map(|(name, _)| name),
    );

    to_process.sort_by(|a, b| {
        a.effective_name()
            .cmp(b.effective_name())
            .then_with(|| a.id.cmp(&b.id))
    });

    let mut cursor = SuffixCursor::default();
    let mut resolved: HashSet<&str> = HashSet::new();
    let mut planned = Vec::new();

    for member in to_process {
        let base = member.effective_name();

        let new_name = if resolved.insert(base) && used.reserve(base) {
            base.to_string()
        } else {
            next_unique_name(base, pattern, &mut used, &mut cursor, 1)
        };

        if member.name.as_deref() != Some(new_name.as_str()) {
            planned.push(PlannedRename {
                id: member.id.clone(),
                from: member.name.clone(),
                to: new_name,
            });
        }
    }

    planned
}

/// Renames duplicate names in the working set so every name is unique in the document.
///
/// Rejected writes are reported as warnings and collected in
/// [`RenameOutcome::failures`]; the pass carries on with the remaining objects.
pub fn rename_unique<D: Document + ?Sized>(doc: &mut D, options: &RenameOptions) -> RenameOutcome {
    let members = working_set::collect(doc, &options.working_set);
    let census = census_of(&members);

    if members.is_empty() {
        return RenameOutcome::without_changes(RenameStatus::NoObjects, census, options.dry_run);
    }
    if !census.has_duplicates() {
        return RenameOutcome::without_changes(RenameStatus::NoDuplicates, census, options.dry_run);
    }

    let planned = plan(&members, &census, &doc.named_objects(), &options.suffix);

    let mut outcome = RenameOutcome {
        status: RenameStatus::Completed,
        dry_run: options.dry_run,
        summary: census.summary(),
        census,
        would_rename: planned.len(),
        planned: Vec::new(),
        renamed: 0,
        failures: Vec::new(),
    };

    if !options.dry_run {
        let mut doc = RedrawGuard::new(doc);
        for rename in &planned {
            match doc.set_name(&rename.id, &rename.to) {
                Ok(()) => outcome.renamed += 1,
                Err(e) => {
                    eprintln!(
                        "{} Could not rename {} to '{}': {}",
                        "warn:".yellow().bold(),
                        rename.id,
                        rename.to,
                        e
                    );
                    outcome.failures.push(RenameFailure {
                        rename: rename.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }
    }

    outcome.planned = planned;
    outcome
}
