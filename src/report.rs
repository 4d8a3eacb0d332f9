//! Read-only reports and report rendering.
//!
//! [`name_stats`] and [`list_objects`] never modify the document. The
//! `render_*` functions turn report data (and rename outcomes) into the
//! colored text printed by the CLI and the toolbox.

use crate::census::{CensusSummary, NameCensus};
use crate::document::{Document, ObjectId, is_named};
use crate::renamer::{self, RenameOutcome, RenameStatus};
use crate::working_set::{self, WorkingSetOptions};
use colored::Colorize;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt::{self, Write};

/// Name frequency statistics of a working set.
#[derive(Debug, Clone, Serialize)]
pub struct NameStats {
    pub summary: CensusSummary,
    pub census: NameCensus,
}

/// One row of an object listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListedObject {
    pub id: ObjectId,
    /// Effective name; the fallback name for unnamed objects.
    pub name: String,
    pub unnamed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Set from the second occurrence of a name onward.
    pub duplicate: bool,
}

pub fn name_stats<D: Document + ?Sized>(doc: &D, options: &WorkingSetOptions) -> NameStats {
    let members = working_set::collect(doc, options);
    let census = renamer::census_of(&members);
    NameStats {
        summary: census.summary(),
        census,
    }
}

/// Lists the working set in host order, flagging repeated names as they are met.
pub fn list_objects<D: Document + ?Sized>(
    doc: &D,
    options: &WorkingSetOptions,
    include_description: bool,
) -> Vec<ListedObject> {
    let mut seen = HashSet::new();

    working_set::collect(doc, options)
        .into_iter()
        .map(|member| {
            let name = member.effective_name().to_string();
            let duplicate = !seen.insert(name.clone());
            let description = if include_description {
                doc.description(&member.id)
            } else {
                None
            };
            ListedObject {
                unnamed: !is_named(member.name.as_deref()),
                id: member.id,
                name,
                description,
                duplicate,
            }
        })
        .collect()
}

fn render(write: impl FnOnce(&mut String) -> fmt::Result) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write(&mut out);
    out
}

fn write_stats(out: &mut String, stats: &NameStats) -> fmt::Result {
    let s = &stats.summary;
    writeln!(out, "{}", "----- Object Name Statistics -----".bold())?;
    writeln!(out, "Total objects: {}", s.total_objects)?;
    writeln!(out, "Distinct names: {}", s.distinct_names)?;
    writeln!(out, "Duplicate name groups: {}", s.duplicate_groups)?;
    writeln!(out, "Total duplicate instances: {}", s.duplicate_instances)?;
    writeln!(out)?;

    if s.duplicate_groups == 0 {
        writeln!(out, "{} No duplicate names detected", "ok:".green().bold())?;
        return Ok(());
    }

    writeln!(out, "{}", "Duplicate name frequencies:".bold())?;
    for (name, count) in stats.census.duplicates() {
        writeln!(out, "  {} {}", name.red(), format!("x{}", count).dimmed())?;
    }
    Ok(())
}

pub fn render_stats(stats: &NameStats) -> String {
    render(|out| {
        if stats.census.is_empty() {
            return writeln!(out, "No objects found.");
        }
        write_stats(out, stats)
    })
}

pub fn render_listing(objects: &[ListedObject]) -> String {
    render(|out| {
        if objects.is_empty() {
            return writeln!(out, "No objects found.");
        }

        writeln!(out, "{}", "----- Object List -----".bold())?;
        writeln!(out, "Listing {} objects", objects.len())?;

        for object in objects {
            writeln!(out)?;
            if object.duplicate {
                writeln!(out, "{}", "** DUPLICATE **".red().bold())?;
            }
            let suffix = if object.unnamed { " (unnamed)" } else { "" };
            writeln!(out, "Object Name: {}{}", object.name, suffix.dimmed())?;
            if let Some(description) = &object.description {
                writeln!(out, "Object Description: {}", description)?;
            }
        }
        Ok(())
    })
}

fn quoted(name: Option<&str>) -> String {
    match name {
        Some(name) if !name.is_empty() => format!("'{}'", name),
        _ => "(unnamed)".to_string(),
    }
}

pub fn render_rename(outcome: &RenameOutcome) -> String {
    render(|out| {
        if outcome.status == RenameStatus::NoObjects {
            return writeln!(out, "No objects found.");
        }

        write_stats(
            out,
            &NameStats {
                summary: outcome.summary.clone(),
                census: outcome.census.clone(),
            },
        )?;

        if outcome.status == RenameStatus::NoDuplicates {
            return writeln!(out, "All object names are already unique.");
        }

        writeln!(out)?;
        writeln!(out, "{}", "----- Renaming Duplicates -----".bold())?;

        let failed: HashSet<&ObjectId> = outcome.failures.iter().map(|f| &f.rename.id).collect();
        for rename in &outcome.planned {
            let from = quoted(rename.from.as_deref());
            let to = format!("'{}'", rename.to);
            if outcome.dry_run {
                writeln!(out, "{} {}: {} -> {}", "[DRY]".cyan(), rename.id, from.red(), to.green())?;
            } else if failed.contains(&rename.id) {
                writeln!(out, "{} {}: {} -> {}", "Skipped:".yellow().bold(), rename.id, from, to)?;
            } else {
                writeln!(out, "{} {}: {} -> {}", "Renamed:".bold(), rename.id, from.red(), to.green())?;
            }
        }

        writeln!(out)?;
        if outcome.dry_run {
            writeln!(out, "Done. Would rename {} object(s).", outcome.would_rename)
        } else if outcome.failures.is_empty() {
            writeln!(out, "Done. Renamed {} object(s).", outcome.renamed)
        } else {
            writeln!(
                out,
                "Done. Renamed {} object(s), {} failed.",
                outcome.renamed,
                outcome.failures.len()
            )
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json_document::{DocumentObject, JsonDocument};
    use crate::renamer::{RenameOptions, rename_unique};
    use std::path::PathBuf;

    fn house() -> JsonDocument {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/house.json");
        JsonDocument::load(&path).unwrap()
    }

    fn no_color() {
        colored::control::set_override(false);
    }

    fn walls() -> JsonDocument {
        JsonDocument::from_objects(vec![
            DocumentObject::new("B", Some("Wall")),
            DocumentObject::new("D", Some("Door")),
            DocumentObject::new("A", Some("Wall")),
            DocumentObject::new("C", Some("Wall")),
        ])
    }

    #[test]
    fn stats_match_census() {
        let stats = name_stats(&house(), &WorkingSetOptions::default());
        assert_eq!(
            stats.summary,
            CensusSummary {
                total_objects: 9,
                distinct_names: 5,
                duplicate_groups: 3,
                duplicate_instances: 7,
            }
        );
        assert_eq!(stats.census.count("Object"), 2);
    }

    #[test]
    fn stats_never_modify_the_document() {
        let doc = house();
        let before = doc.objects().to_vec();
        name_stats(&doc, &WorkingSetOptions::default());
        list_objects(&doc, &WorkingSetOptions::default(), true);
        assert_eq!(doc.objects(), before.as_slice());
        assert!(!doc.is_dirty());
    }

    #[test]
    fn listing_flags_repeats_but_not_first_occurrence() {
        let listed = list_objects(&walls(), &WorkingSetOptions::default(), false);
        let flags: Vec<_> = listed
            .iter()
            .map(|o| (o.id.as_str(), o.duplicate))
            .collect();
        assert_eq!(
            flags,
            vec![("B", false), ("D", false), ("A", true), ("C", true)]
        );
    }

    #[test]
    fn listing_includes_descriptions_on_request() {
        let doc = house();
        let with = list_objects(&doc, &WorkingSetOptions::default(), true);
        assert_eq!(with[0].description.as_deref(), Some("North exterior wall"));
        assert_eq!(with[2].description, None);

        let without = list_objects(&doc, &WorkingSetOptions::default(), false);
        assert!(without.iter().all(|o| o.description.is_none()));
    }

    #[test]
    fn listing_treats_unnamed_objects_as_fallback_name() {
        let listed = list_objects(&house(), &WorkingSetOptions::default(), false);
        let u1 = listed.iter().find(|o| o.id.as_str() == "u1").unwrap();
        let u2 = listed.iter().find(|o| o.id.as_str() == "u2").unwrap();
        assert_eq!(u1.name, "Object");
        assert!(u1.unnamed && !u1.duplicate);
        assert!(u2.unnamed && u2.duplicate);
    }

    #[test]
    fn renders_stats() {
        no_color();
        let stats = name_stats(&walls(), &WorkingSetOptions::default());
        insta::assert_snapshot!(render_stats(&stats), @r"
        ----- Object Name Statistics -----
        Total objects: 4
        Distinct names: 2
        Duplicate name groups: 1
        Total duplicate instances: 3

        Duplicate name frequencies:
          Wall x3
        ");
    }

    #[test]
    fn renders_stats_without_duplicates() {
        no_color();
        let doc = JsonDocument::from_objects(vec![DocumentObject::new("a", Some("Roof"))]);
        let stats = name_stats(&doc, &WorkingSetOptions::default());
        insta::assert_snapshot!(render_stats(&stats), @r"
        ----- Object Name Statistics -----
        Total objects: 1
        Distinct names: 1
        Duplicate name groups: 0
        Total duplicate instances: 0

        ok: No duplicate names detected
        ");
    }

    #[test]
    fn renders_empty_reports() {
        no_color();
        let doc = JsonDocument::default();
        let stats = name_stats(&doc, &WorkingSetOptions::default());
        assert_eq!(render_stats(&stats), "No objects found.\n");
        assert_eq!(render_listing(&[]), "No objects found.\n");
    }

    #[test]
    fn renders_listing() {
        no_color();
        let mut door = DocumentObject::new("d", Some("Door"));
        door.description = Some("Front door".to_string());
        let doc = JsonDocument::from_objects(vec![
            door,
            DocumentObject::new("x", None),
            DocumentObject::new("e", Some("Door")),
        ]);
        let listed = list_objects(&doc, &WorkingSetOptions::default(), true);
        insta::assert_snapshot!(render_listing(&listed), @r"
        ----- Object List -----
        Listing 3 objects

        Object Name: Door
        Object Description: Front door

        Object Name: Object (unnamed)

        ** DUPLICATE **
        Object Name: Door
        ");
    }

    #[test]
    fn renders_dry_run() {
        no_color();
        let mut doc = walls();
        let options = RenameOptions {
            dry_run: true,
            ..Default::default()
        };
        let outcome = rename_unique(&mut doc, &options);
        insta::assert_snapshot!(render_rename(&outcome), @r"
        ----- Object Name Statistics -----
        Total objects: 4
        Distinct names: 2
        Duplicate name groups: 1
        Total duplicate instances: 3

        Duplicate name frequencies:
          Wall x3

        ----- Renaming Duplicates -----
        [DRY] B: 'Wall' -> 'Wall 001'
        [DRY] C: 'Wall' -> 'Wall 002'

        Done. Would rename 2 object(s).
        ");
    }

    #[test]
    fn renders_apply_with_failures() {
        no_color();
        let mut linked = DocumentObject::new("b", Some("Beam"));
        linked.reference = true;
        let mut doc = JsonDocument::from_objects(vec![
            DocumentObject::new("a", Some("Beam")),
            linked,
            DocumentObject::new("c", None),
            DocumentObject::new("d", Some("Beam")),
        ]);
        let outcome = rename_unique(&mut doc, &RenameOptions::default());
        let text = render_rename(&outcome);
        assert!(text.contains("Skipped: b: 'Beam' -> 'Beam 001'"));
        assert!(text.contains("Renamed: d: 'Beam' -> 'Beam 002'"));
        assert!(text.contains("Done. Renamed 1 object(s), 1 failed."));
    }

    #[test]
    fn renders_no_duplicates_rename() {
        no_color();
        let mut doc = JsonDocument::from_objects(vec![DocumentObject::new("a", Some("Roof"))]);
        let outcome = rename_unique(&mut doc, &RenameOptions::default());
        let text = render_rename(&outcome);
        assert!(text.ends_with("All object names are already unique.\n"));
    }

    #[test]
    fn renders_unnamed_source_names() {
        no_color();
        let mut doc = JsonDocument::from_objects(vec![
            DocumentObject::new("a", None),
            DocumentObject::new("b", None),
        ]);
        let outcome = rename_unique(&mut doc, &RenameOptions::default());
        let text = render_rename(&outcome);
        assert!(text.contains("Renamed: a: (unnamed) -> 'Object'"));
        assert!(text.contains("Renamed: b: (unnamed) -> 'Object 001'"));
    }
}
