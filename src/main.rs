//! cad-names: inspect CAD document object names and rename duplicates.
//!
//! Loads a document, reports name statistics or listings, and renames
//! duplicate names so every object name is unique. Renaming is a dry run
//! unless `--write` is given.

use anyhow::{Context, Result};
use cad_names::cli::{Args, Commands, ScopeArgs};
use cad_names::document::Document;
use cad_names::json_document::JsonDocument;
use cad_names::renamer::{self, RenameOptions};
use cad_names::report;
use cad_names::toolbox::{Toolbox, ToolboxSettings};
use cad_names::uniquifier::SuffixPattern;
use clap::Parser;
use colored::Colorize;
use dialoguer::Confirm;
use std::path::Path;

fn main() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Commands::Stats { scope, json } => cmd_stats(&args.document, &scope, json),
        Commands::List {
            scope,
            no_descriptions,
            json,
        } => cmd_list(&args.document, &scope, !no_descriptions, json),
        Commands::Rename {
            scope,
            suffix,
            write,
            interactive,
            json,
        } => cmd_rename(&args.document, &scope, suffix, write, interactive, json),
        Commands::Toolbox {
            suffix,
            skip_unnamed,
        } => cmd_toolbox(&args.document, suffix, skip_unnamed),
    }
}

fn load(path: &Path, verbose: bool) -> Result<JsonDocument> {
    let doc = JsonDocument::load(path)?;
    if verbose {
        eprintln!(
            "{} Loaded {} objects from {}",
            "info:".blue().bold(),
            doc.objects().len(),
            path.display()
        );
    }
    Ok(doc)
}

fn cmd_stats(path: &Path, scope: &ScopeArgs, json_output: bool) -> Result<()> {
    let doc = load(path, scope.verbose)?;
    let stats = report::name_stats(&doc, &scope.working_set());

    if json_output {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print!("{}", report::render_stats(&stats));
    }

    Ok(())
}

fn cmd_list(
    path: &Path,
    scope: &ScopeArgs,
    include_description: bool,
    json_output: bool,
) -> Result<()> {
    let doc = load(path, scope.verbose)?;
    let listed = report::list_objects(&doc, &scope.working_set(), include_description);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&listed)?);
    } else {
        print!("{}", report::render_listing(&listed));
    }

    Ok(())
}

fn cmd_rename(
    path: &Path,
    scope: &ScopeArgs,
    suffix: SuffixPattern,
    write: bool,
    interactive: bool,
    json_output: bool,
) -> Result<()> {
    let mut doc = load(path, scope.verbose)?;
    let mut options = RenameOptions {
        working_set: scope.working_set(),
        suffix,
        dry_run: true,
    };

    if write && interactive {
        let preview = renamer::rename_unique(&mut doc, &options);
        print!("{}", report::render_rename(&preview));
        if preview.would_rename == 0 {
            return Ok(());
        }

        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Rename {} object(s) in {}?",
                preview.would_rename,
                path.display()
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("{} No changes written", "info:".blue().bold());
            return Ok(());
        }
        println!();
    }

    options.dry_run = !write;
    let outcome = renamer::rename_unique(&mut doc, &options);

    if write {
        doc.flush()
            .with_context(|| format!("Failed to save {}", path.display()))?;
    }

    if json_output {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print!("{}", report::render_rename(&outcome));
    }

    if scope.verbose {
        eprintln!(
            "{} {} planned, {} written, {} failed",
            "info:".blue().bold(),
            outcome.would_rename,
            outcome.renamed,
            outcome.failures.len()
        );
    }

    if !write && outcome.would_rename > 0 && !json_output {
        println!("\n{} Use --write to apply changes", "hint:".cyan().bold());
    }

    Ok(())
}

fn cmd_toolbox(path: &Path, suffix: SuffixPattern, skip_unnamed: bool) -> Result<()> {
    let mut doc = load(path, false)?;
    let settings = ToolboxSettings {
        include_unnamed: !skip_unnamed,
        suffix,
    };
    Toolbox::new(&mut doc, settings).run()
}
