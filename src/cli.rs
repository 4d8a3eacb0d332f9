//! Command-line interface definitions.
//!
//! Defines the argument parser and subcommands using clap's derive API.
//! Each subcommand corresponds to a distinct operation: name statistics,
//! object listing, duplicate renaming, or the interactive toolbox.

use crate::uniquifier::{DEFAULT_SUFFIX_PATTERN, SuffixPattern};
use crate::working_set::WorkingSetOptions;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Inspect CAD document object names and rename duplicates.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// Document file to operate on.
    #[arg(short, long, global = true, default_value = "model.json")]
    pub document: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options selecting the working set.
#[derive(Debug, Clone, clap::Args)]
pub struct ScopeArgs {
    /// Only use the currently selected objects.
    #[arg(short, long)]
    pub selected: bool,

    /// Leave out objects without a name. By default they count as "Object".
    #[arg(long)]
    pub skip_unnamed: bool,

    /// Leave out hidden and locked objects.
    #[arg(long)]
    pub skip_hidden: bool,

    /// Only include objects whose name matches this glob (e.g., "Wall*").
    #[arg(short, long, value_parser = parse_glob)]
    pub name: Option<glob::Pattern>,

    /// Print additional diagnostics to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

impl ScopeArgs {
    pub fn working_set(&self) -> WorkingSetOptions {
        WorkingSetOptions {
            include_unnamed: !self.skip_unnamed,
            include_hidden: !self.skip_hidden,
            name_pattern: self.name.clone(),
            ..Default::default()
        }
        .selected_only(self.selected)
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Report name frequencies and duplicate groups.
    Stats {
        #[command(flatten)]
        scope: ScopeArgs,

        /// Emit JSON instead of human-readable output.
        #[arg(long)]
        json: bool,
    },

    /// List object names and descriptions, marking repeated names.
    List {
        #[command(flatten)]
        scope: ScopeArgs,

        /// Do not print object descriptions.
        #[arg(long)]
        no_descriptions: bool,

        /// Emit JSON instead of human-readable output.
        #[arg(long)]
        json: bool,
    },

    /// Rename duplicates so every name is unique in the document.
    Rename {
        #[command(flatten)]
        scope: ScopeArgs,

        /// Suffix appended to duplicates; `{num}` is replaced by the counter
        /// (e.g., " {num:03d}" or "-{num}").
        #[arg(long, default_value = DEFAULT_SUFFIX_PATTERN)]
        suffix: SuffixPattern,

        /// Actually modify the document (default is dry-run).
        #[arg(long)]
        write: bool,

        /// Confirm before writing changes.
        #[arg(short, long, requires = "write")]
        interactive: bool,

        /// Emit JSON instead of human-readable output.
        #[arg(long)]
        json: bool,
    },

    /// Open the interactive toolbox menu.
    Toolbox {
        /// Suffix appended to duplicates by the rename actions.
        #[arg(long, default_value = DEFAULT_SUFFIX_PATTERN)]
        suffix: SuffixPattern,

        /// Leave out objects without a name.
        #[arg(long)]
        skip_unnamed: bool,
    },
}

fn parse_glob(s: &str) -> Result<glob::Pattern, String> {
    glob::Pattern::new(s).map_err(|e| format!("Invalid name pattern '{}': {}", s, e))
}
