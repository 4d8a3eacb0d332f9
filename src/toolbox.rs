//! Interactive toolbox menu.
//!
//! A persistent menu that keeps prompting for an action until the user picks
//! `Exit` or cancels the prompt. Selected-only mode is toggled from the menu
//! and applies to every later action. Each action starts from a fresh scan of
//! the document.

use crate::document::{Document, ObjectFilter, Scope};
use crate::renamer::{RenameOptions, rename_unique};
use crate::report;
use crate::uniquifier::SuffixPattern;
use crate::working_set::WorkingSetOptions;
use anyhow::Result;
use colored::Colorize;
use dialoguer::Select;
use dialoguer::theme::ColorfulTheme;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    SelectedObjects,
    NameStats,
    ListNames,
    RenameDry,
    RenameApply,
    Exit,
}

impl MenuAction {
    pub const ALL: [MenuAction; 6] = [
        MenuAction::SelectedObjects,
        MenuAction::NameStats,
        MenuAction::ListNames,
        MenuAction::RenameDry,
        MenuAction::RenameApply,
        MenuAction::Exit,
    ];

    /// Highlighted when the menu opens.
    pub const DEFAULT: MenuAction = MenuAction::ListNames;

    pub fn label(self) -> &'static str {
        match self {
            MenuAction::SelectedObjects => "SelectedObjects",
            MenuAction::NameStats => "NameStats",
            MenuAction::ListNames => "ListNames",
            MenuAction::RenameDry => "RenameDry",
            MenuAction::RenameApply => "RenameApply",
            MenuAction::Exit => "Exit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Result of handling one menu action.
#[derive(Debug)]
pub struct Step {
    pub flow: Flow,
    /// Text to show the user.
    pub output: String,
}

/// Settings fixed for the lifetime of the toolbox.
#[derive(Debug, Clone)]
pub struct ToolboxSettings {
    pub include_unnamed: bool,
    pub suffix: SuffixPattern,
}

impl Default for ToolboxSettings {
    fn default() -> Self {
        Self {
            include_unnamed: true,
            suffix: SuffixPattern::default(),
        }
    }
}

pub struct Toolbox<'a, D: Document + ?Sized> {
    doc: &'a mut D,
    settings: ToolboxSettings,
    selected_only: bool,
}

impl<'a, D: Document + ?Sized> Toolbox<'a, D> {
    pub fn new(doc: &'a mut D, settings: ToolboxSettings) -> Self {
        Self {
            doc,
            settings,
            selected_only: false,
        }
    }

    pub fn selected_only(&self) -> bool {
        self.selected_only
    }

    pub fn prompt(&self) -> String {
        format!("Choose action (Selected only: {})", on_off(self.selected_only))
    }

    fn working_set(&self) -> WorkingSetOptions {
        WorkingSetOptions {
            include_unnamed: self.settings.include_unnamed,
            include_hidden: true,
            ..Default::default()
        }
        .selected_only(self.selected_only)
    }

    /// Runs one menu action against the document.
    pub fn handle(&mut self, action: MenuAction) -> Result<Step> {
        let mut output = String::new();

        match action {
            MenuAction::Exit => {
                writeln!(output, "Exiting toolbox.")?;
                return Ok(Step {
                    flow: Flow::Exit,
                    output,
                });
            }
            MenuAction::SelectedObjects => {
                self.selected_only = !self.selected_only;
                writeln!(output, "Selected only mode is now {}", on_off(self.selected_only))?;
                writeln!(output)?;
                return Ok(Step {
                    flow: Flow::Continue,
                    output,
                });
            }
            _ => {}
        }

        if self.selected_only
            && self
                .doc
                .list_objects(Scope::CurrentSelection, &ObjectFilter::default())
                .is_empty()
        {
            writeln!(
                output,
                "{} Selected only mode is ON but no objects are selected.",
                "warn:".yellow().bold()
            )?;
            writeln!(output, "Please select some objects and try again.")?;
            writeln!(output)?;
            return Ok(Step {
                flow: Flow::Continue,
                output,
            });
        }

        let working_set = self.working_set();
        match action {
            MenuAction::NameStats => {
                let stats = report::name_stats(&*self.doc, &working_set);
                output.push_str(&report::render_stats(&stats));
                writeln!(output, "Name Stats Complete.\n")?;
            }
            MenuAction::ListNames => {
                let listed = report::list_objects(&*self.doc, &working_set, true);
                output.push_str(&report::render_listing(&listed));
                writeln!(output, "List Names Complete.\n")?;
            }
            MenuAction::RenameDry | MenuAction::RenameApply => {
                let dry_run = action == MenuAction::RenameDry;
                let options = RenameOptions {
                    working_set,
                    suffix: self.settings.suffix.clone(),
                    dry_run,
                };
                let outcome = rename_unique(&mut *self.doc, &options);
                output.push_str(&report::render_rename(&outcome));
                if dry_run {
                    writeln!(output, "Dry run complete.\n")?;
                } else {
                    self.doc.flush()?;
                    writeln!(output, "Rename operation complete.\n")?;
                }
            }
            MenuAction::SelectedObjects | MenuAction::Exit => unreachable!("handled above"),
        }

        Ok(Step {
            flow: Flow::Continue,
            output,
        })
    }

    /// Prompts until the user exits or cancels.
    pub fn run(&mut self) -> Result<()> {
        let theme = ColorfulTheme::default();
        let labels: Vec<&str> = MenuAction::ALL.iter().map(|a| a.label()).collect();
        let default = MenuAction::ALL
            .iter()
            .position(|&a| a == MenuAction::DEFAULT)
            .unwrap_or(0);

        loop {
            let choice = Select::with_theme(&theme)
                .with_prompt(self.prompt())
                .items(&labels)
                .default(default)
                .interact_opt()?;

            let Some(index) = choice else {
                println!("Toolbox cancelled.");
                return Ok(());
            };

            let step = self.handle(MenuAction::ALL[index])?;
            print!("{}", step.output);
            if step.flow == Flow::Exit {
                return Ok(());
            }
        }
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag { "ON" } else { "OFF" }
}
