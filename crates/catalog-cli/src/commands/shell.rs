//! `catalog admin shell`: an interactive session over one loaded catalog.
//!
//! The session keeps a single [`App`] alive, so records added or imported
//! here are visible while browsing until they are saved or the session ends.

use std::fmt;

use anyhow::{Result, anyhow};
use catalog_core::admin::FieldInput;
use catalog_core::query::ALL_CATEGORIES;
use catalog_core::{App, DatasetKind, Event, Exporter, Section, View};
use inquire::{InquireError, Select, Text};

use super::Context;
use crate::error::CliError;
use crate::output;
use crate::utils::pickers::{PromptFilePicker, PromptSaveLocation, is_interactive};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Action {
    Section,
    Category,
    Search,
    Stats,
    Target,
    Add,
    Load,
    Save,
    Preview,
    Quit,
}

impl Action {
    const ALL: [Self; 10] = [
        Self::Section,
        Self::Category,
        Self::Search,
        Self::Stats,
        Self::Target,
        Self::Add,
        Self::Load,
        Self::Save,
        Self::Preview,
        Self::Quit,
    ];
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Section => "Switch section",
            Self::Category => "Pick category",
            Self::Search => "Search",
            Self::Stats => "Show stats",
            Self::Target => "Admin: choose dataset",
            Self::Add => "Admin: add record",
            Self::Load => "Admin: load from file",
            Self::Save => "Admin: save dataset",
            Self::Preview => "Admin: preview",
            Self::Quit => "Quit",
        })
    }
}

/// Run the interactive session until the user quits.
pub async fn execute(ctx: &Context) -> Result<()> {
    if !is_interactive() {
        return Err(CliError::usage(anyhow!("admin shell needs an interactive terminal")).into());
    }

    let mut app = ctx.load_app().await?;
    show(&app.current_view());

    loop {
        let action = match Select::new("What next?", Action::ALL.to_vec()).prompt() {
            Ok(action) => action,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e.into()),
        };

        match action {
            Action::Quit => break,
            Action::Stats => output::print_stats(&app.stats()),
            Action::Save => {
                let mut picker = PromptSaveLocation::new(ctx.config.download_dir());
                let status =
                    app.admin_save(&mut Exporter::with_picker(&mut picker, ctx.config.download_dir()));
                output::print_status(&status);
            },
            Action::Load => {
                let update = app.admin_load_file(&mut PromptFilePicker);
                output::print_status(&update.status);
                show_opt(update.view.as_ref());
            },
            Action::Add => {
                if fill_form(&mut app)? {
                    let update = app.admin_add();
                    output::print_status(&update.status);
                    show_opt(update.view.as_ref());
                }
            },
            Action::Preview => match app.admin().preview(app.store()) {
                Ok(preview) => output::print_preview(&preview),
                Err(e) => eprintln!("{e}"),
            },
            Action::Target => {
                if let Some(kind) = skippable(Select::new("Dataset:", DatasetKind::ALL.to_vec()).prompt())? {
                    show_opt(app.select_admin_dataset(kind).as_ref());
                }
            },
            Action::Section | Action::Category | Action::Search => {
                if let Some(event) = navigation_event(&app, action)? {
                    show_opt(app.dispatch(event).as_ref());
                }
            },
        }
    }
    Ok(())
}

fn navigation_event(app: &App, action: Action) -> Result<Option<Event>> {
    let section = app.selection().section;
    let event = match action {
        Action::Section => skippable(Select::new("Section:", Section::ALL.to_vec()).prompt())?
            .map(Event::SelectSection),
        Action::Category => {
            let Some(kind) = section.dataset() else {
                eprintln!("The admin section has no categories.");
                return Ok(None);
            };
            let mut options = vec![ALL_CATEGORIES.to_string()];
            options.extend(categories_of(app, kind));
            skippable(Select::new("Category:", options).prompt())?
                .map(|category| Event::SelectCategory { section, category })
        },
        _ => skippable(
            Text::new("Search:")
                .with_initial_value(&app.selection().search)
                .prompt(),
        )?
        .map(|term| Event::Search { section, term }),
    };
    Ok(event)
}

fn categories_of(app: &App, kind: DatasetKind) -> Vec<String> {
    let store = app.store();
    match kind {
        DatasetKind::Tools => catalog_core::query::categories(store.tools().records()),
        DatasetKind::Learning => catalog_core::query::categories(store.learning().records()),
        DatasetKind::McpServers => catalog_core::query::categories(store.mcp_servers().records()),
    }
}

/// Prompt for every field of the admin form; `false` when the user backed out.
fn fill_form(app: &mut App) -> Result<bool> {
    let fields = app.admin().fields();
    for field in fields {
        let label = if field.required {
            format!("{}:", field.label)
        } else {
            format!("{} (optional):", field.label)
        };
        let answer = match field.input {
            FieldInput::Choice(options) => {
                skippable(Select::new(&label, options.to_vec()).prompt())?.map(str::to_string)
            },
            FieldInput::Suggest(options) => {
                let help = options.join(", ");
                skippable(Text::new(&label).with_help_message(&help).prompt())?
            },
            FieldInput::Text | FieldInput::TextArea => skippable(Text::new(&label).prompt())?,
        };
        let Some(answer) = answer else {
            return Ok(false);
        };
        app.admin_mut().form.set(field.key, answer);
    }
    Ok(true)
}

fn skippable<T>(result: inquire::error::InquireResult<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn show(view: &View) {
    match view {
        View::Catalog(section) => output::print_section(section),
        View::Admin(admin) => output::print_admin_view(admin),
    }
}

fn show_opt(view: Option<&View>) {
    if let Some(view) = view {
        show(view);
    }
}
