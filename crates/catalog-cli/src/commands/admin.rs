//! `catalog admin add | import | export | preview`
//!
//! Each command loads the catalog, performs one admin operation in memory and
//! then saves the target dataset: to `--out`, to the dataset file of a
//! directory catalog, or through the download fallback for remote catalogs.

use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use catalog_core::{
    App, DatasetKind, Exporter, FilePicker, FixedLocation, RecordForm, Status, StatusKind,
};

use super::Context;
use crate::cli::{RecordArgs, SaveArgs};
use crate::error::CliError;
use crate::output::{self, OutputFormat};
use crate::utils::cli_args::FormatArg;
use crate::utils::pickers::{OverwriteGuard, is_interactive};

/// Picker that answers with a path given on the command line.
struct GivenFile(Option<PathBuf>);

impl FilePicker for GivenFile {
    fn pick(&mut self) -> Option<PathBuf> {
        self.0.take()
    }
}

impl From<&RecordArgs> for RecordForm {
    fn from(args: &RecordArgs) -> Self {
        Self {
            name: args.name.clone(),
            icon: args.icon.clone(),
            link: args.link.clone(),
            description: args.description.clone(),
            category: args.category.clone(),
            pricing: args.pricing.clone(),
            pricing_note: args.pricing_note.clone(),
            favourite: args.favourite.clone(),
            difficulty: args.difficulty.clone(),
            resource_type: args.resource_type.clone(),
        }
    }
}

/// Load the catalog and point the admin editor at `kind`.
async fn load_for(ctx: &Context, kind: DatasetKind) -> Result<App> {
    let mut app = ctx.load_app().await?;
    app.select_admin_dataset(kind);
    Ok(app)
}

/// Refuse to build on a dataset whose current contents are unknown.
fn require_loaded(app: &App, kind: DatasetKind) -> Result<()> {
    match app.store().failure_of(kind) {
        Some(failure) => Err(CliError::load_failure(failure).into()),
        None => Ok(()),
    }
}

/// `admin add`: validate the record, append it and save the dataset.
pub async fn add(
    ctx: &Context,
    kind: DatasetKind,
    record: &RecordArgs,
    dry_run: bool,
    save: &SaveArgs,
) -> Result<()> {
    let mut app = load_for(ctx, kind).await?;
    require_loaded(&app, kind)?;
    if !dry_run {
        check_destination(ctx, kind, save)?;
    }

    app.admin_mut().form = RecordForm::from(record);
    let update = app.admin_add();
    if update.status.kind == StatusKind::Error {
        return Err(CliError::usage(anyhow!(update.status.message)).into());
    }
    output::print_status(&update.status);

    if dry_run {
        return print_last_record(&app, kind);
    }
    finish_save(&app, ctx, kind, save)
}

/// `admin import`: replace the dataset with the records of `file` and save it.
pub async fn import(ctx: &Context, kind: DatasetKind, file: &Path, save: &SaveArgs) -> Result<()> {
    if !file.exists() {
        return Err(CliError::not_found(anyhow!("{} does not exist", file.display())).into());
    }
    let mut app = load_for(ctx, kind).await?;
    check_destination(ctx, kind, save)?;

    let update = app.admin_load_file(&mut GivenFile(Some(file.to_path_buf())));
    if update.status.kind == StatusKind::Error {
        return Err(CliError::integrity(anyhow!(update.status.message)).into());
    }
    output::print_status(&update.status);

    finish_save(&app, ctx, kind, save)
}

/// `admin export`: save the dataset as pretty JSON.
pub async fn export(ctx: &Context, kind: DatasetKind, save: &SaveArgs) -> Result<()> {
    let app = load_for(ctx, kind).await?;
    require_loaded(&app, kind)?;
    check_destination(ctx, kind, save)?;
    finish_save(&app, ctx, kind, save)
}

/// `admin preview`: record count and the last entries of the dataset.
pub async fn preview(
    ctx: &Context,
    kind: DatasetKind,
    last: Option<usize>,
    format: &FormatArg,
) -> Result<()> {
    let mut app = load_for(ctx, kind).await?;
    require_loaded(&app, kind)?;
    if let Some(last) = last {
        app.admin_mut().set_preview_entries(last);
    }

    let preview = app.admin().preview(app.store())?;
    match format.resolve() {
        OutputFormat::Text => output::print_preview(&preview),
        format => output::print_machine(format, &preview, [&preview])?,
    }
    Ok(())
}

/// Where the dataset is written, or `None` for the download fallback.
fn destination(ctx: &Context, kind: DatasetKind, save: &SaveArgs) -> Option<PathBuf> {
    save.out.clone().or_else(|| ctx.dataset_path(kind))
}

/// Fail early when the destination exists and nobody can confirm the overwrite.
fn check_destination(ctx: &Context, kind: DatasetKind, save: &SaveArgs) -> Result<()> {
    match destination(ctx, kind, save) {
        Some(path) if path.exists() && !save.yes && !is_interactive() => Err(CliError::usage(
            anyhow!("{} already exists; pass --yes to overwrite it", path.display()),
        )
        .into()),
        _ => Ok(()),
    }
}

fn finish_save(app: &App, ctx: &Context, kind: DatasetKind, save: &SaveArgs) -> Result<()> {
    let download_dir = ctx.config.download_dir();
    let status = match destination(ctx, kind, save) {
        Some(path) if save.yes => {
            app.admin_save(&mut Exporter::with_picker(&mut FixedLocation(path), download_dir))
        },
        Some(path) => {
            let mut guard = OverwriteGuard::new(path);
            app.admin_save(&mut Exporter::with_picker(&mut guard, download_dir))
        },
        None => app.admin_save(&mut Exporter::download(download_dir)),
    };
    report(&status)
}

fn report(status: &Status) -> Result<()> {
    output::print_status(status);
    match status.kind {
        StatusKind::Error => Err(CliError::internal(anyhow!(status.message.clone())).into()),
        StatusKind::Success | StatusKind::Info => Ok(()),
    }
}

fn print_last_record(app: &App, kind: DatasetKind) -> Result<()> {
    let store = app.store();
    match kind {
        DatasetKind::Tools => output::print_json(&store.tools().records().last()),
        DatasetKind::Learning => output::print_json(&store.learning().records().last()),
        DatasetKind::McpServers => output::print_json(&store.mcp_servers().records().last()),
    }
}
