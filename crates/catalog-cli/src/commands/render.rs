//! `catalog render`

use std::fs;
use std::path::Path;

use anyhow::{Context as _, Result};
use catalog_core::render::html;
use tracing::info;

use super::{Context, catalog_view, view_failure};
use crate::cli::FilterArgs;

/// Render one section as an HTML fragment to stdout or `out`.
pub async fn execute(ctx: &Context, filters: &FilterArgs, out: Option<&Path>) -> Result<()> {
    let mut app = ctx.load_app().await?;
    let view = catalog_view(&mut app, filters)?;
    let fragment = html::render_section(&view);

    match out {
        Some(path) => {
            fs::write(path, &fragment)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("wrote {} section to {}", view.section, path.display());
        },
        None => print!("{fragment}"),
    }

    view_failure(&app, &view).map_or(Ok(()), Err)
}
