//! `catalog categories`

use anyhow::Result;
use catalog_core::Section;

use super::{Context, catalog_view, view_failure};
use crate::cli::FilterArgs;
use crate::output::{self, OutputFormat};
use crate::utils::cli_args::FormatArg;

/// Print the category pills of `section`, "all" first.
pub async fn execute(ctx: &Context, section: Section, format: &FormatArg) -> Result<()> {
    let mut app = ctx.load_app().await?;
    let filters = FilterArgs {
        section,
        category: None,
        search: String::new(),
    };
    let view = catalog_view(&mut app, &filters)?;
    if let Some(err) = view_failure(&app, &view) {
        return Err(err);
    }

    match format.resolve() {
        OutputFormat::Text => output::print_categories(section, &view.pills),
        format => output::print_machine(format, &view.pills, &view.pills)?,
    }
    Ok(())
}
