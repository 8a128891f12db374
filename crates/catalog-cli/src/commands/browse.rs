//! `catalog browse`

use anyhow::Result;
use catalog_core::{Card, GridId};
use serde::Serialize;

use super::{Context, catalog_view, view_failure};
use crate::cli::BrowseArgs;
use crate::output::{self, OutputFormat};

/// One card per JSON line, tagged with the grid it belongs to.
#[derive(Serialize)]
struct CardLine<'a> {
    grid: GridId,
    #[serde(flatten)]
    card: &'a Card,
}

/// Print the filtered cards of one section.
pub async fn execute(ctx: &Context, args: &BrowseArgs) -> Result<()> {
    let mut app = ctx.load_app().await?;
    let view = catalog_view(&mut app, &args.filters)?;

    match args.format.resolve() {
        OutputFormat::Text => output::print_section(&view),
        format => output::print_machine(
            format,
            &view,
            view.grids.iter().flat_map(|grid| {
                grid.cards.iter().map(move |card| CardLine { grid: grid.id, card })
            }),
        )?,
    }

    view_failure(&app, &view).map_or(Ok(()), Err)
}
