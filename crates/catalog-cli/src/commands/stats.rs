//! `catalog stats`

use anyhow::Result;
use catalog_core::DatasetKind;
use tracing::warn;

use super::Context;
use crate::output::{self, OutputFormat};
use crate::utils::cli_args::FormatArg;

/// Print the headline figures of the catalog.
pub async fn execute(ctx: &Context, format: &FormatArg) -> Result<()> {
    let app = ctx.load_app().await?;
    for kind in DatasetKind::ALL {
        if let Some(failure) = app.store().failure_of(kind) {
            warn!("{} ({})", failure.message, failure.cause);
        }
    }

    let stats = app.stats();
    match format.resolve() {
        OutputFormat::Text => output::print_stats(&stats),
        format => output::print_machine(format, &stats, [&stats])?,
    }
    Ok(())
}
