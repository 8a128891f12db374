//! Human-readable text output.

use catalog_core::admin::FieldInput;
use catalog_core::render::CategoryPill;
use catalog_core::{AdminView, CatalogStats, DatasetKind, Grid, GridId, Preview, Section, SectionView, Status};
use colored::Colorize;

use crate::utils::formatting::{detail_badges, plural, status_prefix};

/// Print a catalog section: pills, then each grid with its cards.
pub fn print_section(view: &SectionView) {
    println!("{}", heading(view.section).bold());

    if let Some(error) = &view.error {
        println!("  {}", error.red());
        return;
    }

    print_pills(&view.pills);
    if !view.query.search.is_empty() {
        println!("  {} \"{}\"", "search:".dimmed(), view.query.search);
    }

    for grid in &view.grids {
        print_grid(grid);
    }

    println!(
        "\n{}",
        format!("{} of {}", plural(view.card_count(), "card"), view.total).dimmed()
    );
}

fn heading(section: Section) -> &'static str {
    match section {
        Section::Tools => "AI Tools",
        Section::Learning => "Learning Resources",
        Section::McpServers => "MCP Servers",
        Section::Admin => "Admin",
    }
}

fn print_pills(pills: &[CategoryPill]) {
    let rendered: Vec<String> = pills
        .iter()
        .map(|pill| {
            if pill.active {
                format!("[{}]", pill.label).cyan().bold().to_string()
            } else {
                pill.label.dimmed().to_string()
            }
        })
        .collect();
    println!("  {}", rendered.join("  "));
}

fn print_grid(grid: &Grid) {
    if grid.id == GridId::Favourites && grid.cards.is_empty() {
        return;
    }

    println!("\n{}", grid.id.title().underline());
    if grid.empty_state {
        println!("  {}", grid.id.empty_message().yellow());
        return;
    }

    for card in &grid.cards {
        println!(
            "  {} {}  {}  {}",
            card.icon,
            card.name.bold(),
            card.category_label.blue(),
            detail_badges(&card.detail)
        );
        println!("     {}", card.description);
        println!("     {}", card.link.dimmed());
    }
}

/// Print the category pills of a section, one per line.
pub fn print_categories(section: Section, pills: &[CategoryPill]) {
    println!("{}", heading(section).bold());
    for pill in pills {
        let marker = if pill.active { "*" } else { " " };
        println!("  {marker} {:<24} {}", pill.value, pill.label.dimmed());
    }
}

/// Print the headline figures.
pub fn print_stats(stats: &CatalogStats) {
    println!("{}", "Catalog".bold());
    let count = |kind| stats.count_of(kind).to_string().cyan();
    println!("  {:<22} {}", "AI tools", count(DatasetKind::Tools));
    println!("  {:<22} {}", "Free or freemium", stats.free_tools.to_string().green());
    println!("  {:<22} {}", "Tool categories", stats.tool_categories.to_string().cyan());
    println!("  {:<22} {}", "Learning resources", count(DatasetKind::Learning));
    println!("  {:<22} {}", "MCP servers", count(DatasetKind::McpServers));
}

/// Print the count and tail of the admin target collection.
pub fn print_preview(preview: &Preview) {
    println!(
        "{} {} ({} total, showing last {})",
        "Preview:".bold(),
        preview.dataset,
        preview.count,
        preview.shown
    );
    print!("{}", preview.json);
}

/// Print the admin section: target dataset, form fields and preview.
pub fn print_admin_view(view: &AdminView) {
    println!("{} {}", heading(Section::Admin).bold(), view.dataset.to_string().cyan());
    for field in &view.fields {
        let hint = match field.input {
            FieldInput::Choice(options) | FieldInput::Suggest(options) => options.join("|"),
            FieldInput::Text | FieldInput::TextArea => String::new(),
        };
        let required = if field.required { "*" } else { " " };
        println!("  {required} {:<20} {}", field.label, hint.dimmed());
    }
    if let Some(preview) = &view.preview {
        println!();
        print_preview(preview);
    }
}

/// Print an admin status line on stderr.
pub fn print_status(status: &Status) {
    eprintln!("{} {}", status_prefix(status.kind), status.message);
}
