//! HTML fragment surface for a [`SectionView`].
//!
//! Every record-supplied string is escaped before it is written, so a record
//! can never inject markup. Links always open in a new browsing context with
//! `rel="noopener noreferrer"`.

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

use super::{Card, CardDetail, CategoryPill, Grid, GridId, SectionView};
use crate::nav::Section;

/// Render a section as a self-contained HTML fragment.
#[must_use]
pub fn render_section(view: &SectionView) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "<section class=\"page-section\" data-section=\"{}\">\n",
        view.section.slug()
    ));

    if let Some(error) = &view.error {
        out.push_str(&format!("  <div class=\"error-state\">{}</div>\n", text(error)));
        out.push_str("</section>\n");
        return out;
    }

    render_pills(&mut out, &view.pills);
    for grid in &view.grids {
        render_grid(&mut out, grid, view.section);
    }
    out.push_str("</section>\n");
    out
}

fn render_pills(out: &mut String, pills: &[CategoryPill]) {
    out.push_str("  <div class=\"categories\">\n");
    for pill in pills {
        let class = if pill.active { "category-pill active" } else { "category-pill" };
        out.push_str(&format!(
            "    <button class=\"{class}\" data-category=\"{}\">{}</button>\n",
            attr(&pill.value),
            text(&pill.label)
        ));
    }
    out.push_str("  </div>\n");
}

fn render_grid(out: &mut String, grid: &Grid, section: Section) {
    let id = grid.id.slug();
    if grid.id == GridId::Favourites && grid.cards.is_empty() {
        // An empty favourites partition is simply not drawn.
        return;
    }

    out.push_str(&format!(
        "  <h2 class=\"grid-title\">{}</h2>\n  <div class=\"cards-grid\" data-grid=\"{id}\">\n",
        grid.id.title()
    ));
    for card in &grid.cards {
        render_card(out, card, section);
    }
    out.push_str("  </div>\n");

    if grid.empty_state {
        out.push_str(&format!(
            "  <div class=\"empty-state\" data-grid=\"{id}\">{}</div>\n",
            grid.id.empty_message()
        ));
    }
}

fn render_card(out: &mut String, card: &Card, section: Section) {
    let delay = card.reveal_delay_ms;
    out.push_str(&format!(
        "    <article class=\"card\" style=\"animation-delay: {}.{:03}s\">\n",
        delay / 1000,
        delay % 1000
    ));
    out.push_str(&format!(
        "      <div class=\"card-header\"><span class=\"card-icon\">{}</span>\
         <div class=\"card-info\"><h3 class=\"card-name\">{}</h3>\
         <span class=\"card-category\">{}</span></div></div>\n",
        text(&card.icon),
        text(&card.name),
        text(&card.category_label)
    ));
    out.push_str(&format!(
        "      <p class=\"card-description\">{}</p>\n",
        text(&card.description)
    ));

    out.push_str("      <div class=\"card-footer\">");
    match &card.detail {
        CardDetail::Tool { pricing } | CardDetail::McpServer { pricing } => {
            let title = pricing
                .note
                .as_deref()
                .map(|note| format!(" title=\"{}\"", attr(note)))
                .unwrap_or_default();
            out.push_str(&format!(
                "<span class=\"pricing-badge {}\"{title}>{} {}</span>",
                pricing.tier.as_str(),
                pricing.glyph,
                pricing.label
            ));
        },
        CardDetail::Learning {
            difficulty,
            resource_type,
        } => {
            out.push_str(&format!(
                "<span class=\"difficulty-badge\">{}</span><span class=\"type-badge\">{}</span>",
                text(difficulty),
                text(resource_type)
            ));
        },
    }
    out.push_str(&format!(
        "<a class=\"card-link\" href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
        attr(&card.link),
        section.link_text()
    ));
    out.push_str("</div>\n    </article>\n");
}
