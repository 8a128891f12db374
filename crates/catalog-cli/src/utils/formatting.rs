//! Formatting utilities

use catalog_core::render::{CardDetail, PricingBadge};
use catalog_core::{Pricing, StatusKind};
use colored::{ColoredString, Colorize};

/// Colored pricing badge: glyph, label and optional note.
pub fn pricing_badge(badge: &PricingBadge) -> String {
    let label = format!("{} {}", badge.glyph, badge.label);
    let label = match badge.tier {
        Pricing::Free => label.green(),
        Pricing::Freemium => label.yellow(),
        Pricing::Paid => label.magenta(),
    };
    match &badge.note {
        Some(note) => format!("{label} {}", format!("({note})").dimmed()),
        None => label.to_string(),
    }
}

/// Badges of a card, ready to print after its name.
pub fn detail_badges(detail: &CardDetail) -> String {
    match detail {
        CardDetail::Tool { pricing } | CardDetail::McpServer { pricing } => pricing_badge(pricing),
        CardDetail::Learning {
            difficulty,
            resource_type,
        } => format!("{} {}", difficulty_label(difficulty), resource_type.cyan()),
    }
}

fn difficulty_label(difficulty: &str) -> ColoredString {
    match difficulty {
        "beginner" => difficulty.green(),
        "intermediate" => difficulty.yellow(),
        "advanced" => difficulty.red(),
        other => other.normal(),
    }
}

/// Prefix for a status line.
pub fn status_prefix(kind: StatusKind) -> ColoredString {
    match kind {
        StatusKind::Success => "✓".green().bold(),
        StatusKind::Error => "✗".red().bold(),
        StatusKind::Info => "•".blue().bold(),
    }
}

/// `count` followed by `noun`, pluralised with a trailing `s`.
pub fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural() {
        assert_eq!(plural(1, "card"), "1 card");
        assert_eq!(plural(0, "card"), "0 cards");
        assert_eq!(plural(2, "tool"), "2 tools");
    }

    #[test]
    fn test_pricing_badge_includes_note() {
        colored::control::set_override(false);
        let badge = PricingBadge::new(Pricing::Freemium, Some("5 free".into()));
        assert_eq!(pricing_badge(&badge), "🎯 Freemium (5 free)");
    }
}
