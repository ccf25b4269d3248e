//! Text rendering of game cards.

use gamehub_core::Game;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use crate::theme::Theme;

pub const STAR_SLOTS: usize = 5;
const FILLED_STAR: &str = "★";
const EMPTY_STAR: &str = "☆";

/// Number of filled star slots; fractional ratings round down.
pub fn filled_stars(rating: f32) -> usize {
    if rating.is_nan() {
        return 0;
    }
    rating.floor().clamp(0.0, STAR_SLOTS as f32) as usize
}

pub fn star_spans(rating: f32, theme: &Theme) -> Vec<Span<'static>> {
    let filled = filled_stars(rating);
    vec![
        Span::styled(
            FILLED_STAR.repeat(filled),
            Style::default().fg(theme.warning),
        ),
        Span::styled(
            EMPTY_STAR.repeat(STAR_SLOTS - filled),
            Style::default().fg(theme.muted),
        ),
        Span::styled(format!(" ({rating:.1})"), Style::default().fg(theme.muted)),
    ]
}

fn badge(label: &str, style: Style) -> Span<'static> {
    Span::styled(format!("[{label}]"), style)
}

/// Compact one-line entry used in the game list.
pub fn list_line(game: &Game, rank: Option<usize>, theme: &Theme) -> Line<'static> {
    let mut spans = Vec::new();
    if let Some(rank) = rank {
        spans.push(badge(
            &format!("#{rank}"),
            Style::default()
                .fg(theme.on_accent)
                .bg(theme.warning)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled(
        game.title.clone(),
        Style::default()
            .fg(theme.primary_fg)
            .add_modifier(Modifier::BOLD),
    ));
    spans.push(Span::styled(
        format!("  {}", game.price),
        Style::default().fg(theme.accent),
    ));
    if game.is_new {
        spans.push(Span::raw(" "));
        spans.push(badge("NEW", Style::default().fg(theme.success)));
    }
    Line::from(spans)
}

/// Full card for the detail pane.
pub fn detail_lines(game: &Game, rank: Option<usize>, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    let mut header = Vec::new();
    if let Some(rank) = rank {
        header.push(badge(
            &format!("#{rank}"),
            Style::default()
                .fg(theme.on_accent)
                .bg(theme.warning)
                .add_modifier(Modifier::BOLD),
        ));
        header.push(Span::raw(" "));
    }
    header.push(Span::styled(
        game.title.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    ));
    header.push(Span::raw("  "));
    header.push(Span::styled(
        game.price.to_string(),
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    ));
    lines.push(Line::from(header));

    let mut badges = vec![badge(game.genre.label(), Style::default().fg(theme.accent))];
    if game.is_new {
        badges.push(Span::raw(" "));
        badges.push(badge(
            "NEW",
            Style::default()
                .fg(theme.on_accent)
                .bg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ));
    }
    for platform in &game.platforms {
        badges.push(Span::raw(" "));
        badges.push(badge(platform.label(), Style::default().fg(theme.muted)));
    }
    lines.push(Line::from(badges));

    lines.push(Line::from(Span::styled(
        format!("Cover: {}", game.image),
        Style::default().fg(theme.muted),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(game.description.clone()));
    lines.push(Line::from(""));

    let mut rating = star_spans(game.rating, theme);
    rating.push(Span::styled(
        format!("  {} reviews", game.reviews),
        Style::default().fg(theme.muted),
    ));
    lines.push(Line::from(rating));
    lines.push(Line::from(format!(
        "Released: {}",
        game.release_date.format("%Y-%m-%d")
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " [c] Add to cart ",
        Style::default()
            .fg(theme.on_accent)
            .bg(theme.accent)
            .add_modifier(Modifier::BOLD),
    )));
    lines
}

/// Placeholder shown when a view has nothing to list.
pub fn empty_state_lines(theme: &Theme) -> Vec<Line<'static>> {
    vec![
        Line::from(""),
        Line::from(Span::styled(
            "No games found",
            Style::default()
                .fg(theme.primary_fg)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Try changing the search parameters",
            Style::default().fg(theme.muted),
        )),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use gamehub_core::Catalog;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn stars_floor_fractional_ratings() {
        assert_eq!(filled_stars(4.8), 4);
        assert_eq!(filled_stars(4.0), 4);
        assert_eq!(filled_stars(0.3), 0);
        assert_eq!(filled_stars(5.0), 5);
        assert_eq!(filled_stars(7.0), 5);
        assert_eq!(filled_stars(f32::NAN), 0);
    }

    #[test]
    fn star_spans_show_five_slots_and_value() {
        let spans = star_spans(4.8, &Theme::default());
        let text: String = spans.iter().map(|span| span.content.as_ref()).collect();
        assert_eq!(text, "★★★★☆ (4.8)");
    }

    #[test]
    fn detail_card_lists_badges_and_reviews() {
        let catalog = Catalog::builtin().expect("built-in catalog");
        let game = catalog.get(1).expect("Cyber Night 2077");
        let lines = detail_lines(game, Some(1), &Theme::default());
        let text: Vec<String> = lines.iter().map(line_text).collect();
        assert_eq!(text[0], "[#1] Cyber Night 2077  $59.99");
        assert_eq!(text[1], "[RPG] [NEW] [PC] [PlayStation] [Xbox]");
        assert!(text.iter().any(|line| line == "★★★★☆ (4.8)  1250 reviews"));
        assert!(text.iter().any(|line| line.contains("Add to cart")));
    }

    #[test]
    fn list_line_omits_new_badge_for_old_games() {
        let catalog = Catalog::builtin().expect("built-in catalog");
        let game = catalog.get(5).expect("Medieval Quest");
        let text = line_text(&list_line(game, None, &Theme::default()));
        assert_eq!(text, "Medieval Quest  $34.99");
    }
}
