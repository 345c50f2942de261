//! Ratatui rendering of the board.

use chrono::{Local, TimeZone};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use five_dice::game_engine::{history, MAX_ROLLS};
use five_dice::{Category, Game, PotentialScores, Scores, TopScore};

use crate::input::HOLD_KEYS;

/// What a scoreboard row shows in its value column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowValue {
    Recorded(u32),
    Offered(u32),
    Empty,
}

pub fn row_value(scores: &Scores, potential: &PotentialScores, category: Category) -> RowValue {
    // A closed 5Dice box can still be on offer during a joker roll.
    if let Some(offer) = potential.get(category) {
        return RowValue::Offered(offer);
    }
    match scores.get(category) {
        Some(value) => RowValue::Recorded(value),
        None => RowValue::Empty,
    }
}

pub fn format_date(timestamp_ms: i64) -> String {
    match Local.timestamp_millis_opt(timestamp_ms).single() {
        Some(date) => date.format("%Y-%m-%d %H:%M").to_string(),
        None => "-".to_string(),
    }
}

pub fn top_scores_title(history: &[TopScore]) -> String {
    match history::best(history) {
        Some(best) => format!("Top Scores (best {})", best.score),
        None => "Top Scores".to_string(),
    }
}

/// Hold keys are dimmed while holding is not allowed.
pub fn hold_key_style(can_hold: bool) -> Style {
    if can_hold {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

pub fn draw(f: &mut Frame, game: &Game, status: &str) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(11), Constraint::Length(4)])
        .split(f.area());

    let header = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(18), Constraint::Min(24)])
        .split(rows[0]);
    draw_turn(f, header[0], game);
    draw_dice(f, header[1], game);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(35),
            Constraint::Percentage(35),
        ])
        .split(rows[1]);

    let potential = game.potential_scores();
    draw_upper(f, body[0], game, &potential);
    draw_lower(f, body[1], game, &potential);
    draw_top_scores(f, body[2], game.top_scores());

    draw_footer(f, rows[2], status);
}

fn draw_turn(f: &mut Frame, area: Rect, game: &Game) {
    let text = if game.is_rolling() {
        "Rolling...".to_string()
    } else if game.turn() == 0 {
        "Ready to roll".to_string()
    } else {
        format!("Roll {} of {}", game.turn(), MAX_ROLLS)
    };
    let widget = Paragraph::new(vec![
        Line::raw(text),
        Line::styled(format!("{} left", game.rolls_left()), Style::default().fg(Color::Gray)),
    ])
    .block(Block::default().borders(Borders::ALL).title("Turn"));
    f.render_widget(widget, area);
}

fn draw_dice(f: &mut Frame, area: Rect, game: &Game) {
    let mut faces = Vec::new();
    let mut keys = Vec::new();
    let key_style = hold_key_style(game.can_hold());
    for (die, key) in game.dice().iter().zip(HOLD_KEYS) {
        let style = if die.held {
            Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        faces.push(Span::styled(format!(" {die} "), style));
        faces.push(Span::raw("  "));
        keys.push(Span::styled(format!(" {key} "), key_style));
        keys.push(Span::raw("  "));
    }
    let widget = Paragraph::new(vec![Line::from(faces), Line::from(keys)])
        .block(Block::default().borders(Borders::ALL).title("Dice"));
    f.render_widget(widget, area);
}

fn category_line(game: &Game, potential: &PotentialScores, category: Category) -> Line<'static> {
    let (value, style) = match row_value(game.scores(), potential, category) {
        RowValue::Offered(v) => (
            v.to_string(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        RowValue::Recorded(v) => (v.to_string(), Style::default().fg(Color::DarkGray)),
        RowValue::Empty => (String::new(), Style::default()),
    };
    Line::from(vec![
        Span::styled(format!("[{}] ", category.hotkey()), Style::default().fg(Color::DarkGray)),
        Span::styled(format!("{:<16}", category.to_string()), style),
        Span::styled(format!("{value:>5}"), style),
    ])
}

fn total_line(label: &str, value: u32) -> Line<'static> {
    Line::from(vec![
        Span::raw(format!("    {label:<16}")),
        Span::styled(format!("{value:>5}"), Style::default().add_modifier(Modifier::BOLD)),
    ])
}

fn draw_upper(f: &mut Frame, area: Rect, game: &Game, potential: &PotentialScores) {
    let mut lines: Vec<Line> = Category::UPPER
        .iter()
        .map(|c| category_line(game, potential, *c))
        .collect();
    lines.push(Line::raw(""));
    lines.push(total_line("Sum", game.upper_board_sum()));
    lines.push(total_line("Bonus", game.upper_board_bonus()));

    let widget = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Upper Board"));
    f.render_widget(widget, area);
}

fn draw_lower(f: &mut Frame, area: Rect, game: &Game, potential: &PotentialScores) {
    let mut lines: Vec<Line> = Category::LOWER
        .iter()
        .map(|c| category_line(game, potential, *c))
        .collect();
    lines.push(Line::raw(""));
    lines.push(total_line("Total", game.total()));
    if game.joker_count() > 0 {
        lines.push(Line::styled(
            format!("    Jokers: {}", game.joker_count()),
            Style::default().fg(Color::Magenta),
        ));
    }

    let widget = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Lower Board"));
    f.render_widget(widget, area);
}

fn draw_top_scores(f: &mut Frame, area: Rect, history: &[TopScore]) {
    let lines: Vec<Line> = if history.is_empty() {
        vec![Line::styled("No finished games yet", Style::default().fg(Color::DarkGray))]
    } else {
        history
            .iter()
            .enumerate()
            .map(|(rank, entry)| {
                Line::from(vec![
                    Span::raw(format!("{:>2}. ", rank + 1)),
                    Span::styled(format!("{:>4}", entry.score), Style::default().add_modifier(Modifier::BOLD)),
                    Span::styled(format!("  {}", format_date(entry.timestamp)), Style::default().fg(Color::Gray)),
                ])
            })
            .collect()
    };
    let widget = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(top_scores_title(history)));
    f.render_widget(widget, area);
}

fn draw_footer(f: &mut Frame, area: Rect, status: &str) {
    let hints = "Enter roll | a-g hold | 1-6, q-u score | n new game | Esc quit";
    let widget = Paragraph::new(vec![
        Line::raw(status.to_string()),
        Line::styled(hints, Style::default().fg(Color::Gray)),
    ])
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offers_win_over_recorded_values() {
        let scores = Scores::new().with(Category::Twos, 4).with(Category::FiveDice, 50);
        let potential: PotentialScores = [(Category::FiveDice, 150), (Category::Gamble, 10)].into_iter().collect();

        assert_eq!(row_value(&scores, &potential, Category::FiveDice), RowValue::Offered(150));
        assert_eq!(row_value(&scores, &potential, Category::Gamble), RowValue::Offered(10));
        assert_eq!(row_value(&scores, &potential, Category::Twos), RowValue::Recorded(4));
        assert_eq!(row_value(&scores, &potential, Category::Ones), RowValue::Empty);
    }

    #[test]
    fn title_shows_best_score() {
        assert_eq!(top_scores_title(&[]), "Top Scores");
        let history = [
            TopScore { timestamp: 2, score: 180 },
            TopScore { timestamp: 1, score: 231 },
            TopScore { timestamp: 3, score: 95 },
        ];
        assert_eq!(top_scores_title(&history), "Top Scores (best 231)");
    }

    #[test]
    fn hold_keys_dim_until_first_roll() {
        use five_dice::ScriptedRoller;

        let mut game = Game::new(ScriptedRoller::new([3]));
        assert_eq!(hold_key_style(game.can_hold()), Style::default().fg(Color::DarkGray));
        game.roll();
        assert_eq!(hold_key_style(game.can_hold()), Style::default().fg(Color::Cyan));
    }

    #[test]
    fn dates_render_or_fall_back() {
        assert_eq!(format_date(0).len(), "1970-01-01 00:00".len());
        assert_eq!(format_date(i64::MAX), "-");
    }
}
