//! TUI rendering with ratatui
//!
//! Grid, clue lists, status bar and the score overlay.

use super::app::{App, MessageStyle};
use crate::core::{ClueEntry, Orientation};
use crate::output::formatters::{cell_label, format_elapsed};
use crate::session::{ScoreResult, SolveSession};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, Paragraph, Wrap},
};
use rustc_hash::FxHashSet;

/// Terminal columns taken by one grid cell
const CELL_WIDTH: usize = 3;

/// Screen regions of the main view
struct Regions {
    header: Rect,
    grid: Rect,
    info: Rect,
    status: Rect,
}

fn regions(area: Rect) -> Regions {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(3), // Status bar
        ])
        .split(area);

    // Main content area - split horizontally
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(55), // Grid
            Constraint::Percentage(45), // Clues and messages
        ])
        .split(chunks[1]);

    Regions {
        header: chunks[0],
        grid: main_chunks[0],
        info: main_chunks[1],
        status: chunks[2],
    }
}

/// Main UI rendering function
pub fn ui(f: &mut Frame, app: &App) {
    let regions = regions(f.area());

    render_header(f, app, regions.header);

    match &app.session {
        Some(session) => {
            render_grid(f, session, regions.grid);
            render_info_panel(f, app, session, regions.info);
        }
        None => {
            let text = if app.is_generating() {
                "Building a crossword..."
            } else {
                "No crossword yet. Ctrl-N to try again."
            };
            let placeholder = Paragraph::new(text)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title(" Grid "));
            f.render_widget(placeholder, regions.grid);
            render_messages(f, app, regions.info);
        }
    }

    render_status(f, app, regions.status);

    if let Some(score) = app.session.as_ref().and_then(SolveSession::last_score) {
        render_score(f, score);
    }
}

/// Grid cell drawn at screen position `(x, y)` of a frame covering `area`
pub(crate) fn cell_at(area: Rect, session: &SolveSession, x: u16, y: u16) -> Option<(usize, usize)> {
    let inner = grid_block(String::new()).inner(regions(area).grid);
    let grid = session.crossword().grid();
    let line_width = u16::try_from(grid.cols() * CELL_WIDTH).ok()?;
    // Centered lines start at this column
    let left = inner.x + (inner.width / 2).saturating_sub(line_width / 2);

    if y < inner.y || y >= inner.bottom() || x < left || x >= inner.right() {
        return None;
    }
    let row = usize::from(y - inner.y);
    let col = usize::from(x - left) / CELL_WIDTH;
    (row < grid.rows() && col < grid.cols()).then_some((row, col))
}

fn grid_block(title: String) -> Block<'static> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let title = format!(
        "🧩 CROSSWORD - {} ({})",
        app.config.topic.to_uppercase(),
        app.config.difficulty
    );
    let header = Paragraph::new(title)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(header, area);
}

fn render_grid(f: &mut Frame, session: &SolveSession, area: Rect) {
    let crossword = session.crossword();
    let grid = crossword.grid();

    let active: FxHashSet<(usize, usize)> = session
        .active_word()
        .map(|w| w.cells().collect())
        .unwrap_or_default();
    let solved: FxHashSet<(usize, usize)> = crossword
        .placed_words()
        .iter()
        .filter(|w| session.is_word_fully_correct(w))
        .flat_map(|w| w.cells())
        .collect();

    let lines: Vec<Line> = (0..grid.rows())
        .map(|r| {
            let spans: Vec<Span> = grid
                .row(r)
                .enumerate()
                .map(|(c, cell)| {
                    let style = if cell.is_blocked() {
                        Style::default().bg(Color::Black)
                    } else if session.active_cell() == Some((r, c)) {
                        Style::default().fg(Color::Black).bg(Color::Yellow)
                    } else if active.contains(&(r, c)) {
                        Style::default().fg(Color::Black).bg(Color::LightBlue)
                    } else if solved.contains(&(r, c)) {
                        Style::default().fg(Color::Green).bg(Color::White)
                    } else {
                        Style::default().fg(Color::Black).bg(Color::White)
                    };
                    Span::styled(cell_label(cell, false), style.add_modifier(Modifier::BOLD))
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let title = format!(
        " Grid {}x{} | {} crossings ",
        grid.rows(),
        grid.cols(),
        crossword.crossings()
    );
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(grid_block(title));
    f.render_widget(paragraph, area);
}

fn render_info_panel(f: &mut Frame, app: &App, session: &SolveSession, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(38), // Across
            Constraint::Percentage(38), // Down
            Constraint::Percentage(24), // Messages
        ])
        .split(area);

    let active = session
        .active_word()
        .map(|w| (w.orientation, w.number));
    for (orientation, chunk) in [
        (Orientation::Horizontal, chunks[0]),
        (Orientation::Vertical, chunks[1]),
    ] {
        let clues = session.crossword().clues(orientation);
        render_clues(f, orientation, &clues, active, chunk);
    }
    render_messages(f, app, chunks[2]);
}

fn render_clues(
    f: &mut Frame,
    orientation: Orientation,
    clues: &[ClueEntry],
    active: Option<(Orientation, u32)>,
    area: Rect,
) {
    let items: Vec<ListItem> = clues
        .iter()
        .map(|entry| {
            let style = if active == Some((orientation, entry.number)) {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:>2}. ", entry.number), Style::default().fg(Color::Cyan)),
                Span::styled(entry.clue.clone(), style),
                Span::styled(
                    format!(" ({})", entry.answer_length),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(format!(" {} ", orientation.label()))
            .borders(Borders::ALL),
    );
    f.render_widget(list, area);
}

fn render_messages(f: &mut Frame, app: &App, area: Rect) {
    let messages: Vec<ListItem> = app
        .messages
        .iter()
        .rev()
        .map(|msg| {
            let style = match msg.style {
                MessageStyle::Info => Style::default().fg(Color::White),
                MessageStyle::Success => Style::default().fg(Color::Green),
                MessageStyle::Error => Style::default().fg(Color::Red),
            };
            ListItem::new(msg.text.clone()).style(style)
        })
        .collect();

    let messages_list =
        List::new(messages).block(Block::default().title(" Messages ").borders(Borders::ALL));

    f.render_widget(messages_list, area);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(40),
        ])
        .split(area);

    let (elapsed, hints) = app
        .session
        .as_ref()
        .map_or((0, 0), |s| (s.elapsed_seconds(), s.hints_used()));

    let timer = Paragraph::new(format!("⏱ {}", format_elapsed(elapsed))).alignment(Alignment::Center);
    f.render_widget(timer, chunks[0]);

    let hints = Paragraph::new(format!("Hints: {hints}")).alignment(Alignment::Center);
    f.render_widget(hints, chunks[1]);

    let direction = Paragraph::new(format!(
        "{} | Best: {}",
        app.orientation_label(),
        app.stats.best_score
    ))
    .alignment(Alignment::Center);
    f.render_widget(direction, chunks[2]);

    let help = Paragraph::new("Enter: Check | Tab: Turn | ^R: Reveal | ^N: New | ^Q: Quit")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[3]);
}

fn render_score(f: &mut Frame, score: &ScoreResult) {
    let area = centered_rect(50, 50, f.area());
    let (title, color) = if score.percentage == 100 {
        (" 🎉 SOLVED! 🎉 ", Color::Green)
    } else {
        (" Results ", Color::Yellow)
    };

    let content = vec![
        Line::from(format!(
            "Correct:     {}/{} ({}%)",
            score.correct, score.total, score.percentage
        )),
        Line::from(format!("Time:        {}", format_elapsed(score.elapsed_seconds))),
        Line::from(format!("Letters:     +{}", score.base)),
        Line::from(format!("Speed bonus: +{}", score.speed_bonus)),
        Line::from(format!("Clean solve: +{}", score.completion_bonus)),
        Line::from(format!("Hints:       -{}", score.hint_penalty)),
        Line::from(""),
        Line::from(Span::styled(
            format!("Score:       {}", score.final_score),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Esc: back to the grid | ^N: new crossword",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let popup = Paragraph::new(content).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .style(Style::default().fg(color)),
    );
    f.render_widget(Clear, area);
    f.render_widget(popup, area);
}

/// A rectangle of `percent_x` by `percent_y` centered in `area`
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
