use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use tui_big_text::{BigText, PixelSize};

use crate::app::{App, LoadState};
use crate::model::{Game, Outcome};

const CAROLINA_BLUE: Color = Color::Rgb(75, 156, 211);
const PINK: Color = Color::Rgb(255, 105, 180);

fn team_color(game: &Game) -> Color {
    if game.is_mens() { CAROLINA_BLUE } else { PINK }
}

pub fn ui(f: &mut Frame, app: &mut App) {
    let size = f.area();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
        .split(size);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage(40),
                Constraint::Percentage(60),
            ]
            .as_ref(),
        )
        .split(rows[0]);

    draw_game_list(f, app, chunks[0]);
    draw_detail_panel(f, app, chunks[1]);
    draw_status_bar(f, app, rows[1]);
}

fn game_row(game: &Game) -> ListItem<'static> {
    let lines = vec![
        Line::from(vec![
            Span::styled(
                game.team_display().to_string(),
                Style::default().fg(team_color(game)).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::raw(game.location_display()),
        ]),
        Line::from(Span::styled(
            format!("vs. {}", game.opponent),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            game.formatted_date().to_string(),
            Style::default().fg(Color::Gray),
        )),
        Line::from(format!(
            "UNC: {}   {}: {}",
            game.score.unc, game.opponent, game.score.opponent
        )),
        Line::from(""),
    ];
    ListItem::new(lines)
}

fn draw_game_list(f: &mut Frame, app: &mut App, area: Rect) {
    let items: Vec<ListItem> = app.visible_games().into_iter().map(game_row).collect();

    let games_list = List::new(items)
        .block(Block::default().title(app.filter.title()).borders(Borders::ALL))
        .highlight_style(Style::default().bg(Color::DarkGray));

    f.render_stateful_widget(games_list, area, &mut app.state);
}

fn draw_detail_panel(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL);
    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let Some(game) = app.selected_game() else {
        let p = Paragraph::new("No game selected").alignment(Alignment::Center);
        f.render_widget(p, inner_area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Spacer
            Constraint::Length(4), // Score
            Constraint::Length(1), // Spacer
            Constraint::Min(0),    // Details
        ].as_ref())
        .split(inner_area);

    let score_str = game.score_display();
    if chunks[1].width < (score_str.len() as u16) * 4 {
        let score_p = Paragraph::new(score_str)
            .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center);
        f.render_widget(score_p, chunks[1]);
    } else {
        let score_text = BigText::builder()
            .pixel_size(PixelSize::Quadrant)
            .style(Style::default().fg(Color::White))
            .lines(vec![score_str.into()])
            .alignment(Alignment::Center)
            .build();
        f.render_widget(score_text, chunks[1]);
    }

    let outcome = game.result();
    let outcome_color = match outcome {
        Outcome::Win => Color::Green,
        Outcome::Loss => Color::Red,
    };
    let details = vec![
        Line::from(Span::styled(
            outcome.to_string(),
            Style::default().fg(outcome_color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            game.team_display(),
            Style::default().fg(team_color(game)).add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("{} vs. {}", game.location_display(), game.opponent)),
        Line::from(Span::styled(game.formatted_date(), Style::default().fg(Color::Gray))),
    ];
    let details_p = Paragraph::new(details).alignment(Alignment::Center);
    f.render_widget(details_p, chunks[3]);
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let load_text = if app.is_loading() {
        "Loading…".to_string()
    } else {
        match app.load_state() {
            LoadState::Empty => "No games loaded".to_string(),
            LoadState::Loaded { at } => format!(
                "{} games · updated {}",
                app.games().len(),
                at.format("%H:%M:%S")
            ),
        }
    };

    let line = Line::from(vec![
        Span::styled(format!(" {} ", load_text), Style::default().fg(Color::Cyan)),
        Span::raw("  q quit  j/k move  f filter  r reload"),
    ]);
    f.render_widget(Paragraph::new(line), area);
}
