use chrono::{DateTime, Local};
use ratatui::widgets::ListState;
use tracing::{error, info};

use crate::data::FetchResult;
use crate::model::Game;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Empty,
    Loaded { at: DateTime<Local> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamFilter {
    All,
    Men,
    Women,
}

impl TeamFilter {
    fn next(self) -> Self {
        match self {
            TeamFilter::All => TeamFilter::Men,
            TeamFilter::Men => TeamFilter::Women,
            TeamFilter::Women => TeamFilter::All,
        }
    }

    fn matches(self, game: &Game) -> bool {
        match self {
            TeamFilter::All => true,
            TeamFilter::Men => game.is_mens(),
            TeamFilter::Women => game.team == "Women",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            TeamFilter::All => " UNC Basketball ",
            TeamFilter::Men => " UNC Basketball: Men ",
            TeamFilter::Women => " UNC Basketball: Women ",
        }
    }
}

#[derive(Debug)]
pub struct App {
    pub should_quit: bool,
    games: Vec<Game>,
    pub state: ListState,
    pub filter: TeamFilter,
    load_state: LoadState,
    in_flight: usize,
}

impl Default for App {
    fn default() -> Self {
        Self {
            should_quit: false,
            games: Vec::new(),
            state: ListState::default(),
            filter: TeamFilter::All,
            load_state: LoadState::Empty,
            in_flight: 0,
        }
    }
}

impl App {
    pub fn new() -> Self {
        let mut app = Self::default();
        app.state.select(Some(0));
        app
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    /// Called once per activation, before the fetch task is spawned.
    pub fn begin_fetch(&mut self) {
        self.in_flight += 1;
    }

    /// Applies one fetch outcome. Success replaces the list wholesale; any
    /// failure is logged and leaves the list and load state untouched.
    pub fn apply_fetch(&mut self, result: FetchResult) {
        self.in_flight = self.in_flight.saturating_sub(1);
        match result {
            Ok(games) => {
                info!(count = games.len(), "Loaded games");
                self.games = games;
                self.load_state = LoadState::Loaded { at: Local::now() };
                self.clamp_selection();
            }
            Err(e) => {
                error!(error = %format!("{e:#}"), "Failed to load games");
            }
        }
    }

    pub fn on_key(&mut self, c: char) {
        match c {
            'q' => self.should_quit = true,
            'j' => self.next(),
            'k' => self.previous(),
            'f' => self.cycle_filter(),
            _ => {}
        }
    }

    pub fn next(&mut self) {
        let len = self.visible_games().len();
        if len == 0 { return; }

        let i = match self.state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.visible_games().len();
        if len == 0 { return; }

        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn cycle_filter(&mut self) {
        self.filter = self.filter.next();
        self.state.select(Some(0));
    }

    pub fn visible_games(&self) -> Vec<&Game> {
        self.games.iter().filter(|g| self.filter.matches(g)).collect()
    }

    pub fn selected_game(&self) -> Option<&Game> {
        let i = self.state.selected().unwrap_or(0);
        self.visible_games().get(i).copied()
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_games().len();
        match self.state.selected() {
            Some(i) if i < len => {}
            _ => self.state.select(Some(0)),
        }
    }
}
