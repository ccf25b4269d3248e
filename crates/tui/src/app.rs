use std::{io, thread, time::Duration};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use gamehub_core::{
    derive, new_releases, top_rated, AppConfig, Catalog, CatalogStats, Game, Selection, View,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::{block_font, card, theme::Theme};

const TICK_RATE: Duration = Duration::from_millis(250);
const BANNER_TEXT: &str = "GameHub";
const TAGLINE: &str = "Discover the world of games: ratings, reviews and new releases in one place";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Browse,
    Search,
}

enum AppEvent {
    Input(Event),
    Tick,
}

/// Terminal storefront: owns the catalog and all UI state.
pub struct GameHubApp {
    stats: CatalogStats,
    theme: Theme,
    state: UiState,
}

impl GameHubApp {
    pub fn new(catalog: Catalog, config: &AppConfig) -> Self {
        let (theme, applied) = Theme::from_config(&config.theme);
        if !applied.is_empty() {
            info!(keys = ?applied, "Theme overrides applied");
        }
        let stats = CatalogStats::from_games(catalog.games());
        let mut state = UiState::new(catalog.games().to_vec(), config);
        state.refresh();
        state.set_status(format!("Loaded {} games", stats.games));
        Self {
            stats,
            theme,
            state,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut session = TerminalSession::enter()?;
        let (event_tx, mut event_rx) = mpsc::channel::<AppEvent>(128);
        spawn_input_thread(event_tx);
        self.event_loop(&mut session.terminal, &mut event_rx).await
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        event_rx: &mut mpsc::Receiver<AppEvent>,
    ) -> Result<()> {
        loop {
            terminal.draw(|frame| self.draw(frame))?;
            if self.state.should_quit {
                break;
            }
            match event_rx.recv().await {
                Some(AppEvent::Input(Event::Key(key))) => self.handle_key(key),
                Some(AppEvent::Input(_)) | Some(AppEvent::Tick) => {}
                None => break,
            }
        }
        info!("Shutting down");
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release || self.handle_global_shortcut(&key) {
            return;
        }
        match self.state.mode {
            Mode::Search => self.handle_search_key(key),
            Mode::Browse => self.handle_browse_key(key),
        }
    }

    fn handle_global_shortcut(&mut self, key: &KeyEvent) -> bool {
        // raw mode swallows SIGINT, so Ctrl-C arrives as a key event
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            info!("Quit requested with Ctrl-C");
            self.state.should_quit = true;
            return true;
        }
        false
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.state.mode = Mode::Browse;
                self.state.selection.search.clear();
                self.state.refresh();
                self.state.set_status("Search cleared".to_string());
            }
            KeyCode::Enter => {
                self.state.mode = Mode::Browse;
                self.state.set_status(format!(
                    "Search applied: {} ({} found)",
                    self.state.selection.search,
                    self.state.entries.len()
                ));
            }
            KeyCode::Backspace => {
                self.state.selection.search.pop();
                self.state.refresh();
            }
            KeyCode::Char(c) if is_plain(&key) => {
                self.state.selection.search.push(c);
                self.state.refresh();
            }
            _ => {}
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(_) if !is_plain(&key) => {}
            KeyCode::Char('q') | KeyCode::Esc => self.state.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => self.state.move_cursor(1),
            KeyCode::Char('k') | KeyCode::Up => self.state.move_cursor(-1),
            KeyCode::Home => self.state.move_to(0),
            KeyCode::End => self.state.move_to_end(),
            KeyCode::PageDown => self.state.page(1),
            KeyCode::PageUp => self.state.page(-1),
            KeyCode::Tab => self.state.set_view(self.state.view.cycle(1)),
            KeyCode::BackTab => self.state.set_view(self.state.view.cycle(-1)),
            KeyCode::Char(c @ '1'..='4') => {
                let index = c as usize - '1' as usize;
                self.state.set_view(View::ALL[index]);
            }
            KeyCode::Char('/') => {
                self.state.set_view(View::Catalog);
                self.state.mode = Mode::Search;
                self.state.set_status("Type to search titles and descriptions".to_string());
            }
            KeyCode::Char('p') => self.change_selection(|s| s.cycle_platform(1)),
            KeyCode::Char('P') => self.change_selection(|s| s.cycle_platform(-1)),
            KeyCode::Char('g') => self.change_selection(|s| s.cycle_genre(1)),
            KeyCode::Char('G') => self.change_selection(|s| s.cycle_genre(-1)),
            KeyCode::Char('s') => self.change_selection(|s| s.cycle_sort(1)),
            KeyCode::Char('S') => self.change_selection(|s| s.cycle_sort(-1)),
            KeyCode::Char('x') => {
                self.change_selection(Selection::reset_filters);
                self.state.set_status("Filters reset".to_string());
            }
            KeyCode::Char('b') => {
                self.state.show_banner = !self.state.show_banner;
                let message = if self.state.show_banner {
                    "Banner enabled"
                } else {
                    "Banner hidden"
                };
                self.state.set_status(message.to_string());
            }
            KeyCode::Char('c') | KeyCode::Enter => {
                let message = match self.state.current_game() {
                    Some(game) => format!("Cart is not available yet ({})", game.title),
                    None => "Nothing selected".to_string(),
                };
                self.state.set_status(message);
            }
            KeyCode::Char('n') if self.state.view == View::Reviews => {
                self.state
                    .set_status("We'll let you know when reviews launch".to_string());
            }
            _ => {}
        }
    }

    fn change_selection(&mut self, update: impl FnOnce(&mut Selection)) {
        update(&mut self.state.selection);
        if self.state.view != View::Catalog {
            self.state.set_view(View::Catalog);
        } else {
            self.state.refresh();
        }
        let selection = &self.state.selection;
        debug!(
            platform = selection.platform_label(),
            genre = selection.genre_label(),
            sort = %selection.sort,
            "Selection changed"
        );
        let message = format!(
            "{} · {} · {} ({} found)",
            selection.platform_label(),
            selection.genre_label(),
            selection.sort.label(),
            self.state.entries.len()
        );
        self.state.set_status(message);
    }

    fn draw(&mut self, frame: &mut Frame) {
        let size = frame.size();

        let mut constraints = Vec::new();
        if self.state.show_banner {
            constraints.push(Constraint::Length(block_font::FONT_HEIGHT as u16 + 3));
        }
        constraints.push(Constraint::Length(3));
        constraints.push(Constraint::Length(3));
        constraints.push(Constraint::Min(8));
        constraints.push(Constraint::Length(3));
        constraints.push(Constraint::Length(3));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(size);
        let mut chunk_iter = chunks.iter().copied();
        if self.state.show_banner {
            if let Some(area) = chunk_iter.next() {
                self.render_banner(frame, area);
            }
        }
        let tabs_chunk = chunk_iter.next().unwrap_or(size);
        let filter_chunk = chunk_iter.next().unwrap_or(size);
        let body_chunk = chunk_iter.next().unwrap_or(size);
        let stats_chunk = chunk_iter.next().unwrap_or(size);
        let status_chunk = chunk_iter.next().unwrap_or(size);

        self.render_tabs(frame, tabs_chunk);
        self.render_filters(frame, filter_chunk);
        match self.state.view {
            View::Reviews => self.render_reviews(frame, body_chunk),
            _ if self.state.entries.is_empty() => self.render_empty(frame, body_chunk),
            _ => {
                let body = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
                    .split(body_chunk);
                self.render_game_list(frame, body[0]);
                self.render_game_card(frame, body[1]);
            }
        }
        self.render_stats(frame, stats_chunk);
        self.render_status(frame, status_chunk);
    }

    fn render_banner(&self, frame: &mut Frame, area: Rect) {
        let rows = if block_font::width(BANNER_TEXT) + 2 > area.width as usize {
            vec![BANNER_TEXT.to_uppercase()]
        } else {
            block_font::render(BANNER_TEXT)
        };
        let mut content: Vec<Line> = rows
            .into_iter()
            .map(|line| {
                Line::from(Span::styled(
                    line,
                    Style::default()
                        .fg(self.theme.accent)
                        .add_modifier(Modifier::BOLD),
                ))
            })
            .collect();
        content.push(Line::from(Span::styled(
            TAGLINE,
            Style::default().fg(self.theme.muted),
        )));
        let paragraph = Paragraph::new(content)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
    }

    fn render_tabs(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = View::ALL
            .iter()
            .enumerate()
            .map(|(idx, view)| Line::from(format!("{} {}", idx + 1, view.label())))
            .collect();
        let tabs = Tabs::new(titles)
            .block(Block::default().borders(Borders::ALL).title("GameHub"))
            .select(self.state.view.index())
            .style(Style::default().fg(self.theme.primary_fg))
            .highlight_style(
                Style::default()
                    .fg(self.theme.on_accent)
                    .bg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(tabs, area);
    }

    fn render_filters(&self, frame: &mut Frame, area: Rect) {
        let selection = &self.state.selection;
        let label = Style::default().fg(self.theme.muted);
        let value = Style::default().fg(self.theme.primary_fg);
        let search_style = if self.state.mode == Mode::Search {
            Style::default()
                .fg(self.theme.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            value
        };
        let search_text = if self.state.mode == Mode::Search {
            format!("{}▏", selection.search)
        } else if selection.search.is_empty() {
            "Search games...".to_string()
        } else {
            selection.search.clone()
        };
        let line = Line::from(vec![
            Span::styled("/ ", label),
            Span::styled(search_text, search_style),
            Span::styled("   [p] ", label),
            Span::styled(selection.platform_label(), value),
            Span::styled("   [g] ", label),
            Span::styled(selection.genre_label(), value),
            Span::styled("   [s] ", label),
            Span::styled(selection.sort.label(), value),
        ]);
        let paragraph = Paragraph::new(line)
            .block(Block::default().borders(Borders::ALL).title("Search & Filters"));
        frame.render_widget(paragraph, area);
    }

    fn render_game_list(&mut self, frame: &mut Frame, area: Rect) {
        self.state.list_height = area.height.saturating_sub(2) as usize;
        self.state.ensure_cursor_visible();

        let rank_offset = self.state.offset;
        let ranked = self.state.view == View::TopRated;
        let games = self.state.visible_games();
        let mut list_state = ListState::default();
        if !games.is_empty() {
            list_state.select(Some(
                self.state
                    .cursor
                    .saturating_sub(self.state.offset)
                    .min(games.len() - 1),
            ));
        }
        let items: Vec<ListItem> = games
            .iter()
            .enumerate()
            .map(|(idx, game)| {
                let rank = ranked.then_some(rank_offset + idx + 1);
                ListItem::new(card::list_line(game, rank, &self.theme))
            })
            .collect();

        let title = format!("{} ({})", self.state.view.label(), self.state.entries.len());
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(Style::default().bg(self.theme.highlight))
            .highlight_symbol("▶ ");
        frame.render_stateful_widget(list, area, &mut list_state);
    }

    fn render_game_card(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Game Details");
        let Some(game) = self.state.current_game() else {
            frame.render_widget(Paragraph::new("Nothing selected").block(block), area);
            return;
        };
        let rank = (self.state.view == View::TopRated).then_some(self.state.cursor + 1);
        let paragraph = Paragraph::new(card::detail_lines(game, rank, &self.theme))
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn render_empty(&self, frame: &mut Frame, area: Rect) {
        let paragraph = Paragraph::new(card::empty_state_lines(&self.theme))
            .block(Block::default().borders(Borders::ALL).title(self.state.view.label()))
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
    }

    fn render_reviews(&self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Review system",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Player reviews are under development. Detailed write-ups and community opinions on every game are coming soon.",
                Style::default().fg(self.theme.muted),
            )),
            Line::from(""),
            Line::from(Span::styled(
                " [n] Notify me at launch ",
                Style::default()
                    .fg(self.theme.on_accent)
                    .bg(self.theme.accent),
            )),
        ];
        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Reviews"))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn render_stats(&self, frame: &mut Frame, area: Rect) {
        let number = Style::default()
            .fg(self.theme.accent)
            .add_modifier(Modifier::BOLD);
        let label = Style::default().fg(self.theme.muted);
        let line = Line::from(vec![
            Span::styled(self.stats.games.to_string(), number),
            Span::styled(" games in catalog   ", label),
            Span::styled(self.stats.platforms.to_string(), number),
            Span::styled(" platforms   ", label),
            Span::styled(self.stats.average_rating_label(), number),
            Span::styled(" average rating   ", label),
            Span::styled(self.stats.reviews_label(), number),
            Span::styled(" player reviews", label),
        ]);
        let paragraph = Paragraph::new(line)
            .block(Block::default().borders(Borders::ALL).title("Stats"))
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let help = match self.state.mode {
            Mode::Search => "Enter apply · Esc clear",
            Mode::Browse => {
                "Tab/1-4 views · j/k move · / search · p/g/s filters · x reset · c cart · q quit"
            }
        };
        let line = Line::from(vec![
            Span::raw(self.state.status.clone()),
            Span::styled(format!("   {help}"), Style::default().fg(self.theme.muted)),
        ]);
        let paragraph = Paragraph::new(line)
            .block(Block::default().borders(Borders::ALL).title("Status"))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}

fn is_plain(key: &KeyEvent) -> bool {
    key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT
}

/// Raw-mode alternate screen that is restored on drop, including on error paths.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn enter() -> Result<Self> {
        enable_raw_mode().context("failed to enter raw mode")?;
        let terminal = match Terminal::new(CrosstermBackend::new(io::stdout())) {
            Ok(terminal) => terminal,
            Err(err) => {
                let _ = disable_raw_mode();
                return Err(err).context("failed to create terminal");
            }
        };
        // from here on Drop restores the terminal
        let mut session = Self { terminal };
        execute!(session.terminal.backend_mut(), EnterAlternateScreen)
            .context("failed to enter alternate screen")?;
        session.terminal.hide_cursor()?;
        session.terminal.clear()?;
        Ok(session)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(err) = disable_raw_mode() {
            warn!(?err, "Failed to disable raw mode");
        }
        if let Err(err) = execute!(self.terminal.backend_mut(), LeaveAlternateScreen) {
            warn!(?err, "Failed to leave alternate screen");
        }
        if let Err(err) = self.terminal.show_cursor() {
            warn!(?err, "Failed to show cursor");
        }
    }
}

/// Forward terminal events, or a tick when idle, until the receiver goes away.
fn spawn_input_thread(sender: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        while !sender.is_closed() {
            let next = match event::poll(TICK_RATE) {
                Ok(true) => event::read().map(AppEvent::Input),
                Ok(false) => Ok(AppEvent::Tick),
                Err(err) => Err(err),
            };
            let event = match next {
                Ok(event) => event,
                Err(err) => {
                    warn!(?err, "Terminal input failed");
                    break;
                }
            };
            if sender.blocking_send(event).is_err() {
                break;
            }
        }
        debug!("Input thread stopped");
    });
}

struct UiState {
    all_games: Vec<Game>,
    entries: Vec<Game>,
    selection: Selection,
    view: View,
    cursor: usize,
    offset: usize,
    list_height: usize,
    status: String,
    show_banner: bool,
    mode: Mode,
    should_quit: bool,
}

impl UiState {
    fn new(all_games: Vec<Game>, config: &AppConfig) -> Self {
        Self {
            all_games,
            entries: Vec::new(),
            selection: Selection::sorted_by(config.default_sort),
            view: config.default_view,
            cursor: 0,
            offset: 0,
            list_height: 1,
            status: "Ready".to_string(),
            show_banner: config.show_banner,
            mode: Mode::Browse,
            should_quit: false,
        }
    }

    /// Recompute the entries for the active view from scratch.
    fn refresh(&mut self) {
        let derived = match self.view {
            View::Catalog => derive(&self.all_games, &self.selection),
            View::New => new_releases(&self.all_games),
            View::TopRated => top_rated(&self.all_games),
            View::Reviews => Vec::new(),
        };
        self.entries = derived.into_iter().cloned().collect();
        self.cursor = 0;
        self.offset = 0;
    }

    fn set_view(&mut self, view: View) {
        self.view = view;
        self.refresh();
        self.set_status(format!("{} view", view.label()));
    }

    fn move_cursor(&mut self, delta: isize) {
        if self.entries.is_empty() {
            return;
        }
        let len = self.entries.len() as isize;
        self.cursor = (self.cursor as isize + delta).clamp(0, len - 1) as usize;
        self.ensure_cursor_visible();
    }

    fn move_to(&mut self, index: usize) {
        if self.entries.is_empty() {
            return;
        }
        self.cursor = index.min(self.entries.len() - 1);
        self.ensure_cursor_visible();
    }

    fn move_to_end(&mut self) {
        self.move_to(usize::MAX);
    }

    fn page(&mut self, direction: isize) {
        if self.list_height == 0 {
            return;
        }
        self.move_cursor(direction * self.list_height as isize);
    }

    fn visible_games(&self) -> &[Game] {
        if self.entries.is_empty() {
            return &[];
        }
        let end = (self.offset + self.list_height.max(1)).min(self.entries.len());
        &self.entries[self.offset..end]
    }

    fn current_game(&self) -> Option<&Game> {
        self.entries.get(self.cursor)
    }

    fn set_status(&mut self, message: String) {
        self.status = message;
    }

    fn ensure_cursor_visible(&mut self) {
        if self.entries.is_empty() {
            self.cursor = 0;
            self.offset = 0;
            return;
        }
        if self.list_height == 0 {
            self.offset = 0;
            return;
        }
        self.cursor = self.cursor.min(self.entries.len() - 1);
        let height = self.list_height;
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + height {
            self.offset = self.cursor + 1 - height;
        }
        self.offset = self.offset.min(self.entries.len().saturating_sub(height));
    }
}
