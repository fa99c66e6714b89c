//! Main application state and logic.

use std::time::Instant;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use rand::rngs::StdRng;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph},
    Frame,
};

use super::theme::{icons, Theme};
use super::widgets::{FilterTabs, FlashcardWidget, KeyHints, MessageWidget};
use crate::config::Config;
use crate::models::CardType;
use crate::session::{Action, CardView, Session};
use crate::source::{Collection, LoadError};

// ══════════════════════════════════════════════════════════════════════════
// Application State
// ══════════════════════════════════════════════════════════════════════════

/// Either a running session or the reason there can't be one.
#[derive(Debug)]
pub enum StudyState {
    Ready(Session),
    LoadFailed(LoadError),
}

/// What a key press asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Session(Action),
    ToggleFilter,
    CycleTheme,
    Quit,
}

/// Key bindings for the study screen.
pub fn command_for_key(key: KeyCode) -> Option<Command> {
    match key {
        KeyCode::Char(' ') => Some(Command::Session(Action::ToggleReveal)),
        KeyCode::Right | KeyCode::Enter | KeyCode::Char('n') => Some(Command::Session(Action::Next)),
        KeyCode::Char('s') => Some(Command::Session(Action::Shuffle)),
        KeyCode::Char('1') => Some(Command::Session(Action::SetFilter(CardType::Sentence))),
        KeyCode::Char('2') => Some(Command::Session(Action::SetFilter(CardType::Vocabulary))),
        KeyCode::Tab | KeyCode::Char('f') => Some(Command::ToggleFilter),
        KeyCode::Char('t') => Some(Command::CycleTheme),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

pub struct App {
    pub running: bool,

    // Config and theme
    pub config: Config,
    pub theme: Theme,

    pub state: StudyState,
    rng: StdRng,

    // Status message (shown temporarily)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    pub fn new(
        config: Config,
        loaded: Result<Collection, LoadError>,
        filter: CardType,
        mut rng: StdRng,
    ) -> Self {
        let theme = Theme::from_name(&config.theme);

        let state = match loaded {
            Ok(collection) => StudyState::Ready(Session::start(collection, filter, &mut rng)),
            Err(err) => {
                tracing::warn!(error = %err, "starting without flashcards");
                StudyState::LoadFailed(err)
            }
        };

        Self {
            running: true,
            config,
            theme,
            state,
            rng,
            status_message: None,
        }
    }

    pub fn cycle_theme(&mut self) {
        let new_theme_name = self.theme.name.next();
        self.theme = Theme::new(new_theme_name);
        self.config.theme = new_theme_name.as_str().to_string();
        if let Err(e) = self.config.save() {
            tracing::warn!(error = %e, "could not save theme choice");
        }
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    pub fn session(&self) -> Option<&Session> {
        match self.state {
            StudyState::Ready(ref session) => Some(session),
            StudyState::LoadFailed(_) => None,
        }
    }

    /// Run one command. Session actions are dropped when nothing loaded.
    pub fn dispatch(&mut self, command: Command) {
        match command {
            Command::Quit => self.running = false,
            Command::CycleTheme => self.cycle_theme(),
            Command::ToggleFilter => {
                if let Some(session) = self.session() {
                    let next = session.selected().toggle();
                    self.dispatch(Command::Session(Action::SetFilter(next)));
                }
            }
            Command::Session(action) => {
                if let StudyState::Ready(ref mut session) = self.state {
                    let current = std::mem::take(session);
                    *session = current.apply(action, &mut self.rng);
                    tracing::debug!(
                        ?action,
                        position = session.position(),
                        revealed = session.is_revealed(),
                        "session updated"
                    );
                    self.announce(action);
                }
            }
        }
    }

    fn announce(&mut self, action: Action) {
        let Some(session) = self.session() else {
            return;
        };
        let count = session.deck().len();

        let message = match action {
            Action::Shuffle if count > 0 => format!("{} Shuffled {} cards", icons::SHUFFLE, count),
            Action::SetFilter(kind) => format!("{}: {} cards", kind.display_name(), count),
            _ => return,
        };
        self.set_status(message);
    }

    // ══════════════════════════════════════════════════════════════════════
    // Event Handling
    // ══════════════════════════════════════════════════════════════════════

    pub fn handle_events(&mut self) -> anyhow::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    return Ok(());
                }

                if let Some(command) = command_for_key(key.code) {
                    self.dispatch(command);
                }
            }
        }
        Ok(())
    }

    // ══════════════════════════════════════════════════════════════════════
    // Rendering
    // ══════════════════════════════════════════════════════════════════════

    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        // Clear with background
        frame.render_widget(Clear, area);
        frame.render_widget(
            Block::default().style(Style::default().bg(self.theme.colors.bg_dark)),
            area,
        );

        let chunks = Layout::vertical([
            Constraint::Length(1),   // Title
            Constraint::Length(1),   // Filter tabs
            Constraint::Length(1),   // Spacing
            Constraint::Min(8),      // Card
            Constraint::Length(1),   // Status
            Constraint::Length(1),   // Hints
        ])
        .split(area);

        let title = Paragraph::new("Flashcards · Chinese → English")
            .alignment(Alignment::Center)
            .style(self.theme.title().bg(self.theme.colors.bg_header));
        frame.render_widget(title, chunks[0]);

        match self.state {
            StudyState::Ready(ref session) => {
                frame.render_widget(FilterTabs::new(session.selected(), &self.theme), chunks[1]);
                self.render_study(frame, chunks[3], session);
            }
            StudyState::LoadFailed(ref err) => {
                self.render_load_failed(frame, chunks[3], err);
            }
        }

        // Show status message if recent (within 3 seconds)
        if let Some((ref msg, time)) = self.status_message {
            if time.elapsed().as_secs() < 3 {
                let status = Paragraph::new(msg.as_str())
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(self.theme.colors.success));
                frame.render_widget(status, chunks[4]);
            }
        }

        let theme_hint = format!("[{}]", self.theme.name.display_name());
        let hints: Vec<(&str, &str)> = match self.state {
            StudyState::Ready(_) => vec![
                ("Space", "reveal"),
                ("→", "next"),
                ("s", "shuffle"),
                ("Tab", "filter"),
                ("t", theme_hint.as_str()),
                ("q", "quit"),
            ],
            StudyState::LoadFailed(_) => vec![("t", theme_hint.as_str()), ("q", "quit")],
        };
        frame.render_widget(KeyHints::new(&hints, &self.theme), chunks[5]);
    }

    fn render_study(&self, frame: &mut Frame, area: Rect, session: &Session) {
        let card_area = centered_rect(80, 100, area);

        match session.view() {
            CardView::Card(card) => {
                frame.render_widget(FlashcardWidget::new(card, &self.theme), card_area);
            }
            CardView::NoCards { filter } => {
                let lines = vec![
                    Line::from(format!("No {} cards in this collection.", filter.as_str())),
                    Line::from(""),
                    Line::from(vec![
                        Span::styled("Press ", self.theme.key_hint()),
                        Span::styled("Tab", self.theme.key_highlight()),
                        Span::styled(" to switch to ", self.theme.key_hint()),
                        Span::styled(filter.toggle().display_name(), self.theme.key_hint()),
                    ]),
                ];
                frame.render_widget(
                    MessageWidget::new("NO CARDS", lines, false, &self.theme),
                    card_area,
                );
            }
        }
    }

    fn render_load_failed(&self, frame: &mut Frame, area: Rect, err: &LoadError) {
        let mut lines = vec![
            Line::from(format!("{} Could not load flashcards", icons::WARNING)),
            Line::from(""),
            Line::from(err.to_string()),
        ];
        if err.is_missing() {
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::styled("Run ", self.theme.key_hint()),
                Span::styled("zhixiao init", self.theme.key_highlight()),
                Span::styled(" to install the sample deck", self.theme.key_hint()),
            ]));
        }

        frame.render_widget(
            MessageWidget::new("LOAD FAILED", lines, true, &self.theme),
            centered_rect(80, 100, area),
        );
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Helper Functions
// ══════════════════════════════════════════════════════════════════════════

/// Create a centered rectangle.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(r);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Flashcard;
    use rand::SeedableRng;
    use ratatui::{backend::TestBackend, Terminal};
    use std::path::PathBuf;
    use std::sync::Arc;

    fn greetings() -> Collection {
        Arc::from(vec![
            Flashcard::new("你好", "Hello", CardType::Vocabulary).with_category("Greetings"),
            Flashcard::new("你好吗？", "How are you?", CardType::Sentence).with_category("Greetings"),
        ])
    }

    fn app_with(loaded: Result<Collection, LoadError>, filter: CardType) -> App {
        App::new(Config::default(), loaded, filter, StdRng::seed_from_u64(1))
    }

    fn screen_text(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_key_bindings() {
        assert_eq!(
            command_for_key(KeyCode::Char(' ')),
            Some(Command::Session(Action::ToggleReveal))
        );
        assert_eq!(command_for_key(KeyCode::Right), Some(Command::Session(Action::Next)));
        assert_eq!(command_for_key(KeyCode::Char('s')), Some(Command::Session(Action::Shuffle)));
        assert_eq!(command_for_key(KeyCode::Tab), Some(Command::ToggleFilter));
        assert_eq!(command_for_key(KeyCode::Esc), Some(Command::Quit));
        assert_eq!(command_for_key(KeyCode::Char('z')), None);
    }

    #[test]
    fn test_answer_hidden_until_revealed() {
        let mut app = app_with(Ok(greetings()), CardType::Sentence);

        let text = screen_text(&mut app);
        assert!(text.contains("1 of 1"));
        assert!(text.contains("Press Space to show English"));
        assert!(!text.contains("How are you?"));

        app.dispatch(Command::Session(Action::ToggleReveal));
        let text = screen_text(&mut app);
        assert!(text.contains("How are you?"));
        assert!(!text.contains("Press Space to show English"));

        app.dispatch(Command::Session(Action::Next));
        assert!(!screen_text(&mut app).contains("How are you?"));
    }

    #[test]
    fn test_toggle_filter_switches_deck() {
        let mut app = app_with(Ok(greetings()), CardType::Sentence);

        app.dispatch(Command::ToggleFilter);
        let session = app.session().unwrap();
        assert_eq!(session.selected(), CardType::Vocabulary);
        assert_eq!(session.deck()[0].english, "Hello");
        assert!(app.status_message.is_some());
    }

    #[test]
    fn test_empty_filter_shows_no_cards() {
        let collection: Collection = Arc::from(vec![Flashcard::new(
            "你好吗？",
            "How are you?",
            CardType::Sentence,
        )]);
        let mut app = app_with(Ok(collection), CardType::Vocabulary);

        app.dispatch(Command::Session(Action::Next));
        app.dispatch(Command::Session(Action::ToggleReveal));

        let text = screen_text(&mut app);
        assert!(text.contains("NO CARDS"));
        assert!(text.contains("No vocabulary cards in this collection."));
        assert!(!text.contains("LOAD FAILED"));
        assert!(!app.session().unwrap().is_revealed());
    }

    #[test]
    fn test_missing_source_shows_load_failure() {
        let err = LoadError::Missing {
            path: PathBuf::from("data.json"),
        };
        let mut app = app_with(Err(err), CardType::Sentence);

        app.dispatch(Command::Session(Action::Shuffle));
        app.dispatch(Command::ToggleFilter);

        assert!(app.session().is_none());
        assert!(app.status_message.is_none());
        let text = screen_text(&mut app);
        assert!(text.contains("LOAD FAILED"));
        assert!(text.contains("zhixiao init"));
        assert!(!text.contains("NO CARDS"));
    }

    #[test]
    fn test_malformed_source_shows_reason() {
        let err = LoadError::Malformed {
            path: PathBuf::from("data.json"),
            reason: "not valid JSON".to_string(),
        };
        let mut app = app_with(Err(err), CardType::Sentence);

        let text = screen_text(&mut app);
        assert!(text.contains("LOAD FAILED"));
        assert!(text.contains("not valid JSON"));
        assert!(!text.contains("zhixiao init"));
    }

    #[test]
    fn test_quit() {
        let mut app = app_with(Ok(greetings()), CardType::Sentence);
        app.dispatch(Command::Quit);
        assert!(!app.running);
    }
}
