//! TUI application state and logic

use super::rendering::cell_at;
use crate::analytics::AnalyticsSink;
use crate::commands::{GenerateConfig, GenerateError, GenerateResult, generate_crossword};
use crate::core::Orientation;
use crate::session::{Arrow, Phase, SolveSession};
use crate::wordlists::WordSupplier;
use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use std::io;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

/// Interval between timer ticks
const TICK: Duration = Duration::from_secs(1);
/// Event poll interval while a crossword is being built
const BUILD_POLL: Duration = Duration::from_millis(50);

type Generation = Result<GenerateResult, GenerateError>;

/// Application state
pub struct App {
    pub session: Option<SolveSession>,
    pub config: GenerateConfig,
    pub messages: Vec<Message>,
    pub stats: Statistics,
    pub should_quit: bool,
    supplier: Arc<dyn WordSupplier>,
    sink: Arc<dyn AnalyticsSink>,
    pending: Option<Receiver<Generation>>,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

#[derive(Debug, Default, Clone)]
pub struct Statistics {
    pub puzzles: usize,
    pub checks: usize,
    pub best_score: u32,
}

impl App {
    #[must_use]
    pub fn new(
        supplier: Arc<dyn WordSupplier>,
        sink: Arc<dyn AnalyticsSink>,
        config: GenerateConfig,
    ) -> Self {
        Self {
            session: None,
            config,
            messages: vec![Message {
                text: "Welcome! Type letters to fill the grid, Enter to check.".to_string(),
                style: MessageStyle::Info,
            }],
            stats: Statistics::default(),
            should_quit: false,
            supplier,
            sink,
            pending: None,
        }
    }

    /// Build a crossword on the calling thread and install it
    pub fn new_crossword(&mut self) {
        let result = generate_crossword(self.supplier.as_ref(), &self.config, self.sink.as_ref());
        self.install(result);
    }

    /// Start building a crossword on a worker thread
    ///
    /// The current session stays in play until `poll_generation` installs
    /// the result. A request made while one is running is ignored.
    pub fn request_crossword(&mut self) {
        if self.pending.is_some() {
            return;
        }
        let (sender, receiver) = mpsc::channel();
        let supplier = Arc::clone(&self.supplier);
        let sink = Arc::clone(&self.sink);
        let config = self.config.clone();
        thread::spawn(move || {
            let result = generate_crossword(supplier.as_ref(), &config, sink.as_ref());
            if sender.send(result).is_err() {
                debug!("crossword finished after the app stopped waiting");
            }
        });
        self.pending = Some(receiver);
        self.add_message("Building a new crossword...", MessageStyle::Info);
    }

    /// Whether a crossword is being built in the background
    #[must_use]
    pub const fn is_generating(&self) -> bool {
        self.pending.is_some()
    }

    /// Install a finished background build, if any
    pub fn poll_generation(&mut self) {
        let Some(receiver) = &self.pending else {
            return;
        };
        match receiver.try_recv() {
            Ok(result) => {
                self.pending = None;
                self.install(result);
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                self.pending = None;
                error!("crossword worker stopped without a result");
                self.add_message("Crossword build was interrupted", MessageStyle::Error);
            }
        }
    }

    /// Replace the current session with a generated crossword
    ///
    /// On failure the previous session, if any, stays in play.
    fn install(&mut self, result: Generation) {
        match result {
            Ok(result) => {
                let placed = result.crossword.placed_words().len();
                let mut session = SolveSession::new(result.crossword)
                    .with_analytics(result.topic.clone(), Arc::clone(&self.sink));
                if let Some(first) = session.crossword().placed_words().first() {
                    let (row, col) = (first.row, first.col);
                    session.select_cell(row, col);
                }
                self.session = Some(session);
                self.stats.puzzles += 1;
                self.add_message(
                    &format!("New '{}' crossword with {placed} answers", result.topic),
                    MessageStyle::Success,
                );
            }
            Err(err) => {
                error!(error = %err, "crossword generation failed");
                self.add_message(&err.to_string(), MessageStyle::Error);
            }
        }
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        // Keep only last 5 messages
        if self.messages.len() > 5 {
            self.messages.remove(0);
        }
    }

    /// Advance the session timer by one second
    pub fn tick(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.tick();
        }
    }

    /// Apply one key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c' | 'q') if ctrl => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('n') if ctrl => {
                self.request_crossword();
                return;
            }
            _ => {}
        }

        let Some(session) = self.session.as_mut() else {
            return;
        };

        if session.phase() == Phase::Reviewed {
            // Only dismissal is accepted while the score is shown
            if key.code == KeyCode::Esc {
                session.dismiss_review();
            }
            return;
        }

        let Some((row, col)) = session.active_cell() else {
            return;
        };

        match key.code {
            KeyCode::Char('r') if ctrl => {
                session.reveal_answers();
                self.add_message("Answers revealed (hint penalty applies)", MessageStyle::Info);
            }
            KeyCode::Enter => {
                let score = session.check_answers();
                self.stats.checks += 1;
                self.stats.best_score = self.stats.best_score.max(score.final_score);
                let style = if score.percentage == 100 {
                    MessageStyle::Success
                } else {
                    MessageStyle::Info
                };
                self.add_message(
                    &format!(
                        "{} of {} correct ({}%), score {}",
                        score.correct, score.total, score.percentage, score.final_score
                    ),
                    style,
                );
            }
            KeyCode::Tab => session.toggle_orientation(),
            KeyCode::Up => session.move_by_arrow(Arrow::Up),
            KeyCode::Down => session.move_by_arrow(Arrow::Down),
            KeyCode::Left => session.move_by_arrow(Arrow::Left),
            KeyCode::Right => session.move_by_arrow(Arrow::Right),
            KeyCode::Backspace if key.modifiers.contains(KeyModifiers::ALT) => {
                session.backspace_on_empty(row, col);
            }
            KeyCode::Backspace => session.delete_letter(row, col),
            KeyCode::Delete => session.clear_cell(row, col),
            KeyCode::Char(c) if !ctrl => {
                session.type_letter(row, col, &c.to_string());
            }
            _ => {}
        }
    }

    /// Select the grid cell under a left click; clicking the cursor flips
    /// the orientation
    ///
    /// `area` is the frame the UI was last drawn into.
    pub fn handle_mouse(&mut self, mouse: MouseEvent, area: Rect) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.phase() == Phase::Reviewed {
            return;
        }
        if let Some((row, col)) = cell_at(area, session, mouse.column, mouse.row) {
            session.select_cell(row, col);
        }
    }

    /// Label of the active orientation for the status bar
    #[must_use]
    pub fn orientation_label(&self) -> &'static str {
        self.session
            .as_ref()
            .map_or(Orientation::Horizontal, SolveSession::orientation)
            .label()
    }
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui(mut app: App) -> Result<()> {
    app.request_crossword();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {err}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    let mut last_tick = Instant::now();
    info!("event loop started");

    loop {
        app.poll_generation();
        let area = terminal.draw(|f| super::rendering::ui(f, &app))?.area;

        let mut timeout = TICK.saturating_sub(last_tick.elapsed());
        if app.is_generating() {
            timeout = timeout.min(BUILD_POLL);
        }
        if event::poll(timeout)? {
            match event::read()? {
                // Only process key press events (fixes Windows double-input bug)
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse, area),
                _ => {}
            }
        }

        if last_tick.elapsed() >= TICK {
            app.tick();
            last_tick = Instant::now();
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
