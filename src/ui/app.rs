use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use tracing::warn;

use crate::config::AppConfig;
use crate::error::MoveError;
use crate::events::{ChannelObserver, GameEvent};
use crate::game::{GameOutcome, CENTER_COL, COLS};
use crate::session::{MoveOrigin, Session};

struct Notice {
    text: String,
    expires: Instant,
}

pub struct App {
    session: Session,
    events: mpsc::Receiver<GameEvent>,
    selected_column: usize,
    should_quit: bool,
    notice: Option<Notice>,
    ai_due: Option<Instant>,
    move_delay: Duration,
    notice_duration: Duration,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_session(Session::from_config(config), config)
    }

    pub fn with_session(mut session: Session, config: &AppConfig) -> Self {
        let (observer, events) = ChannelObserver::channel();
        session.subscribe(observer);
        App {
            session,
            events,
            selected_column: CENTER_COL,
            should_quit: false,
            notice: None,
            ai_due: None,
            move_delay: Duration::from_millis(config.ai.move_delay_ms),
            notice_duration: Duration::from_millis(config.ui.notice_ms),
        }
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
            self.tick(Instant::now());
        }
        Ok(())
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Current notice text, if one is showing
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_ref().map(|n| n.text.as_str())
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Advance timers: play a due computer move, pick up session events and
    /// expire stale notices.
    pub fn tick(&mut self, now: Instant) {
        if self.ai_due.is_some_and(|due| due <= now) {
            self.ai_due = None;
            if let Err(err) = self.session.play_ai_move() {
                warn!(%err, "computer move skipped");
            }
        }

        self.process_events(now);

        if self.notice.as_ref().is_some_and(|n| n.expires <= now) {
            self.notice = None;
        }
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key, Instant::now());
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column + 1 < COLS {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece(self.selected_column, now);
            }
            KeyCode::Char(c @ '1'..='7') => {
                let col = c as usize - '1' as usize;
                self.selected_column = col;
                self.drop_piece(col, now);
            }
            KeyCode::Char('r') => {
                self.ai_due = None;
                self.selected_column = CENTER_COL;
                self.session.new_game();
            }
            KeyCode::Char('x') => {
                self.session.reset_scores();
                self.show_notice("Scores reset", now);
            }
            KeyCode::Char('m') => {
                let mode = self.session.player_two().toggled();
                self.session.set_player_two(mode);
                self.show_notice(mode.label(), now);
                self.schedule_ai(now);
            }
            _ => {}
        }
        self.process_events(now);
    }

    /// Drop a human piece in `col`; rejections surface through the event stream
    fn drop_piece(&mut self, col: usize, now: Instant) {
        if self.session.submit_move(col, MoveOrigin::Human).is_ok() {
            self.schedule_ai(now);
        }
    }

    fn schedule_ai(&mut self, now: Instant) {
        self.ai_due = if self.session.is_computer_turn() {
            Some(now + self.move_delay)
        } else {
            None
        };
    }

    fn process_events(&mut self, now: Instant) {
        let events: Vec<GameEvent> = self.events.try_iter().collect();
        for event in events {
            let text = match event {
                GameEvent::GameStarted => "New game started!".to_string(),
                GameEvent::GameOver(GameOutcome::Win(player)) => {
                    format!("{} wins!", self.session.player_name(player))
                }
                GameEvent::GameOver(GameOutcome::Draw) => "Draw".to_string(),
                GameEvent::MoveRejected(MoveError::ColumnFull(_)) => "Column full".to_string(),
                GameEvent::MoveRejected(MoveError::GameAlreadyEnded) => {
                    "Game over! Press 'r' to restart.".to_string()
                }
                // Wrong-turn input is ignored without a notice
                _ => continue,
            };
            self.show_notice(text, now);
        }
    }

    fn show_notice(&mut self, text: impl Into<String>, now: Instant) {
        self.notice = Some(Notice {
            text: text.into(),
            expires: now + self.notice_duration,
        });
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(frame, &self.session, self.selected_column, self.notice());
    }
}
