//! Main TUI application state and logic

use crate::bridge::Session;
use crate::catalog::Algorithm;
use crate::constants::{MAX_INTERVAL, MIN_INTERVAL};
use crate::playback::{Clock, PlaybackEvent, SystemClock};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Data,
    Variables,
}

impl FocusedPane {
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Data => FocusedPane::Variables,
            FocusedPane::Variables => FocusedPane::Data,
        }
    }
}

/// The main application state
pub struct App<C: Clock = SystemClock> {
    /// Generator, input and player for the algorithm on screen
    pub session: Session<Algorithm, C>,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub data_scroll: usize,
    pub variables_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl<C: Clock> App<C> {
    pub fn new(session: Session<Algorithm, C>) -> Self {
        App {
            session,
            focused_pane: FocusedPane::Data,
            data_scroll: 0,
            variables_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or(Instant::now()),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.tick();

            // Short poll timeout keeps autoplay ticks responsive
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Deliver due autoplay ticks and report the latest one
    pub fn tick(&mut self) {
        let events = self.session.controller_mut().poll();
        match events.last() {
            Some(PlaybackEvent::Advanced { .. }) => {
                self.status_message = "Playing...".to_string();
            }
            Some(PlaybackEvent::Wrapped { .. }) => {
                self.status_message = "Looped back to the start".to_string();
            }
            Some(PlaybackEvent::Finished { .. }) => {
                self.status_message = "Playback complete".to_string();
            }
            None => {}
        }
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(main_chunks[1]);

        let algorithm = self.session.generator().name();
        let controller = self.session.controller();
        let status = super::panes::StatusRenderData {
            message: &self.status_message,
            cursor: controller.current_index().unwrap_or(0),
            length: controller.len(),
            is_playing: controller.is_playing(),
            looping: controller.config().looping,
            interval: controller.interval(),
        };

        let Some(view) = self.session.frame() else {
            super::panes::render_status_bar(frame, main_chunks[2], &status);
            return;
        };
        let step_id = controller.current_step().map_or(0, |step| step.id());

        super::panes::render_narration_pane(
            frame,
            main_chunks[0],
            algorithm,
            view.description,
            step_id,
        );

        super::panes::render_data_pane(
            frame,
            columns[0],
            view.data,
            view.highlight,
            self.focused_pane == FocusedPane::Data,
            &mut self.data_scroll,
        );

        super::panes::render_variables_pane(
            frame,
            columns[1],
            view.variables,
            self.focused_pane == FocusedPane::Variables,
            &mut self.variables_scroll,
        );

        super::panes::render_status_bar(frame, main_chunks[2], &status);
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Left => {
                self.session.controller_mut().pause();
                self.status_message = if self.session.controller_mut().step_backward() {
                    "Stepped backward".to_string()
                } else {
                    "Already at the first step".to_string()
                };
            }
            KeyCode::Right => {
                self.session.controller_mut().pause();
                self.status_message = if self.session.controller_mut().step_forward() {
                    "Stepped forward".to_string()
                } else {
                    "Already at the last step".to_string()
                };
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Data => self.data_scroll = self.data_scroll.saturating_sub(1),
                FocusedPane::Variables => {
                    self.variables_scroll = self.variables_scroll.saturating_sub(1)
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Data => self.data_scroll = self.data_scroll.saturating_add(1),
                FocusedPane::Variables => {
                    self.variables_scroll = self.variables_scroll.saturating_add(1)
                }
            },
            KeyCode::Char(' ') => {
                // Toggle auto-play mode (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    let controller = self.session.controller_mut();
                    let was_playing = controller.is_playing();
                    self.status_message = if controller.toggle_play() {
                        "Playing...".to_string()
                    } else if was_playing {
                        "Paused".to_string()
                    } else {
                        "Nothing to play".to_string()
                    };
                }
            }
            KeyCode::Enter => {
                let controller = self.session.controller_mut();
                controller.pause();
                controller.seek(usize::MAX);
                self.status_message = "Jumped to end".to_string();
            }
            KeyCode::Backspace => {
                self.session.controller_mut().reset();
                self.status_message = "Jumped to start".to_string();
            }
            KeyCode::Char('l') | KeyCode::Char('L') => {
                let controller = self.session.controller_mut();
                let looping = !controller.config().looping;
                controller.set_looping(looping);
                self.status_message = if looping {
                    "Looping on".to_string()
                } else {
                    "Looping off".to_string()
                };
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                let interval = (self.session.controller().interval() / 2).max(MIN_INTERVAL);
                self.set_interval(interval);
            }
            KeyCode::Char('-') | KeyCode::Char('_') => {
                let interval = (self.session.controller().interval() * 2).min(MAX_INTERVAL);
                self.set_interval(interval);
            }
            _ => {}
        }
    }

    fn set_interval(&mut self, interval: Duration) {
        self.session.controller_mut().set_interval(interval);
        self.status_message = format!("Step every {}ms", interval.as_millis());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogInput;
    use crate::playback::{ManualClock, PlaybackConfig, PlaybackState};
    use crate::trace::TraceLimits;
    use crossterm::event::KeyModifiers;

    fn app() -> (App<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let input = Algorithm::BubbleSort
            .parse_input(r#"{"values": [3, 1, 2]}"#)
            .unwrap();
        assert!(matches!(input, CatalogInput::BubbleSort(_)));
        let session = Session::with_clock(
            Algorithm::BubbleSort,
            input,
            PlaybackConfig::default(),
            TraceLimits::default(),
            clock.clone(),
        )
        .unwrap();
        (App::new(session), clock)
    }

    fn press(app: &mut App<ManualClock>, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_arrow_keys_move_the_cursor() {
        let (mut app, _) = app();
        press(&mut app, KeyCode::Left);
        assert_eq!(app.status_message, "Already at the first step");
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.session.controller().current_index(), Some(2));
        press(&mut app, KeyCode::Left);
        assert_eq!(app.session.controller().current_index(), Some(1));
    }

    #[test]
    fn test_enter_and_backspace_jump() {
        let (mut app, _) = app();
        let last = app.session.controller().len() - 1;
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session.controller().current_index(), Some(last));
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.session.controller().current_index(), Some(0));
    }

    #[test]
    fn test_space_plays_and_ticks_advance() {
        let (mut app, clock) = app();
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.session.controller().state(), PlaybackState::Playing);

        clock.advance(app.session.controller().interval());
        app.tick();
        assert_eq!(app.session.controller().current_index(), Some(1));
        assert_eq!(app.status_message, "Playing...");

        // Manual stepping stops autoplay
        press(&mut app, KeyCode::Right);
        assert_eq!(app.session.controller().state(), PlaybackState::Ready);
    }

    #[test]
    fn test_speed_keys_stay_in_bounds() {
        let (mut app, _) = app();
        for _ in 0..20 {
            press(&mut app, KeyCode::Char('+'));
        }
        assert_eq!(app.session.controller().interval(), MIN_INTERVAL);
        for _ in 0..20 {
            press(&mut app, KeyCode::Char('-'));
        }
        assert_eq!(app.session.controller().interval(), MAX_INTERVAL);
    }

    #[test]
    fn test_loop_toggle_and_focus() {
        let (mut app, _) = app();
        press(&mut app, KeyCode::Char('l'));
        assert!(app.session.controller().config().looping);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::Variables);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
