use std::{
    io::{self, stdout, Stdout},
    time::Duration,
};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use reader_core::types::AppStateRecord;
use tracing::{info, warn};

use crate::host::ReaderHost;
use crate::layout::centered_rect;

use super::types::{CommandOutcome, Mode};
use super::App;

const HELP_READER: [&str; 7] = [
    "q / Ctrl-C: quit",
    "j / k, arrows, Space, PageUp / PageDown: turn pages",
    "Home / End: first / last page",
    "n or g: open page navigation",
    "?: toggle this help",
    "",
    "Navigation: ←/→ move slider, Tab focus, r reset, e enter page, Esc close",
];

impl App {
    /// Runs the terminal UI until the reader quits and returns the reading
    /// state to persist.
    ///
    /// When the terminal fails mid-session the state is saved before the
    /// error is returned, since the caller never sees the record then.
    pub fn run(mut self) -> io::Result<AppStateRecord> {
        let mut stdout = stdout();
        let raw_ok = enable_raw_mode().is_ok();
        let entered = if raw_ok {
            execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        } else {
            execute!(stdout, EnterAlternateScreen)
        };
        let result = entered
            .and_then(|()| Terminal::new(CrosstermBackend::new(stdout)))
            .and_then(|mut terminal| {
                let outcome = self.event_loop(&mut terminal, raw_ok);
                let restored = restore_terminal(&mut terminal, raw_ok);
                outcome.and(restored)
            });
        if let Err(err) = result {
            if raw_ok {
                let _ = disable_raw_mode();
            }
            warn!("terminal UI failed: {err}");
            self.persist_after_failure();
            return Err(err);
        }
        Ok(self.session.into_record())
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        interactive: bool,
    ) -> io::Result<()> {
        let term_size = terminal.size().map_err(|e| io::Error::other(e.to_string()))?;
        self.session
            .repaginate(self.view.inner_size(Rect::new(0, 0, term_size.width, term_size.height)));
        info!(
            pages = self.session.view().pages().len(),
            "reader started"
        );

        if !interactive {
            // Non-interactive fallback: draw once and exit cleanly
            warn!("raw mode unavailable; rendering a single frame");
            terminal.draw(|f| self.draw(f))?;
            return Ok(());
        }

        let mut last_frame = Rect::default();
        loop {
            if self.session.take_redraw() {
                terminal.draw(|f| {
                    last_frame = f.area();
                    self.draw(f);
                })?;
            }

            if !event::poll(Duration::from_millis(100))? {
                continue;
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if self.handle_key(key) == CommandOutcome::Exit {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => self.handle_mouse(last_frame, mouse),
                Event::Resize(width, height) => {
                    let area = Rect::new(0, 0, width, height);
                    self.session.repaginate(self.view.inner_size(area));
                    self.navigation.update(&self.session);
                }
                _ => {}
            }
        }
    }

    /// Closes the overlay, recording any pending implicit bookmark, and writes
    /// the reading state out directly.
    pub fn persist_after_failure(&mut self) {
        self.close_navigation();
        self.session.store_position();
    }

    pub fn draw(&self, f: &mut Frame<'_>) {
        let area = f.area();
        self.view.render(f, area, &self.session);
        if let Mode::Navigation = self.mode {
            self.navigation.render(f, area);
        }
        if self.show_help {
            let popup_area = centered_rect(70, 60, area);
            let help = Paragraph::new(HELP_READER.join("\n"))
                .block(
                    Block::default()
                        .title("Help (Esc or ? to close)")
                        .borders(Borders::ALL),
                )
                .wrap(Wrap { trim: false });
            f.render_widget(Clear, popup_area);
            f.render_widget(help, popup_area);
        }
    }
}

fn restore_terminal(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    interactive: bool,
) -> io::Result<()> {
    if interactive {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
    } else {
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
    }
}
