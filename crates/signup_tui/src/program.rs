//! A minimal Elm-architecture runtime over crossterm.
//!
//! A [`Model`] receives [`Msg`]s, may answer with a [`Cmd`], and renders
//! itself to a string. [`Program`] owns the terminal: it enters raw mode,
//! forwards key presses and resizes, and redraws after every update.
//! [`Simulator`] drives a model the same way without a terminal.

use std::io::{self, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{
        self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode,
    },
};
use tracing::debug;

use crate::error::Result;

// =============================================================================
// Messages
// =============================================================================

/// Keys the form reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A printable character.
    Char(char),
    /// Backspace.
    Backspace,
    /// Enter.
    Enter,
    /// Tab.
    Tab,
    /// Shift+Tab.
    BackTab,
    /// Arrow up.
    Up,
    /// Arrow down.
    Down,
    /// Arrow left.
    Left,
    /// Arrow right.
    Right,
    /// Escape.
    Esc,
    /// Ctrl+C.
    CtrlC,
}

/// Input delivered to a [`Model`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Msg {
    /// A key was pressed.
    Key(Key),
    /// The terminal was resized.
    Resize {
        /// Columns.
        width: u16,
        /// Rows.
        height: u16,
    },
}

/// Effects a model can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cmd {
    /// Stop the program.
    Quit,
}

/// Maps a crossterm key event to a [`Key`], ignoring keys the form has no
/// use for.
pub fn from_crossterm_key(code: KeyCode, modifiers: KeyModifiers) -> Option<Key> {
    let ctrl = modifiers.contains(KeyModifiers::CONTROL);
    let key = match code {
        KeyCode::Char('c' | 'C') if ctrl => Key::CtrlC,
        KeyCode::Char(_) if ctrl => return None,
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab if modifiers.contains(KeyModifiers::SHIFT) => Key::BackTab,
        KeyCode::Tab => Key::Tab,
        KeyCode::BackTab => Key::BackTab,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Esc => Key::Esc,
        _ => return None,
    };
    Some(key)
}

// =============================================================================
// Model
// =============================================================================

/// An application driven by [`Program`].
pub trait Model {
    /// Processes a message, optionally returning a command.
    fn update(&mut self, msg: Msg) -> Option<Cmd>;

    /// Renders the model. Lines are separated by `\n`.
    fn view(&self) -> String;
}

// =============================================================================
// Program
// =============================================================================

/// Runs a [`Model`] in the terminal.
pub struct Program<M: Model> {
    model: M,
    alt_screen: bool,
}

impl<M: Model> Program<M> {
    /// Creates a program for `model`.
    pub fn new(model: M) -> Self {
        Self {
            model,
            alt_screen: false,
        }
    }

    /// Sets whether the alternate screen buffer is used.
    pub fn alt_screen(mut self, enabled: bool) -> Self {
        self.alt_screen = enabled;
        self
    }

    /// Runs the program on stdout and returns the final model.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be set up or read.
    pub fn run(self) -> Result<M> {
        self.run_with_writer(io::stdout())
    }

    /// Runs the program, drawing to `writer`.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be set up or read.
    pub fn run_with_writer<W: Write>(mut self, mut writer: W) -> Result<M> {
        let alt_screen = self.alt_screen;

        enable_raw_mode()?;
        let result = enter_screen(&mut writer, alt_screen)
            .map_err(Into::into)
            .and_then(|()| self.event_loop(&mut writer));

        let _ = execute!(writer, Show);
        if alt_screen {
            let _ = execute!(writer, LeaveAlternateScreen);
        }
        let _ = disable_raw_mode();

        result.map(|()| self.model)
    }

    fn event_loop<W: Write>(&mut self, writer: &mut W) -> Result<()> {
        if let Ok((width, height)) = terminal::size() {
            self.model.update(Msg::Resize { width, height });
        }

        let mut last_view = String::new();
        self.render(writer, &mut last_view)?;

        loop {
            let msg = match event::read()? {
                Event::Key(key_event) => {
                    if key_event.kind != KeyEventKind::Press {
                        continue;
                    }
                    match from_crossterm_key(key_event.code, key_event.modifiers) {
                        Some(key) => Msg::Key(key),
                        None => continue,
                    }
                }
                Event::Resize(width, height) => Msg::Resize { width, height },
                _ => continue,
            };

            if let Some(Cmd::Quit) = self.model.update(msg) {
                debug!("quit requested");
                return Ok(());
            }
            self.render(writer, &mut last_view)?;
        }
    }

    fn render<W: Write>(&self, writer: &mut W, last_view: &mut String) -> Result<()> {
        let view = self.model.view();
        if view == *last_view {
            return Ok(());
        }

        // Raw mode does not translate bare newlines.
        execute!(writer, MoveTo(0, 0), Clear(ClearType::All))?;
        write!(writer, "{}", view.replace('\n', "\r\n"))?;
        writer.flush()?;

        *last_view = view;
        Ok(())
    }
}

// =============================================================================
// Simulator
// =============================================================================

/// Drives a [`Model`] without a terminal.
///
/// ```
/// use signup_tui::program::{Cmd, Key, Model, Msg, Simulator};
///
/// struct Echo(String);
///
/// impl Model for Echo {
///     fn update(&mut self, msg: Msg) -> Option<Cmd> {
///         match msg {
///             Msg::Key(Key::Char(c)) => self.0.push(c),
///             Msg::Key(Key::Esc) => return Some(Cmd::Quit),
///             _ => {}
///         }
///         None
///     }
///
///     fn view(&self) -> String {
///         self.0.clone()
///     }
/// }
///
/// let mut sim = Simulator::new(Echo(String::new()));
/// sim.type_text("hi");
/// sim.press(Key::Esc);
/// assert!(sim.is_quit());
/// assert_eq!(sim.last_view(), Some("hi"));
/// ```
pub struct Simulator<M: Model> {
    model: M,
    views: Vec<String>,
    quit: bool,
}

impl<M: Model> Simulator<M> {
    /// Creates a simulator, rendering the initial view.
    pub fn new(model: M) -> Self {
        let views = vec![model.view()];
        Self {
            model,
            views,
            quit: false,
        }
    }

    /// Delivers a message unless the model already quit.
    pub fn send(&mut self, msg: Msg) -> Option<Cmd> {
        if self.quit {
            return None;
        }
        let cmd = self.model.update(msg);
        if let Some(Cmd::Quit) = cmd {
            self.quit = true;
        } else {
            self.views.push(self.model.view());
        }
        cmd
    }

    /// Presses one key.
    pub fn press(&mut self, key: Key) -> Option<Cmd> {
        self.send(Msg::Key(key))
    }

    /// Presses a sequence of keys.
    pub fn press_all(&mut self, keys: impl IntoIterator<Item = Key>) {
        for key in keys {
            self.press(key);
        }
    }

    /// Types `text` one character at a time.
    pub fn type_text(&mut self, text: &str) {
        self.press_all(text.chars().map(Key::Char));
    }

    /// The model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Mutable access to the model.
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Consumes the simulator, returning the model.
    pub fn into_model(self) -> M {
        self.model
    }

    /// Every rendered view, oldest first.
    pub fn views(&self) -> &[String] {
        &self.views
    }

    /// The most recent view.
    pub fn last_view(&self) -> Option<&str> {
        self.views.last().map(String::as_str)
    }

    /// Whether the model asked to quit.
    pub fn is_quit(&self) -> bool {
        self.quit
    }
}

fn enter_screen<W: Write>(writer: &mut W, alt_screen: bool) -> io::Result<()> {
    if alt_screen {
        execute!(writer, EnterAlternateScreen)?;
    }
    execute!(writer, Hide)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_plain_and_control_keys() {
        assert_eq!(
            from_crossterm_key(KeyCode::Char('a'), KeyModifiers::NONE),
            Some(Key::Char('a'))
        );
        assert_eq!(
            from_crossterm_key(KeyCode::Char('A'), KeyModifiers::SHIFT),
            Some(Key::Char('A'))
        );
        assert_eq!(
            from_crossterm_key(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Some(Key::CtrlC)
        );
        assert_eq!(
            from_crossterm_key(KeyCode::Char('x'), KeyModifiers::CONTROL),
            None
        );
    }

    #[test]
    fn maps_navigation_keys() {
        assert_eq!(
            from_crossterm_key(KeyCode::Tab, KeyModifiers::NONE),
            Some(Key::Tab)
        );
        assert_eq!(
            from_crossterm_key(KeyCode::Tab, KeyModifiers::SHIFT),
            Some(Key::BackTab)
        );
        assert_eq!(
            from_crossterm_key(KeyCode::BackTab, KeyModifiers::SHIFT),
            Some(Key::BackTab)
        );
        assert_eq!(from_crossterm_key(KeyCode::F(1), KeyModifiers::NONE), None);
    }

    struct Counter(u32);

    impl Model for Counter {
        fn update(&mut self, msg: Msg) -> Option<Cmd> {
            match msg {
                Msg::Key(Key::Char('+')) => self.0 += 1,
                Msg::Key(Key::Esc) => return Some(Cmd::Quit),
                _ => {}
            }
            None
        }

        fn view(&self) -> String {
            format!("count: {}", self.0)
        }
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::ErrorKind::BrokenPipe.into())
        }
    }

    #[test]
    fn failed_setup_leaves_raw_mode_off() {
        let result = Program::new(Counter(0)).alt_screen(true).run_with_writer(BrokenPipe);
        assert!(result.is_err());
        assert!(!terminal::is_raw_mode_enabled().unwrap_or(false));
    }

    #[test]
    fn simulator_records_views_until_quit() {
        let mut sim = Simulator::new(Counter(0));
        sim.type_text("++");
        assert_eq!(sim.press(Key::Esc), Some(Cmd::Quit));
        sim.press(Key::Char('+'));

        assert!(sim.is_quit());
        assert_eq!(sim.model().0, 2);
        assert_eq!(sim.views().len(), 3);
        assert_eq!(sim.last_view(), Some("count: 2"));
    }
}
