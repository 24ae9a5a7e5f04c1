//! Console presentation: scene drawing, typewriter messages, and the blocking
//! menus behind the interactive decision engine.
//!
//! The battle core only ever talks to this module through the [`BattleUi`] and
//! [`Picker`] boundaries; nothing in here feeds information back into turn
//! resolution.

use crate::battle::state::{BattleEvent, BattleInfo, BattleUi};
use crate::decision::Picker;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{execute, queue};
use std::cell::RefCell;
use std::io::{self, Stdout, Write};
use std::rc::Rc;
use std::time::Duration;

const TEXT_BOX_WIDTH: usize = 40;
const HEALTH_BAR_WIDTH: usize = 38;
const TYPE_DELAY: Duration = Duration::from_millis(30);
const AUTO_ADVANCE_PAUSE: Duration = Duration::from_millis(700);

/// Raw-mode console. Keeps the latest battle snapshot so menus and messages
/// can repaint the scene behind themselves.
pub struct Terminal {
    out: Stdout,
    scene: Option<BattleInfo>,
    message: String,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        execute!(out, Hide, Clear(ClearType::All), MoveTo(0, 0))?;
        Ok(Terminal {
            out,
            scene: None,
            message: String::new(),
        })
    }

    pub fn set_scene(&mut self, scene: BattleInfo) {
        self.scene = Some(scene);
    }

    /// Repaint everything: scene, then the current message box.
    pub fn draw(&mut self) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        for line in self.scene_lines() {
            queue!(self.out, Print(line), Print("\r\n"))?;
        }
        if !self.message.is_empty() {
            for line in message_box_lines(&self.message) {
                queue!(self.out, Print(line), Print("\r\n"))?;
            }
        }
        self.out.flush()
    }

    fn scene_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(scene) = &self.scene {
            for side in &scene.sides {
                lines.push(side.header.clone());
                lines.push(side.active.summary.clone());
                lines.push(health_bar(side.active.current_hp, side.active.max_hp));
                lines.push(String::new());
            }
        }
        lines
    }

    /// Show a message with a typewriter reveal. Any key skips the reveal;
    /// unless `auto` is set, a key press is then required to move on.
    pub fn say(&mut self, text: &str, auto: bool) -> io::Result<()> {
        let chars: Vec<char> = text.chars().collect();
        let mut revealed = 0;
        while revealed < chars.len() {
            revealed += 1;
            self.message = chars[..revealed].iter().collect();
            self.draw()?;
            if event::poll(TYPE_DELAY)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind != KeyEventKind::Release {
                        break;
                    }
                }
            }
        }

        self.message = format!("{} >", text);
        self.draw()?;
        if auto {
            // System-paced: hold the line briefly, don't wait for a key.
            let _ = event::poll(AUTO_ADVANCE_PAUSE)?;
        } else {
            wait_for_key()?;
        }
        self.message = text.to_string();
        self.draw()
    }

    /// Vertical menu over the current scene, returning the confirmed index.
    pub fn menu(&mut self, prompt: &str, options: &[String]) -> io::Result<usize> {
        self.message = prompt.to_string();
        let mut selected = 0usize;
        loop {
            self.draw()?;
            for (i, option) in options.iter().enumerate() {
                let cursor = if i == selected { "> " } else { "  " };
                queue!(self.out, Print(cursor), Print(option), Print("\r\n"))?;
            }
            self.out.flush()?;

            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                match key.code {
                    KeyCode::Enter => return Ok(selected),
                    KeyCode::Up | KeyCode::Left => selected = selected.saturating_sub(1),
                    KeyCode::Down | KeyCode::Right => {
                        selected = (selected + 1).min(options.len() - 1)
                    }
                    _ => {}
                }
            }
        }
    }

    /// Letters-and-digits text entry, capped at `max_len`, upper-cased the way
    /// the arena displays trainer names.
    pub fn read_name(&mut self, prompt: &str, max_len: usize) -> io::Result<String> {
        self.message = prompt.to_string();
        let mut value = String::new();
        loop {
            self.draw()?;
            queue!(
                self.out,
                Print("Letters and digits only."),
                Print("\r\n"),
                Print("> "),
                Print(&value),
                Print("_")
            )?;
            self.out.flush()?;

            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                match key.code {
                    KeyCode::Enter => return Ok(value),
                    KeyCode::Backspace => {
                        value.pop();
                    }
                    KeyCode::Char(c) if c.is_alphanumeric() && value.len() < max_len => {
                        value.extend(c.to_uppercase());
                    }
                    _ => {}
                }
            }
        }
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(self.out, Show, Print("\r\n"));
        let _ = terminal::disable_raw_mode();
    }
}

fn wait_for_key() -> io::Result<()> {
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Release {
                return Ok(());
            }
        }
    }
}

fn health_bar(current: u16, max: u16) -> String {
    let filled = if max == 0 {
        0
    } else {
        let ratio = f64::from(current) / f64::from(max);
        (ratio * HEALTH_BAR_WIDTH as f64).ceil() as usize
    };
    let filled = filled.min(HEALTH_BAR_WIDTH);
    format!(
        "[{}{}]",
        "~".repeat(filled),
        " ".repeat(HEALTH_BAR_WIDTH - filled)
    )
}

fn message_box_lines(message: &str) -> Vec<String> {
    let border = "-".repeat(TEXT_BOX_WIDTH);
    let mut lines = vec![border.clone()];
    let chars: Vec<char> = message.chars().collect();
    for chunk in chars.chunks(TEXT_BOX_WIDTH) {
        lines.push(chunk.iter().collect());
    }
    lines.push(border);
    lines
}

/// Cloneable handle to the one console, shared between the battle UI and any
/// number of interactive pickers. Borrows are transient, one blocking call at
/// a time, which is exactly the cooperative single-threaded model the turn
/// loop assumes.
#[derive(Clone)]
pub struct SharedTerminal {
    inner: Rc<RefCell<Terminal>>,
}

impl SharedTerminal {
    pub fn new() -> io::Result<Self> {
        Ok(SharedTerminal {
            inner: Rc::new(RefCell::new(Terminal::new()?)),
        })
    }

    pub fn say(&self, text: &str) -> io::Result<()> {
        self.inner.borrow_mut().say(text, false)
    }

    pub fn menu(&self, prompt: &str, options: &[String]) -> io::Result<usize> {
        self.inner.borrow_mut().menu(prompt, options)
    }

    pub fn read_name(&self, prompt: &str, max_len: usize) -> io::Result<String> {
        self.inner.borrow_mut().read_name(prompt, max_len)
    }
}

impl BattleUi for SharedTerminal {
    fn notify(&mut self, event: BattleEvent) {
        if let Some(line) = event.format() {
            // A dead stdout leaves nowhere to report the failure; drop it.
            let _ = self.inner.borrow_mut().say(&line, event.auto_advance());
        }
    }

    fn refresh(&mut self, info: &BattleInfo) {
        let mut terminal = self.inner.borrow_mut();
        terminal.set_scene(info.clone());
        let _ = terminal.draw();
    }
}

impl Picker for SharedTerminal {
    fn pick(&mut self, prompt: &str, options: &[String]) -> usize {
        self.inner
            .borrow_mut()
            .menu(prompt, options)
            .expect("console input is required to continue the battle")
    }
}
