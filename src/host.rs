//! Line-oriented host loop
//!
//! Stands in for a GUI toolkit event loop: each input line is one user
//! action, and the UI dispatcher is pumped between actions so bus events
//! reach the menus before the next one.

use std::cell::RefCell;
use std::io::{self, BufRead, Write};

use vcpkit_ui::{
    plain_text, ExitPrompt, Key, KeyEvent, KeyOutcome, Menu, MenuEntry, MessageLevel,
    VcpMainWindow,
};

const HELP: &str = "\
Commands:
  menus             show the menu tree
  status            show the status bar
  trigger <name>    activate a control by name
  press <key>       key down (up, down, left, right, pageup, pagedown)
  repeat <key>      auto-repeated key down
  release <key>     key up
  prompt on|off     ask before exiting
  quit              close the window";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Asks the exit question on the loop's own input and output
struct LinePrompt<'a, R, W> {
    input: RefCell<&'a mut R>,
    out: RefCell<&'a mut W>,
}

impl<R: BufRead, W: Write> ExitPrompt for LinePrompt<'_, R, W> {
    fn confirm_exit(&self, title: &str, message: &str) -> bool {
        let mut out = self.out.borrow_mut();
        if write!(out, "{} {} [y/N] ", title, message)
            .and_then(|_| out.flush())
            .is_err()
        {
            return false;
        }
        let mut answer = String::new();
        match self.input.borrow_mut().read_line(&mut answer) {
            // Closed input cannot answer, so let the window go
            Ok(0) => true,
            Ok(_) => matches!(answer.trim(), "y" | "Y" | "yes"),
            Err(e) => {
                tracing::warn!("Failed to read exit answer: {}", e);
                false
            }
        }
    }
}

fn parse_key(name: &str) -> Key {
    name.parse().unwrap_or_else(|never| match never {})
}

fn level_name(level: MessageLevel) -> &'static str {
    match level {
        MessageLevel::Info => "info",
        MessageLevel::Warning => "warning",
        MessageLevel::Error => "error",
    }
}

pub struct HostLoop<R, W> {
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> HostLoop<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Self { input, out }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Read and execute lines until `quit` is confirmed or input ends.
    pub fn run(&mut self, window: &mut VcpMainWindow) -> io::Result<()> {
        window.dispatcher().pump();
        writeln!(self.out, "{} ready, type 'help' for commands", window.title())?;

        let mut line = String::new();
        loop {
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                tracing::debug!("Input closed, leaving host loop");
                return Ok(());
            }
            let command = line.trim();
            if command.is_empty() {
                continue;
            }
            let flow = self.execute(window, command)?;
            window.dispatcher().pump();
            if flow == Flow::Quit {
                return Ok(());
            }
        }
    }

    pub fn execute(&mut self, window: &mut VcpMainWindow, line: &str) -> io::Result<Flow> {
        let mut words = line.split_whitespace();
        let verb = words.next().unwrap_or_default();
        let arg = words.next();

        match (verb, arg) {
            ("help", None) => writeln!(self.out, "{}", HELP)?,
            ("menus", None) => self.write_menus(window)?,
            ("status", None) => {
                let bar = window.status_bar();
                writeln!(
                    self.out,
                    "[{}] {} | {}",
                    level_name(bar.message.level),
                    bar.message.text,
                    bar.machine_status
                )?;
            }
            ("trigger", Some(name)) => match window.menu_bar().find_action(name) {
                Some(control) => {
                    if control.trigger() {
                        writeln!(self.out, "{} triggered", name)?;
                    } else {
                        writeln!(self.out, "{} is disabled", name)?;
                    }
                }
                None => writeln!(self.out, "No control named {}", name)?,
            },
            ("press", Some(key)) => {
                let outcome = window.key_pressed(&KeyEvent::new(parse_key(key)));
                self.write_outcome(key, outcome)?;
            }
            ("repeat", Some(key)) => {
                let outcome = window.key_pressed(&KeyEvent::repeat(parse_key(key)));
                self.write_outcome(key, outcome)?;
            }
            ("release", Some(key)) => {
                let outcome = window.key_released(&KeyEvent::new(parse_key(key)));
                self.write_outcome(key, outcome)?;
            }
            ("prompt", Some(setting @ ("on" | "off"))) => {
                window.set_prompt_at_exit(setting == "on");
                writeln!(self.out, "Exit prompt {}", setting)?;
            }
            ("quit" | "exit", None) => {
                let prompt = LinePrompt {
                    input: RefCell::new(&mut self.input),
                    out: RefCell::new(&mut self.out),
                };
                if window.close_requested(&prompt) {
                    writeln!(self.out, "Bye")?;
                    return Ok(Flow::Quit);
                }
                writeln!(self.out, "Exit cancelled")?;
            }
            _ => writeln!(self.out, "Unknown command: {}", line)?,
        }
        Ok(Flow::Continue)
    }

    fn write_outcome(&mut self, key: &str, outcome: KeyOutcome) -> io::Result<()> {
        match outcome {
            KeyOutcome::Forwarded => writeln!(self.out, "{} forwarded", key),
            KeyOutcome::IgnoredRepeat => writeln!(self.out, "{} repeat ignored", key),
            KeyOutcome::Unhandled => writeln!(self.out, "{} not handled", key),
        }
    }

    fn write_menus(&mut self, window: &VcpMainWindow) -> io::Result<()> {
        for menu in window.menu_bar().menus() {
            self.write_menu(menu, 0)?;
        }
        Ok(())
    }

    fn write_menu(&mut self, menu: &Menu, depth: usize) -> io::Result<()> {
        let indent = "  ".repeat(depth);
        writeln!(self.out, "{}{}", indent, plain_text(&menu.title()))?;
        for entry in menu.entries() {
            match entry {
                MenuEntry::Action(control) if control.is_visible() => {
                    let mark = match (control.is_checkable(), control.is_checked()) {
                        (true, true) => "[x] ",
                        (true, false) => "[ ] ",
                        _ => "",
                    };
                    let disabled = if control.is_enabled() { "" } else { " (disabled)" };
                    writeln!(
                        self.out,
                        "{}  {}{} <{}>{}",
                        indent,
                        mark,
                        plain_text(&control.text()),
                        control.name(),
                        disabled
                    )?;
                }
                MenuEntry::Action(_) => {}
                MenuEntry::Separator => writeln!(self.out, "{}  ----", indent)?,
                MenuEntry::Submenu(sub) => self.write_menu(&sub, depth + 1)?,
            }
        }
        Ok(())
    }
}
