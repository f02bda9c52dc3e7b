// Scripted page sessions
//
// Drives the in-memory page with one command per line:
//
//   click <id>           dispatch a click
//   type <id> <text>     set a field's value (no event)
//   select <id> <value>  set a selector's value and dispatch a change
//   press <key>          click the keypad button with that data-value
//   tab <panel>          click a tab button
//   show <id>            print a field's value or an element's text
//
// Blank lines and lines starting with `#` are skipped.

use crate::app::{App, Event};
use crate::config::Settings;
use crate::dom::{Dom, MemoryDom};
use crate::layout;
use crate::tabs::Panel;
use std::io::{BufRead, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("line {line}: unknown command '{command}'")]
    UnknownCommand { line: usize, command: String },

    #[error("line {line}: '{command}' needs {needs}")]
    MissingArgument {
        line: usize,
        command: &'static str,
        needs: &'static str,
    },

    #[error("line {line}: no element with id '{id}'")]
    UnknownElement { line: usize, id: String },

    #[error("line {line}: {message}")]
    InvalidArgument { line: usize, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub struct Session {
    app: App,
    dom: MemoryDom,
    line: usize,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        let mut dom = MemoryDom::new(layout::page(&settings));
        let mut app = App::new(settings);
        app.mount(&mut dom);
        Session { app, dom, line: 0 }
    }

    pub fn dom(&self) -> &MemoryDom {
        &self.dom
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    /// Run every line of `input`, writing `show` output to `out`
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<(), SessionError> {
        for line in input.lines() {
            let line = line?;
            if let Some(text) = self.execute(&line)? {
                writeln!(out, "{}", text)?;
            }
        }
        Ok(())
    }

    /// Execute one command; `show` returns the text to print
    pub fn execute(&mut self, line: &str) -> Result<Option<String>, SessionError> {
        self.line += 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(None);
        }

        let (command, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (trimmed, ""),
        };

        match command {
            "click" => {
                let id = self.element_arg("click", rest)?;
                self.app.handle(&mut self.dom, &Event::Click(id));
                Ok(None)
            }
            "type" => {
                let (id, text) = split_arg(rest);
                let id = self.element_arg("type", id)?;
                self.dom.set_value(&id, text);
                Ok(None)
            }
            "select" => {
                let (id, value) = split_arg(rest);
                let id = self.element_arg("select", id)?;
                if value.is_empty() {
                    return Err(self.missing("select", "an id and a value"));
                }
                self.dom.set_value(&id, value);
                self.app.handle(&mut self.dom, &Event::Change(id));
                Ok(None)
            }
            "press" => {
                if rest.is_empty() {
                    return Err(self.missing("press", "a key"));
                }
                let id = layout::key_id(rest).ok_or_else(|| SessionError::InvalidArgument {
                    line: self.line,
                    message: format!("no keypad button '{}'", rest),
                })?;
                self.app.handle(&mut self.dom, &Event::Click(id.to_string()));
                Ok(None)
            }
            "tab" => {
                let panel: Panel = rest.parse().map_err(|message| SessionError::InvalidArgument {
                    line: self.line,
                    message,
                })?;
                self.app.handle(&mut self.dom, &Event::Click(panel.button_id()));
                Ok(None)
            }
            "show" => {
                let id = self.element_arg("show", rest)?;
                let text = match self.dom.value(&id) {
                    Some(value) => value,
                    None => self.dom.text(&id).unwrap_or_default(),
                };
                Ok(Some(text))
            }
            other => Err(SessionError::UnknownCommand {
                line: self.line,
                command: other.to_string(),
            }),
        }
    }

    /// First argument as the id of an existing element
    fn element_arg(&self, command: &'static str, id: &str) -> Result<String, SessionError> {
        if id.is_empty() {
            return Err(self.missing(command, "an element id"));
        }
        if !self.dom.exists(id) {
            return Err(SessionError::UnknownElement {
                line: self.line,
                id: id.to_string(),
            });
        }
        Ok(id.to_string())
    }

    fn missing(&self, command: &'static str, needs: &'static str) -> SessionError {
        SessionError::MissingArgument {
            line: self.line,
            command,
            needs,
        }
    }
}

/// `<id> <rest of line>`
fn split_arg(text: &str) -> (&str, &str) {
    match text.split_once(char::is_whitespace) {
        Some((first, rest)) => (first, rest.trim()),
        None => (text, ""),
    }
}
