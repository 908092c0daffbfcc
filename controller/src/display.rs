use std::io::{self, Write};

use thermosim_common::ThermostatEngine;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayFrame {
    pub current: String,
    pub target: String,
    pub status: &'static str,
}

impl DisplayFrame {
    pub fn from_engine(engine: &ThermostatEngine) -> Self {
        Self {
            current: format!("{:.1}", engine.current_temp_c()),
            target: format!("{:.1}", engine.target_temp_c()),
            status: engine.actuator_state().label(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub kind: MessageKind,
    posted_ms: u64,
}

/// Holds the one transient message on screen. A newer message replaces the
/// current one and restarts the timeout.
#[derive(Debug, Clone)]
pub struct MessageBoard {
    timeout_ms: u64,
    current: Option<Message>,
}

impl MessageBoard {
    pub fn new(timeout_ms: u64) -> Self {
        Self {
            timeout_ms,
            current: None,
        }
    }

    pub fn post(&mut self, text: impl Into<String>, kind: MessageKind, now_ms: u64) {
        self.current = Some(Message {
            text: text.into(),
            kind,
            posted_ms: now_ms,
        });
    }

    pub fn expire(&mut self, now_ms: u64) {
        if let Some(message) = &self.current {
            if now_ms.saturating_sub(message.posted_ms) >= self.timeout_ms {
                self.current = None;
            }
        }
    }

    pub fn visible(&self) -> Option<&Message> {
        self.current.as_ref()
    }
}

pub trait DisplaySink {
    fn render(&mut self, frame: &DisplayFrame, message: Option<&Message>) -> io::Result<()>;
}

/// Line-per-change terminal readout.
pub struct ConsoleDisplay<W> {
    out: W,
    last_line: Option<String>,
}

impl<W: Write> ConsoleDisplay<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            last_line: None,
        }
    }

    fn format_line(frame: &DisplayFrame, message: Option<&Message>) -> String {
        let mut line = format!(
            "Current: {}°C | Target: {}°C | {}",
            frame.current, frame.target, frame.status
        );
        match message {
            Some(Message {
                text,
                kind: MessageKind::Error,
                ..
            }) => line.push_str(&format!(" | error: {text}")),
            Some(Message { text, .. }) => line.push_str(&format!(" | {text}")),
            None => {}
        }
        line
    }
}

impl<W: Write> DisplaySink for ConsoleDisplay<W> {
    fn render(&mut self, frame: &DisplayFrame, message: Option<&Message>) -> io::Result<()> {
        let line = Self::format_line(frame, message);
        if self.last_line.as_deref() == Some(line.as_str()) {
            return Ok(());
        }

        writeln!(self.out, "{line}")?;
        self.out.flush()?;
        self.last_line = Some(line);
        Ok(())
    }
}
