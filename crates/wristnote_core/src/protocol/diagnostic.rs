//! Diagnostic lines sent back to the companion device.

use serde::{Deserialize, Serialize};
use std::io::Write;

/// Line terminator used by the companion's console protocol.
pub const LINE_TERMINATOR: &str = "\r\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticKind {
    Info,
    Error,
}

/// `{"t":"info"|"error","msg":...}` report for one command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    #[serde(rename = "t")]
    pub kind: DiagnosticKind,
    #[serde(rename = "msg")]
    pub message: String,
}

impl Diagnostic {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == DiagnosticKind::Error
    }

    /// Wire form, terminator included.
    pub fn to_line(&self) -> serde_json::Result<String> {
        let mut line = serde_json::to_string(self)?;
        line.push_str(LINE_TERMINATOR);
        Ok(line)
    }

    pub fn write_to(&self, writer: &mut impl Write) -> std::io::Result<()> {
        let line = self.to_line().map_err(std::io::Error::from)?;
        writer.write_all(line.as_bytes())
    }
}
