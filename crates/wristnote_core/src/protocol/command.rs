//! Command decoding.

use crate::model::notification::{NotificationId, NotificationRecord, CALL_SOURCE};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const TASK_NOTIFY: &str = "notify";
pub const TASK_DISMISS: &str = "notify-";
pub const TASK_CALL: &str = "call";
pub const TASK_FIND: &str = "find";
pub const TASK_MUSIC_STATE: &str = "musicstate";
pub const TASK_MUSIC_INFO: &str = "musicinfo";

/// Store key reserved for the synthesized incoming-call notification.
pub const CALL_NOTIFICATION_ID: NotificationId = 0;

static GB_ENVELOPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^\x10?\s*GB\((.*)\)\s*;?$").expect("valid GB envelope regex"));

pub type CommandResult<T> = Result<T, CommandError>;

/// Per-command failure classes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The line is not a JSON object with a string `t` key.
    Malformed(String),
    /// The command was well-formed but handling it failed.
    HandlerFault { task: String, message: String },
}

impl CommandError {
    pub fn fault(task: &str, message: impl Into<String>) -> Self {
        Self::HandlerFault {
            task: task.to_string(),
            message: message.into(),
        }
    }
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(message) => write!(f, "malformed command: {message}"),
            Self::HandlerFault { task, message } => {
                write!(f, "command `{task}` failed: {message}")
            }
        }
    }
}

impl Error for CommandError {}

/// Untyped command: the `t` tag plus every other field.
#[derive(Debug, Clone, PartialEq)]
pub struct RawCommand {
    pub task: String,
    pub fields: Map<String, Value>,
}

impl RawCommand {
    /// Parses one protocol line.
    ///
    /// # Errors
    /// - Returns `Malformed` for invalid JSON, non-object values and a
    ///   missing or non-string `t` key.
    pub fn parse(line: &str) -> CommandResult<Self> {
        let payload = strip_envelope(line.trim());
        let value: Value = serde_json::from_str(payload)
            .map_err(|err| CommandError::Malformed(format!("invalid JSON: {err}")))?;
        let Value::Object(mut fields) = value else {
            return Err(CommandError::Malformed(
                "command must be a JSON object".to_string(),
            ));
        };
        let task = match fields.remove("t") {
            Some(Value::String(task)) => task,
            Some(_) => {
                return Err(CommandError::Malformed(
                    "command tag `t` must be a string".to_string(),
                ))
            }
            None => {
                return Err(CommandError::Malformed(
                    "command tag `t` is missing".to_string(),
                ))
            }
        };
        Ok(Self { task, fields })
    }
}

/// Removes an optional Gadgetbridge `GB(...)` wrapper.
pub fn strip_envelope(line: &str) -> &str {
    GB_ENVELOPE_RE
        .captures(line)
        .and_then(|captures| captures.get(1))
        .map(|inner| inner.as_str().trim())
        .unwrap_or(line)
}

/// Typed command ready to be applied.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Notify(NotificationRecord),
    Dismiss {
        id: NotificationId,
    },
    /// Call state change; carries a record only for incoming calls.
    Call {
        cmd: String,
        incoming: Option<NotificationRecord>,
    },
    /// Find-my-device buzzer; `active` is the requested buzzing state.
    Find {
        active: bool,
    },
    MusicState(Map<String, Value>),
    MusicInfo(Map<String, Value>),
    Unsupported {
        task: String,
        fields: Map<String, Value>,
    },
}

impl TryFrom<RawCommand> for Command {
    type Error = CommandError;

    fn try_from(raw: RawCommand) -> CommandResult<Self> {
        let RawCommand { task, fields } = raw;
        match task.as_str() {
            TASK_NOTIFY => {
                let id = require_id(&task, &fields)?;
                let record = NotificationRecord::from_fields(id, fields)
                    .map_err(|err| CommandError::fault(&task, err.to_string()))?;
                Ok(Self::Notify(record))
            }
            TASK_DISMISS => Ok(Self::Dismiss {
                id: require_id(&task, &fields)?,
            }),
            TASK_CALL => {
                let cmd = match fields.get("cmd") {
                    Some(Value::String(cmd)) => cmd.clone(),
                    Some(_) => {
                        return Err(CommandError::fault(&task, "field `cmd` must be a string"))
                    }
                    None => return Err(CommandError::fault(&task, "missing field `cmd`")),
                };
                let incoming = if cmd.contains("incoming") {
                    Some(incoming_call_record(&task, fields)?)
                } else {
                    None
                };
                Ok(Self::Call { cmd, incoming })
            }
            TASK_FIND => match fields.get("n") {
                Some(Value::Bool(active)) => Ok(Self::Find { active: *active }),
                Some(_) => Err(CommandError::fault(&task, "field `n` must be a boolean")),
                None => Err(CommandError::fault(&task, "missing field `n`")),
            },
            TASK_MUSIC_STATE => Ok(Self::MusicState(fields)),
            TASK_MUSIC_INFO => Ok(Self::MusicInfo(fields)),
            _ => Ok(Self::Unsupported { task, fields }),
        }
    }
}

impl Command {
    /// Parses and types one protocol line.
    pub fn decode(line: &str) -> CommandResult<Self> {
        Self::try_from(RawCommand::parse(line)?)
    }
}

fn require_id(task: &str, fields: &Map<String, Value>) -> CommandResult<NotificationId> {
    match fields.get("id") {
        Some(value) => value.as_i64().ok_or_else(|| {
            CommandError::fault(task, format!("field `id` must be an integer, got {value}"))
        }),
        None => Err(CommandError::fault(task, "missing field `id`")),
    }
}

fn incoming_call_record(
    task: &str,
    mut fields: Map<String, Value>,
) -> CommandResult<NotificationRecord> {
    fields.insert("src".to_string(), Value::String(CALL_SOURCE.to_string()));
    if let Some(name) = fields.get("name").cloned() {
        fields.insert("title".to_string(), name);
    }
    if let Some(number) = fields.get("number").cloned() {
        fields.insert("body".to_string(), number);
    }
    NotificationRecord::from_fields(CALL_NOTIFICATION_ID, fields)
        .map_err(|err| CommandError::fault(task, err.to_string()))
}
