//! Command dispatcher.
//!
//! # Responsibility
//! - Apply decoded commands to the store and device collaborators.
//! - Isolate failures per command and turn them into diagnostics.
//!
//! # Invariants
//! - At most one store mutation per command; the store is never held
//!   between calls.
//! - Only transport I/O errors end [`Dispatcher::run`].

use crate::config::NotifyConfig;
use crate::device::DeviceHandles;
use crate::model::notification::NotificationId;
use crate::protocol::command::{Command, CommandError, CommandResult, RawCommand};
use crate::protocol::diagnostic::Diagnostic;
use crate::repo::notification_store::NotificationStore;
use log::{debug, info, warn};
use serde_json::{Map, Value};
use std::io::{BufRead, Write};

/// What a successfully applied command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Delivered {
        id: NotificationId,
        /// Whether wake + switch to the notifier was requested.
        presented: bool,
    },
    Dismissed {
        id: NotificationId,
        existed: bool,
    },
    /// Call state change other than "incoming".
    CallIgnored,
    FindUpdated,
    MusicForwarded,
    /// Unknown command; carries the informational message.
    Unsupported(String),
}

/// Counters for one [`Dispatcher::run`] session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    pub lines: usize,
    pub commands: usize,
    pub infos: usize,
    pub errors: usize,
}

/// Turns protocol lines into store mutations and device side effects.
pub struct Dispatcher<S: NotificationStore> {
    store: S,
    device: DeviceHandles,
    config: NotifyConfig,
}

impl<S: NotificationStore> Dispatcher<S> {
    pub fn new(store: S, device: DeviceHandles, config: NotifyConfig) -> Self {
        Self {
            store,
            device,
            config,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Handles one line; returns the diagnostic to send back, if any.
    ///
    /// Blank lines are skipped without a diagnostic.
    pub fn handle_line(&self, line: &str) -> Option<Diagnostic> {
        if line.trim().is_empty() {
            return None;
        }
        match self.execute_line(line) {
            Ok(CommandOutcome::Unsupported(message)) => Some(Diagnostic::info(message)),
            Ok(outcome) => {
                debug!("event=command_applied module=protocol status=ok outcome={outcome:?}");
                None
            }
            Err(err) => {
                warn!("event=command_failed module=protocol status=error error={err}");
                Some(Diagnostic::error(err.to_string()))
            }
        }
    }

    /// Parses and applies one line.
    pub fn execute_line(&self, line: &str) -> CommandResult<CommandOutcome> {
        let raw = RawCommand::parse(line)?;
        self.apply(Command::try_from(raw)?)
    }

    /// Applies one typed command.
    pub fn apply(&self, command: Command) -> CommandResult<CommandOutcome> {
        match command {
            // A re-sent id carries updated content; it replaces the pending
            // record and is announced again.
            Command::Notify(record)
            | Command::Call {
                incoming: Some(record),
                ..
            } => {
                let id = record.id();
                self.store.replace(record);
                Ok(self.announce(id))
            }
            Command::Dismiss { id } => {
                let existed = self.store.remove(id);
                Ok(CommandOutcome::Dismissed { id, existed })
            }
            Command::Call { cmd, incoming: None } => {
                debug!("event=call_state module=protocol status=ignored cmd={cmd}");
                Ok(CommandOutcome::CallIgnored)
            }
            Command::Find { active } => {
                self.device.haptics.set_pin_level(!active);
                Ok(CommandOutcome::FindUpdated)
            }
            Command::MusicState(state) => {
                self.device.music.update_state(&state);
                Ok(CommandOutcome::MusicForwarded)
            }
            Command::MusicInfo(info) => {
                self.device.music.update_info(&info);
                Ok(CommandOutcome::MusicForwarded)
            }
            Command::Unsupported { task, fields } => Ok(CommandOutcome::Unsupported(
                unsupported_message(&task, &fields),
            )),
        }
    }

    /// Reads lines until EOF, writing one diagnostic line where needed.
    pub fn run<R: BufRead, W: Write>(
        &self,
        reader: R,
        writer: W,
    ) -> std::io::Result<DispatchStats> {
        self.run_with_hook(reader, writer, |_| {})
    }

    /// Like [`Dispatcher::run`], calling `after_line` with each line's
    /// diagnostic once it has been written.
    pub fn run_with_hook<R, W, F>(
        &self,
        mut reader: R,
        mut writer: W,
        mut after_line: F,
    ) -> std::io::Result<DispatchStats>
    where
        R: BufRead,
        W: Write,
        F: FnMut(Option<&Diagnostic>),
    {
        let mut stats = DispatchStats::default();
        let mut buffer = Vec::new();
        loop {
            buffer.clear();
            if reader.read_until(b'\n', &mut buffer)? == 0 {
                break;
            }
            stats.lines += 1;

            let diagnostic = match std::str::from_utf8(&buffer) {
                Ok(line) if line.trim().is_empty() => None,
                Ok(line) => {
                    stats.commands += 1;
                    self.handle_line(line)
                }
                Err(_) => {
                    stats.commands += 1;
                    Some(Diagnostic::error(
                        CommandError::Malformed("line is not valid UTF-8".to_string()).to_string(),
                    ))
                }
            };

            if let Some(diagnostic) = &diagnostic {
                if diagnostic.is_error() {
                    stats.errors += 1;
                } else {
                    stats.infos += 1;
                }
                diagnostic.write_to(&mut writer)?;
                writer.flush()?;
            }
            after_line(diagnostic.as_ref());
        }

        info!(
            "event=dispatch_finished module=protocol status=ok lines={} commands={} infos={} errors={}",
            stats.lines, stats.commands, stats.infos, stats.errors
        );
        Ok(stats)
    }

    fn announce(&self, id: NotificationId) -> CommandOutcome {
        self.device.haptics.pulse(self.config.notify_duration_ms);
        let presented = self.device.present_notifications();
        info!(
            "event=notification_delivered module=protocol status=ok id={id} presented={presented} pending={}",
            self.store.len()
        );
        CommandOutcome::Delivered { id, presented }
    }
}

fn unsupported_message(task: &str, fields: &Map<String, Value>) -> String {
    format!(
        "Command {task} \"{}\" is not implemented",
        Value::Object(fields.clone())
    )
}

