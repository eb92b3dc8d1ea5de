//! Write-only clipboard access.
//!
//! Copying is best effort: callers log failures and move on.

use std::process::Stdio;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Destination for copied clue text.
#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Clipboard errors.
#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("no clipboard tool available (tried: {0})")]
    NoBackend(String),

    #[error("{program} exited with {status}")]
    Failed { program: String, status: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A program that reads clipboard content from stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ClipboardCommand {
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// Pipes text into the first platform clipboard tool that works.
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    candidates: Vec<ClipboardCommand>,
}

impl CommandClipboard {
    #[must_use]
    pub fn with_candidates(candidates: Vec<ClipboardCommand>) -> Self {
        Self { candidates }
    }

    /// Candidates for the current platform, most specific first.
    #[must_use]
    pub fn platform_default() -> Self {
        let candidates = if cfg!(target_os = "macos") {
            vec![ClipboardCommand::new("pbcopy", &[])]
        } else if cfg!(target_os = "windows") {
            vec![ClipboardCommand::new("clip", &[])]
        } else {
            vec![
                ClipboardCommand::new("wl-copy", &[]),
                ClipboardCommand::new("xclip", &["-selection", "clipboard"]),
                ClipboardCommand::new("xsel", &["--clipboard", "--input"]),
            ]
        };
        Self::with_candidates(candidates)
    }

    async fn run(command: &ClipboardCommand, text: &str) -> Result<(), ClipboardError> {
        let mut child = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes()).await?;
            stdin.shutdown().await?;
        }

        let status = child.wait().await?;
        if status.success() {
            Ok(())
        } else {
            Err(ClipboardError::Failed {
                program: command.program.clone(),
                status: status.to_string(),
            })
        }
    }
}

#[async_trait]
impl Clipboard for CommandClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut last_error = None;

        for command in &self.candidates {
            match Self::run(command, text).await {
                Ok(()) => return Ok(()),
                Err(e) => {
                    log::debug!("clipboard: {} failed: {}", command.program, e);
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(ClipboardError::Failed { program, status }) => {
                Err(ClipboardError::Failed { program, status })
            }
            _ => Err(ClipboardError::NoBackend(
                self.candidates
                    .iter()
                    .map(|c| c.program.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            )),
        }
    }
}

/// In-process clipboard that remembers everything written to it.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    entries: Mutex<Vec<String>>,
}

impl MemoryClipboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, oldest first.
    #[must_use]
    pub fn entries(&self) -> Vec<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl Clipboard for MemoryClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_clipboard_records_writes() {
        let clipboard = MemoryClipboard::new();
        clipboard.write_text("first").await.unwrap();
        clipboard.write_text("second").await.unwrap();
        assert_eq!(clipboard.entries(), vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_missing_tool_reports_no_backend() {
        let clipboard = CommandClipboard::with_candidates(vec![ClipboardCommand::new(
            "cw-definitely-not-a-clipboard-tool",
            &[],
        )]);
        let error = clipboard.write_text("x").await.unwrap_err();
        assert!(matches!(error, ClipboardError::NoBackend(ref tried) if tried.contains("cw-definitely")));
    }

    #[test]
    fn test_platform_default_has_candidates() {
        assert!(!CommandClipboard::platform_default().candidates.is_empty());
    }
}
