//! Clipboard access
//!
//! `copy` reports success as a plain `bool`: permission problems, missing
//! helpers and unsupported platforms all come back as `false`.

use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::sync::RwLock;

use crate::error::ClipboardError;

/// A destination for copied text
#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// In-process clipboard, useful for tests and headless hosts
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: RwLock<Option<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last text written, if any
    pub async fn contents(&self) -> Option<String> {
        self.contents.read().await.clone()
    }
}

#[async_trait]
impl Clipboard for MemoryClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        *self.contents.write().await = Some(text.to_string());
        Ok(())
    }
}

/// The operating system clipboard, reached through the platform's
/// command-line helper. The text is piped to the helper's stdin.
#[derive(Debug, Clone)]
pub struct SystemClipboard {
    candidates: Vec<(String, Vec<String>)>,
}

impl SystemClipboard {
    /// Helpers for the current platform, tried in order
    pub fn new() -> Self {
        let helpers = if cfg!(target_os = "macos") {
            vec![helper("pbcopy", &[])]
        } else if cfg!(target_os = "windows") {
            vec![helper("clip", &[])]
        } else {
            vec![
                helper("wl-copy", &[]),
                helper("xclip", &["-selection", "clipboard"]),
                helper("xsel", &["--clipboard", "--input"]),
            ]
        };

        Self::with_helpers(helpers)
    }

    /// Use an explicit list of `(program, args)` helpers
    pub fn with_helpers<I>(helpers: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<String>)>,
    {
        Self {
            candidates: helpers.into_iter().collect(),
        }
    }

    async fn run_helper(program: &str, args: &[String], text: &str) -> Result<(), ClipboardError> {
        // No output pipes: forked helpers (xclip) outlive the wait
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            // A helper that exits early closes the pipe; its exit status says why
            if let Err(e) = stdin.write_all(text.as_bytes()).await {
                if e.kind() != std::io::ErrorKind::BrokenPipe {
                    return Err(e.into());
                }
            }
        }

        let status = child.wait().await?;
        if status.success() {
            Ok(())
        } else {
            Err(ClipboardError::Helper {
                program: program.to_string(),
                reason: status.to_string(),
            })
        }
    }
}

fn helper(program: &str, args: &[&str]) -> (String, Vec<String>) {
    (
        program.to_string(),
        args.iter().map(|a| a.to_string()).collect(),
    )
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Clipboard for SystemClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut last_error = ClipboardError::Unavailable;

        for (program, args) in &self.candidates {
            match Self::run_helper(program, args, text).await {
                Ok(()) => {
                    tracing::debug!("Copied {} bytes with {}", text.len(), program);
                    return Ok(());
                }
                Err(ClipboardError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                    tracing::debug!("Clipboard helper {} not installed", program);
                }
                Err(e) => last_error = e,
            }
        }

        Err(last_error)
    }
}

/// Write `text` to the clipboard, returning whether it worked
pub async fn copy(clipboard: &dyn Clipboard, text: &str) -> bool {
    match clipboard.write_text(text).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Clipboard write failed: {}", e);
            false
        }
    }
}
