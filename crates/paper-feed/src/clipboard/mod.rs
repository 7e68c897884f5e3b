//! Clipboard access for the copy-link action.
//!
//! [`SystemClipboard`] pipes text into the platform's clipboard helper
//! program; [`MemoryClipboard`] keeps it in process for tests and headless
//! runs.

use std::process::Stdio;
use std::sync::Mutex;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::error::ClipboardError;

/// Something text can be written to.
#[async_trait::async_trait]
pub trait Clipboard: Send + Sync {
    /// Short provider name for logs.
    fn name(&self) -> &'static str;

    /// Replace the clipboard contents with `text`.
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Helper program and its arguments.
type Provider = (&'static str, &'static [&'static str]);

#[cfg(target_os = "macos")]
const PROVIDERS: &[Provider] = &[("pbcopy", &[])];

#[cfg(target_os = "windows")]
const PROVIDERS: &[Provider] = &[("clip", &[])];

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const PROVIDERS: &[Provider] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

/// The desktop clipboard, reached through a helper program.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard;

impl SystemClipboard {
    async fn write_with(
        program: &str,
        args: &[&str],
        text: &str,
    ) -> Result<(), ClipboardError> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes()).await?;
            stdin.shutdown().await?;
        }

        let output = child.wait_with_output().await?;
        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = if stderr.trim().is_empty() {
                output.status.to_string()
            } else {
                stderr.trim().to_string()
            };
            Err(ClipboardError::provider(program, message))
        }
    }
}

#[async_trait::async_trait]
impl Clipboard for SystemClipboard {
    fn name(&self) -> &'static str {
        "system"
    }

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        for (program, args) in PROVIDERS {
            match Self::write_with(program, args, text).await {
                Ok(()) => {
                    tracing::debug!(provider = program, "Clipboard written");
                    return Ok(());
                }
                Err(ClipboardError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                    tracing::trace!(provider = program, "Clipboard helper not installed");
                }
                Err(e) => return Err(e),
            }
        }

        let tried = PROVIDERS.iter().map(|(p, _)| *p).collect::<Vec<_>>().join(", ");
        Err(ClipboardError::Unavailable { tried })
    }
}

/// In-process clipboard.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
    fail: bool,
}

impl MemoryClipboard {
    /// Create an empty clipboard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard whose writes are always refused.
    #[must_use]
    pub fn failing() -> Self {
        Self { contents: Mutex::new(None), fail: true }
    }

    /// Last text written, if any.
    #[must_use]
    pub fn contents(&self) -> Option<String> {
        self.contents.lock().unwrap_or_else(std::sync::PoisonError::into_inner).clone()
    }
}

#[async_trait::async_trait]
impl Clipboard for MemoryClipboard {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        if self.fail {
            return Err(ClipboardError::provider("memory", "write refused"));
        }
        *self.contents.lock().unwrap_or_else(std::sync::PoisonError::into_inner) =
            Some(text.to_string());
        Ok(())
    }
}
