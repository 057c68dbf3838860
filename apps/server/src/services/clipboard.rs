//! Clipboard backends: the system clipboard and an external copy command.

use std::io::Write;
use std::process::{Command, Stdio};
use std::sync::{Mutex, PoisonError};

use vocab_core::{Clipboard, ClipboardBackend};

/// A live connection to a clipboard that can take new text.
pub trait ClipboardHandle: Send {
    fn replace_text(&mut self, text: &str) -> Result<(), String>;
}

impl ClipboardHandle for arboard::Clipboard {
    fn replace_text(&mut self, text: &str) -> Result<(), String> {
        self.set_text(text).map_err(|e| e.to_string())
    }
}

fn open_arboard() -> Result<arboard::Clipboard, String> {
    arboard::Clipboard::new().map_err(|e| e.to_string())
}

/// The desktop clipboard through `arboard`.
///
/// On X11 and Wayland the copied text is served by the process that owns the
/// clipboard handle, so one handle is kept open for the life of the backend.
pub struct SystemClipboard<H = arboard::Clipboard> {
    open: fn() -> Result<H, String>,
    handle: Mutex<Option<H>>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::with_opener(open_arboard)
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: ClipboardHandle> SystemClipboard<H> {
    /// Open a handle with `open` now. A failed open is retried on the next write.
    pub fn with_opener(open: fn() -> Result<H, String>) -> Self {
        let handle = match open() {
            Ok(handle) => Some(handle),
            Err(err) => {
                tracing::debug!(error = %err, "System clipboard unavailable");
                None
            }
        };
        Self {
            open,
            handle: Mutex::new(handle),
        }
    }
}

impl<H: ClipboardHandle> ClipboardBackend for SystemClipboard<H> {
    fn name(&self) -> &str {
        "system"
    }

    fn write_text(&self, text: &str) -> Result<(), String> {
        let mut guard = self.handle.lock().unwrap_or_else(PoisonError::into_inner);
        let handle = match guard.take() {
            Some(handle) => handle,
            None => (self.open)()?,
        };
        guard.insert(handle).replace_text(text)
    }
}

/// Pipes the text into a copy command such as `xclip` or `pbcopy`.
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
}

impl CommandClipboard {
    /// `command` is the program followed by its arguments. `None` when empty.
    pub fn new(command: &[String]) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }
}

impl ClipboardBackend for CommandClipboard {
    fn name(&self) -> &str {
        &self.program
    }

    fn write_text(&self, text: &str) -> Result<(), String> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| format!("failed to run {}: {}", self.program, e))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes()).map_err(|e| e.to_string())?;
        }

        let status = child.wait().map_err(|e| e.to_string())?;
        if status.success() {
            Ok(())
        } else {
            Err(format!("{} exited with {}", self.program, status))
        }
    }
}

/// System clipboard with the configured copy command as fallback.
pub fn system_clipboard(fallback_command: &[String]) -> Clipboard {
    let clipboard = Clipboard::new(Box::new(SystemClipboard::new()));
    match CommandClipboard::new(fallback_command) {
        Some(fallback) => clipboard.with_fallback(Box::new(fallback)),
        None => clipboard,
    }
}
