//! # Link Opening
//!
//! Hands a URI to the operating system's default handler (browser, maps app).
//! Fire-and-forget: a background thread reaps the helper process so the
//! UI never blocks on it.

use std::io;
use std::process::{Command, Stdio};

use log::{info, warn};

pub trait LinkOpener: Send + Sync {
    fn open(&self, uri: &str) -> io::Result<()>;
}

/// Opens links with `xdg-open`, `open` or `cmd /C start`, depending on the platform.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLinkOpener;

impl SystemLinkOpener {
    fn command(uri: &str) -> Command {
        if cfg!(target_os = "windows") {
            let mut cmd = Command::new("cmd");
            // The empty string is the window title `start` expects before the target
            cmd.args(["/C", "start", ""]).arg(escape_for_cmd(uri));
            cmd
        } else if cfg!(target_os = "macos") {
            let mut cmd = Command::new("open");
            cmd.arg(uri);
            cmd
        } else {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(uri);
            cmd
        }
    }
}

/// Caret-escapes the characters `cmd` would otherwise treat as operators,
/// so `&` in a query string does not end the command.
fn escape_for_cmd(uri: &str) -> String {
    let mut escaped = String::with_capacity(uri.len());
    for c in uri.chars() {
        if matches!(c, '^' | '&' | '|' | '<' | '>' | '(' | ')' | '%' | '!') {
            escaped.push('^');
        }
        escaped.push(c);
    }
    escaped
}

/// Spawns `cmd` with null stdio and waits for it on a separate thread.
fn spawn_detached(mut cmd: Command) -> io::Result<()> {
    // Keep the child's output off the raw-mode terminal
    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    std::thread::Builder::new()
        .name("link-opener-reaper".to_string())
        .spawn(move || match child.wait() {
            Ok(status) if !status.success() => warn!("Link helper exited with {}", status),
            Ok(_) => {}
            Err(e) => warn!("Failed to wait for link helper: {}", e),
        })?;
    Ok(())
}

impl LinkOpener for SystemLinkOpener {
    fn open(&self, uri: &str) -> io::Result<()> {
        if uri.trim().is_empty() {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "empty URI"));
        }
        spawn_detached(Self::command(uri))?;
        info!("Opened {}", uri);
        Ok(())
    }
}
