//! Hosts-file maintenance.
//!
//! Each site gets a `127.0.0.1 <name>` entry so the name used as the Nginx
//! `server_name` resolves locally. Both operations are idempotent; callers
//! treat failure (typically a permission issue on /etc/hosts) as non-fatal.

use crate::error::{Result, WpstackError};
use crate::site::SiteName;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// The system hosts file.
pub const HOSTS_PATH: &str = "/etc/hosts";

const ENTRY_IP: &str = "127.0.0.1";

/// Ensure a loopback entry for the site exists.
///
/// Returns `true` if an entry was appended, `false` if one was already
/// present.
pub fn ensure_entry(path: &Path, name: &SiteName) -> Result<bool> {
    let content = read_or_empty(path)?;
    if has_entry(&content, name) {
        debug!(site = %name, "hosts entry already present");
        return Ok(false);
    }

    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| WpstackError::io(path, e))?;

    let newline = if content.is_empty() || content.ends_with('\n') { "" } else { "\n" };
    writeln!(file, "{}{} {}", newline, ENTRY_IP, name.as_str())
        .map_err(|e| WpstackError::io(path, e))?;

    debug!(site = %name, "appended hosts entry");
    Ok(true)
}

/// Remove the loopback entry previously written for the site.
///
/// Only lines of the exact form `127.0.0.1 <name>` (modulo whitespace) are
/// removed; entries a user added by hand with extra aliases are left alone.
/// Returns `true` if a line was removed.
pub fn remove_entry(path: &Path, name: &SiteName) -> Result<bool> {
    let content = read_or_empty(path)?;

    let kept: Vec<&str> = content.lines().filter(|line| !is_own_entry(line, name)).collect();
    let removed = kept.len() != content.lines().count();
    if !removed {
        return Ok(false);
    }

    let mut rewritten = kept.join("\n");
    if !rewritten.is_empty() {
        rewritten.push('\n');
    }
    std::fs::write(path, rewritten).map_err(|e| WpstackError::io(path, e))?;

    debug!(site = %name, "removed hosts entry");
    Ok(true)
}

fn read_or_empty(path: &Path) -> Result<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(WpstackError::io(path, e)),
    }
}

/// Whether any loopback line already maps the name.
fn has_entry(content: &str, name: &SiteName) -> bool {
    content.lines().any(|line| {
        let mut tokens = line.split_whitespace();
        tokens.next() == Some(ENTRY_IP) && tokens.any(|t| t == name.as_str())
    })
}

/// Whether a line is exactly the entry this tool writes.
fn is_own_entry(line: &str, name: &SiteName) -> bool {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    tokens == [ENTRY_IP, name.as_str()]
}
