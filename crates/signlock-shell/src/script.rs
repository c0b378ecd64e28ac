//! Host event scripts.
//!
//! One event per line; blank lines and `#` comments are skipped (so URL
//! fragments cannot appear in `navigate` lines).
//!
//! ```text
//! start
//! resume
//! focus on
//! key home        # or a raw code: key 24
//! back
//! navigate https://signage.example/player?player_id=lobby
//! reveal
//! leave
//! pause
//! focus off
//! ```

use signlock_core::{HostEvent, KeyCode};

/// Parse one script line. Returns `Ok(None)` for blank and comment lines.
pub fn parse_event(line: &str) -> Result<Option<HostEvent>, String> {
    let line = line.split('#').next().unwrap_or_default().trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (command, arg) = match line.split_once(char::is_whitespace) {
        Some((command, arg)) => (command, Some(arg.trim())),
        None => (line, None),
    };

    let event = match (command, arg) {
        ("start", None) => HostEvent::SessionStart,
        ("resume", None) => HostEvent::ForegroundResumed,
        ("pause", None) => HostEvent::ForegroundPaused,
        ("reveal", None) => HostEvent::SystemUiRevealed,
        ("back", None) => HostEvent::BackPressed,
        ("leave", None) => HostEvent::UserLeaveAttempt,
        ("focus", Some("on")) => HostEvent::FocusChanged(true),
        ("focus", Some("off")) => HostEvent::FocusChanged(false),
        ("key", Some(key)) => HostEvent::KeyPressed(parse_key(key)?),
        ("navigate", Some(url)) => HostEvent::NavigationRequested(url.to_string()),
        ("focus", _) => return Err("expected `focus on` or `focus off`".to_string()),
        ("key" | "navigate", None) => return Err(format!("`{command}` needs an argument")),
        (_, Some(_))
            if matches!(command, "start" | "resume" | "pause" | "reveal" | "back" | "leave") =>
        {
            return Err(format!("`{command}` takes no argument"));
        },
        _ => return Err(format!("unknown event `{command}`")),
    };
    Ok(Some(event))
}

fn parse_key(key: &str) -> Result<KeyCode, String> {
    if let Some(code) = KeyCode::from_name(key) {
        return Ok(code);
    }
    key.parse::<u32>().map(KeyCode).map_err(|_| format!("unknown key `{key}`"))
}
