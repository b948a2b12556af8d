//! Input routing
//!
//! Turns frontend events into `AppAction`s using the configured keybinds.
//! Keybinds are strings such as `r`, `R`, `shift+r`, `ctrl+r` or `f5`. Both
//! the binding and the key event are reduced to one canonical form before
//! comparing: modifier names are case-insensitive, an uppercase letter means
//! `shift+<letter>`, so `R` and `shift+r` are the same binding.

use crate::config::KeybindConfig;
use crate::frontend::FrontendEvent;
use crossterm::event::{KeyCode, KeyModifiers, MouseEventKind};

/// What the app should do in response to an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    /// Bump the counter and reload counter sections
    Reload,
    Quit,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    /// Terminal resized, redraw
    Redraw,
}

/// Keys with a fixed action, in canonical form.
///
/// Configured bindings are checked first, so binding one of these shadows
/// its built-in action.
pub const BUILTIN_KEYS: [(&str, AppAction); 6] = [
    ("esc", AppAction::Quit),
    ("ctrl+c", AppAction::Quit),
    ("up", AppAction::ScrollUp),
    ("down", AppAction::ScrollDown),
    ("pageup", AppAction::PageUp),
    ("pagedown", AppAction::PageDown),
];

/// Route a frontend event to an action, if any
pub fn route_input(event: &FrontendEvent, keybinds: &KeybindConfig) -> Option<AppAction> {
    match event {
        FrontendEvent::Key { code, modifiers } => route_key(*code, *modifiers, keybinds),
        FrontendEvent::Mouse { kind, .. } => match kind {
            MouseEventKind::ScrollUp => Some(AppAction::ScrollUp),
            MouseEventKind::ScrollDown => Some(AppAction::ScrollDown),
            _ => None,
        },
        FrontendEvent::Resize { .. } => Some(AppAction::Redraw),
    }
}

fn route_key(code: KeyCode, modifiers: KeyModifiers, keybinds: &KeybindConfig) -> Option<AppAction> {
    let key = format_key(code, modifiers);
    if key.is_empty() {
        return None;
    }

    if key == canonical_binding(&keybinds.reload) {
        return Some(AppAction::Reload);
    }
    if key == canonical_binding(&keybinds.quit) {
        return Some(AppAction::Quit);
    }
    builtin_action(&key)
}

/// Built-in action for a canonical key, if any
pub fn builtin_action(key: &str) -> Option<AppAction> {
    BUILTIN_KEYS
        .iter()
        .find(|(builtin, _)| *builtin == key)
        .map(|(_, action)| *action)
}

/// Reduce a configured binding to the form `format_key` produces.
///
/// Returns an empty string for bindings that cannot match any key
/// (unknown modifier or key name).
pub fn canonical_binding(binding: &str) -> String {
    let binding = binding.trim();
    let (prefix, key) = if binding == "+" {
        ("", "+")
    } else if let Some(rest) = binding.strip_suffix("++") {
        (rest, "+")
    } else {
        binding.rsplit_once('+').unwrap_or(("", binding))
    };

    let mut modifiers = KeyModifiers::NONE;
    for part in prefix.split('+').filter(|p| !p.is_empty()) {
        match part.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "alt" => modifiers |= KeyModifiers::ALT,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            _ => return String::new(),
        }
    }

    match parse_key_name(key) {
        Some(code) => format_key(code, modifiers),
        None => String::new(),
    }
}

fn parse_key_name(key: &str) -> Option<KeyCode> {
    let mut chars = key.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(KeyCode::Char(c));
    }

    let name = key.to_ascii_lowercase();
    let code = match name.as_str() {
        "enter" => KeyCode::Enter,
        "esc" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "delete" => KeyCode::Delete,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        _ => {
            let n = name.strip_prefix('f')?.parse::<u8>().ok()?;
            KeyCode::F(n)
        }
    };
    Some(code)
}

/// Format a key press in canonical keybind form
pub fn format_key(code: KeyCode, modifiers: KeyModifiers) -> String {
    let (code, modifiers) = match code {
        // Letters: shift is spelled out and the letter lowercased
        KeyCode::Char(c) if c.is_ascii_alphabetic() => {
            let shifted = c.is_ascii_uppercase() || modifiers.contains(KeyModifiers::SHIFT);
            let mut modifiers = modifiers.difference(KeyModifiers::SHIFT);
            if shifted {
                modifiers |= KeyModifiers::SHIFT;
            }
            (KeyCode::Char(c.to_ascii_lowercase()), modifiers)
        }
        // Other printable keys: shift is already folded into the symbol
        KeyCode::Char(c) => (KeyCode::Char(c), modifiers.difference(KeyModifiers::SHIFT)),
        _ => (code, modifiers),
    };

    let base_key = match code {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "enter".to_string(),
        KeyCode::Esc => "esc".to_string(),
        KeyCode::Tab => "tab".to_string(),
        KeyCode::Backspace => "backspace".to_string(),
        KeyCode::Delete => "delete".to_string(),
        KeyCode::Up => "up".to_string(),
        KeyCode::Down => "down".to_string(),
        KeyCode::Left => "left".to_string(),
        KeyCode::Right => "right".to_string(),
        KeyCode::Home => "home".to_string(),
        KeyCode::End => "end".to_string(),
        KeyCode::PageUp => "pageup".to_string(),
        KeyCode::PageDown => "pagedown".to_string(),
        KeyCode::F(n) => format!("f{}", n),
        _ => return String::new(),
    };

    if modifiers.is_empty() {
        base_key
    } else {
        format!("{}+{}", format_modifiers(modifiers), base_key)
    }
}

fn format_modifiers(modifiers: KeyModifiers) -> String {
    let mut parts = Vec::new();

    if modifiers.contains(KeyModifiers::CONTROL) {
        parts.push("ctrl");
    }
    if modifiers.contains(KeyModifiers::ALT) {
        parts.push("alt");
    }
    if modifiers.contains(KeyModifiers::SHIFT) {
        parts.push("shift");
    }

    parts.join("+")
}
