//! Keybindings: key strings mapped to widget commands

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::hash::Hash;
use thiserror::Error;

/// Trait for widget command enums that can be bound to keys
///
/// # Example
/// ```ignore
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// pub enum ListCommand {
///     SelectPrevious,
///     SelectNext,
/// }
///
/// impl BindingCommand for ListCommand {
///     fn name(&self) -> &'static str {
///         match self {
///             ListCommand::SelectPrevious => "select_previous",
///             ListCommand::SelectNext => "select_next",
///         }
///     }
///     // ...
/// }
/// ```
pub trait BindingCommand: Clone + Copy + Eq + Hash + 'static {
    /// Get the command name as a string (for config file lookup)
    fn name(&self) -> &'static str;

    /// Parse a command from its name
    fn from_name(name: &str) -> Option<Self>;

    /// Get all possible command values
    fn all() -> &'static [Self];
}

/// Errors raised while loading keybindings
#[derive(Debug, Error)]
pub enum KeybindingError {
    #[error("invalid keybinding JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("cannot parse key {key:?} bound to {command:?}")]
    InvalidKey { command: String, key: String },
}

/// Key strings bound to commands of type `C`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keybindings<C: BindingCommand> {
    bindings: HashMap<C, Vec<String>>,
}

impl<C: BindingCommand> Default for Keybindings<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: BindingCommand> Serialize for Keybindings<C> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.bindings.len()))?;
        // stable output order follows C::all()
        for command in C::all() {
            if let Some(keys) = self.bindings.get(command) {
                map.serialize_entry(command.name(), keys)?;
            }
        }
        map.end()
    }
}

impl<'de, C: BindingCommand> Deserialize<'de> for Keybindings<C> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: HashMap<String, Vec<String>> = HashMap::deserialize(deserializer)?;

        let mut keybindings = Keybindings::new();
        for (name, keys) in raw {
            match C::from_name(&name) {
                Some(command) => keybindings.bind(command, keys),
                // Unknown commands are skipped (allows forward compatibility)
                None => tracing::debug!(command = %name, "ignoring unknown command"),
            }
        }

        Ok(keybindings)
    }
}

impl<C: BindingCommand> Keybindings<C> {
    /// Create an empty keybindings map
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Bind a command to a list of key strings, replacing earlier bindings
    pub fn bind(&mut self, command: C, keys: Vec<String>) {
        self.bindings.insert(command, keys);
    }

    /// Bind a command (builder pattern)
    pub fn with(mut self, command: C, keys: &[&str]) -> Self {
        self.bind(command, keys.iter().map(|k| (*k).to_string()).collect());
        self
    }

    /// Key strings bound to a command
    pub fn keys_for(&self, command: C) -> &[String] {
        self.bindings.get(&command).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Get the command bound to a key event
    ///
    /// Commands are checked in `C::all()` order so overlapping bindings
    /// resolve deterministically.
    pub fn get_command(&self, key: KeyEvent) -> Option<C> {
        C::all().iter().copied().find(|command| {
            self.keys_for(*command)
                .iter()
                .filter_map(|key_str| parse_key_string(key_str))
                .any(|parsed| key_matches(&parsed, &key))
        })
    }

    /// Get the first keybinding string for a command
    pub fn get_first_keybinding(&self, command: C) -> Option<&str> {
        self.keys_for(command).first().map(String::as_str)
    }

    /// Check that every bound key string parses
    pub fn validate(&self) -> Result<(), KeybindingError> {
        for command in C::all() {
            for key in self.keys_for(*command) {
                if parse_key_string(key).is_none() {
                    return Err(KeybindingError::InvalidKey {
                        command: command.name().to_string(),
                        key: key.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Parse and validate a JSON `command -> [keys]` map
    pub fn from_json(json: &str) -> Result<Self, KeybindingError> {
        let keybindings: Self = serde_json::from_str(json)?;
        keybindings.validate()?;
        Ok(keybindings)
    }

    /// Merge user config onto defaults - user config overrides defaults
    pub fn merge(mut defaults: Self, user: Self) -> Self {
        for (command, keys) in user.bindings {
            defaults.bindings.insert(command, keys);
        }
        defaults
    }
}

/// Compare code and modifiers (ignore kind and state).
/// Character keys compare case-insensitively.
fn key_matches(parsed: &KeyEvent, key: &KeyEvent) -> bool {
    let codes_match = match (&parsed.code, &key.code) {
        (KeyCode::Char(c1), KeyCode::Char(c2)) => {
            c1.to_lowercase().eq(c2.to_lowercase())
        }
        _ => parsed.code == key.code,
    };
    codes_match && parsed.modifiers == key.modifiers
}

/// Parse a key string like "q", "esc", "ctrl+p", "shift+tab" into a KeyEvent
pub fn parse_key_string(key_str: &str) -> Option<KeyEvent> {
    let key_str = key_str.trim().to_lowercase();

    if key_str.is_empty() {
        return None;
    }

    // Special case: shift+tab should be BackTab
    if key_str == "shift+tab" || key_str == "backtab" {
        return Some(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT));
    }

    // "+" alone (or as the final key after a modifier) is the plus key
    let (prefix, key_part) = match key_str.strip_suffix("++") {
        Some(prefix) => (prefix, "+"),
        None if key_str == "+" => ("", "+"),
        None => match key_str.rsplit_once('+') {
            Some((prefix, key)) => (prefix, key),
            None => ("", key_str.as_str()),
        },
    };

    let mut modifiers = KeyModifiers::empty();
    for part in prefix.split('+').filter(|p| !p.trim().is_empty()) {
        match part.trim() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            "alt" => modifiers |= KeyModifiers::ALT,
            _ => return None,
        }
    }

    let code = match key_part.trim() {
        "esc" | "escape" => KeyCode::Esc,
        "enter" | "return" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "delete" => KeyCode::Delete,
        "insert" => KeyCode::Insert,
        "space" => KeyCode::Char(' '),
        f if f.len() > 1 && f.starts_with('f') => {
            let n: u8 = f[1..].parse().ok()?;
            if !(1..=12).contains(&n) {
                return None;
            }
            KeyCode::F(n)
        }
        // Single character
        c => {
            let mut chars = c.chars();
            let ch = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            KeyCode::Char(ch)
        }
    };

    Some(KeyEvent::new(code, modifiers))
}

/// Format a key string for display (e.g., "ctrl+p" -> "^P", "q" -> "Q", "space" -> "Space")
pub fn format_key_for_display(key_str: &str) -> String {
    let Some(key) = parse_key_string(key_str) else {
        return key_str.trim().to_string();
    };

    let mut out = String::new();
    if key.code == KeyCode::BackTab {
        return "Shift+Tab".to_string();
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        out.push('^');
    }
    if key.modifiers.contains(KeyModifiers::SHIFT) {
        out.push_str("Shift+");
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        out.push_str("Alt+");
    }

    match key.code {
        KeyCode::Esc => out.push_str("Esc"),
        KeyCode::Enter => out.push_str("Enter"),
        KeyCode::Tab => out.push_str("Tab"),
        KeyCode::Backspace => out.push_str("Backspace"),
        KeyCode::Up => out.push('↑'),
        KeyCode::Down => out.push('↓'),
        KeyCode::Left => out.push('←'),
        KeyCode::Right => out.push('→'),
        KeyCode::Home => out.push_str("Home"),
        KeyCode::End => out.push_str("End"),
        KeyCode::PageUp => out.push_str("PgUp"),
        KeyCode::PageDown => out.push_str("PgDn"),
        KeyCode::Delete => out.push_str("Del"),
        KeyCode::Insert => out.push_str("Ins"),
        KeyCode::F(n) => out.push_str(&format!("F{n}")),
        KeyCode::Char(' ') => out.push_str("Space"),
        KeyCode::Char(c) => out.extend(c.to_uppercase()),
        _ => out.push_str(key_str.trim()),
    }
    out
}
