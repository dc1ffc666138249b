use std::fmt;

use crate::settings::DEFAULT_HOTKEY;

/// A parsed hotkey. `key` is stored lower-case (`f`, `f2`, `space`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Hotkey {
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub win: bool,
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl {
            f.write_str("ctrl+")?;
        }
        if self.alt {
            f.write_str("alt+")?;
        }
        if self.shift {
            f.write_str("shift+")?;
        }
        if self.win {
            f.write_str("super+")?;
        }
        f.write_str(&self.key)
    }
}

/// Parse a hotkey string like "Ctrl+Alt+F" into a [`Hotkey`].
pub fn parse_hotkey(s: &str) -> Option<Hotkey> {
    let mut ctrl = false;
    let mut shift = false;
    let mut alt = false;
    let mut win = false;
    let mut key: Option<String> = None;

    for part in s.split('+') {
        let lower = part.trim().to_ascii_lowercase();
        match lower.as_str() {
            "ctrl" | "control" => ctrl = true,
            "shift" => shift = true,
            "alt" | "option" => alt = true,
            "super" | "win" | "cmd" | "command" | "meta" => win = true,
            "" => return None,
            _ => {
                if key.is_some() {
                    return None;
                }
                key = Some(parse_key(&lower)?);
            }
        }
    }

    key.map(|key| Hotkey {
        key,
        ctrl,
        shift,
        alt,
        win,
    })
}

fn parse_key(lower: &str) -> Option<String> {
    let canonical = match lower {
        "space" | "tab" | "backspace" | "delete" | "insert" | "home" | "end" | "pageup"
        | "pagedown" | "up" | "down" | "left" | "right" => lower,
        "enter" | "return" => "enter",
        "esc" | "escape" => "escape",
        _ if lower.len() == 1 => {
            let c = lower.chars().next()?;
            if c.is_ascii_alphanumeric() {
                lower
            } else {
                return None;
            }
        }
        _ if lower.starts_with('f') => {
            return match lower[1..].parse::<u8>().ok() {
                Some(n @ 1..=24) => Some(format!("f{n}")),
                _ => None,
            };
        }
        _ => return None,
    };
    Some(canonical.to_string())
}

/// Canonical spelling of a hotkey string, if it parses.
pub fn normalize_hotkey(s: &str) -> Option<String> {
    parse_hotkey(s).map(|h| h.to_string())
}

#[derive(Debug, thiserror::Error)]
pub enum HotkeyError {
    #[error("invalid hotkey '{0}'")]
    Invalid(String),
    #[error("hotkey '{hotkey}' was rejected: {reason}")]
    Rejected { hotkey: String, reason: String },
    #[error("hotkey '{0}' is not registered")]
    NotRegistered(String),
}

/// Host capability that owns OS-level hotkey registrations. A registered
/// hotkey triggers the popup.
pub trait HotkeyRegistrar {
    fn register(&mut self, hotkey: &Hotkey) -> Result<(), HotkeyError>;
    fn unregister(&mut self, hotkey: &Hotkey) -> Result<(), HotkeyError>;
}

/// A missing registrar (the OS hotkey service failed to start) rejects
/// everything, which leaves the binding unbound.
impl<R: HotkeyRegistrar> HotkeyRegistrar for Option<R> {
    fn register(&mut self, hotkey: &Hotkey) -> Result<(), HotkeyError> {
        match self {
            Some(inner) => inner.register(hotkey),
            None => Err(HotkeyError::Rejected {
                hotkey: hotkey.to_string(),
                reason: "hotkey service unavailable".into(),
            }),
        }
    }

    fn unregister(&mut self, hotkey: &Hotkey) -> Result<(), HotkeyError> {
        match self {
            Some(inner) => inner.unregister(hotkey),
            None => Err(HotkeyError::NotRegistered(hotkey.to_string())),
        }
    }
}

/// Result of [`HotkeyBinding::rebind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RebindOutcome {
    /// The requested hotkey is active.
    Bound(String),
    /// The requested hotkey failed and the default took its place.
    FellBack(String),
    /// Neither the requested nor the default hotkey could be registered.
    Unbound,
}

/// Tracks the single active popup hotkey.
pub struct HotkeyBinding<R> {
    registrar: R,
    active: Option<Hotkey>,
    configured: String,
    default: String,
}

impl<R: HotkeyRegistrar> HotkeyBinding<R> {
    pub fn new(registrar: R) -> Self {
        Self::with_default(registrar, DEFAULT_HOTKEY)
    }

    pub fn with_default(registrar: R, default: &str) -> Self {
        let default = normalize_hotkey(default).unwrap_or_else(|| default.to_string());
        Self {
            registrar,
            active: None,
            configured: default.clone(),
            default,
        }
    }

    pub fn registrar(&self) -> &R {
        &self.registrar
    }

    pub fn is_bound(&self) -> bool {
        self.active.is_some()
    }

    pub fn active(&self) -> Option<String> {
        self.active.as_ref().map(Hotkey::to_string)
    }

    /// The active hotkey, or the last requested one when nothing is bound.
    pub fn current(&self) -> String {
        self.active().unwrap_or_else(|| self.configured.clone())
    }

    /// Swap the active hotkey for `new_hotkey`, falling back to the default
    /// once if it cannot be registered.
    pub fn rebind(&mut self, new_hotkey: &str) -> RebindOutcome {
        let requested = parse_hotkey(new_hotkey);
        self.configured = requested
            .as_ref()
            .map(Hotkey::to_string)
            .unwrap_or_else(|| new_hotkey.trim().to_string());

        if let (Some(active), Some(requested)) = (&self.active, &requested) {
            if active == requested {
                tracing::debug!(hotkey = %active, "hotkey unchanged");
                return RebindOutcome::Bound(active.to_string());
            }
        }

        self.release();

        let error = match requested {
            Some(hotkey) => match self.registrar.register(&hotkey) {
                Ok(()) => {
                    tracing::info!(hotkey = %hotkey, "hotkey registered");
                    let name = hotkey.to_string();
                    self.active = Some(hotkey);
                    return RebindOutcome::Bound(name);
                }
                Err(e) => e,
            },
            None => HotkeyError::Invalid(new_hotkey.to_string()),
        };
        tracing::error!("failed to register hotkey: {error}");

        if self.configured == self.default {
            tracing::warn!("default hotkey unavailable; no hotkey is active");
            return RebindOutcome::Unbound;
        }

        let Some(default) = parse_hotkey(&self.default) else {
            tracing::error!(hotkey = %self.default, "default hotkey does not parse");
            return RebindOutcome::Unbound;
        };
        match self.registrar.register(&default) {
            Ok(()) => {
                tracing::warn!(hotkey = %default, "fell back to default hotkey");
                let name = default.to_string();
                self.active = Some(default);
                RebindOutcome::FellBack(name)
            }
            Err(e) => {
                tracing::error!("failed to register default hotkey: {e}; no hotkey is active");
                RebindOutcome::Unbound
            }
        }
    }

    /// Unregister the active hotkey, if any. Used on exit.
    pub fn shutdown(&mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(old) = self.active.take() {
            match self.registrar.unregister(&old) {
                Ok(()) => tracing::debug!(hotkey = %old, "hotkey unregistered"),
                Err(e) => tracing::warn!("failed to unregister hotkey: {e}; continuing"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_f_key() {
        let hk = parse_hotkey("F2").expect("should parse F2");
        assert_eq!(hk.key, "f2");
        assert!(!hk.ctrl && !hk.shift && !hk.alt && !hk.win);
    }

    #[test]
    fn parse_combo_hotkey() {
        let hk = parse_hotkey("Ctrl+Shift+Space").expect("should parse combination");
        assert_eq!(hk.key, "space");
        assert!(hk.ctrl && hk.shift && !hk.alt);
    }

    #[test]
    fn parse_invalid_hotkey() {
        assert!(parse_hotkey("Ctrl+Foo").is_none());
        assert!(parse_hotkey("Ctrl+Shift").is_none());
        assert!(parse_hotkey("ctrl++f").is_none());
        assert!(parse_hotkey("a+b").is_none());
        assert!(parse_hotkey("F25").is_none());
    }

    #[test]
    fn display_is_canonical() {
        let hk = parse_hotkey("Shift + ALT + ctrl + F").unwrap();
        assert_eq!(hk.to_string(), "ctrl+alt+shift+f");
        assert_eq!(normalize_hotkey("cmd+esc").as_deref(), Some("super+escape"));
    }

    #[test]
    fn function_keys_drop_leading_zeros() {
        assert_eq!(normalize_hotkey("ctrl+F01").as_deref(), Some("ctrl+f1"));
        assert_eq!(parse_hotkey("f09"), parse_hotkey("F9"));
    }
}
