use crate::common::ini::Section;

/// Name of the reserved config section holding [`Settings`].
pub const SETTINGS_SECTION: &str = "Settings";

#[cfg(target_os = "macos")]
pub const DEFAULT_HOTKEY: &str = "super+alt+f";
#[cfg(not(target_os = "macos"))]
pub const DEFAULT_HOTKEY: &str = "ctrl+alt+f";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Global hotkey that opens the popup.
    pub hotkey: String,
    /// When enabled the application initialises the logger at debug level.
    pub debug_logging: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            hotkey: DEFAULT_HOTKEY.to_string(),
            debug_logging: false,
        }
    }
}

impl Settings {
    /// Read settings from the reserved section. Missing or blank keys fall
    /// back to the defaults.
    pub fn from_section(section: &Section) -> Self {
        let defaults = Self::default();
        let hotkey = section
            .get("hotkey")
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .map(str::to_string)
            .unwrap_or(defaults.hotkey);
        let debug_logging = match section.get("debug_logging") {
            None => defaults.debug_logging,
            Some(raw) => parse_bool(raw).unwrap_or_else(|| {
                tracing::warn!(
                    "provided debug_logging value '{}' is invalid; using {}",
                    raw,
                    defaults.debug_logging
                );
                defaults.debug_logging
            }),
        };
        Self {
            hotkey,
            debug_logging,
        }
    }

    pub fn to_section(&self) -> Section {
        let mut section = Section::new(SETTINGS_SECTION);
        section.set("hotkey", self.hotkey.as_str());
        if self.debug_logging {
            section.set("debug_logging", "true");
        }
        section
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "yes" | "true" | "on" => Some(true),
        "0" | "no" | "false" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_hotkey_uses_default() {
        let mut section = Section::new(SETTINGS_SECTION);
        section.set("hotkey", "   ");
        assert_eq!(Settings::from_section(&section).hotkey, DEFAULT_HOTKEY);
    }

    #[test]
    fn debug_logging_accepts_ini_booleans() {
        let mut section = Section::new(SETTINGS_SECTION);
        section.set("debug_logging", "Yes");
        assert!(Settings::from_section(&section).debug_logging);
        section.set("debug_logging", "maybe");
        assert!(!Settings::from_section(&section).debug_logging);
    }

    #[test]
    fn section_round_trips() {
        let settings = Settings {
            hotkey: "ctrl+shift+v".into(),
            debug_logging: true,
        };
        assert_eq!(Settings::from_section(&settings.to_section()), settings);
    }
}
