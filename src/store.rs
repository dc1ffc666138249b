use std::path::{Path, PathBuf};

use crate::common::config_files::{ensure_config_file, resolve_config_path, ConfigFileResult};
use crate::common::ini::{self, IniDocument};
use crate::common::slug::SectionNames;
use crate::settings::{Settings, SETTINGS_SECTION};
use crate::tools::{parse_tool_section, ToolRecord};

#[cfg(target_os = "windows")]
const SAMPLE_TOOL: &str = "\
[Sample_Tool]
label = Open Notepad
path = notepad.exe
description = Launch Windows Notepad
category = Utilities
";

#[cfg(not(target_os = "windows"))]
const SAMPLE_TOOL: &str = "\
[Sample_Tool]
label = Rust Documentation
url = https://doc.rust-lang.org
description = Open the Rust documentation
category = Utilities
";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to write config file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Everything read from the config file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoadedConfig {
    pub settings: Settings,
    pub tools: Vec<ToolRecord>,
}

/// Default contents written when no config file exists.
pub fn default_contents() -> String {
    let mut text = ini::write(&[Settings::default().to_section()]);
    text.push('\n');
    text.push_str(SAMPLE_TOOL);
    text
}

/// Parse config text. Never fails: broken sections are skipped and logged.
pub fn parse_config(text: &str) -> LoadedConfig {
    let doc = ini::parse(text);
    for skip in &doc.skipped {
        tracing::warn!(
            line = skip.line,
            section = ?skip.section,
            "skipping config input: {}",
            skip.reason
        );
    }
    config_from_document(&doc)
}

fn config_from_document(doc: &IniDocument) -> LoadedConfig {
    let settings = doc
        .section(SETTINGS_SECTION)
        .map(Settings::from_section)
        .unwrap_or_default();

    let tools = doc
        .sections
        .iter()
        .filter(|section| section.name != SETTINGS_SECTION)
        .filter_map(|section| {
            let tool = parse_tool_section(doc, section);
            if tool.is_none() {
                tracing::debug!(section = %section.name, "dropping section without url, path or command");
            }
            tool
        })
        .collect();

    LoadedConfig { settings, tools }
}

/// Render settings and tools in config file format. Section names are derived
/// from tool labels and made unique.
pub fn render_config(settings: &Settings, tools: &[ToolRecord]) -> String {
    let mut names = SectionNames::new();
    names.reserve(SETTINGS_SECTION);
    names.reserve(ini::DEFAULT_SECTION);

    let mut sections = Vec::with_capacity(tools.len() + 1);
    sections.push(settings.to_section());
    for tool in tools {
        let name = names.unique(&tool.label);
        sections.push(tool.to_section(&name));
    }
    ini::write(&sections)
}

/// Reads and writes the flat config file at one resolved location.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the standard per-user location.
    pub fn locate() -> Self {
        Self::new(resolve_config_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory relative tool paths are resolved against.
    pub fn base_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// Create the default config file when none exists. Returns whether a file
    /// is in place afterwards; failures are logged, never raised.
    pub fn ensure_exists(&self) -> bool {
        match ensure_config_file(&self.path, &default_contents()) {
            Ok(ConfigFileResult::Created { path }) => {
                tracing::info!("created default config at {}", path.display());
                true
            }
            Ok(ConfigFileResult::Opened { .. }) => true,
            Err(e) => {
                tracing::warn!(
                    "could not create config file {}: {e}; continuing without tools",
                    self.path.display()
                );
                false
            }
        }
    }

    /// Load settings and tools. A missing or unreadable file yields the
    /// default settings and no tools.
    pub fn load(&self) -> LoadedConfig {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => {
                let config = parse_config(&text);
                tracing::debug!(
                    tools = config.tools.len(),
                    "loaded config from {}",
                    self.path.display()
                );
                config
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no config file at {}", self.path.display());
                LoadedConfig::default()
            }
            Err(e) => {
                tracing::warn!("failed to read config {}: {e}", self.path.display());
                LoadedConfig::default()
            }
        }
    }

    /// Overwrite the config file with `settings` and `tools`.
    pub fn save(&self, settings: &Settings, tools: &[ToolRecord]) -> Result<(), ConfigError> {
        let text = render_config(settings, tools);
        let write_err = |source| ConfigError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        std::fs::write(&self.path, text).map_err(write_err)?;
        tracing::info!(tools = tools.len(), "saved config to {}", self.path.display());
        Ok(())
    }
}
