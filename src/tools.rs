use crate::common::ini::{IniDocument, Section};

/// Category used when a tool has none.
pub const DEFAULT_CATEGORY: &str = "General";

/// Which config key supplied a tool's target. Earlier variants take
/// precedence when a section has several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetField {
    Url,
    Path,
    Command,
}

impl TargetField {
    pub const PRECEDENCE: [TargetField; 3] = [TargetField::Url, TargetField::Path, TargetField::Command];

    pub fn key(self) -> &'static str {
        match self {
            TargetField::Url => "url",
            TargetField::Path => "path",
            TargetField::Command => "command",
        }
    }
}

impl std::fmt::Display for TargetField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// One launchable entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolRecord {
    /// Config section name.
    pub id: String,
    pub label: String,
    pub target: String,
    pub target_field: TargetField,
    pub description: String,
    pub category: String,
}

impl ToolRecord {
    pub fn new(id: impl Into<String>, target_field: TargetField, target: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            target: target.into(),
            target_field,
            description: String::new(),
            category: DEFAULT_CATEGORY.to_string(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Render as a config section named `name`. The label is always written,
    /// description and category only when they carry information.
    pub fn to_section(&self, name: &str) -> Section {
        let mut section = Section::new(name);
        section.set("label", self.label.as_str());
        section.set(self.target_field.key(), self.target.as_str());
        if !self.description.trim().is_empty() {
            section.set("description", self.description.as_str());
        }
        let category = normalize_category(&self.category);
        if category != DEFAULT_CATEGORY {
            section.set("category", category);
        }
        section
    }
}

/// Trimmed category, with blank values folded into [`DEFAULT_CATEGORY`].
pub fn normalize_category(raw: &str) -> &str {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        DEFAULT_CATEGORY
    } else {
        trimmed
    }
}

/// Turn one config section into a tool.
///
/// The target is the first non-empty of `url`, `path` and `command`; a section
/// with none of them yields `None`. `label` falls back to the section name.
/// Values missing from the section are looked up in `[DEFAULT]`.
pub fn parse_tool_section(doc: &IniDocument, section: &Section) -> Option<ToolRecord> {
    let value = |key: &str| {
        doc.get_with_default(section, key)
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    let (target_field, target) = TargetField::PRECEDENCE
        .iter()
        .find_map(|field| value(field.key()).map(|v| (*field, v)))?;

    Some(ToolRecord {
        id: section.name.clone(),
        label: value("label").unwrap_or(&section.name).to_string(),
        target: target.to_string(),
        target_field,
        description: value("description").unwrap_or_default().to_string(),
        category: normalize_category(value("category").unwrap_or_default()).to_string(),
    })
}
