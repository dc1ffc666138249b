use std::collections::HashSet;

/// Reduce a label to something safe to use as a section header: ASCII
/// alphanumerics, spaces, `_` and `-` survive, everything else is dropped.
pub fn sanitize_section_name(label: &str) -> String {
    let kept: String = label
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '_' | '-'))
        .collect();
    let trimmed = kept.trim();
    if trimmed.is_empty() {
        "Tool".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Lookup of section names already handed out while writing one file.
#[derive(Debug, Default)]
pub struct SectionNames {
    used: HashSet<String>,
}

impl SectionNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a name so future generations avoid it.
    pub fn reserve(&mut self, name: &str) {
        self.used.insert(name.to_string());
    }

    /// Generate a unique section name for a label, appending `_2`, `_3`, ...
    /// when the sanitized name is taken.
    pub fn unique(&mut self, label: &str) -> String {
        let base = sanitize_section_name(label);
        let mut name = base.clone();
        let mut n = 2usize;
        while self.used.contains(&name) {
            name = format!("{base}_{n}");
            n += 1;
        }
        self.used.insert(name.clone());
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_punctuation() {
        assert_eq!(sanitize_section_name("My Tool!"), "My Tool");
        assert_eq!(sanitize_section_name("  a_b-c  "), "a_b-c");
        assert_eq!(sanitize_section_name("!!!"), "Tool");
    }

    #[test]
    fn collisions_get_numeric_suffix() {
        let mut names = SectionNames::new();
        names.reserve("Settings");
        assert_eq!(names.unique("My Tool!"), "My Tool");
        assert_eq!(names.unique("My Tool"), "My Tool_2");
        assert_eq!(names.unique("My Tool?"), "My Tool_3");
        assert_eq!(names.unique("Settings"), "Settings_2");
    }

    #[test]
    fn suffix_skips_names_already_taken() {
        let mut names = SectionNames::new();
        assert_eq!(names.unique("A_2"), "A_2");
        assert_eq!(names.unique("A"), "A");
        assert_eq!(names.unique("A"), "A_3");
    }
}
