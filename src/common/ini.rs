//! Minimal reader/writer for the `key = value` section format used by the
//! launcher's config file.
//!
//! Parsing never fails as a whole. Problems are contained to the section they
//! occur in: that section is skipped and reported through [`IniDocument::skipped`].

/// Name of the section whose values act as fallbacks for every other section.
pub const DEFAULT_SECTION: &str = "DEFAULT";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Section {
    pub name: String,
    entries: Vec<(String, String)>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Look up a key. Keys are stored lower-cased so lookups are
    /// case-insensitive.
    pub fn get(&self, key: &str) -> Option<&str> {
        let key = key.to_ascii_lowercase();
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Insert or replace a key. Later values win.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let key = key.trim().to_ascii_lowercase();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn append_continuation(&mut self, key: &str, line: &str) -> bool {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, value)) => {
                if !value.is_empty() {
                    value.push('\n');
                }
                value.push_str(line);
                true
            }
            None => false,
        }
    }
}

/// Why a chunk of the input was not loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    pub line: usize,
    pub section: Option<String>,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniDocument {
    pub defaults: Section,
    pub sections: Vec<Section>,
    pub skipped: Vec<Skipped>,
}

impl IniDocument {
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Value of `key` in `section`, falling back to the `[DEFAULT]` section.
    pub fn get_with_default<'a>(&'a self, section: &'a Section, key: &str) -> Option<&'a str> {
        section.get(key).or_else(|| self.defaults.get(key))
    }
}

enum State {
    /// No header seen yet, or the previous header was unusable.
    Orphan,
    Open(Section),
    /// The current section is being skipped up to the next header.
    Malformed,
}

/// Parse the whole text. See the module docs for the error policy.
pub fn parse(text: &str) -> IniDocument {
    let mut doc = IniDocument {
        defaults: Section::new(DEFAULT_SECTION),
        ..Default::default()
    };
    let mut state = State::Orphan;
    // Key set by the previous line, with that line's indent width.
    let mut last_key: Option<(String, usize)> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            last_key = None;
            continue;
        }
        if trimmed.starts_with('#') || trimmed.starts_with(';') {
            continue;
        }

        // A line indented deeper than the key before it continues that value.
        let indent = raw.len() - raw.trim_start().len();
        if let (Some((key, key_indent)), State::Open(section)) = (&last_key, &mut state) {
            if indent > *key_indent && section.append_continuation(key, trimmed) {
                continue;
            }
        }

        if trimmed.starts_with('[') {
            finish(&mut doc, std::mem::replace(&mut state, State::Orphan));
            last_key = None;
            let Some(name) = trimmed
                .strip_prefix('[')
                .and_then(|rest| rest.strip_suffix(']'))
                .map(str::trim)
                .filter(|name| !name.is_empty())
            else {
                doc.skipped.push(Skipped {
                    line: line_no,
                    section: None,
                    reason: format!("unreadable section header '{trimmed}'"),
                });
                continue;
            };
            let duplicate = name != DEFAULT_SECTION && doc.section(name).is_some();
            if duplicate {
                doc.skipped.push(Skipped {
                    line: line_no,
                    section: Some(name.to_string()),
                    reason: "duplicate section name".into(),
                });
                state = State::Malformed;
            } else {
                state = State::Open(Section::new(name));
            }
            continue;
        }

        match &mut state {
            State::Orphan => {
                doc.skipped.push(Skipped {
                    line: line_no,
                    section: None,
                    reason: "key outside of any section".into(),
                });
            }
            State::Malformed => {}
            State::Open(section) => match split_key_value(trimmed) {
                Some((key, value)) => {
                    section.set(key, value);
                    last_key = Some((key.trim().to_ascii_lowercase(), indent));
                }
                None => {
                    doc.skipped.push(Skipped {
                        line: line_no,
                        section: Some(section.name.clone()),
                        reason: format!("unreadable line '{trimmed}'"),
                    });
                    state = State::Malformed;
                    last_key = None;
                }
            },
        }
    }
    finish(&mut doc, state);
    doc
}

fn finish(doc: &mut IniDocument, state: State) {
    if let State::Open(section) = state {
        if section.name == DEFAULT_SECTION {
            for (k, v) in section.entries {
                doc.defaults.set(&k, v);
            }
        } else {
            doc.sections.push(section);
        }
    }
}

fn split_key_value(line: &str) -> Option<(&str, &str)> {
    let pos = line.find(|c: char| c == '=' || c == ':')?;
    let key = line[..pos].trim();
    if key.is_empty() {
        return None;
    }
    Some((key, line[pos + 1..].trim()))
}

/// Render sections back to text. Multi-line values are written with indented
/// continuation lines so [`parse`] reads them back unchanged.
pub fn write(sections: &[Section]) -> String {
    let mut out = String::new();
    for (i, section) in sections.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push('[');
        out.push_str(&section.name);
        out.push_str("]\n");
        for (key, value) in section.entries() {
            let mut lines = value.split('\n');
            out.push_str(key);
            out.push_str(" = ");
            out.push_str(lines.next().unwrap_or_default());
            out.push('\n');
            for cont in lines {
                out.push('\t');
                out.push_str(cont);
                out.push('\n');
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_sections_in_order() {
        let doc = parse("[a]\nx = 1\n\n[b]\ny: 2\n");
        let names: Vec<_> = doc.sections.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(doc.sections[1].get("y"), Some("2"));
        assert!(doc.skipped.is_empty());
    }

    #[test]
    fn keys_are_case_insensitive_and_last_wins() {
        let doc = parse("[a]\nLabel = one\nlabel = two\n");
        assert_eq!(doc.sections[0].get("LABEL"), Some("two"));
    }

    #[test]
    fn comments_are_ignored() {
        let doc = parse("# top\n[a]\n; note\nx = 1\n");
        assert_eq!(doc.sections[0].entries().count(), 1);
    }

    #[test]
    fn malformed_line_skips_only_its_section() {
        let doc = parse("[a]\nx = 1\n[b]\nnot a pair\nz = 3\n[c]\nw = 4\n");
        let names: Vec<_> = doc.sections.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["a", "c"]);
        assert_eq!(doc.skipped.len(), 1);
        assert_eq!(doc.skipped[0].section.as_deref(), Some("b"));
    }

    #[test]
    fn broken_header_skips_until_next_header() {
        let doc = parse("[a\nx = 1\n[b]\ny = 2\n");
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].name, "b");
    }

    #[test]
    fn duplicate_section_keeps_first() {
        let doc = parse("[a]\nx = 1\n[a]\nx = 2\n");
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].get("x"), Some("1"));
    }

    #[test]
    fn continuation_lines_join_with_newline() {
        let doc = parse("[a]\ndescription = first\n  second\nx = 1\n");
        assert_eq!(doc.sections[0].get("description"), Some("first\nsecond"));
        assert_eq!(doc.sections[0].get("x"), Some("1"));
    }

    #[test]
    fn continuation_follows_the_key_just_set() {
        let doc = parse("[a]\nlabel = one\nx = 1\nlabel = two\n  more\n");
        assert_eq!(doc.sections[0].get("label"), Some("two\nmore"));
        assert_eq!(doc.sections[0].get("x"), Some("1"));
    }

    #[test]
    fn uniformly_indented_keys_are_separate_entries() {
        let doc = parse("[Tool]\n    label = X\n    url = https://x\n");
        let tool = &doc.sections[0];
        assert_eq!(tool.get("label"), Some("X"));
        assert_eq!(tool.get("url"), Some("https://x"));
    }

    #[test]
    fn deeper_indent_continues_indented_key() {
        let doc = parse("[a]\n  description = first\n      second\n  x = 1\n");
        assert_eq!(doc.sections[0].get("description"), Some("first\nsecond"));
        assert_eq!(doc.sections[0].get("x"), Some("1"));
    }

    #[test]
    fn default_section_feeds_fallbacks() {
        let doc = parse("[DEFAULT]\ncategory = Web\n[a]\nurl = https://x\n");
        assert_eq!(doc.sections.len(), 1);
        let a = &doc.sections[0];
        assert_eq!(a.get("category"), None);
        assert_eq!(doc.get_with_default(a, "category"), Some("Web"));
    }

    #[test]
    fn value_may_contain_separators() {
        let doc = parse("[a]\nurl = https://example.com/?q=1\n");
        assert_eq!(doc.sections[0].get("url"), Some("https://example.com/?q=1"));
    }

    #[test]
    fn written_text_parses_back() {
        let mut s = Section::new("Tool");
        s.set("label", "Tool");
        s.set("description", "line one\nline two");
        let text = write(&[s.clone()]);
        let doc = parse(&text);
        assert_eq!(doc.sections, vec![s]);
    }
}
