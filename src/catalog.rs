//! Tools grouped by category, plus the popup size heuristics derived from them.

use crate::tools::{normalize_category, ToolRecord};

/// Approximate width of one character of button text, in points.
pub const CHAR_WIDTH: f32 = 7.0;
/// Horizontal padding added inside each tool box.
pub const BOX_PADDING: f32 = 32.0;
pub const MIN_COLUMN_WIDTH: f32 = 160.0;
pub const BOX_HEIGHT: f32 = 48.0;
/// Box height plus the spacing below it.
pub const ROW_HEIGHT: f32 = 56.0;
pub const COLUMN_GAP: f32 = 12.0;
pub const OUTER_PADDING: f32 = 16.0;
/// Title and category headings.
pub const HEADER_HEIGHT: f32 = 72.0;
/// Cancel/settings row.
pub const FOOTER_HEIGHT: f32 = 48.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup {
    pub name: String,
    pub tools: Vec<ToolRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Catalog {
    groups: Vec<CategoryGroup>,
}

impl Catalog {
    /// Group tools by trimmed category. Categories keep their first-appearance
    /// order and tools keep input order within a category.
    pub fn group(tools: &[ToolRecord]) -> Self {
        let mut groups: Vec<CategoryGroup> = Vec::new();
        for tool in tools {
            let name = normalize_category(&tool.category);
            match groups.iter_mut().find(|g| g.name == name) {
                Some(group) => group.tools.push(tool.clone()),
                None => groups.push(CategoryGroup {
                    name: name.to_string(),
                    tools: vec![tool.clone()],
                }),
            }
        }
        Self { groups }
    }

    pub fn groups(&self) -> &[CategoryGroup] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.tools.len()).sum()
    }

    pub fn find(&self, id: &str) -> Option<&ToolRecord> {
        self.groups
            .iter()
            .flat_map(|g| g.tools.iter())
            .find(|t| t.id == id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutMetrics {
    pub column_width: f32,
    pub box_height: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnLayout {
    pub category: String,
    pub metrics: LayoutMetrics,
}

/// Size hints for the popup. Character-count based, not real text measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupLayout {
    pub columns: Vec<ColumnLayout>,
    pub width: f32,
    pub height: f32,
}

impl PopupLayout {
    pub fn metrics_for(&self, category: &str) -> Option<LayoutMetrics> {
        self.columns
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.metrics)
    }
}

fn column_width(group: &CategoryGroup) -> f32 {
    let longest = group
        .tools
        .iter()
        .flat_map(|t| [t.label.chars().count(), t.description.chars().count()])
        .max()
        .unwrap_or(0);
    (longest as f32 * CHAR_WIDTH + BOX_PADDING).max(MIN_COLUMN_WIDTH)
}

pub fn layout(catalog: &Catalog) -> PopupLayout {
    let columns: Vec<ColumnLayout> = catalog
        .groups()
        .iter()
        .map(|group| ColumnLayout {
            category: group.name.clone(),
            metrics: LayoutMetrics {
                column_width: column_width(group),
                box_height: BOX_HEIGHT,
            },
        })
        .collect();

    let gaps = columns.len().saturating_sub(1) as f32 * COLUMN_GAP;
    let content_width: f32 = columns.iter().map(|c| c.metrics.column_width).sum::<f32>() + gaps;
    let width = content_width.max(MIN_COLUMN_WIDTH) + 2.0 * OUTER_PADDING;

    let tallest = catalog
        .groups()
        .iter()
        .map(|g| g.tools.len())
        .max()
        .unwrap_or(0);
    let height = HEADER_HEIGHT + tallest as f32 * ROW_HEIGHT + FOOTER_HEIGHT;

    PopupLayout {
        columns,
        width,
        height,
    }
}
