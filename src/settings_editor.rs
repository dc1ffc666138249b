use crate::app::SavedConfig;
use crate::hotkey::normalize_hotkey;
use crate::launcher::{classify, TargetClass};
use crate::settings::Settings;
use crate::tools::{normalize_category, TargetField, ToolRecord};

/// One editable row of the tool list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolDraft {
    pub label: String,
    pub target: String,
    /// `None` picks a field from the target when saving.
    pub target_field: Option<TargetField>,
    pub description: String,
    pub category: String,
}

impl ToolDraft {
    fn from_record(tool: &ToolRecord) -> Self {
        Self {
            label: tool.label.clone(),
            target: tool.target.clone(),
            target_field: Some(tool.target_field),
            description: tool.description.clone(),
            category: tool.category.clone(),
        }
    }

    fn is_blank(&self) -> bool {
        [&self.label, &self.target, &self.description, &self.category]
            .iter()
            .all(|s| s.trim().is_empty())
    }

    fn field(&self) -> TargetField {
        self.target_field.unwrap_or_else(|| guess_field(&self.target))
    }
}

/// URLs go to `url`, anything with arguments to `command`, the rest to `path`.
fn guess_field(target: &str) -> TargetField {
    let target = target.trim();
    if classify(target) == TargetClass::Url {
        TargetField::Url
    } else if target.contains(char::is_whitespace) && !std::path::Path::new(target).exists() {
        TargetField::Command
    } else {
        TargetField::Path
    }
}

#[derive(Debug, Clone, Default)]
pub struct SettingsEditor {
    pub hotkey: String,
    pub debug_logging: bool,
    pub rows: Vec<ToolDraft>,
    pub error: Option<String>,
}

impl SettingsEditor {
    pub fn new(settings: &Settings, tools: &[ToolRecord]) -> Self {
        Self {
            hotkey: settings.hotkey.clone(),
            debug_logging: settings.debug_logging,
            rows: tools.iter().map(ToolDraft::from_record).collect(),
            error: None,
        }
    }

    pub fn add_row(&mut self) {
        self.rows.push(ToolDraft::default());
    }

    pub fn remove_row(&mut self, idx: usize) {
        if idx < self.rows.len() {
            self.rows.remove(idx);
        }
    }

    pub fn move_up(&mut self, idx: usize) {
        if idx > 0 && idx < self.rows.len() {
            self.rows.swap(idx - 1, idx);
        }
    }

    /// Validate the form. Blank rows are dropped; a row needs a target and
    /// its label defaults to the target.
    pub fn to_config(&self) -> Result<SavedConfig, String> {
        let hotkey = normalize_hotkey(&self.hotkey)
            .ok_or_else(|| format!("Invalid hotkey: '{}'", self.hotkey.trim()))?;

        let mut tools = Vec::new();
        for (idx, row) in self.rows.iter().enumerate() {
            if row.is_blank() {
                continue;
            }
            let target = row.target.trim();
            if target.is_empty() {
                let name = match row.label.trim() {
                    "" => format!("row {}", idx + 1),
                    label => format!("'{label}'"),
                };
                return Err(format!("Tool {name} needs a URL, path or command"));
            }
            let label = match row.label.trim() {
                "" => target,
                label => label,
            };
            tools.push(
                ToolRecord::new(label, row.field(), target)
                    .with_description(row.description.trim())
                    .with_category(normalize_category(&row.category)),
            );
        }

        Ok(SavedConfig {
            settings: Settings {
                hotkey,
                debug_logging: self.debug_logging,
            },
            tools,
        })
    }
}

#[cfg(feature = "desktop")]
mod form {
    use eframe::egui;

    use super::SettingsEditor;
    use crate::app::UiEvent;
    use crate::tools::TargetField;

    fn field_label(field: Option<TargetField>) -> &'static str {
        match field {
            None => "auto",
            Some(field) => field.key(),
        }
    }

    impl SettingsEditor {
        /// Draw the settings form. Returns the event produced by Save, Cancel
        /// or closing the window.
        pub fn ui(&mut self, ctx: &egui::Context) -> Option<UiEvent> {
            let mut event = None;
            let mut open = true;
            egui::Window::new("Settings")
                .open(&mut open)
                .collapsible(false)
                .resizable(true)
                .default_width(720.0)
                .show(ctx, |ui| {
                    ui.horizontal(|ui| {
                        ui.label("Launcher hotkey");
                        ui.text_edit_singleline(&mut self.hotkey);
                    });
                    ui.checkbox(&mut self.debug_logging, "Debug logging (after relaunch)");

                    ui.separator();
                    ui.label("Tools:");
                    let mut remove: Option<usize> = None;
                    let mut raise: Option<usize> = None;
                    egui::ScrollArea::vertical().max_height(320.0).show(ui, |ui| {
                        egui::Grid::new("tool_rows").striped(true).show(ui, |ui| {
                            ui.label("Label");
                            ui.label("Kind");
                            ui.label("Target");
                            ui.label("Description");
                            ui.label("Category");
                            ui.end_row();
                            for (idx, row) in self.rows.iter_mut().enumerate() {
                                ui.add(egui::TextEdit::singleline(&mut row.label).desired_width(120.0));
                                egui::ComboBox::from_id_source(("kind", idx))
                                    .selected_text(field_label(row.target_field))
                                    .show_ui(ui, |ui| {
                                        ui.selectable_value(&mut row.target_field, None, "auto");
                                        for field in TargetField::PRECEDENCE {
                                            ui.selectable_value(
                                                &mut row.target_field,
                                                Some(field),
                                                field.key(),
                                            );
                                        }
                                    });
                                ui.add(egui::TextEdit::singleline(&mut row.target).desired_width(200.0));
                                ui.add(
                                    egui::TextEdit::singleline(&mut row.description).desired_width(160.0),
                                );
                                ui.add(egui::TextEdit::singleline(&mut row.category).desired_width(100.0));
                                if ui.small_button("Up").clicked() {
                                    raise = Some(idx);
                                }
                                if ui.small_button("Remove").clicked() {
                                    remove = Some(idx);
                                }
                                ui.end_row();
                            }
                        });
                    });
                    if let Some(i) = raise {
                        self.move_up(i);
                    }
                    if let Some(i) = remove {
                        self.remove_row(i);
                    }
                    if ui.button("Add tool").clicked() {
                        self.add_row();
                    }

                    ui.separator();
                    if let Some(err) = &self.error {
                        ui.colored_label(ui.visuals().error_fg_color, err.as_str());
                    }
                    ui.horizontal(|ui| {
                        if ui.button("Save").clicked() {
                            match self.to_config() {
                                Ok(saved) => {
                                    self.error = None;
                                    event = Some(UiEvent::SettingsSaved(saved));
                                }
                                Err(e) => self.error = Some(e),
                            }
                        }
                        if ui.button("Cancel").clicked() {
                            event = Some(UiEvent::SettingsClosed);
                        }
                    });
                });
            if !open {
                event = Some(UiEvent::SettingsClosed);
            }
            event
        }
    }
}
