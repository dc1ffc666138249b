use eframe::egui;

use super::theme::color;
use crate::app::{PopupView, UiEvent};
use crate::theme::Palette;

/// Draw the tool popup: one column per category, one tile per tool.
pub fn popup_ui(ctx: &egui::Context, view: &PopupView, palette: &Palette) -> Option<UiEvent> {
    let mut event = None;

    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        return Some(UiEvent::PopupClosed);
    }

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.heading(egui::RichText::new("Launch Tools:").strong());
        });
        ui.add_space(8.0);

        ui.horizontal_top(|ui| {
            for group in view.catalog.groups() {
                let Some(metrics) = view.layout.metrics_for(&group.name) else {
                    continue;
                };
                let size = egui::vec2(metrics.column_width, metrics.box_height);
                ui.allocate_ui(egui::vec2(metrics.column_width, ui.available_height()), |ui| {
                    ui.vertical(|ui| {
                        ui.label(egui::RichText::new(&group.name).color(color(palette.accent)));
                        for tool in &group.tools {
                            let text = tile_text(ui.style(), &tool.label, &tool.description, palette);
                            let response = ui
                                .add(
                                    egui::Button::new(text)
                                        .min_size(size)
                                        .fill(color(palette.tile_fill)),
                                )
                                .on_hover_text(tool.target.as_str());
                            if response.clicked() {
                                event = Some(UiEvent::ItemSelected(tool.id.clone()));
                            }
                        }
                    });
                });
            }
        });

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui.button("Cancel").clicked() {
                event = Some(UiEvent::PopupClosed);
            }
            if ui.button("Settings").clicked() {
                event = Some(UiEvent::SettingsRequested);
            }
        });
    });

    event
}

/// Label on the first line, description below it in the muted colour.
fn tile_text(
    style: &egui::Style,
    label: &str,
    description: &str,
    palette: &Palette,
) -> egui::text::LayoutJob {
    let font = egui::TextStyle::Button.resolve(style);
    let mut job = egui::text::LayoutJob::default();
    job.append(label, 0.0, egui::TextFormat::simple(font.clone(), color(palette.text)));
    if !description.is_empty() {
        job.append(
            &format!("\n{description}"),
            0.0,
            egui::TextFormat::simple(font, color(palette.muted_text)),
        );
    }
    job
}
