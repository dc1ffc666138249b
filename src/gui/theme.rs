use eframe::egui;

use crate::theme::{Palette, ThemeColor};

pub fn color(color: ThemeColor) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}

pub fn palette_to_visuals(palette: &Palette) -> egui::Visuals {
    let mut visuals = if palette.dark {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    };
    visuals.window_fill = color(palette.window_fill);
    visuals.panel_fill = color(palette.window_fill);
    visuals.override_text_color = Some(color(palette.text));
    visuals.hyperlink_color = color(palette.accent);

    visuals.widgets.inactive.bg_fill = color(palette.tile_fill);
    visuals.widgets.inactive.weak_bg_fill = color(palette.tile_fill);
    visuals.widgets.hovered.bg_fill = color(palette.tile_hovered);
    visuals.widgets.hovered.weak_bg_fill = color(palette.tile_hovered);
    visuals.widgets.hovered.bg_stroke.color = color(palette.accent);
    visuals.selection.stroke.color = color(palette.accent);

    visuals
}
