mod popup;
pub mod theme;

use std::time::Duration;

use eframe::egui;

use crate::app::{AppState, Control, PopupId, PopupView, Presenter, UiEvent};
use crate::launcher::SystemOpener;
use crate::settings::Settings;
use crate::settings_editor::SettingsEditor;
use crate::store::ConfigStore;
use crate::system_hotkey::{forward_hotkey_events, GlobalHotkeyRegistrar};
use crate::theme::Palette;
use crate::tools::ToolRecord;
use crate::visibility::{request_queue, RequestQueue};

/// Where the window waits while nothing is shown. Hidden windows stop
/// receiving repaints on some platforms, so the window is parked instead.
const OFFSCREEN_POS: (f32, f32) = (-10000.0, -10000.0);
const SETTINGS_SIZE: (f32, f32) = (780.0, 520.0);
/// Polling interval while parked, in case a wake-up is missed.
const IDLE_REPAINT: Duration = Duration::from_millis(250);

/// Egui side of the [`Presenter`] contract.
#[derive(Default)]
pub struct EguiPresenter {
    popup: Option<PopupView>,
    settings: Option<SettingsEditor>,
    resize_to: Option<egui::Vec2>,
}

impl Presenter for EguiPresenter {
    fn open_popup(&mut self, view: PopupView) {
        self.resize_to = Some(egui::vec2(view.layout.width, view.layout.height));
        self.popup = Some(view);
    }

    fn close_popup(&mut self, id: PopupId) {
        if self.popup.as_ref().is_some_and(|p| p.id == id) {
            self.popup = None;
        }
    }

    fn open_settings(&mut self, settings: &Settings, tools: &[ToolRecord]) {
        self.settings = Some(SettingsEditor::new(settings, tools));
        self.resize_to = Some(egui::vec2(SETTINGS_SIZE.0, SETTINGS_SIZE.1));
    }

    fn close_settings(&mut self) {
        self.settings = None;
    }

    fn show_save_error(&mut self, message: &str) {
        if let Some(editor) = &mut self.settings {
            editor.error = Some(format!("Failed to save: {message}"));
        }
    }
}

impl EguiPresenter {
    pub fn is_visible(&self) -> bool {
        self.popup.is_some() || self.settings.is_some()
    }

    /// Draw whatever is open and collect the user's actions.
    fn ui(&mut self, ctx: &egui::Context, palette: &Palette) -> Vec<UiEvent> {
        let mut events = Vec::new();
        if let Some(editor) = &mut self.settings {
            egui::CentralPanel::default().show(ctx, |_ui| {});
            events.extend(editor.ui(ctx));
        } else if let Some(view) = &self.popup {
            events.extend(popup::popup_ui(ctx, view, palette));
        }
        events
    }
}

pub struct LauncherApp {
    state: AppState<Option<GlobalHotkeyRegistrar>, SystemOpener>,
    presenter: EguiPresenter,
    queue: RequestQueue,
    palette: Palette,
    visible: bool,
    exiting: bool,
    #[allow(dead_code)] // keeps the tray icon alive on platforms that return one
    tray: Option<tray_icon::TrayIcon>,
}

impl LauncherApp {
    pub fn new(cc: &eframe::CreationContext<'_>, store: ConfigStore) -> Self {
        let ctx = cc.egui_ctx.clone();
        let (sender, queue) = request_queue();
        let sender = sender.with_waker(move || ctx.request_repaint());

        let registrar = match GlobalHotkeyRegistrar::new() {
            Ok(r) => Some(r),
            Err(e) => {
                tracing::error!("global hotkeys unavailable: {e}");
                None
            }
        };
        forward_hotkey_events(sender.clone());
        let tray = crate::tray::spawn_tray(sender);

        let style_ctx = cc.egui_ctx.clone();
        let palette = Palette::detect(&move || style_ctx.style().visuals.dark_mode);
        cc.egui_ctx.set_visuals(theme::palette_to_visuals(&palette));

        Self {
            state: AppState::new(store, registrar, SystemOpener),
            presenter: EguiPresenter::default(),
            queue,
            palette,
            visible: false,
            exiting: false,
            tray,
        }
    }

    fn apply_visibility(&mut self, ctx: &egui::Context) {
        if let Some(size) = self.presenter.resize_to.take() {
            ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(size));
            if self.visible {
                ctx.send_viewport_cmd(egui::ViewportCommand::OuterPosition(centered(ctx, size)));
            }
        }

        let should_be_visible = self.presenter.is_visible();
        if should_be_visible == self.visible {
            return;
        }
        tracing::debug!("gui thread -> visible: {}", should_be_visible);
        self.visible = should_be_visible;
        if should_be_visible {
            let size = ctx
                .input(|i| i.viewport().inner_rect)
                .map(|r| r.size())
                .unwrap_or(egui::vec2(300.0, 400.0));
            ctx.send_viewport_cmd(egui::ViewportCommand::OuterPosition(centered(ctx, size)));
            ctx.send_viewport_cmd(egui::ViewportCommand::Visible(true));
            ctx.send_viewport_cmd(egui::ViewportCommand::Focus);
        } else {
            ctx.send_viewport_cmd(egui::ViewportCommand::OuterPosition(egui::pos2(
                OFFSCREEN_POS.0,
                OFFSCREEN_POS.1,
            )));
        }
    }

    fn finish(&mut self, ctx: &egui::Context, control: Control) {
        if control == Control::Relaunch {
            relaunch();
        }
        self.exiting = true;
        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
    }
}

fn centered(ctx: &egui::Context, size: egui::Vec2) -> egui::Pos2 {
    match ctx.input(|i| i.viewport().monitor_size) {
        Some(monitor) => ((monitor - size) / 2.0).max(egui::Vec2::ZERO).to_pos2(),
        None => egui::pos2(600.0, 300.0),
    }
}

fn relaunch() {
    match std::env::current_exe() {
        Ok(exe) => {
            if let Err(e) = std::process::Command::new(&exe).spawn() {
                tracing::error!("failed to relaunch {}: {e}", exe.display());
            }
        }
        Err(e) => tracing::error!("cannot determine own executable: {e}"),
    }
}

impl eframe::App for LauncherApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let control = self.state.process_requests(&self.queue, &mut self.presenter);
        if control != Control::Continue {
            self.finish(ctx, control);
            return;
        }

        if ctx.input(|i| i.viewport().close_requested()) && !self.exiting {
            // The window only goes away; the launcher keeps running in the tray.
            ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
            if self.presenter.popup.is_some() {
                let _ = self.state.handle_event(UiEvent::PopupClosed, &mut self.presenter);
                self.presenter.popup = None;
            }
            if self.presenter.settings.is_some() {
                let _ = self.state.handle_event(UiEvent::SettingsClosed, &mut self.presenter);
                self.presenter.settings = None;
            }
        }

        for event in self.presenter.ui(ctx, &self.palette) {
            match event {
                UiEvent::PopupClosed => self.presenter.popup = None,
                UiEvent::SettingsClosed => self.presenter.settings = None,
                _ => {}
            }
            // A failed save has already been reported to the settings form.
            let _ = self.state.handle_event(event, &mut self.presenter);
        }

        self.apply_visibility(ctx);
        if !self.visible {
            ctx.request_repaint_after(IDLE_REPAINT);
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.state.shutdown(&mut self.presenter);
    }
}
