//! Application state owned by the UI context.
//!
//! The presentation layer reports user actions as [`UiEvent`]s and background
//! contexts send [`UiRequest`]s; both end up in [`AppState`], which is the only
//! place settings, tools, the popup slot and the hotkey binding change.

use crate::catalog::{layout, Catalog, PopupLayout};
use crate::hotkey::{HotkeyBinding, HotkeyRegistrar, RebindOutcome};
use crate::launcher::{Launcher, Opener};
use crate::settings::Settings;
use crate::store::{ConfigError, ConfigStore};
use crate::tools::ToolRecord;
use crate::tray::TrayAction;
use crate::visibility::{RequestQueue, UiRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PopupId(pub u64);

/// Everything the presentation layer needs to draw one popup.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupView {
    pub id: PopupId,
    pub catalog: Catalog,
    pub layout: PopupLayout,
}

/// Settings and tools as edited in the settings form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedConfig {
    pub settings: Settings,
    pub tools: Vec<ToolRecord>,
}

/// User actions reported by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    ItemSelected(String),
    SettingsRequested,
    SettingsSaved(SavedConfig),
    /// The popup was dismissed on the presentation side (Escape, Cancel).
    PopupClosed,
    SettingsClosed,
}

/// What the event loop should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Relaunch,
    Exit,
}

/// Rendering side of the application: a popup with grouped tools and a
/// settings form.
pub trait Presenter {
    fn open_popup(&mut self, view: PopupView);
    fn close_popup(&mut self, id: PopupId);
    fn open_settings(&mut self, settings: &Settings, tools: &[ToolRecord]);
    fn close_settings(&mut self);
    fn show_save_error(&mut self, message: &str);
}

pub struct AppState<R, O> {
    store: ConfigStore,
    settings: Settings,
    tools: Vec<ToolRecord>,
    catalog: Catalog,
    binding: HotkeyBinding<R>,
    launcher: Launcher<O>,
    popup: Option<PopupId>,
    next_popup: u64,
    settings_open: bool,
}

impl<R: HotkeyRegistrar, O: Opener> AppState<R, O> {
    /// Load the config (creating a default one if needed) and bind the
    /// configured hotkey.
    pub fn new(store: ConfigStore, registrar: R, opener: O) -> Self {
        store.ensure_exists();
        let config = store.load();
        let launcher = Launcher::new(opener, store.base_dir());
        let mut binding = HotkeyBinding::new(registrar);
        log_rebind(binding.rebind(&config.settings.hotkey));

        Self {
            catalog: Catalog::group(&config.tools),
            settings: config.settings,
            tools: config.tools,
            store,
            binding,
            launcher,
            popup: None,
            next_popup: 0,
            settings_open: false,
        }
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn tools(&self) -> &[ToolRecord] {
        &self.tools
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn binding(&self) -> &HotkeyBinding<R> {
        &self.binding
    }

    pub fn launcher(&self) -> &Launcher<O> {
        &self.launcher
    }

    pub fn popup(&self) -> Option<PopupId> {
        self.popup
    }

    pub fn settings_open(&self) -> bool {
        self.settings_open
    }

    /// Re-read the config file and rebuild the catalog.
    pub fn reload(&mut self) {
        let config = self.store.load();
        self.catalog = Catalog::group(&config.tools);
        self.settings = config.settings;
        self.tools = config.tools;
    }

    /// Show a fresh popup, replacing any popup that is already open. Nothing
    /// opens while the settings form is shown.
    pub fn show_popup(&mut self, presenter: &mut impl Presenter) -> Option<PopupId> {
        if self.settings_open {
            tracing::debug!("settings form is open; ignoring popup request");
            return None;
        }
        self.reload();
        self.close_popup(presenter);

        if self.catalog.is_empty() {
            tracing::info!("no tools configured; not showing popup");
            return None;
        }

        self.next_popup += 1;
        let id = PopupId(self.next_popup);
        let view = PopupView {
            id,
            layout: layout(&self.catalog),
            catalog: self.catalog.clone(),
        };
        tracing::debug!(popup = id.0, tools = self.catalog.len(), "opening popup");
        presenter.open_popup(view);
        self.popup = Some(id);
        Some(id)
    }

    fn close_popup(&mut self, presenter: &mut impl Presenter) {
        if let Some(old) = self.popup.take() {
            tracing::debug!(popup = old.0, "closing popup");
            presenter.close_popup(old);
        }
    }

    fn open_settings(&mut self, presenter: &mut impl Presenter) {
        self.close_popup(presenter);
        presenter.open_settings(&self.settings, &self.tools);
        self.settings_open = true;
    }

    /// Launch the tool with `id`. Failures are logged; the popup closes
    /// either way.
    fn select(&mut self, id: &str, presenter: &mut impl Presenter) {
        match self.catalog.find(id) {
            Some(tool) => match self.launcher.launch(&tool.target) {
                Ok(outcome) => tracing::info!(tool = %tool.id, ?outcome, "launched tool"),
                Err(e) => tracing::error!(tool = %tool.id, "launch failed: {e:#}"),
            },
            None => tracing::warn!(tool = %id, "selected tool no longer exists"),
        }
        self.close_popup(presenter);
    }

    fn save(&mut self, saved: SavedConfig, presenter: &mut impl Presenter) -> Result<(), ConfigError> {
        if let Err(e) = self.store.save(&saved.settings, &saved.tools) {
            tracing::error!("{e}");
            presenter.show_save_error(&e.to_string());
            return Err(e);
        }
        if saved.settings.debug_logging != self.settings.debug_logging {
            tracing::info!("debug logging change takes effect after relaunch");
        }

        // Reload so ids match the section names that were just written.
        self.reload();
        log_rebind(self.binding.rebind(&self.settings.hotkey));
        presenter.close_settings();
        self.settings_open = false;
        Ok(())
    }

    /// Apply one user action. Only a failed save returns an error, after it
    /// has been shown in the settings form.
    pub fn handle_event(
        &mut self,
        event: UiEvent,
        presenter: &mut impl Presenter,
    ) -> Result<(), ConfigError> {
        match event {
            UiEvent::ItemSelected(id) => self.select(&id, presenter),
            UiEvent::SettingsRequested => self.open_settings(presenter),
            UiEvent::SettingsSaved(saved) => return self.save(saved, presenter),
            UiEvent::PopupClosed => {
                self.popup = None;
            }
            UiEvent::SettingsClosed => {
                self.settings_open = false;
            }
        }
        Ok(())
    }

    pub fn handle_tray(&mut self, action: TrayAction, presenter: &mut impl Presenter) -> Control {
        match action {
            TrayAction::Launch => {
                self.show_popup(presenter);
            }
            TrayAction::OpenConfig => {
                self.store.ensure_exists();
                if let Err(e) = self.launcher.opener().open_path(self.store.path()) {
                    tracing::error!("failed to open config {}: {e:#}", self.store.path().display());
                }
            }
            TrayAction::Settings => self.open_settings(presenter),
            TrayAction::Relaunch => {
                self.shutdown(presenter);
                return Control::Relaunch;
            }
            TrayAction::Exit => {
                self.shutdown(presenter);
                return Control::Exit;
            }
        }
        Control::Continue
    }

    /// Handle everything queued by background contexts. Stops at the first
    /// request that ends the event loop.
    pub fn process_requests(&mut self, queue: &RequestQueue, presenter: &mut impl Presenter) -> Control {
        for request in queue.drain() {
            let control = match request {
                UiRequest::ShowPopup => {
                    self.show_popup(presenter);
                    Control::Continue
                }
                UiRequest::Tray(action) => self.handle_tray(action, presenter),
            };
            if control != Control::Continue {
                return control;
            }
        }
        Control::Continue
    }

    /// Close the popup and release the hotkey.
    pub fn shutdown(&mut self, presenter: &mut impl Presenter) {
        self.close_popup(presenter);
        self.binding.shutdown();
    }
}

fn log_rebind(outcome: RebindOutcome) {
    match outcome {
        RebindOutcome::Bound(hotkey) => tracing::info!(%hotkey, "popup hotkey active"),
        RebindOutcome::FellBack(hotkey) => {
            tracing::warn!(%hotkey, "requested hotkey unavailable; using default")
        }
        RebindOutcome::Unbound => tracing::error!("no popup hotkey is active"),
    }
}
