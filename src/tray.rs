//! Tray menu actions, plus the `tray-icon` integration behind the `desktop`
//! feature.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrayAction {
    Launch,
    OpenConfig,
    Settings,
    Relaunch,
    Exit,
}

impl TrayAction {
    /// Menu order.
    pub const ALL: [TrayAction; 5] = [
        TrayAction::Launch,
        TrayAction::OpenConfig,
        TrayAction::Settings,
        TrayAction::Relaunch,
        TrayAction::Exit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TrayAction::Launch => "Launch",
            TrayAction::OpenConfig => "Open Config",
            TrayAction::Settings => "Settings",
            TrayAction::Relaunch => "Relaunch",
            TrayAction::Exit => "Exit",
        }
    }
}

#[cfg(feature = "desktop")]
pub use native::spawn_tray;

#[cfg(feature = "desktop")]
mod native {
    use std::collections::HashMap;

    use tray_icon::menu::{Menu, MenuEvent, MenuId, MenuItem};
    use tray_icon::{Icon, TrayIcon, TrayIconBuilder};

    use super::TrayAction;
    use crate::visibility::{RequestSender, UiRequest};

    fn build_tray(sender: RequestSender) -> anyhow::Result<TrayIcon> {
        let menu = Menu::new();
        let mut ids: HashMap<MenuId, TrayAction> = HashMap::new();
        for action in TrayAction::ALL {
            let item = MenuItem::new(action.label(), true, None);
            menu.append(&item)?;
            ids.insert(item.id().clone(), action);
        }

        MenuEvent::set_event_handler(Some(move |event: MenuEvent| {
            if let Some(action) = ids.get(&event.id) {
                tracing::debug!(?action, "tray menu clicked");
                sender.send(UiRequest::Tray(*action));
            }
        }));

        let tray = TrayIconBuilder::new()
            .with_tooltip(crate::APP_NAME)
            .with_icon(build_icon()?)
            .with_menu(Box::new(menu))
            .build()?;
        Ok(tray)
    }

    /// Create the tray icon. On Linux it needs its own GTK loop, so it lives
    /// on a dedicated thread for the rest of the process; elsewhere the UI
    /// event loop drives it and the returned handle must be kept alive.
    #[cfg(target_os = "linux")]
    pub fn spawn_tray(sender: RequestSender) -> Option<TrayIcon> {
        std::thread::spawn(move || {
            if let Err(e) = gtk::init() {
                tracing::error!("failed to initialise GTK for the tray icon: {e}");
                return;
            }
            match build_tray(sender) {
                Ok(_tray) => gtk::main(),
                Err(e) => tracing::error!("failed to create tray icon: {e}"),
            }
        });
        None
    }

    #[cfg(not(target_os = "linux"))]
    pub fn spawn_tray(sender: RequestSender) -> Option<TrayIcon> {
        match build_tray(sender) {
            Ok(tray) => Some(tray),
            Err(e) => {
                tracing::error!("failed to create tray icon: {e}");
                None
            }
        }
    }

    fn build_icon() -> anyhow::Result<Icon> {
        let size = 32u32;
        let mut rgba = Vec::with_capacity((size * size * 4) as usize);
        for y in 0..size {
            for x in 0..size {
                let edge = x < 2 || y < 2 || x >= size - 2 || y >= size - 2;
                // A "T" glyph on a dark tile.
                let bar = (6..10).contains(&y) && (6..size - 6).contains(&x);
                let stem = (size / 2 - 2..size / 2 + 2).contains(&x) && (10..size - 6).contains(&y);
                let (r, g, b) = if edge {
                    (26, 35, 46)
                } else if bar || stem {
                    (125, 207, 255)
                } else {
                    (15, 19, 24)
                };
                rgba.extend_from_slice(&[r, g, b, 255]);
            }
        }
        Ok(Icon::from_rgba(rgba, size, size)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_order_and_labels() {
        let labels: Vec<_> = TrayAction::ALL.iter().map(|a| a.label()).collect();
        assert_eq!(
            labels,
            ["Launch", "Open Config", "Settings", "Relaunch", "Exit"]
        );
    }
}
