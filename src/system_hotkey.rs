use std::collections::HashMap;

use global_hotkey::hotkey::{Code, HotKey, Modifiers};
use global_hotkey::{GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState};

use crate::hotkey::{Hotkey, HotkeyError, HotkeyRegistrar};
use crate::visibility::{RequestSender, UiRequest};

/// [`HotkeyRegistrar`] backed by the OS through `global-hotkey`.
///
/// Must be created on the thread that runs the UI event loop.
pub struct GlobalHotkeyRegistrar {
    manager: GlobalHotKeyManager,
    registered: HashMap<String, HotKey>,
}

impl GlobalHotkeyRegistrar {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            manager: GlobalHotKeyManager::new()?,
            registered: HashMap::new(),
        })
    }
}

impl HotkeyRegistrar for GlobalHotkeyRegistrar {
    fn register(&mut self, hotkey: &Hotkey) -> Result<(), HotkeyError> {
        let native = to_native(hotkey).ok_or_else(|| HotkeyError::Invalid(hotkey.to_string()))?;
        self.manager
            .register(native)
            .map_err(|e| HotkeyError::Rejected {
                hotkey: hotkey.to_string(),
                reason: e.to_string(),
            })?;
        self.registered.insert(hotkey.to_string(), native);
        Ok(())
    }

    fn unregister(&mut self, hotkey: &Hotkey) -> Result<(), HotkeyError> {
        let native = self
            .registered
            .remove(&hotkey.to_string())
            .ok_or_else(|| HotkeyError::NotRegistered(hotkey.to_string()))?;
        self.manager
            .unregister(native)
            .map_err(|e| HotkeyError::Rejected {
                hotkey: hotkey.to_string(),
                reason: e.to_string(),
            })
    }
}

/// Forward hotkey presses to the UI context. Every registered hotkey means
/// "show the popup"; at most one is registered at a time.
pub fn forward_hotkey_events(sender: RequestSender) {
    GlobalHotKeyEvent::set_event_handler(Some(move |event: GlobalHotKeyEvent| {
        if event.state == HotKeyState::Pressed {
            tracing::debug!(id = event.id, "hotkey pressed");
            sender.send(UiRequest::ShowPopup);
        }
    }));
}

fn to_native(hotkey: &Hotkey) -> Option<HotKey> {
    let mut mods = Modifiers::empty();
    if hotkey.ctrl {
        mods |= Modifiers::CONTROL;
    }
    if hotkey.alt {
        mods |= Modifiers::ALT;
    }
    if hotkey.shift {
        mods |= Modifiers::SHIFT;
    }
    if hotkey.win {
        mods |= Modifiers::SUPER;
    }
    Some(HotKey::new(Some(mods), key_code(&hotkey.key)?))
}

fn key_code(key: &str) -> Option<Code> {
    let code = match key {
        "space" => Code::Space,
        "tab" => Code::Tab,
        "enter" => Code::Enter,
        "escape" => Code::Escape,
        "backspace" => Code::Backspace,
        "delete" => Code::Delete,
        "insert" => Code::Insert,
        "home" => Code::Home,
        "end" => Code::End,
        "pageup" => Code::PageUp,
        "pagedown" => Code::PageDown,
        "up" => Code::ArrowUp,
        "down" => Code::ArrowDown,
        "left" => Code::ArrowLeft,
        "right" => Code::ArrowRight,
        _ if key.len() == 1 => return char_code(key.chars().next()?),
        _ => return function_key(key.strip_prefix('f')?.parse().ok()?),
    };
    Some(code)
}

fn char_code(c: char) -> Option<Code> {
    const LETTERS: [Code; 26] = [
        Code::KeyA, Code::KeyB, Code::KeyC, Code::KeyD, Code::KeyE, Code::KeyF, Code::KeyG,
        Code::KeyH, Code::KeyI, Code::KeyJ, Code::KeyK, Code::KeyL, Code::KeyM, Code::KeyN,
        Code::KeyO, Code::KeyP, Code::KeyQ, Code::KeyR, Code::KeyS, Code::KeyT, Code::KeyU,
        Code::KeyV, Code::KeyW, Code::KeyX, Code::KeyY, Code::KeyZ,
    ];
    const DIGITS: [Code; 10] = [
        Code::Digit0, Code::Digit1, Code::Digit2, Code::Digit3, Code::Digit4, Code::Digit5,
        Code::Digit6, Code::Digit7, Code::Digit8, Code::Digit9,
    ];
    match c {
        'a'..='z' => Some(LETTERS[(c as u8 - b'a') as usize]),
        '0'..='9' => Some(DIGITS[(c as u8 - b'0') as usize]),
        _ => None,
    }
}

fn function_key(n: u8) -> Option<Code> {
    const KEYS: [Code; 24] = [
        Code::F1, Code::F2, Code::F3, Code::F4, Code::F5, Code::F6, Code::F7, Code::F8,
        Code::F9, Code::F10, Code::F11, Code::F12, Code::F13, Code::F14, Code::F15, Code::F16,
        Code::F17, Code::F18, Code::F19, Code::F20, Code::F21, Code::F22, Code::F23, Code::F24,
    ];
    KEYS.get(usize::from(n).checked_sub(1)?).copied()
}
