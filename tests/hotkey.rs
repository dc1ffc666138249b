use std::collections::HashSet;

use tool_launcher::hotkey::{
    normalize_hotkey, Hotkey, HotkeyBinding, HotkeyError, HotkeyRegistrar, RebindOutcome,
};

#[derive(Default)]
struct MockRegistrar {
    registered: HashSet<String>,
    reject: HashSet<String>,
    register_calls: usize,
    unregister_calls: usize,
    fail_unregister: bool,
}

impl MockRegistrar {
    fn rejecting(keys: &[&str]) -> Self {
        Self {
            reject: keys.iter().map(|k| k.to_string()).collect(),
            ..Default::default()
        }
    }
}

impl HotkeyRegistrar for MockRegistrar {
    fn register(&mut self, hotkey: &Hotkey) -> Result<(), HotkeyError> {
        self.register_calls += 1;
        let name = hotkey.to_string();
        if self.reject.contains(&name) {
            return Err(HotkeyError::Rejected {
                hotkey: name,
                reason: "already taken".into(),
            });
        }
        self.registered.insert(name);
        Ok(())
    }

    fn unregister(&mut self, hotkey: &Hotkey) -> Result<(), HotkeyError> {
        self.unregister_calls += 1;
        let name = hotkey.to_string();
        if self.fail_unregister || !self.registered.remove(&name) {
            return Err(HotkeyError::NotRegistered(name));
        }
        Ok(())
    }
}

#[test]
fn binds_requested_hotkey() {
    let mut binding = HotkeyBinding::with_default(MockRegistrar::default(), "ctrl+alt+f");
    assert!(!binding.is_bound());
    assert_eq!(binding.rebind("Ctrl+Shift+T"), RebindOutcome::Bound("ctrl+shift+t".into()));
    assert_eq!(binding.active().as_deref(), Some("ctrl+shift+t"));
    assert!(binding.registrar().registered.contains("ctrl+shift+t"));
}

#[test]
fn rebinding_same_value_makes_no_calls() {
    let mut binding = HotkeyBinding::with_default(MockRegistrar::default(), "ctrl+alt+f");
    binding.rebind("ctrl+alt+g");
    binding.rebind("Alt+Ctrl+G");
    assert_eq!(binding.registrar().register_calls, 1);
    assert_eq!(binding.registrar().unregister_calls, 0);
}

#[test]
fn zero_padded_function_key_is_the_same_binding() {
    let mut binding = HotkeyBinding::with_default(MockRegistrar::default(), "ctrl+alt+f");
    assert_eq!(binding.rebind("ctrl+F01"), RebindOutcome::Bound("ctrl+f1".into()));
    binding.rebind("ctrl+f1");
    assert_eq!(binding.registrar().register_calls, 1);
    assert_eq!(binding.registrar().unregister_calls, 0);
}

#[test]
fn rebinding_releases_previous_hotkey() {
    let mut binding = HotkeyBinding::with_default(MockRegistrar::default(), "ctrl+alt+f");
    binding.rebind("ctrl+alt+g");
    binding.rebind("ctrl+alt+h");
    let registrar = binding.registrar();
    assert_eq!(registrar.unregister_calls, 1);
    assert_eq!(
        registrar.registered,
        HashSet::from(["ctrl+alt+h".to_string()])
    );
}

#[test]
fn rejected_hotkey_falls_back_to_default() {
    let registrar = MockRegistrar::rejecting(&["ctrl+alt+g"]);
    let mut binding = HotkeyBinding::with_default(registrar, "ctrl+alt+f");
    assert_eq!(binding.rebind("ctrl+alt+g"), RebindOutcome::FellBack("ctrl+alt+f".into()));
    assert_eq!(binding.active().as_deref(), Some("ctrl+alt+f"));
}

#[test]
fn invalid_hotkey_falls_back_to_default() {
    let mut binding = HotkeyBinding::with_default(MockRegistrar::default(), "ctrl+alt+f");
    assert_eq!(binding.rebind("ctrl+banana"), RebindOutcome::FellBack("ctrl+alt+f".into()));
    assert_eq!(binding.registrar().register_calls, 1);
}

#[test]
fn failing_default_leaves_nothing_bound() {
    let registrar = MockRegistrar::rejecting(&["ctrl+alt+g", "ctrl+alt+f"]);
    let mut binding = HotkeyBinding::with_default(registrar, "ctrl+alt+f");
    assert_eq!(binding.rebind("ctrl+alt+g"), RebindOutcome::Unbound);
    assert!(!binding.is_bound());
    assert_eq!(binding.current(), "ctrl+alt+g");
    assert_eq!(binding.registrar().register_calls, 2);
}

#[test]
fn default_is_only_tried_once() {
    let registrar = MockRegistrar::rejecting(&["ctrl+alt+f"]);
    let mut binding = HotkeyBinding::with_default(registrar, "ctrl+alt+f");
    assert_eq!(binding.rebind("ctrl+alt+f"), RebindOutcome::Unbound);
    assert_eq!(binding.registrar().register_calls, 1);
}

#[test]
fn unregister_failure_does_not_block_rebind() {
    let registrar = MockRegistrar {
        fail_unregister: true,
        ..Default::default()
    };
    let mut binding = HotkeyBinding::with_default(registrar, "ctrl+alt+f");
    binding.rebind("ctrl+alt+g");
    assert_eq!(binding.rebind("ctrl+alt+h"), RebindOutcome::Bound("ctrl+alt+h".into()));
}

#[test]
fn shutdown_unregisters_active_hotkey() {
    let mut binding = HotkeyBinding::with_default(MockRegistrar::default(), "ctrl+alt+f");
    binding.rebind("ctrl+alt+g");
    binding.shutdown();
    assert!(!binding.is_bound());
    assert!(binding.registrar().registered.is_empty());

    binding.shutdown();
    assert_eq!(binding.registrar().unregister_calls, 1);
}

#[test]
fn missing_service_is_unbound() {
    let mut binding = HotkeyBinding::with_default(None::<MockRegistrar>, "ctrl+alt+f");
    assert_eq!(binding.rebind("ctrl+alt+g"), RebindOutcome::Unbound);
}

#[test]
fn normalizes_aliases() {
    assert_eq!(normalize_hotkey("Control+Option+Return").as_deref(), Some("ctrl+alt+enter"));
    assert_eq!(normalize_hotkey("win+F12").as_deref(), Some("super+f12"));
    assert_eq!(normalize_hotkey("ctrl+alt"), None);
}
