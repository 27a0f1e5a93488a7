use crate::events::KeyCode;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Canonical key names and their Windows virtual-key codes.
/// The first name listed for a code is the one used when printing it.
#[rustfmt::skip]
pub(crate) static VIRTUAL_KEYS: &[(&str, u32)] = &[
    // Letters
    ("a", 0x41), ("b", 0x42), ("c", 0x43), ("d", 0x44), ("e", 0x45),
    ("f", 0x46), ("g", 0x47), ("h", 0x48), ("i", 0x49), ("j", 0x4A),
    ("k", 0x4B), ("l", 0x4C), ("m", 0x4D), ("n", 0x4E), ("o", 0x4F),
    ("p", 0x50), ("q", 0x51), ("r", 0x52), ("s", 0x53), ("t", 0x54),
    ("u", 0x55), ("v", 0x56), ("w", 0x57), ("x", 0x58), ("y", 0x59),
    ("z", 0x5A),

    // Top-row digits
    ("0", 0x30), ("1", 0x31), ("2", 0x32), ("3", 0x33), ("4", 0x34),
    ("5", 0x35), ("6", 0x36), ("7", 0x37), ("8", 0x38), ("9", 0x39),

    // Function keys
    ("f1", 0x70), ("f2", 0x71), ("f3", 0x72), ("f4", 0x73), ("f5", 0x74),
    ("f6", 0x75), ("f7", 0x76), ("f8", 0x77), ("f9", 0x78), ("f10", 0x79),
    ("f11", 0x7A), ("f12", 0x7B), ("f13", 0x7C), ("f14", 0x7D), ("f15", 0x7E),
    ("f16", 0x7F), ("f17", 0x80), ("f18", 0x81), ("f19", 0x82), ("f20", 0x83),
    ("f21", 0x84), ("f22", 0x85), ("f23", 0x86), ("f24", 0x87),

    // Arrows and navigation
    ("left", 0x25), ("up", 0x26), ("right", 0x27), ("down", 0x28),
    ("home", 0x24), ("end", 0x23), ("pageup", 0x21), ("pagedown", 0x22),
    ("insert", 0x2D), ("delete", 0x2E),

    // Whitespace and editing
    ("space", 0x20), ("enter", 0x0D), ("tab", 0x09), ("escape", 0x1B),
    ("backspace", 0x08),

    // Numpad
    ("numpad0", 0x60), ("numpad1", 0x61), ("numpad2", 0x62), ("numpad3", 0x63),
    ("numpad4", 0x64), ("numpad5", 0x65), ("numpad6", 0x66), ("numpad7", 0x67),
    ("numpad8", 0x68), ("numpad9", 0x69), ("multiply", 0x6A), ("add", 0x6B),
    ("subtract", 0x6D), ("decimal", 0x6E), ("divide", 0x6F),

    // Punctuation (US layout)
    ("semicolon", 0xBA), ("equal", 0xBB), ("comma", 0xBC), ("minus", 0xBD),
    ("period", 0xBE), ("slash", 0xBF), ("grave", 0xC0), ("leftbrace", 0xDB),
    ("backslash", 0xDC), ("rightbrace", 0xDD), ("apostrophe", 0xDE),

    // Modifiers
    ("shift", 0x10), ("ctrl", 0x11), ("alt", 0x12),
    ("lshift", 0xA0), ("rshift", 0xA1), ("lctrl", 0xA2), ("rctrl", 0xA3),
    ("lalt", 0xA4), ("ralt", 0xA5), ("lwin", 0x5B), ("rwin", 0x5C),
];

/// Alternative spellings, mostly the Win32 `VK_*` constant names
static ALIASES: &[(&str, &str)] = &[
    ("return", "enter"),
    ("esc", "escape"),
    ("prior", "pageup"),
    ("next", "pagedown"),
    ("ins", "insert"),
    ("del", "delete"),
    ("back", "backspace"),
    ("control", "ctrl"),
    ("menu", "alt"),
    ("lcontrol", "lctrl"),
    ("rcontrol", "rctrl"),
    ("lmenu", "lalt"),
    ("rmenu", "ralt"),
    ("oem_1", "semicolon"),
    ("oem_plus", "equal"),
    ("oem_comma", "comma"),
    ("oem_minus", "minus"),
    ("oem_period", "period"),
    ("oem_2", "slash"),
    ("oem_3", "grave"),
    ("oem_4", "leftbrace"),
    ("oem_5", "backslash"),
    ("oem_6", "rightbrace"),
    ("oem_7", "apostrophe"),
];

static NAME_TO_CODE: Lazy<HashMap<&'static str, u32>> = Lazy::new(|| {
    let mut map: HashMap<&'static str, u32> = VIRTUAL_KEYS.iter().copied().collect();
    for &(alias, canonical) in ALIASES {
        if let Some(&code) = map.get(canonical) {
            map.insert(alias, code);
        }
    }
    map
});

/// Translates configuration key names into virtual-key codes
pub struct KeyNameToVirtualKey;

impl KeyNameToVirtualKey {
    /// Accepts `right`, `Right` and `VK_RIGHT` alike
    pub fn translate(key_name: &str) -> Result<KeyCode, String> {
        let normalized = key_name.trim().to_lowercase();
        let stripped = normalized.strip_prefix("vk_").unwrap_or(&normalized);

        NAME_TO_CODE
            .get(stripped)
            .map(|&code| KeyCode(code))
            .ok_or_else(|| format!("Unknown key: {}", key_name))
    }
}
