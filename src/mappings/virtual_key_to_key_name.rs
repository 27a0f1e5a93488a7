use super::key_name_to_virtual_key::VIRTUAL_KEYS;
use crate::events::KeyCode;
use once_cell::sync::Lazy;
use std::collections::HashMap;

static CODE_TO_KEY_NAME: Lazy<HashMap<u32, &'static str>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for &(name, code) in VIRTUAL_KEYS {
        map.entry(code).or_insert(name);
    }
    map
});

/// Translates virtual-key codes back into configuration key names
pub struct VirtualKeyToKeyName;

impl VirtualKeyToKeyName {
    pub fn translate(key: KeyCode) -> Option<&'static str> {
        CODE_TO_KEY_NAME.get(&key.value()).copied()
    }
}
