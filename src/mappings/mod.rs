pub mod key_name_to_virtual_key;
pub mod virtual_key_to_key_name;

pub use key_name_to_virtual_key::KeyNameToVirtualKey;
pub use virtual_key_to_key_name::VirtualKeyToKeyName;
