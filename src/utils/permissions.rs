use crate::error::{Result, TelewindowError};
use tracing::{info, warn};

/// Low-level hooks do not see input aimed at elevated windows, so a
/// non-elevated daemon cannot move them.
pub fn check_privileges(allow_non_admin: bool) -> Result<()> {
    info!("Checking process privileges...");

    if is_elevated() {
        info!("Privileges sufficient");
        return Ok(());
    }

    warn!("⚠️  Not running as administrator: hotkeys will not reach elevated windows");
    if allow_non_admin {
        return Ok(());
    }

    Err(TelewindowError::Permission(
        "administrator rights are required; set privileges.allow_non_admin = true to run anyway".to_string(),
    ))
}

#[cfg(windows)]
fn is_elevated() -> bool {
    unsafe { windows::Win32::UI::Shell::IsUserAnAdmin() }.as_bool()
}

/// Elevation only matters to the Windows hook
#[cfg(not(windows))]
fn is_elevated() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_admin_allowed() {
        assert!(check_privileges(true).is_ok());
    }

    #[cfg(not(windows))]
    #[test]
    fn test_other_platforms_always_pass() {
        assert!(check_privileges(false).is_ok());
    }
}
