use super::storage;

/// Full-page navigation; the app boots again and restores the session from storage.
pub fn hard_navigate(path: &str) {
    match storage::window() {
        Ok(win) => {
            if win.location().set_href(path).is_err() {
                log::error!("Failed to navigate to {}", path);
            }
        }
        Err(err) => log::warn!("Cannot navigate to {}: {}", path, err),
    }
}
