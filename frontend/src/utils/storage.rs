use std::{cell::RefCell, rc::Rc};

use thiserror::Error;
use web_sys::{Storage, Window};

/// `localStorage` key holding the access token.
pub const TOKEN_KEY: &str = "token";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("No window object")]
    NoWindow,
    #[error("No localStorage")]
    Unavailable,
    #[error("Failed to store `{0}`")]
    WriteRefused(&'static str),
}

pub fn window() -> Result<Window, StorageError> {
    web_sys::window().ok_or(StorageError::NoWindow)
}

pub fn local_storage() -> Result<Storage, StorageError> {
    window()?
        .local_storage()
        .map_err(|_| StorageError::Unavailable)?
        .ok_or(StorageError::Unavailable)
}

/// Durable home of the session credential.
///
/// Every read goes to the backing store; nothing is cached, so a token removed
/// elsewhere (another tab, devtools) is seen on the next call.
pub trait CredentialStore {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str) -> Result<(), StorageError>;
    fn clear(&self);

    /// Presence only. An expired or forged token still counts.
    fn is_present(&self) -> bool {
        self.load().is_some()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LocalStorageCredentials {
    key: &'static str,
}

impl Default for LocalStorageCredentials {
    fn default() -> Self {
        Self { key: TOKEN_KEY }
    }
}

impl CredentialStore for LocalStorageCredentials {
    fn load(&self) -> Option<String> {
        let storage = local_storage().ok()?;
        storage
            .get_item(self.key)
            .ok()
            .flatten()
            .filter(|token| !token.is_empty())
    }

    fn save(&self, token: &str) -> Result<(), StorageError> {
        local_storage()?
            .set_item(self.key, token)
            .map_err(|_| StorageError::WriteRefused(self.key))
    }

    fn clear(&self) {
        match local_storage() {
            Ok(storage) => {
                if storage.remove_item(self.key).is_err() {
                    log::warn!("Failed to remove `{}` from localStorage", self.key);
                }
            }
            Err(err) => log::warn!("Cannot clear credential: {}", err),
        }
    }
}

/// In-process store used by host builds and tests. Clones share one slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryCredentials {
    slot: Rc<RefCell<Option<String>>>,
}

impl MemoryCredentials {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Some(token.into()))),
        }
    }
}

impl CredentialStore for MemoryCredentials {
    fn load(&self) -> Option<String> {
        self.slot
            .borrow()
            .clone()
            .filter(|token| !token.is_empty())
    }

    fn save(&self, token: &str) -> Result<(), StorageError> {
        *self.slot.borrow_mut() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) {
        self.slot.borrow_mut().take();
    }
}

/// Browser `localStorage` on wasm, an empty in-memory slot elsewhere.
pub fn default_credentials() -> Rc<dyn CredentialStore> {
    #[cfg(target_arch = "wasm32")]
    {
        Rc::new(LocalStorageCredentials::default())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        Rc::new(MemoryCredentials::default())
    }
}
