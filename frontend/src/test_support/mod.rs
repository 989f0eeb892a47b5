#[cfg(not(target_arch = "wasm32"))]
pub mod ssr;

pub mod helpers {
    use crate::api::UserProfile;
    use crate::state::auth::SessionStore;
    use crate::utils::storage::MemoryCredentials;
    use leptos::*;
    use std::rc::Rc;

    pub fn profile(username: &str) -> UserProfile {
        UserProfile {
            username: username.into(),
            employee_id: Some(1),
            extra: Default::default(),
        }
    }

    /// Provides a session backed by `credentials` to the current reactive owner.
    pub fn provide_session(credentials: &MemoryCredentials) -> SessionStore {
        let store = SessionStore::new(
            crate::api::ApiClient::new_with_base_url("http://127.0.0.1:1/api"),
            Rc::new(credentials.clone()),
        );
        provide_context(store.clone());
        store
    }
}
