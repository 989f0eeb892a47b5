use std::rc::Rc;

use leptos::*;
use thiserror::Error;

use crate::{
    api::{ApiClient, ApiError, LoginRequest, UserProfile},
    utils::storage::{default_credentials, CredentialStore, StorageError},
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<UserProfile>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Owns the authentication lifecycle.
///
/// Created once by [`SessionProvider`] and handed out through context. The
/// in-memory token mirrors the persisted credential; the persisted one is the
/// source of truth for the route guard.
#[derive(Clone)]
pub struct SessionStore {
    state: RwSignal<Session>,
    api: Rc<ApiClient>,
    credentials: Rc<dyn CredentialStore>,
}

impl SessionStore {
    pub fn new(api: ApiClient, credentials: Rc<dyn CredentialStore>) -> Self {
        let api = Rc::new(api.with_credentials(Rc::clone(&credentials)));
        let state = create_rw_signal(Session {
            token: credentials.load(),
            user: None,
        });
        Self {
            state,
            api,
            credentials,
        }
    }

    pub fn session(&self) -> Signal<Session> {
        self.state.into()
    }

    pub fn snapshot(&self) -> Session {
        self.state.get_untracked()
    }

    /// Fresh read of the persisted credential on every call.
    pub fn has_credential(&self) -> bool {
        self.credentials.is_present()
    }

    /// On failure the previous token and profile are left untouched.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), SessionError> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let token = match self.api.login(&request).await {
            Ok(response) => response.access_token,
            Err(err) => {
                log::error!("Login error: {}", err);
                return Err(err.into());
            }
        };
        if let Err(err) = self.credentials.save(&token) {
            log::error!("Login error: {}", err);
            return Err(err.into());
        }
        self.state.update(|state| state.token = Some(token));

        // A missing profile does not undo the sign-in; fetch_user logs it.
        let _ = self.fetch_user().await;
        Ok(())
    }

    pub async fn fetch_user(&self) -> Result<UserProfile, SessionError> {
        match self.api.get_me().await {
            Ok(user) => {
                self.state.update(|state| state.user = Some(user.clone()));
                Ok(user)
            }
            Err(err) => {
                log::error!("Fetch user error: {}", err);
                Err(err.into())
            }
        }
    }

    #[cfg(test)]
    pub fn overwrite_user_for_test(&self, user: Option<UserProfile>) {
        self.state.update(|state| state.user = user);
    }

    pub fn logout(&self) {
        self.state.update(|state| {
            state.token = None;
            state.user = None;
        });
        self.credentials.clear();
    }
}

#[component]
pub fn SessionProvider(
    #[prop(optional)] credentials: Option<Rc<dyn CredentialStore>>,
    children: Children,
) -> impl IntoView {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let store = SessionStore::new(api, credentials.unwrap_or_else(default_credentials));
    provide_context(store.clone());

    // Effects only run in the browser; a reload with a stored token refetches the profile.
    create_effect(move |_| {
        if store.snapshot().token.is_none() {
            return;
        }
        let store = store.clone();
        spawn_local(async move {
            let _ = store.fetch_user().await;
        });
    });

    children()
}

pub fn use_session() -> SessionStore {
    use_context::<SessionStore>()
        .unwrap_or_else(|| SessionStore::new(ApiClient::new(), default_credentials()))
}

pub fn use_login_action() -> Action<LoginRequest, Result<(), SessionError>> {
    let store = use_session();
    create_action(move |request: &LoginRequest| {
        let store = store.clone();
        let request = request.clone();
        async move { store.login(&request.username, &request.password).await }
    })
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::utils::storage::MemoryCredentials;
    use httpmock::prelude::*;
    use serde_json::json;

    fn store_for(server: &MockServer, credentials: &MemoryCredentials) -> SessionStore {
        SessionStore::new(
            ApiClient::new_with_base_url(server.url("/api")),
            Rc::new(credentials.clone()),
        )
    }

    #[tokio::test]
    async fn login_persists_token_and_loads_profile() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/auth/login");
            then.status(200)
                .json_body(json!({ "access_token": "jwt-new", "token_type": "bearer" }));
        });
        let me = server.mock(|when, then| {
            when.method(GET)
                .path("/api/auth/me")
                .header("authorization", "Bearer jwt-new");
            then.status(200)
                .json_body(json!({ "username": "E001", "employee_id": 3 }));
        });

        let runtime = create_runtime();
        let credentials = MemoryCredentials::default();
        let store = store_for(&server, &credentials);

        store.login("E001", "secret").await.unwrap();

        me.assert();
        let snapshot = store.snapshot();
        assert_eq!(snapshot.token.as_deref(), Some("jwt-new"));
        assert_eq!(snapshot.user.map(|u| u.username).as_deref(), Some("E001"));
        assert_eq!(credentials.load().as_deref(), Some("jwt-new"));
        runtime.dispose();
    }

    #[tokio::test]
    async fn login_succeeds_even_when_profile_fetch_fails() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/auth/login");
            then.status(200).json_body(json!({ "access_token": "jwt-new" }));
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/auth/me");
            then.status(500).json_body(json!({ "detail": "boom" }));
        });

        let runtime = create_runtime();
        let credentials = MemoryCredentials::default();
        let store = store_for(&server, &credentials);

        assert!(store.login("E001", "secret").await.is_ok());
        let snapshot = store.snapshot();
        assert!(snapshot.is_authenticated());
        assert!(snapshot.user.is_none());
        runtime.dispose();
    }

    #[tokio::test]
    async fn rejected_login_leaves_previous_session_untouched() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/auth/login");
            then.status(401)
                .json_body(json!({ "detail": "Incorrect username or password" }));
        });

        let runtime = create_runtime();
        let credentials = MemoryCredentials::with_token("old-token");
        let store = store_for(&server, &credentials);
        let before = store.snapshot();

        let err = store.login("E001", "wrong").await.unwrap_err();

        assert!(matches!(err, SessionError::Api(ref e) if e.is_unauthorized()));
        assert_eq!(store.snapshot(), before);
        assert_eq!(credentials.load().as_deref(), Some("old-token"));
        runtime.dispose();
    }

    #[tokio::test]
    async fn network_failure_reports_error_and_keeps_state() {
        let runtime = create_runtime();
        let credentials = MemoryCredentials::default();
        let store = SessionStore::new(
            ApiClient::new_with_base_url("http://127.0.0.1:1/api"),
            Rc::new(credentials.clone()),
        );

        let result = store.login("E001", "secret").await;

        assert!(matches!(result, Err(SessionError::Api(ApiError::Transport(_)))));
        assert_eq!(store.snapshot(), Session::default());
        assert!(!credentials.is_present());
        runtime.dispose();
    }

    #[tokio::test]
    async fn failed_profile_fetch_keeps_previous_profile() {
        let server = MockServer::start_async().await;
        let mut ok = server.mock(|when, then| {
            when.method(GET).path("/api/auth/me");
            then.status(200).json_body(json!({ "username": "E001" }));
        });

        let runtime = create_runtime();
        let credentials = MemoryCredentials::with_token("jwt");
        let store = store_for(&server, &credentials);
        store.fetch_user().await.unwrap();

        ok.delete();
        server.mock(|when, then| {
            when.method(GET).path("/api/auth/me");
            then.status(401)
                .json_body(json!({ "detail": "Could not validate credentials" }));
        });

        assert!(store.fetch_user().await.is_err());
        let snapshot = store.snapshot();
        assert_eq!(snapshot.user.map(|u| u.username).as_deref(), Some("E001"));
        assert_eq!(snapshot.token.as_deref(), Some("jwt"));
        runtime.dispose();
    }

    #[tokio::test]
    async fn logout_after_login_clears_everything_without_network() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/api/auth/login");
            then.status(200).json_body(json!({ "access_token": "jwt-new" }));
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/auth/me");
            then.status(200).json_body(json!({ "username": "E001" }));
        });

        let runtime = create_runtime();
        let credentials = MemoryCredentials::default();
        let store = store_for(&server, &credentials);
        store.login("E001", "secret").await.unwrap();

        store.logout();

        assert_eq!(store.snapshot(), Session::default());
        assert!(!store.has_credential());
        runtime.dispose();
    }
}
