use crate::{
    api::LoginRequest,
    components::layout::ErrorMessage,
    pages::login::utils,
    router::LANDING_PATH,
    state::auth,
    utils::navigation,
};
use leptos::{ev::SubmitEvent, *};

const LOGIN_FAILED: &str = "Sign-in failed. Check your employee number and password.";

#[component]
pub fn LoginPanel() -> impl IntoView {
    let (username, set_username) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<String>);

    let login_action = auth::use_login_action();
    let pending = login_action.pending();

    create_effect(move |_| {
        if let Some(result) = login_action.value().get() {
            match result {
                Ok(()) => {
                    set_error.set(None);
                    set_password.set(String::new());
                    navigation::hard_navigate(LANDING_PATH);
                }
                // transport and credential failures read the same to the user
                Err(_) => set_error.set(Some(LOGIN_FAILED.to_string())),
            }
        }
    });

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        let uname = username.get_untracked();
        let pword = password.get_untracked();
        if let Err(msg) = utils::validate_credentials(&uname, &pword) {
            set_error.set(Some(msg));
            return;
        }
        set_error.set(None);
        login_action.dispatch(LoginRequest {
            username: uname.trim().to_string(),
            password: pword,
        });
    };

    view! {
        <div class="min-h-screen flex items-center justify-center bg-surface py-12 px-4">
            <div class="max-w-md w-full space-y-8">
                <h2 class="text-center text-3xl font-extrabold text-fg">"Factory Manager"</h2>
                <form id="login-form" class="mt-8 space-y-6" on:submit=on_submit>
                    <Show when=move || error.get().is_some()>
                        <ErrorMessage message=Signal::derive(move || error.get().unwrap_or_default())/>
                    </Show>
                    <div>
                        <label for="username" class="sr-only">"Employee number"</label>
                        <input
                            id="username"
                            name="username"
                            type="text"
                            autocomplete="username"
                            placeholder="Employee number"
                            class="w-full px-3 py-2 border border-border rounded-md"
                            prop:value=move || username.get()
                            on:input=move |ev| set_username.set(event_target_value(&ev))
                        />
                    </div>
                    <div>
                        <label for="password" class="sr-only">"Password"</label>
                        <input
                            id="password"
                            name="password"
                            type="password"
                            autocomplete="current-password"
                            placeholder="Password"
                            class="w-full px-3 py-2 border border-border rounded-md"
                            prop:value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                        />
                    </div>
                    <button
                        type="submit"
                        class="w-full py-2 px-4 rounded-md text-action-primary-text bg-action-primary-bg disabled:opacity-50"
                        disabled=move || pending.get()
                    >
                        {move || if pending.get() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
            </div>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::{helpers::provide_session, ssr::render_to_string};
    use crate::utils::storage::MemoryCredentials;

    #[test]
    fn login_panel_renders_form_fields() {
        let html = render_to_string(|| {
            provide_session(&MemoryCredentials::default());
            view! { <LoginPanel/> }
        });
        assert!(html.contains("login-form"));
        assert!(html.contains("name=\"username\""));
        assert!(html.contains("type=\"password\""));
        assert!(!html.contains("role=\"alert\""));
    }
}
