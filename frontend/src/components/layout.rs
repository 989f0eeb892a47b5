use crate::{
    router::LOGIN_PATH,
    state::auth::use_session,
    utils::{date, navigation},
};
use leptos::*;

const NAV_LINKS: &[(&str, &str)] = &[
    ("/dashboard", "Dashboard"),
    ("/sales", "Sales"),
    ("/press", "Press"),
    ("/warehouse", "Warehouse"),
    ("/mold", "Molds"),
    ("/schedule", "Schedule"),
    ("/trace", "Trace"),
    ("/outsource", "Outsource"),
    ("/master", "Master"),
];

#[component]
pub fn Header() -> impl IntoView {
    let session = use_session();
    let current = session.session();
    let display_name = move || {
        current
            .get()
            .user
            .map(|user| user.username)
            .unwrap_or_default()
    };
    let on_logout = move |_| {
        session.logout();
        navigation::hard_navigate(LOGIN_PATH);
    };
    view! {
        <header class="bg-surface-elevated shadow-sm border-b border-border">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex justify-between items-center h-16">
                    <h1 class="text-xl font-semibold text-fg">"Factory Manager"</h1>
                    <nav class="hidden lg:flex space-x-2">
                        {NAV_LINKS
                            .iter()
                            .map(|(href, label)| view! {
                                <a href=*href class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium">
                                    {*label}
                                </a>
                            })
                            .collect_view()}
                    </nav>
                    <div class="flex items-center space-x-3">
                        <span class="text-sm text-fg-muted" data-testid="current-user">{display_name}</span>
                        <span class="text-sm text-fg-muted">{date::today_formatted()}</span>
                        <button
                            on:click=on_logout
                            class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium"
                        >
                            "Sign out"
                        </button>
                    </div>
                </div>
            </div>
        </header>
    }
}

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-surface">
            <Header/>
            <main class="max-w-7xl mx-auto py-6 sm:px-6 lg:px-8">
                {children()}
            </main>
        </div>
    }
}

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="flex justify-center items-center p-8">
            <div class="animate-spin rounded-full h-8 w-8 border-b-2 border-action-primary-bg"></div>
        </div>
    }
}

#[component]
pub fn ErrorMessage(#[prop(into)] message: MaybeSignal<String>) -> impl IntoView {
    view! {
        <div class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded mb-4" role="alert">
            {move || message.get()}
        </div>
    }
}
