use leptos::*;

use crate::{
    components::layout::{Layout, LoadingSpinner},
    router::{LANDING_PATH, ROUTES},
    state::auth::use_session,
};

#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = use_session().session();
    let greeting = move || session.get().user.map(|user| user.username);

    let shortcuts = ROUTES
        .iter()
        .filter(|route| route.requires_auth && route.path != LANDING_PATH && !route.path.contains(':'))
        .map(|route| {
            view! {
                <li>
                    <a href=route.path class="block p-4 rounded-md bg-surface-elevated hover:bg-action-ghost-bg-hover">
                        {route.title}
                    </a>
                </li>
            }
        })
        .collect_view();

    view! {
        <Layout>
            <div class="space-y-6">
                <div>
                    <h1 class="text-2xl font-bold text-fg">"Dashboard"</h1>
                    {move || match greeting() {
                        Some(name) => view! { <p class="mt-1 text-sm text-fg-muted">"Signed in as " {name}</p> }.into_view(),
                        None => view! { <LoadingSpinner/> }.into_view(),
                    }}
                </div>
                <ul id="dashboard-shortcuts" class="grid grid-cols-2 gap-4 lg:grid-cols-4">
                    {shortcuts}
                </ul>
            </div>
        </Layout>
    }
}
