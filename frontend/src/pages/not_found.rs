use leptos::*;

use crate::router::LANDING_PATH;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div id="not-found" class="min-h-screen flex flex-col items-center justify-center bg-surface">
            <h1 class="text-4xl font-extrabold text-fg">"404"</h1>
            <p class="mt-2 text-fg-muted">"This page does not exist."</p>
            <a href=LANDING_PATH class="mt-4 text-action-primary-bg underline">"Back to dashboard"</a>
        </div>
    }
}
