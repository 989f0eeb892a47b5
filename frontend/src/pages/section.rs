use leptos::*;
use leptos_router::use_params_map;

use crate::{components::layout::Layout, router::RouteDescriptor};

/// Shell for business screens whose content is served by the API.
#[component]
pub fn SectionPage(route: &'static RouteDescriptor) -> impl IntoView {
    let params = use_params_map();
    let record_id = move || params.with(|p| p.get("id").cloned());
    let section_id = format!("section-{}", route.name.to_lowercase());
    view! {
        <Layout>
            <section id=section_id class="space-y-4">
                <h1 class="text-2xl font-bold text-fg">{route.title}</h1>
                {move || record_id().map(|id| view! { <p class="text-sm text-fg-muted">"#" {id}</p> })}
            </section>
        </Layout>
    }
}
