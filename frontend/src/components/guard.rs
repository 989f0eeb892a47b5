use crate::{
    router::{self, LANDING_PATH, LOGIN_PATH},
    state::auth::use_session,
};
use leptos::*;
use leptos_router::{use_location, Redirect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDecision {
    Proceed,
    Redirect(&'static str),
}

/// Access rule applied to every navigation; the first matching branch wins.
///
/// Only credential presence is checked. A stale or forged token passes here
/// and is rejected by the API on the next request.
pub fn evaluate(requires_auth: bool, target_path: &str, credential_present: bool) -> NavigationDecision {
    if requires_auth && !credential_present {
        NavigationDecision::Redirect(LOGIN_PATH)
    } else if router::normalize(target_path) == LOGIN_PATH && credential_present {
        NavigationDecision::Redirect(LANDING_PATH)
    } else {
        NavigationDecision::Proceed
    }
}

/// Re-runs the access rule whenever the location changes, reading the
/// credential fresh each time.
#[component]
pub fn RouteGuard(children: ChildrenFn) -> impl IntoView {
    let session = use_session();
    let location = use_location();
    move || {
        let path = location.pathname.get();
        match router::decide_navigation(&path, session.has_credential()) {
            NavigationDecision::Proceed => children().into_view(),
            NavigationDecision::Redirect(target) => {
                log::debug!("Redirecting {} -> {}", path, target);
                view! { <Redirect path=target/> }.into_view()
            }
        }
    }
}
