use std::rc::Rc;

use leptos::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::*;

use crate::{
    api::ApiClient,
    components::guard::{self, NavigationDecision, RouteGuard},
    pages::{
        dashboard::DashboardPage, login::LoginPage, not_found::NotFoundPage,
        section::SectionPage,
    },
    state::auth::{use_session, SessionProvider},
    utils::storage::{default_credentials, CredentialStore},
};

pub const LOGIN_PATH: &str = "/login";
pub const LANDING_PATH: &str = "/dashboard";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub path: &'static str,
    pub name: &'static str,
    pub title: &'static str,
    pub requires_auth: bool,
    /// Set only on alias entries, which never render.
    pub redirect: Option<&'static str>,
}

impl RouteDescriptor {
    const fn public(path: &'static str, name: &'static str, title: &'static str) -> Self {
        Self {
            path,
            name,
            title,
            requires_auth: false,
            redirect: None,
        }
    }

    const fn protected(path: &'static str, name: &'static str, title: &'static str) -> Self {
        Self {
            path,
            name,
            title,
            requires_auth: true,
            redirect: None,
        }
    }

    const fn alias(path: &'static str, target: &'static str) -> Self {
        Self {
            path,
            name: "",
            title: "",
            requires_auth: false,
            redirect: Some(target),
        }
    }

    /// Segment-wise match; `:param` segments accept any non-empty value.
    pub fn matches(&self, path: &str) -> bool {
        let mut pattern = self.path.split('/').filter(|s| !s.is_empty());
        let mut actual = path.split('/').filter(|s| !s.is_empty());
        loop {
            match (pattern.next(), actual.next()) {
                (None, None) => return true,
                (Some(p), Some(a)) if p.starts_with(':') || p == a => continue,
                _ => return false,
            }
        }
    }
}

pub const ROUTES: &[RouteDescriptor] = &[
    RouteDescriptor::alias("/", LOGIN_PATH),
    RouteDescriptor::public(LOGIN_PATH, "Login", "Sign in"),
    RouteDescriptor::protected(LANDING_PATH, "Dashboard", "Dashboard"),
    RouteDescriptor::protected("/sales", "Sales", "Sales"),
    RouteDescriptor::protected("/press", "Press", "Press"),
    RouteDescriptor::protected("/warehouse", "Warehouse", "Warehouse"),
    RouteDescriptor::protected("/mold", "Mold", "Molds"),
    RouteDescriptor::protected("/schedule", "Schedule", "Production schedule"),
    RouteDescriptor::protected("/trace", "Trace", "Traceability"),
    RouteDescriptor::protected("/outsource", "Outsource", "Outsourcing"),
    RouteDescriptor::protected("/master", "MasterMenu", "Master data"),
    RouteDescriptor::protected("/master/customers", "Customers", "Customers"),
    RouteDescriptor::protected("/master/products", "Products", "Products"),
    RouteDescriptor::protected("/master/products/:id", "ProductDetail", "Product detail"),
    RouteDescriptor::protected("/master/employees", "Employees", "Employees"),
    RouteDescriptor::protected("/master/suppliers", "Suppliers", "Suppliers"),
    RouteDescriptor::protected("/master/process-names", "ProcessNames", "Process names"),
    RouteDescriptor::protected("/master/material-rates", "MaterialRates", "Material rates"),
    RouteDescriptor::protected("/master/machines", "Machines", "Machines"),
    RouteDescriptor::protected("/master/cycletimes", "Cycletimes", "Cycle times"),
    RouteDescriptor::protected("/master/holidays", "Holidays", "Holidays"),
    RouteDescriptor::protected("/master/material-types", "MaterialTypes", "Material types"),
    RouteDescriptor::protected("/master/material-specs", "MaterialSpecs", "Material specs"),
    RouteDescriptor::protected("/master/material-items", "MaterialItems", "Material items"),
    RouteDescriptor::protected("/master/material-lots", "MaterialLots", "Material lots"),
    RouteDescriptor::protected(
        "/master/material-transactions",
        "MaterialTransactions",
        "Material transactions",
    ),
    RouteDescriptor::protected("/master/material-stock", "MaterialStock", "Material stock"),
    RouteDescriptor::protected("/master/material-trace", "MaterialTrace", "Material trace"),
];

/// Strips a trailing slash; the root stays `/`.
pub fn normalize(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

pub fn resolve(path: &str) -> Option<&'static RouteDescriptor> {
    ROUTES.iter().find(|route| route.matches(path))
}

pub fn find_by_pattern(pattern: &str) -> Option<&'static RouteDescriptor> {
    ROUTES.iter().find(|route| route.path == pattern)
}

/// Aliases resolve before the access rule. Unknown paths carry no access
/// requirement.
pub fn decide_navigation(path: &str, credential_present: bool) -> NavigationDecision {
    let route = resolve(path);
    if let Some(target) = route.and_then(|r| r.redirect) {
        return NavigationDecision::Redirect(target);
    }
    let requires_auth = route.map(|r| r.requires_auth).unwrap_or(false);
    guard::evaluate(requires_auth, path, credential_present)
}

pub fn mount_app() {
    mount_to_body(app_root);
}

pub fn app_root() -> impl IntoView {
    app_with_credentials(default_credentials())
}

pub fn app_with_credentials(credentials: Rc<dyn CredentialStore>) -> impl IntoView {
    provide_meta_context();
    provide_context(ApiClient::new());
    view! {
        <SessionProvider credentials=credentials>
            <Router>
                <Routes>
                    <Route path="/" view=|| view! { <GuardedPage path="/"/> }/>
                    <Route path="/login" view=|| view! { <GuardedPage path="/login"/> }/>
                    <Route path="/dashboard" view=|| view! { <GuardedPage path="/dashboard"/> }/>
                    <Route path="/sales" view=|| view! { <GuardedPage path="/sales"/> }/>
                    <Route path="/press" view=|| view! { <GuardedPage path="/press"/> }/>
                    <Route path="/warehouse" view=|| view! { <GuardedPage path="/warehouse"/> }/>
                    <Route path="/mold" view=|| view! { <GuardedPage path="/mold"/> }/>
                    <Route path="/schedule" view=|| view! { <GuardedPage path="/schedule"/> }/>
                    <Route path="/trace" view=|| view! { <GuardedPage path="/trace"/> }/>
                    <Route path="/outsource" view=|| view! { <GuardedPage path="/outsource"/> }/>
                    <Route path="/master" view=|| view! { <GuardedPage path="/master"/> }/>
                    <Route path="/master/customers" view=|| view! { <GuardedPage path="/master/customers"/> }/>
                    <Route path="/master/products" view=|| view! { <GuardedPage path="/master/products"/> }/>
                    <Route path="/master/products/:id" view=|| view! { <GuardedPage path="/master/products/:id"/> }/>
                    <Route path="/master/employees" view=|| view! { <GuardedPage path="/master/employees"/> }/>
                    <Route path="/master/suppliers" view=|| view! { <GuardedPage path="/master/suppliers"/> }/>
                    <Route path="/master/process-names" view=|| view! { <GuardedPage path="/master/process-names"/> }/>
                    <Route path="/master/material-rates" view=|| view! { <GuardedPage path="/master/material-rates"/> }/>
                    <Route path="/master/machines" view=|| view! { <GuardedPage path="/master/machines"/> }/>
                    <Route path="/master/cycletimes" view=|| view! { <GuardedPage path="/master/cycletimes"/> }/>
                    <Route path="/master/holidays" view=|| view! { <GuardedPage path="/master/holidays"/> }/>
                    <Route path="/master/material-types" view=|| view! { <GuardedPage path="/master/material-types"/> }/>
                    <Route path="/master/material-specs" view=|| view! { <GuardedPage path="/master/material-specs"/> }/>
                    <Route path="/master/material-items" view=|| view! { <GuardedPage path="/master/material-items"/> }/>
                    <Route path="/master/material-lots" view=|| view! { <GuardedPage path="/master/material-lots"/> }/>
                    <Route path="/master/material-transactions" view=|| view! { <GuardedPage path="/master/material-transactions"/> }/>
                    <Route path="/master/material-stock" view=|| view! { <GuardedPage path="/master/material-stock"/> }/>
                    <Route path="/master/material-trace" view=|| view! { <GuardedPage path="/master/material-trace"/> }/>
                    <Route path="/*any" view=FallbackPage/>
                </Routes>
            </Router>
        </SessionProvider>
    }
}

#[component]
fn GuardedPage(path: &'static str) -> impl IntoView {
    let Some(route) = find_by_pattern(path) else {
        log::warn!("No route descriptor for {}", path);
        return view! { <NotFoundPage/> }.into_view();
    };
    view! {
        <RouteGuard>
            <Title text=route.title/>
            {page_for(route)}
        </RouteGuard>
    }
    .into_view()
}

/// Catch-all view. A known path written with a trailing slash is sent to its
/// canonical form, or straight to where the access rule points; anything else
/// is a 404.
#[component]
fn FallbackPage() -> impl IntoView {
    let session = use_session();
    let location = use_location();
    move || {
        let path = location.pathname.get();
        let canonical = normalize(&path);
        if canonical == path || resolve(canonical).is_none() {
            return view! { <NotFoundPage/> }.into_view();
        }
        let target = match decide_navigation(canonical, session.has_credential()) {
            NavigationDecision::Redirect(target) => target.to_string(),
            NavigationDecision::Proceed => canonical.to_string(),
        };
        log::debug!("Redirecting {} -> {}", path, target);
        view! { <Redirect path=target/> }.into_view()
    }
}

fn page_for(route: &'static RouteDescriptor) -> View {
    match route.name {
        "" => ().into_view(),
        "Login" => view! { <LoginPage/> }.into_view(),
        "Dashboard" => view! { <DashboardPage/> }.into_view(),
        _ => view! { <SectionPage route=route/> }.into_view(),
    }
}
