//! Main application component with routing and the signed-in session.

use std::sync::Arc;

use api_client::{ApiClient, ApiError, ClientConfig};
use core_types::{Role, User};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::Loading;
use crate::pages::{EmployeeDashboardPage, LoginPage, ManagerDashboardPage};
use crate::storage::LocalStorageStore;

/// Application routes.
#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[not_found]
    #[at("/404")]
    NotFound,
}

/// Shared with every page through a context provider.
#[derive(Clone)]
pub struct Auth {
    pub client: ApiClient,
    pub user: Option<User>,
    pub on_login: Callback<User>,
    pub on_logout: Callback<()>,
}

impl PartialEq for Auth {
    fn eq(&self, other: &Self) -> bool {
        self.user == other.user
            && self.on_login == other.on_login
            && self.on_logout == other.on_logout
    }
}

impl Auth {
    /// Log `err` to the console and turn it into the message to display.
    ///
    /// A 401 has already cleared the stored session, so the UI also drops
    /// back to the login screen.
    pub fn report(&self, action: &str, err: &ApiError, fallback: &str) -> String {
        crate::console_error(&format!("{action} failed: {err}"));
        if err.is_unauthorized() {
            self.on_logout.emit(());
        }
        err.message_or(fallback)
    }
}

/// The Auth context; pages are only mounted below its provider.
#[hook]
pub fn use_auth() -> Option<Auth> {
    use_context::<Auth>()
}

fn api_config() -> ClientConfig {
    option_env!("FEEDBACK_API_URL")
        .map(ClientConfig::new)
        .unwrap_or_default()
}

/// Route switch function.
fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => html! { <Home /> },
        Route::NotFound => html! {
            <div class="card">
                <h1>{"404 - Page Not Found"}</h1>
                <p>{"The page you're looking for doesn't exist."}</p>
            </div>
        },
    }
}

/// Main application component.
#[function_component(App)]
pub fn app() -> Html {
    let client = use_memo((), |_| ApiClient::new(api_config(), Arc::new(LocalStorageStore)));
    let restoring = use_state(|| true);
    let user = use_state(|| None::<User>);

    {
        let client = client.clone();
        let user = user.clone();
        let restoring = restoring.clone();
        use_effect_with((), move |_| {
            user.set(client.stored_user());
            restoring.set(false);
        });
    }

    let on_login = {
        let user = user.clone();
        Callback::from(move |signed_in: User| user.set(Some(signed_in)))
    };

    let on_logout = {
        let client = client.clone();
        let user = user.clone();
        Callback::from(move |_: ()| {
            let client = (*client).clone();
            let user = user.clone();
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(e) = client.sign_out().await {
                    crate::console_error(&format!("Sign out failed: {e}"));
                }
                user.set(None);
            });
        })
    };

    if *restoring {
        return html! { <Loading /> };
    }

    let auth = Auth {
        client: (*client).clone(),
        user: (*user).clone(),
        on_login,
        on_logout,
    };

    html! {
        <ContextProvider<Auth> context={auth}>
            <BrowserRouter>
                <div class="app-container">
                    <Navbar />
                    <main class="main-content">
                        <Switch<Route> render={switch} />
                    </main>
                </div>
            </BrowserRouter>
        </ContextProvider<Auth>>
    }
}

/// Login screen or the dashboard for the signed-in role.
#[function_component(Home)]
fn home() -> Html {
    let Some(auth) = use_auth() else {
        return html! {};
    };

    match auth.user.as_ref().map(|u| u.role) {
        None => html! { <LoginPage {auth} /> },
        Some(Role::Manager) => html! { <ManagerDashboardPage {auth} /> },
        Some(Role::Employee) => html! { <EmployeeDashboardPage {auth} /> },
    }
}

/// Top bar with the signed-in user and a logout button.
#[function_component(Navbar)]
fn navbar() -> Html {
    let Some(auth) = use_auth() else {
        return html! {};
    };
    let Some(user) = auth.user.as_ref() else {
        return html! {};
    };

    let on_logout = {
        let on_logout = auth.on_logout.clone();
        Callback::from(move |_: MouseEvent| on_logout.emit(()))
    };

    html! {
        <nav class="navbar">
            <Link<Route> to={Route::Home} classes="nav-brand">
                {"Feedback System"}
            </Link<Route>>
            <div class="nav-user">
                <span>{ format!("Welcome, {} ({})", user.username, user.role) }</span>
                <button class="btn btn-link danger" onclick={on_logout}>{"Logout"}</button>
            </div>
        </nav>
    }
}
