//! Sign-in page.

use yew::prelude::*;

use crate::pages::PageProps;

const DEMO_ACCOUNTS: [(&str, &str); 4] = [
    ("Manager", "john_manager"),
    ("Manager", "sarah_manager"),
    ("Employee", "alice_employee"),
    ("Employee", "bob_employee"),
];

#[function_component(LoginPage)]
pub fn login_page(props: &PageProps) -> Html {
    let username = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| None::<String>);
    let signing_in = use_state(|| false);

    let on_username = {
        let username = username.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            username.set(input.value());
        })
    };
    let on_password = {
        let password = password.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            password.set(input.value());
        })
    };

    let onsubmit = {
        let auth = props.auth.clone();
        let username = username.clone();
        let password = password.clone();
        let error = error.clone();
        let signing_in = signing_in.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let auth = auth.clone();
            let username = (*username).clone();
            let password = (*password).clone();
            let error = error.clone();
            let signing_in = signing_in.clone();

            signing_in.set(true);
            error.set(None);
            wasm_bindgen_futures::spawn_local(async move {
                match auth.client.sign_in(&username, &password).await {
                    Ok(user) => auth.on_login.emit(user),
                    Err(e) => {
                        let message = auth.report("Login", &e, "Login failed. Please try again.");
                        error.set(Some(message));
                    }
                }
                signing_in.set(false);
            });
        })
    };

    let busy = *signing_in;

    html! {
        <div class="login-page">
            <form class="card login-card" {onsubmit}>
                <h1 class="card-title">{"Feedback System"}</h1>
                <p class="muted">{"Sign in to your account to continue"}</p>

                <label for="username">{"Username"}</label>
                <input
                    id="username"
                    class="input"
                    type="text"
                    required=true
                    placeholder="Enter your username"
                    value={(*username).clone()}
                    oninput={on_username}
                    disabled={busy}
                />

                <label for="password">{"Password"}</label>
                <input
                    id="password"
                    class="input"
                    type="password"
                    required=true
                    placeholder="Enter your password"
                    value={(*password).clone()}
                    oninput={on_password}
                    disabled={busy}
                />

                if let Some(message) = &*error {
                    <div class="alert alert-error">{ message }</div>
                }

                <button type="submit" class="btn btn-primary full-width" disabled={busy}>
                    { if busy { "Signing in..." } else { "Sign In" } }
                </button>

                <div class="demo-accounts">
                    <h3>{"Demo Accounts:"}</h3>
                    { for DEMO_ACCOUNTS.iter().map(|(role, name)| html! {
                        <div>
                            <strong>{ format!("{role}:") }</strong>
                            { format!(" {name} / password") }
                        </div>
                    })}
                </div>
            </form>
        </div>
    }
}
