//! Modal for changing a member's username or email.

use core_types::User;
use dashboard::UserEdit;
use web_types::UpdateUserRequest;
use yew::prelude::*;

use crate::components::Done;

#[derive(Properties, PartialEq)]
pub struct EditUserDialogProps {
    pub user: User,
    pub on_save: Callback<(i64, UpdateUserRequest, Done)>,
    pub on_close: Callback<()>,
}

#[function_component(EditUserDialog)]
pub fn edit_user_dialog(props: &EditUserDialogProps) -> Html {
    let form = {
        let user = props.user.clone();
        use_state(move || UserEdit::from_user(&user))
    };
    let error = use_state(|| None::<String>);
    let saving = use_state(|| false);

    let on_username = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            next.username = input.value();
            form.set(next);
        })
    };
    let on_email = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            next.email = input.value();
            form.set(next);
        })
    };

    let onsubmit = {
        let form = form.clone();
        let error = error.clone();
        let saving = saving.clone();
        let user = props.user.clone();
        let on_save = props.on_save.clone();
        let on_close = props.on_close.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let update = match form.changes(&user) {
                Ok(Some(update)) => update,
                Ok(None) => {
                    on_close.emit(());
                    return;
                }
                Err(message) => {
                    error.set(Some(message.to_string()));
                    return;
                }
            };

            error.set(None);
            saving.set(true);
            let done = {
                let error = error.clone();
                let saving = saving.clone();
                let on_close = on_close.clone();
                Callback::from(move |result: Result<(), String>| {
                    saving.set(false);
                    match result {
                        Ok(()) => on_close.emit(()),
                        Err(message) => error.set(Some(message)),
                    }
                })
            };
            on_save.emit((user.id, update, done));
        })
    };

    let on_cancel = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let busy = *saving;

    html! {
        <div class="dialog-backdrop">
            <form class="card dialog" {onsubmit}>
                <h2 class="card-title">{"Edit User Details"}</h2>
                <p class="muted">
                    {"Update the user information below. Click save when you're done."}
                </p>

                if let Some(message) = &*error {
                    <div class="alert alert-error">{ message }</div>
                }

                <label>{"Username"}</label>
                <input
                    class="input"
                    type="text"
                    value={form.username.clone()}
                    oninput={on_username}
                    disabled={busy}
                />

                <label>{"Email"}</label>
                <input
                    class="input"
                    type="email"
                    value={form.email.clone()}
                    oninput={on_email}
                    disabled={busy}
                />

                <div class="form-actions">
                    <button type="submit" class="btn btn-primary" disabled={busy}>
                        { if busy { "Saving..." } else { "Save changes" } }
                    </button>
                    <button
                        type="button"
                        class="btn btn-outline"
                        onclick={on_cancel}
                        disabled={busy}
                    >
                        {"Cancel"}
                    </button>
                </div>
            </form>
        </div>
    }
}
