//! Account creation form for a new team member.

use dashboard::{FieldErrors, MemberField, NewMemberDraft};
use gloo_timers::callback::Timeout;
use web_types::CreateUserRequest;
use yew::prelude::*;

use crate::components::Done;

/// How long the success banner stays before the form resets.
const SUCCESS_RESET_MS: u32 = 2_000;

#[derive(Properties, PartialEq)]
pub struct CreateMemberFormProps {
    pub on_submit: Callback<(CreateUserRequest, Done)>,
    pub on_cancel: Callback<()>,
}

#[function_component(CreateMemberForm)]
pub fn create_member_form(props: &CreateMemberFormProps) -> Html {
    let draft = use_state(NewMemberDraft::default);
    let errors = use_state(FieldErrors::new);
    let submit_error = use_state(|| None::<String>);
    let submitting = use_state(|| false);
    let success = use_state(|| false);

    let field = |apply: fn(&mut NewMemberDraft, String)| {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            let mut next = (*draft).clone();
            apply(&mut next, input.value());
            draft.set(next);
        })
    };

    let onsubmit = {
        let draft = draft.clone();
        let errors = errors.clone();
        let submit_error = submit_error.clone();
        let submitting = submitting.clone();
        let success = success.clone();
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            submit_error.set(None);
            let request = match draft.validate() {
                Ok(request) => request,
                Err(found) => {
                    errors.set(found);
                    return;
                }
            };

            errors.set(FieldErrors::new());
            submitting.set(true);
            let done = {
                let draft = draft.clone();
                let submit_error = submit_error.clone();
                let submitting = submitting.clone();
                let success = success.clone();
                Callback::from(move |result: Result<(), String>| {
                    submitting.set(false);
                    match result {
                        Ok(()) => {
                            success.set(true);
                            let draft = draft.clone();
                            let success = success.clone();
                            Timeout::new(SUCCESS_RESET_MS, move || {
                                draft.set(NewMemberDraft::default());
                                success.set(false);
                            })
                            .forget();
                        }
                        Err(message) => submit_error.set(Some(message)),
                    }
                })
            };
            on_submit.emit((request, done));
        })
    };

    let on_cancel = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_: MouseEvent| on_cancel.emit(()))
    };

    if *success {
        return html! {
            <div class="card success">
                <h2>{"Account Created Successfully!"}</h2>
                <p>{ format!("{} can now sign in.", draft.username) }</p>
            </div>
        };
    }

    let busy = *submitting;
    let error_for = |f: MemberField| {
        errors
            .get(&f)
            .map(|message| html! { <small class="field-error">{ *message }</small> })
    };

    html! {
        <form class="card form" {onsubmit}>
            <h2 class="card-title">{"Create Employee Account"}</h2>

            if let Some(message) = &*submit_error {
                <div class="alert alert-error">{ message }</div>
            }

            <label>{"Username"}</label>
            <input
                class="input"
                type="text"
                value={draft.username.clone()}
                oninput={field(|d, v| d.username = v)}
                disabled={busy}
            />
            { for error_for(MemberField::Username) }

            <label>{"Email"}</label>
            <input
                class="input"
                type="email"
                value={draft.email.clone()}
                oninput={field(|d, v| d.email = v)}
                disabled={busy}
            />
            { for error_for(MemberField::Email) }

            <label>{"Password"}</label>
            <input
                class="input"
                type="password"
                value={draft.password.clone()}
                oninput={field(|d, v| d.password = v)}
                disabled={busy}
            />
            { for error_for(MemberField::Password) }

            <label>{"Confirm Password"}</label>
            <input
                class="input"
                type="password"
                value={draft.confirm_password.clone()}
                oninput={field(|d, v| d.confirm_password = v)}
                disabled={busy}
            />
            { for error_for(MemberField::ConfirmPassword) }

            <div class="form-actions">
                <button type="submit" class="btn btn-primary" disabled={busy}>
                    { if busy { "Creating..." } else { "Create Account" } }
                </button>
                <button type="button" class="btn btn-outline" onclick={on_cancel} disabled={busy}>
                    {"Cancel"}
                </button>
            </div>
        </form>
    }
}
