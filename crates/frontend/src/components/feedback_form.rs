//! New-feedback form for a manager.

use core_types::User;
use dashboard::FeedbackDraft;
use dashboard::forms::MIN_FEEDBACK_CHARS;
use web_types::CreateFeedbackRequest;
use yew::prelude::*;

use crate::components::{SentimentSelector, TeamMemberSelector};

/// Reports back whether the request went through.
pub type Done = Callback<Result<(), String>>;

#[derive(Properties, PartialEq)]
pub struct FeedbackFormProps {
    /// Active team members only.
    pub members: Vec<User>,
    pub on_submit: Callback<(CreateFeedbackRequest, Done)>,
    pub on_cancel: Callback<()>,
}

#[function_component(FeedbackForm)]
pub fn feedback_form(props: &FeedbackFormProps) -> Html {
    let draft = use_state(FeedbackDraft::default);
    let error = use_state(|| None::<String>);
    let submitting = use_state(|| false);

    let update = |apply: fn(&mut FeedbackDraft, String)| {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlTextAreaElement = e.target_unchecked_into();
            let mut next = (*draft).clone();
            apply(&mut next, input.value());
            draft.set(next);
        })
    };
    let on_strengths = update(|d, v| d.strengths = v);
    let on_areas = update(|d, v| d.areas_to_improve = v);

    let on_member = {
        let draft = draft.clone();
        Callback::from(move |id: Option<i64>| {
            let mut next = (*draft).clone();
            next.employee_id = id;
            draft.set(next);
        })
    };

    let on_sentiment = {
        let draft = draft.clone();
        Callback::from(move |sentiment: core_types::Sentiment| {
            let mut next = (*draft).clone();
            next.sentiment = Some(sentiment);
            draft.set(next);
        })
    };

    let onsubmit = {
        let draft = draft.clone();
        let error = error.clone();
        let submitting = submitting.clone();
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let request = match draft.validate() {
                Ok(request) => request,
                Err(message) => {
                    error.set(Some(message.to_string()));
                    return;
                }
            };

            error.set(None);
            submitting.set(true);
            let done = {
                let draft = draft.clone();
                let error = error.clone();
                let submitting = submitting.clone();
                Callback::from(move |result: Result<(), String>| {
                    match result {
                        Ok(()) => draft.set(FeedbackDraft::default()),
                        Err(message) => error.set(Some(message)),
                    }
                    submitting.set(false);
                })
            };
            on_submit.emit((request, done));
        })
    };

    let on_cancel = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_: MouseEvent| on_cancel.emit(()))
    };

    let busy = *submitting;
    let hint = format!("Minimum {MIN_FEEDBACK_CHARS} characters");

    html! {
        <form class="card form" {onsubmit}>
            <h2 class="card-title">{"Submit New Feedback"}</h2>
            <p class="muted">{"Provide structured feedback for your team member"}</p>

            if let Some(message) = &*error {
                <div class="alert alert-error">{ message }</div>
            }

            <label>{"Team Member"}</label>
            <TeamMemberSelector
                members={props.members.clone()}
                value={draft.employee_id}
                on_change={on_member}
                disabled={busy}
            />

            <label>{"Strengths"}</label>
            <textarea
                class="input"
                rows="4"
                placeholder="What are this person's key strengths?"
                value={draft.strengths.clone()}
                oninput={on_strengths}
                disabled={busy}
            />
            <small class="muted">{ hint.clone() }</small>

            <label>{"Areas to Improve"}</label>
            <textarea
                class="input"
                rows="4"
                placeholder="What areas could they focus on for improvement?"
                value={draft.areas_to_improve.clone()}
                oninput={on_areas}
                disabled={busy}
            />
            <small class="muted">{ hint }</small>

            <label>{"Overall Sentiment"}</label>
            <SentimentSelector value={draft.sentiment} on_change={on_sentiment} disabled={busy} />

            <div class="form-actions">
                <button
                    type="submit"
                    class="btn btn-primary"
                    disabled={busy || !draft.is_complete()}
                >
                    { if busy { "Submitting..." } else { "Submit Feedback" } }
                </button>
                <button type="button" class="btn btn-outline" onclick={on_cancel} disabled={busy}>
                    {"Cancel"}
                </button>
            </div>
        </form>
    }
}
