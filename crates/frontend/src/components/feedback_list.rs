//! Feedback cards with inline editing (managers) and acknowledgment
//! (employees).

use core_types::{FeedbackWithDetails, Sentiment};
use dashboard::FeedbackEdit;
use dashboard::summary::format_timestamp;
use web_types::UpdateFeedbackRequest;
use yew::prelude::*;

use crate::components::{Done, SentimentBadge, SentimentSelector};

#[derive(Properties, PartialEq)]
pub struct FeedbackListProps {
    pub feedback: Vec<FeedbackWithDetails>,
    pub is_manager: bool,
    #[prop_or_default]
    pub on_edit: Option<Callback<(i64, UpdateFeedbackRequest, Done)>>,
    #[prop_or_default]
    pub on_acknowledge: Option<Callback<i64>>,
}

#[function_component(FeedbackList)]
pub fn feedback_list(props: &FeedbackListProps) -> Html {
    let editing = use_state(|| None::<i64>);
    let form = use_state(FeedbackEdit::default);
    let error = use_state(|| None::<String>);
    let saving = use_state(|| false);

    if props.feedback.is_empty() {
        return html! {
            <div class="empty-state">
                <p>{"No feedback available yet."}</p>
            </div>
        };
    }

    let on_strengths = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlTextAreaElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            next.strengths = input.value();
            form.set(next);
        })
    };
    let on_areas = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlTextAreaElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            next.areas_to_improve = input.value();
            form.set(next);
        })
    };
    let on_sentiment = {
        let form = form.clone();
        Callback::from(move |sentiment: Sentiment| {
            let mut next = (*form).clone();
            next.sentiment = Some(sentiment);
            form.set(next);
        })
    };

    let on_cancel = {
        let editing = editing.clone();
        let error = error.clone();
        Callback::from(move |_: MouseEvent| {
            editing.set(None);
            error.set(None);
        })
    };

    let busy = *saving;

    let card = |item: &FeedbackWithDetails| {
        let fb = &item.feedback;
        let id = fb.id;
        let title = if props.is_manager {
            format!("Feedback for {}", item.employee_name)
        } else {
            format!("Feedback from {}", item.manager_name)
        };
        let highlight = !props.is_manager && !fb.is_acknowledged;

        let body = if *editing == Some(id) {
            let on_save = {
                let form = form.clone();
                let editing = editing.clone();
                let error = error.clone();
                let saving = saving.clone();
                let on_edit = props.on_edit.clone();
                Callback::from(move |_: MouseEvent| {
                    let Some(on_edit) = &on_edit else { return };
                    let update = match form.validate() {
                        Ok(update) => update,
                        Err(message) => {
                            error.set(Some(message.to_string()));
                            return;
                        }
                    };

                    error.set(None);
                    saving.set(true);
                    let done = {
                        let editing = editing.clone();
                        let error = error.clone();
                        let saving = saving.clone();
                        Callback::from(move |result: Result<(), String>| {
                            match result {
                                Ok(()) => editing.set(None),
                                Err(message) => error.set(Some(message)),
                            }
                            saving.set(false);
                        })
                    };
                    on_edit.emit((id, update, done));
                })
            };

            html! {
                <div class="edit-form">
                    if let Some(message) = &*error {
                        <div class="alert alert-error">{ message }</div>
                    }
                    <label>{"Strengths"}</label>
                    <textarea
                        class="input"
                        rows="4"
                        value={form.strengths.clone()}
                        oninput={on_strengths.clone()}
                        disabled={busy}
                    />
                    <label>{"Areas to Improve"}</label>
                    <textarea
                        class="input"
                        rows="4"
                        value={form.areas_to_improve.clone()}
                        oninput={on_areas.clone()}
                        disabled={busy}
                    />
                    <label>{"Overall Sentiment"}</label>
                    <SentimentSelector
                        value={form.sentiment}
                        on_change={on_sentiment.clone()}
                        disabled={busy}
                    />
                    <div class="form-actions">
                        <button class="btn btn-primary" onclick={on_save} disabled={busy}>
                            { if busy { "Saving..." } else { "Save Changes" } }
                        </button>
                        <button class="btn btn-outline" onclick={on_cancel.clone()} disabled={busy}>
                            {"Cancel"}
                        </button>
                    </div>
                </div>
            }
        } else {
            let edit_button = (props.is_manager && props.on_edit.is_some()).then(|| {
                let onclick = {
                    let editing = editing.clone();
                    let form = form.clone();
                    let error = error.clone();
                    let original = fb.clone();
                    Callback::from(move |e: MouseEvent| {
                        e.prevent_default();
                        form.set(FeedbackEdit::from_feedback(&original));
                        error.set(None);
                        editing.set(Some(original.id));
                    })
                };
                html! {
                    <button class="btn btn-outline" {onclick} disabled={busy || editing.is_some()}>
                        {"Edit"}
                    </button>
                }
            });

            let ack_button = props
                .on_acknowledge
                .clone()
                .filter(|_| !props.is_manager && !fb.is_acknowledged)
                .map(|on_acknowledge| {
                    let onclick = Callback::from(move |_: MouseEvent| on_acknowledge.emit(id));
                    html! { <button class="btn btn-primary" {onclick}>{"Acknowledge"}</button> }
                });

            html! {
                <>
                    <div class="feedback-section strengths">
                        <h4>{"Strengths"}</h4>
                        <p>{ &fb.strengths }</p>
                    </div>
                    <div class="feedback-section improve">
                        <h4>{"Areas to Improve"}</h4>
                        <p>{ &fb.areas_to_improve }</p>
                    </div>
                    <div class="card-footer">
                        <span class="muted">{ format!("Feedback ID: #{id}") }</span>
                        <div class="actions">
                            { for edit_button }
                            { for ack_button }
                        </div>
                    </div>
                </>
            }
        };

        html! {
            <div key={id} class={classes!("card", "feedback-card", highlight.then_some("pending"))}>
                <div class="card-header">
                    <div>
                        <h3 class="card-title">{ title }</h3>
                        <span class="muted">{ format_timestamp(&fb.created_at) }</span>
                        if fb.is_edited() {
                            <span class="muted small">
                                { format!(" (Updated: {})", format_timestamp(&fb.updated_at)) }
                            </span>
                        }
                    </div>
                    <div class="badges">
                        <SentimentBadge sentiment={fb.sentiment} />
                        if fb.is_acknowledged {
                            <span class="badge badge-success">{"Acknowledged"}</span>
                        }
                    </div>
                </div>
                { body }
            </div>
        }
    };

    html! {
        <div class="feedback-list">
            { for props.feedback.iter().map(card) }
        </div>
    }
}
