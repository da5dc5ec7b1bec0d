//! Employee dashboard page.

use std::ops::Deref;
use std::rc::Rc;

use dashboard::employee::{ACKNOWLEDGE_FAILED, LOAD_FAILED};
use dashboard::{EmployeeDashboard, EmployeeUpdate, Outcome};
use yew::prelude::*;

use crate::components::{ErrorAlert, FeedbackList, Loading, StatCard};
use crate::pages::PageProps;

/// Reducer state; each batch of updates lands on the latest dashboard.
struct EmployeeState(EmployeeDashboard);

impl Reducible for EmployeeState {
    type Action = Vec<EmployeeUpdate>;

    fn reduce(self: Rc<Self>, updates: Self::Action) -> Rc<Self> {
        let mut next = self.0.clone();
        for update in updates {
            next.apply(update);
        }
        Rc::new(Self(next))
    }
}

impl Deref for EmployeeState {
    type Target = EmployeeDashboard;

    fn deref(&self) -> &EmployeeDashboard {
        &self.0
    }
}

#[function_component(EmployeeDashboardPage)]
pub fn employee_dashboard_page(props: &PageProps) -> Html {
    let dash = {
        let client = props.auth.client.clone();
        use_reducer(move || EmployeeState(EmployeeDashboard::new(client)))
    };
    let loading = use_state(|| true);

    let reload = {
        let dash = dash.clone();
        let loading = loading.clone();
        let auth = props.auth.clone();
        Callback::from(move |_: ()| {
            let dash = dash.clone();
            let loading = loading.clone();
            let auth = auth.clone();
            loading.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                let Outcome { updates, result } = dash.run_load().await;
                if let Err(e) = result {
                    auth.report("Load dashboard", &e, LOAD_FAILED);
                }
                dash.dispatch(updates);
                loading.set(false);
            });
        })
    };

    {
        let reload = reload.clone();
        use_effect_with((), move |_| reload.emit(()));
    }

    let on_acknowledge = {
        let dash = dash.clone();
        let auth = props.auth.clone();
        Callback::from(move |id: i64| {
            let dash = dash.clone();
            let auth = auth.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let Outcome { updates, result } = dash.run_acknowledge(id).await;
                if let Err(e) = result {
                    auth.report("Acknowledge feedback", &e, ACKNOWLEDGE_FAILED);
                }
                dash.dispatch(updates);
            });
        })
    };

    if *loading {
        return html! { <Loading message="Loading dashboard..." /> };
    }

    let stats = dash.stats.clone().unwrap_or_default();
    let pending = dash.pending_count();

    html! {
        <div class="dashboard">
            <div class="page-header">
                <h1>{"My Feedback"}</h1>
                <p class="muted">{"Track your feedback and professional development"}</p>
            </div>
            <ErrorAlert message={dash.error.clone()} on_retry={reload} />

            <div class="stats-grid">
                <StatCard value={stats.total_feedback.to_string()} label={"Total Feedback"} />
                <StatCard value={stats.positive_feedback.to_string()} label={"Positive Feedback"} />
                <StatCard value={stats.acknowledged_feedback.to_string()} label={"Acknowledged"} />
                <StatCard value={pending.to_string()} label={"Pending Review"} />
            </div>

            if pending > 0 {
                <div class="alert alert-warning">
                    <strong>{"New Feedback Awaiting Review"}</strong>
                    <span>
                        { format!(" You have {pending} feedback {} to acknowledge.",
                            if pending == 1 { "item" } else { "items" }) }
                    </span>
                </div>
            }

            <div class="card">
                <h2 class="card-title">{"Feedback Overview"}</h2>
                <p class="muted">{"Summary of your feedback sentiment"}</p>
                <div class="sentiment-summary">
                    <span class="badge sentiment-positive">
                        { format!("Positive: {}", stats.positive_feedback) }
                    </span>
                    <span class="badge sentiment-neutral">
                        { format!("Neutral: {}", stats.neutral_feedback) }
                    </span>
                    <span class="badge sentiment-negative">
                        { format!("Constructive: {}", stats.negative_feedback) }
                    </span>
                </div>
            </div>

            <div class="card">
                <h2 class="card-title">{"Feedback Timeline"}</h2>
                <p class="muted">{"All feedback you've received, sorted by most recent"}</p>
                <FeedbackList
                    feedback={dash.feedback.clone()}
                    is_manager=false
                    on_acknowledge={on_acknowledge}
                />
            </div>
        </div>
    }
}
