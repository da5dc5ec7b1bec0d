//! Manager dashboard page.

use std::ops::Deref;
use std::rc::Rc;

use core_types::User;
use dashboard::manager::{LOAD_FAILED, MEMBER_FEEDBACK_FAILED};
use dashboard::{ManagerDashboard, ManagerUpdate, ManagerView, Outcome};
use web_types::{
    CreateFeedbackRequest, CreateUserRequest, UpdateFeedbackRequest, UpdateUserRequest,
};
use yew::prelude::*;

use crate::components::{Done, ErrorAlert, FeedbackForm, FeedbackList, Loading, StatCard};
use crate::pages::{PageProps, TeamManagement};

/// Reducer state; each batch of updates lands on the latest dashboard.
struct ManagerState(ManagerDashboard);

impl Reducible for ManagerState {
    type Action = Vec<ManagerUpdate>;

    fn reduce(self: Rc<Self>, updates: Self::Action) -> Rc<Self> {
        let mut next = self.0.clone();
        for update in updates {
            next.apply(update);
        }
        Rc::new(Self(next))
    }
}

impl Deref for ManagerState {
    type Target = ManagerDashboard;

    fn deref(&self) -> &ManagerDashboard {
        &self.0
    }
}

#[function_component(ManagerDashboardPage)]
pub fn manager_dashboard_page(props: &PageProps) -> Html {
    let dash = {
        let client = props.auth.client.clone();
        use_reducer(move || ManagerState(ManagerDashboard::new(client)))
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

    let show = |view: ManagerView| {
        let dash = dash.clone();
        Callback::from(move |_: MouseEvent| dash.dispatch(vec![ManagerUpdate::Show(view.clone())]))
    };

    let on_back = {
        let dash = dash.clone();
        Callback::from(move |_: ()| dash.dispatch(vec![ManagerUpdate::BackToOverview]))
    };

    let on_submit_feedback = {
        let dash = dash.clone();
        let auth = props.auth.clone();
        Callback::from(move |(request, done): (CreateFeedbackRequest, Done)| {
            let dash = dash.clone();
            let auth = auth.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let Outcome { updates, result } = dash.run_submit_feedback(&request).await;
                dash.dispatch(updates);
                done.emit(result.map_err(|e| {
                    auth.report("Submit feedback", &e, "Failed to submit feedback")
                }));
            });
        })
    };

    let on_edit_feedback = {
        let dash = dash.clone();
        let auth = props.auth.clone();
        Callback::from(move |(id, update, done): (i64, UpdateFeedbackRequest, Done)| {
            let dash = dash.clone();
            let auth = auth.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let Outcome { updates, result } = dash.run_edit_feedback(id, &update).await;
                dash.dispatch(updates);
                done.emit(result.map_err(|e| {
                    auth.report("Update feedback", &e, "Failed to update feedback")
                }));
            });
        })
    };

    let on_create_member = {
        let dash = dash.clone();
        let auth = props.auth.clone();
        Callback::from(move |(request, done): (CreateUserRequest, Done)| {
            let dash = dash.clone();
            let auth = auth.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let Outcome { updates, result } = dash.run_create_member(&request).await;
                dash.dispatch(updates);
                done.emit(result.map(|_| ()).map_err(|e| {
                    auth.report("Create member", &e, "Failed to create employee account")
                }));
            });
        })
    };

    let on_update_member = {
        let dash = dash.clone();
        let auth = props.auth.clone();
        Callback::from(move |(id, update, done): (i64, UpdateUserRequest, Done)| {
            let dash = dash.clone();
            let auth = auth.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let Outcome { updates, result } = dash.run_update_member(id, &update).await;
                dash.dispatch(updates);
                done.emit(result.map_err(|e| {
                    auth.report("Update member", &e, "Failed to update employee")
                }));
            });
        })
    };

    let on_toggle_member = {
        let dash = dash.clone();
        let auth = props.auth.clone();
        Callback::from(move |id: i64| {
            let dash = dash.clone();
            let auth = auth.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let Outcome {
                    mut updates,
                    result,
                } = dash.run_toggle_member(id).await;
                if let Err(e) = result {
                    let message =
                        auth.report("Toggle member", &e, "Failed to update employee status");
                    updates.push(ManagerUpdate::Failed(message));
                }
                dash.dispatch(updates);
            });
        })
    };

    let on_open_member = {
        let dash = dash.clone();
        let auth = props.auth.clone();
        Callback::from(move |member: User| {
            let dash = dash.clone();
            let auth = auth.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let Outcome { updates, result } = dash.run_open_member_feedback(member).await;
                if let Err(e) = result {
                    auth.report("Load member feedback", &e, MEMBER_FEEDBACK_FAILED);
                }
                dash.dispatch(updates);
            });
        })
    };

    if *loading {
        return html! { <Loading message="Loading dashboard..." /> };
    }

    let body = match &dash.view {
        ManagerView::Overview => overview(&dash, show, on_open_member, on_edit_feedback),
        ManagerView::NewFeedback => html! {
            <FeedbackForm
                members={dash.active_team()}
                on_submit={on_submit_feedback}
                on_cancel={on_back}
            />
        },
        ManagerView::TeamManagement => html! {
            <TeamManagement
                team={dash.team.clone()}
                on_create={on_create_member}
                on_update={on_update_member}
                on_toggle={on_toggle_member}
                on_back={on_back}
            />
        },
        ManagerView::MemberFeedback { member, feedback } => {
            let on_back_click = on_back.reform(|_: MouseEvent| ());
            html! {
                <div>
                    <div class="section-header">
                        <h2>{ format!("Feedback for {}", member.username) }</h2>
                        <button class="btn btn-outline" onclick={on_back_click}>
                            {"Back to Dashboard"}
                        </button>
                    </div>
                    <FeedbackList
                        feedback={feedback.clone()}
                        is_manager=true
                        on_edit={on_edit_feedback}
                    />
                </div>
            }
        }
    };

    html! {
        <div class="dashboard">
            <div class="page-header">
                <h1>{"Manager Dashboard"}</h1>
                <p class="muted">{"Manage your team and track feedback"}</p>
            </div>
            <ErrorAlert message={dash.error.clone()} on_retry={reload} />
            { body }
        </div>
    }
}

fn overview(
    dash: &ManagerDashboard,
    show: impl Fn(ManagerView) -> Callback<MouseEvent>,
    on_open_member: Callback<User>,
    on_edit: Callback<(i64, UpdateFeedbackRequest, Done)>,
) -> Html {
    let stats = dash.stats.clone().unwrap_or_default();
    let counts = dash.member_counts();

    html! {
        <>
            <div class="stats-grid">
                <StatCard
                    value={counts.active.to_string()}
                    label={"Team Members"}
                    hint={format!("{} inactive", counts.inactive)}
                />
                <StatCard value={stats.total_feedback.to_string()} label={"Total Feedback"} />
                <StatCard value={stats.positive_feedback.to_string()} label={"Positive Feedback"} />
                <StatCard
                    value={format!("{}%", stats.acknowledgment_rate())}
                    label={"Acknowledgment Rate"}
                />
            </div>

            <div class="card">
                <h2 class="card-title">{"Quick Actions"}</h2>
                <p class="muted">{"Common management tasks"}</p>
                <div class="actions">
                    <button class="btn btn-primary" onclick={show(ManagerView::NewFeedback)}>
                        {"Submit Feedback"}
                    </button>
                    <button class="btn btn-outline" onclick={show(ManagerView::TeamManagement)}>
                        {"Team Management"}
                    </button>
                </div>
            </div>

            <div class="two-column">
                <div class="card">
                    <h2 class="card-title">{"Your Team"}</h2>
                    <p class="muted">{"Manage feedback for your team members"}</p>
                    { for dash.team_rows().into_iter().map(|row| {
                        let onclick = {
                            let on_open_member = on_open_member.clone();
                            let member = row.member.clone();
                            Callback::from(move |_: MouseEvent| on_open_member.emit(member.clone()))
                        };
                        html! {
                            <div class="team-row" key={row.member.id} {onclick}>
                                <span class="team-name">{ &row.member.username }</span>
                                <span class="muted">
                                    { format!("{} feedback", row.feedback_count) }
                                </span>
                                if row.unacknowledged > 0 {
                                    <span class="badge badge-warning">
                                        { format!("{} pending", row.unacknowledged) }
                                    </span>
                                }
                            </div>
                        }
                    })}
                </div>

                <div class="card">
                    <h2 class="card-title">{"Recent Feedback"}</h2>
                    <p class="muted">{"Latest feedback you've provided"}</p>
                    <FeedbackList
                        feedback={dash.recent_feedback().to_vec()}
                        is_manager=true
                        on_edit={on_edit}
                    />
                </div>
            </div>
        </>
    }
}
