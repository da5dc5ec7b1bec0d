//! Team management view: member list, account creation and editing.

use core_types::User;
use dashboard::summary::{TeamCounts, format_date};
use web_types::{CreateUserRequest, UpdateUserRequest};
use yew::prelude::*;

use crate::components::{CreateMemberForm, Done, EditUserDialog, StatCard};

#[derive(Properties, PartialEq)]
pub struct TeamManagementProps {
    pub team: Vec<User>,
    pub on_create: Callback<(CreateUserRequest, Done)>,
    pub on_update: Callback<(i64, UpdateUserRequest, Done)>,
    pub on_toggle: Callback<i64>,
    pub on_back: Callback<()>,
}

#[function_component(TeamManagement)]
pub fn team_management(props: &TeamManagementProps) -> Html {
    let creating = use_state(|| false);
    let editing = use_state(|| None::<User>);

    let counts = TeamCounts::of(&props.team);

    let open_create = {
        let creating = creating.clone();
        Callback::from(move |_: MouseEvent| creating.set(true))
    };
    let close_create = {
        let creating = creating.clone();
        Callback::from(move |_: ()| creating.set(false))
    };
    let close_edit = {
        let editing = editing.clone();
        Callback::from(move |_: ()| editing.set(None))
    };
    let on_back = props.on_back.reform(|_: MouseEvent| ());

    let member_row = |member: &User| {
        let on_edit = {
            let editing = editing.clone();
            let member = member.clone();
            Callback::from(move |_: MouseEvent| editing.set(Some(member.clone())))
        };
        let on_toggle = {
            let id = member.id;
            props.on_toggle.reform(move |_: MouseEvent| id)
        };
        let (status, status_class, toggle_label) = if member.is_active {
            ("Active", "badge-success", "Deactivate")
        } else {
            ("Inactive", "badge-muted", "Activate")
        };

        html! {
            <div class="member-row" key={member.id}>
                <div>
                    <div class="team-name">{ &member.username }</div>
                    if let Some(email) = &member.email {
                        <div class="muted">{ email }</div>
                    }
                    <div class="muted small">
                        { format!("Joined {}", format_date(&member.created_at)) }
                    </div>
                </div>
                <div class="actions">
                    <span class={classes!("badge", status_class)}>{ status }</span>
                    <button class="btn btn-outline" onclick={on_edit}>{"Edit Details"}</button>
                    <button class="btn btn-outline" onclick={on_toggle}>{ toggle_label }</button>
                </div>
            </div>
        }
    };

    html! {
        <div class="team-management">
            <div class="section-header">
                <div>
                    <h2>{"Team Management"}</h2>
                    <p class="muted">{"Manage your team members and their accounts"}</p>
                </div>
                <div class="actions">
                    <button class="btn btn-primary" onclick={open_create}>
                        {"Add Team Member"}
                    </button>
                    <button class="btn btn-outline" onclick={on_back}>
                        {"Back to Dashboard"}
                    </button>
                </div>
            </div>

            <div class="stats-grid">
                <StatCard value={counts.total.to_string()} label={"Total Team Members"} />
                <StatCard value={counts.active.to_string()} label={"Active Members"} />
                <StatCard value={counts.inactive.to_string()} label={"Inactive Members"} />
            </div>

            if *creating {
                <CreateMemberForm on_submit={props.on_create.clone()} on_cancel={close_create} />
            }

            <div class="card">
                <h2 class="card-title">{"Team Members"}</h2>
                <p class="muted">{"Manage your team member accounts and permissions"}</p>
                if props.team.is_empty() {
                    <div class="empty-state">
                        <h3>{"No team members yet"}</h3>
                        <p>{"Start building your team by adding your first team member."}</p>
                    </div>
                } else {
                    { for props.team.iter().map(member_row) }
                }
            </div>

            if let Some(user) = &*editing {
                <EditUserDialog
                    key={user.id}
                    user={user.clone()}
                    on_save={props.on_update.clone()}
                    on_close={close_edit}
                />
            }
        </div>
    }
}
