//! Drop-down of active team members.

use core_types::User;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TeamMemberSelectorProps {
    pub members: Vec<User>,
    pub value: Option<i64>,
    pub on_change: Callback<Option<i64>>,
    #[prop_or_default]
    pub disabled: bool,
}

#[function_component(TeamMemberSelector)]
pub fn team_member_selector(props: &TeamMemberSelectorProps) -> Html {
    if props.members.is_empty() {
        return html! { <p class="muted">{"No team members found"}</p> };
    }

    let onchange = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
            on_change.emit(select.value().parse().ok());
        })
    };

    html! {
        <select class="input" {onchange} disabled={props.disabled}>
            <option value="" selected={props.value.is_none()}>{"Select a team member"}</option>
            { for props.members.iter().map(|member| html! {
                <option
                    value={member.id.to_string()}
                    selected={props.value == Some(member.id)}
                >
                    { member.email.as_ref().map_or_else(
                        || member.username.clone(),
                        |email| format!("{} ({email})", member.username),
                    ) }
                </option>
            })}
        </select>
    }
}
