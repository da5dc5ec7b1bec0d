//! Statistics card component.

use yew::prelude::*;

/// Properties for StatCard component.
#[derive(Properties, PartialEq)]
pub struct StatCardProps {
    pub value: String,
    pub label: String,
    /// Small print under the value, e.g. "3 active".
    #[prop_or_default]
    pub hint: Option<String>,
}

/// Statistics card component.
#[function_component(StatCard)]
pub fn stat_card(props: &StatCardProps) -> Html {
    html! {
        <div class="card stat-card">
            <div class="stat-label">{ &props.label }</div>
            <div class="stat-value">{ &props.value }</div>
            if let Some(hint) = &props.hint {
                <div class="stat-hint">{ hint }</div>
            }
        </div>
    }
}
