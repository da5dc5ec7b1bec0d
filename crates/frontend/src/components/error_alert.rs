//! Inline error message.

use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ErrorAlertProps {
    pub message: Option<String>,
    /// Shows a Retry button when set.
    #[prop_or_default]
    pub on_retry: Option<Callback<()>>,
}

#[function_component(ErrorAlert)]
pub fn error_alert(props: &ErrorAlertProps) -> Html {
    let Some(message) = &props.message else {
        return html! {};
    };

    let retry = props.on_retry.clone().map(|on_retry| {
        let onclick = Callback::from(move |_: MouseEvent| on_retry.emit(()));
        html! { <button class="btn btn-outline" {onclick}>{"Retry"}</button> }
    });

    html! {
        <div class="alert alert-error" role="alert">
            <span>{ message }</span>
            { for retry }
        </div>
    }
}
