//! Positive / Neutral / Constructive picker.

use core_types::Sentiment;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SentimentSelectorProps {
    pub value: Option<Sentiment>,
    pub on_change: Callback<Sentiment>,
    #[prop_or_default]
    pub disabled: bool,
}

fn badge_class(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Positive => "sentiment-positive",
        Sentiment::Neutral => "sentiment-neutral",
        Sentiment::Negative => "sentiment-negative",
    }
}

#[function_component(SentimentSelector)]
pub fn sentiment_selector(props: &SentimentSelectorProps) -> Html {
    html! {
        <div class="sentiment-selector">
            { for Sentiment::ALL.iter().map(|&sentiment| {
                let selected = props.value == Some(sentiment);
                let onclick = {
                    let on_change = props.on_change.clone();
                    Callback::from(move |e: MouseEvent| {
                        e.prevent_default();
                        on_change.emit(sentiment);
                    })
                };
                html! {
                    <button
                        type="button"
                        class={classes!(
                            "sentiment-option",
                            badge_class(sentiment),
                            selected.then_some("selected")
                        )}
                        disabled={props.disabled}
                        {onclick}
                    >
                        { sentiment.label() }
                    </button>
                }
            })}
        </div>
    }
}

/// Colored badge for a sentiment.
#[derive(Properties, PartialEq)]
pub struct SentimentBadgeProps {
    pub sentiment: Sentiment,
}

#[function_component(SentimentBadge)]
pub fn sentiment_badge(props: &SentimentBadgeProps) -> Html {
    html! {
        <span class={classes!("badge", badge_class(props.sentiment))}>
            { props.sentiment.label() }
        </span>
    }
}
