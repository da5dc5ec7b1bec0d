//! Reusable UI components.

mod create_member_form;
mod edit_user_dialog;
mod error_alert;
mod feedback_form;
mod feedback_list;
mod loading;
mod sentiment_selector;
mod stat_card;
mod team_member_selector;

pub use create_member_form::CreateMemberForm;
pub use edit_user_dialog::EditUserDialog;
pub use error_alert::ErrorAlert;
pub use feedback_form::{Done, FeedbackForm};
pub use feedback_list::FeedbackList;
pub use loading::Loading;
pub use sentiment_selector::{SentimentBadge, SentimentSelector};
pub use stat_card::StatCard;
pub use team_member_selector::TeamMemberSelector;
