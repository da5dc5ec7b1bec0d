//! Core types for the feedback tracker client.
//!
//! These mirror the entities owned by the backend service. Nothing in this
//! workspace creates or mutates them; they are only requested and displayed.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod timestamp;

/// Role of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Gives feedback to and administers a team
    Manager,
    /// Receives and acknowledges feedback
    Employee,
}

impl Role {
    /// Wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Manager => "manager",
            Role::Employee => "employee",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Categorical tag a manager assigns to a feedback entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// All sentiments in display order.
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];

    /// Wire name of the sentiment.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        }
    }

    /// Label shown to users. Negative feedback is presented as constructive.
    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Constructive",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known sentiment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown sentiment `{0}` (expected positive, neutral or negative)")]
pub struct ParseSentimentError(pub String);

impl FromStr for Sentiment {
    type Err = ParseSentimentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "positive" => Ok(Sentiment::Positive),
            "neutral" => Ok(Sentiment::Neutral),
            "negative" | "constructive" => Ok(Sentiment::Negative),
            _ => Err(ParseSentimentError(s.to_string())),
        }
    }
}

/// An account known to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub role: Role,
    /// Managing user, for employees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<i64>,
    pub is_active: bool,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_manager(&self) -> bool {
        self.role == Role::Manager
    }
}

/// A single feedback entry written by a manager for an employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub id: i64,
    pub employee_id: i64,
    pub manager_id: i64,
    pub strengths: String,
    pub areas_to_improve: String,
    pub sentiment: Sentiment,
    pub is_acknowledged: bool,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Feedback {
    /// Whether the entry was changed after it was first written.
    pub fn is_edited(&self) -> bool {
        self.created_at != self.updated_at
    }
}

/// Feedback as returned by the list endpoints, with both parties' names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackWithDetails {
    #[serde(flatten)]
    pub feedback: Feedback,
    pub employee_name: String,
    pub manager_name: String,
}

/// Aggregate counts computed by the backend for the requesting user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_feedback: u32,
    pub positive_feedback: u32,
    pub neutral_feedback: u32,
    pub negative_feedback: u32,
    pub acknowledged_feedback: u32,
    /// Only reported to managers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_size: Option<u32>,
    /// Only reported to managers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_team_size: Option<u32>,
}

impl DashboardStats {
    /// Share of feedback acknowledged, as a rounded percentage.
    pub fn acknowledgment_rate(&self) -> u32 {
        if self.total_feedback == 0 {
            return 0;
        }
        (f64::from(self.acknowledged_feedback) / f64::from(self.total_feedback) * 100.0).round()
            as u32
    }

    /// Team members that are currently deactivated.
    pub fn inactive_team_size(&self) -> u32 {
        self.team_size
            .unwrap_or(0)
            .saturating_sub(self.active_team_size.unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_json() -> &'static str {
        r#"{
            "id": 3,
            "username": "alice_employee",
            "email": "alice@example.com",
            "role": "employee",
            "manager_id": 1,
            "is_active": true,
            "created_at": "2024-03-01T09:30:00",
            "updated_at": "2024-03-01T09:30:00.123456"
        }"#
    }

    #[test]
    fn test_user_deserializes_backend_shape() {
        let user: User = serde_json::from_str(user_json()).unwrap();

        assert_eq!(user.id, 3);
        assert_eq!(user.role, Role::Employee);
        assert_eq!(user.manager_id, Some(1));
        assert!(!user.is_manager());
    }

    #[test]
    fn test_user_optional_fields_may_be_missing() {
        let json = r#"{
            "id": 1,
            "username": "john_manager",
            "role": "manager",
            "is_active": true,
            "created_at": "2024-03-01T09:30:00Z",
            "updated_at": "2024-03-01T09:30:00Z"
        }"#;

        let user: User = serde_json::from_str(json).unwrap();

        assert!(user.email.is_none());
        assert!(user.manager_id.is_none());
        assert!(user.is_manager());
    }

    #[test]
    fn test_feedback_with_details_flattens() {
        let json = r#"{
            "id": 7,
            "employee_id": 3,
            "manager_id": 1,
            "strengths": "Ships reliable code",
            "areas_to_improve": "Write more design docs",
            "sentiment": "negative",
            "is_acknowledged": false,
            "created_at": "2024-03-01T09:30:00Z",
            "updated_at": "2024-03-02T10:00:00Z",
            "employee_name": "alice_employee",
            "manager_name": "john_manager"
        }"#;

        let item: FeedbackWithDetails = serde_json::from_str(json).unwrap();

        assert_eq!(item.feedback.id, 7);
        assert_eq!(item.feedback.sentiment, Sentiment::Negative);
        assert_eq!(item.employee_name, "alice_employee");
        assert!(item.feedback.is_edited());
    }

    #[test]
    fn test_sentiment_labels() {
        assert_eq!(Sentiment::Positive.label(), "Positive");
        assert_eq!(Sentiment::Neutral.label(), "Neutral");
        assert_eq!(Sentiment::Negative.label(), "Constructive");
    }

    #[test]
    fn test_sentiment_from_str() {
        assert_eq!("Positive".parse::<Sentiment>(), Ok(Sentiment::Positive));
        assert_eq!(" neutral ".parse::<Sentiment>(), Ok(Sentiment::Neutral));
        assert_eq!("constructive".parse::<Sentiment>(), Ok(Sentiment::Negative));
        assert!("great".parse::<Sentiment>().is_err());
    }

    #[test]
    fn test_sentiment_wire_names() {
        for sentiment in Sentiment::ALL {
            let json = serde_json::to_string(&sentiment).unwrap();
            assert_eq!(json, format!("\"{}\"", sentiment.as_str()));
        }
    }

    #[test]
    fn test_acknowledgment_rate() {
        let stats = DashboardStats {
            total_feedback: 3,
            acknowledged_feedback: 2,
            ..Default::default()
        };
        assert_eq!(stats.acknowledgment_rate(), 67);

        let empty = DashboardStats::default();
        assert_eq!(empty.acknowledgment_rate(), 0);
    }

    #[test]
    fn test_inactive_team_size() {
        let stats = DashboardStats {
            team_size: Some(5),
            active_team_size: Some(3),
            ..Default::default()
        };
        assert_eq!(stats.inactive_team_size(), 2);

        // Employees get no team figures at all
        assert_eq!(DashboardStats::default().inactive_team_size(), 0);
    }

    #[test]
    fn test_employee_stats_omit_team_fields() {
        let json = r#"{
            "total_feedback": 4,
            "positive_feedback": 2,
            "neutral_feedback": 1,
            "negative_feedback": 1,
            "acknowledged_feedback": 3
        }"#;

        let stats: DashboardStats = serde_json::from_str(json).unwrap();

        assert_eq!(stats.total_feedback, 4);
        assert!(stats.team_size.is_none());
        assert!(stats.active_team_size.is_none());
    }
}
