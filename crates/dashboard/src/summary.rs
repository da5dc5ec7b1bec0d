//! Values derived from fetched data for display.

use std::fmt::Display;

use chrono::{DateTime, TimeZone};
use core_types::{FeedbackWithDetails, User};

/// Number of entries shown under "Recent Feedback".
pub const RECENT_FEEDBACK_LIMIT: usize = 5;

/// One line of the manager's "Your Team" list.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamRow {
    pub member: User,
    pub feedback_count: usize,
    pub unacknowledged: usize,
}

/// Rows for the active members of `team`, with counts from `given`.
pub fn team_rows(team: &[User], given: &[FeedbackWithDetails]) -> Vec<TeamRow> {
    team.iter()
        .filter(|member| member.is_active)
        .map(|member| {
            let theirs = given.iter().filter(|f| f.feedback.employee_id == member.id);
            let (feedback_count, unacknowledged) =
                theirs.fold((0, 0), |(total, open), f| {
                    (total + 1, open + usize::from(!f.feedback.is_acknowledged))
                });
            TeamRow {
                member: member.clone(),
                feedback_count,
                unacknowledged,
            }
        })
        .collect()
}

/// Active, inactive and total headcount of a team.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeamCounts {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
}

impl TeamCounts {
    pub fn of(team: &[User]) -> Self {
        let active = team.iter().filter(|u| u.is_active).count();
        Self {
            total: team.len(),
            active,
            inactive: team.len() - active,
        }
    }
}

/// Feedback still waiting for the employee's acknowledgment.
pub fn pending(feedback: &[FeedbackWithDetails]) -> Vec<FeedbackWithDetails> {
    feedback
        .iter()
        .filter(|f| !f.feedback.is_acknowledged)
        .cloned()
        .collect()
}

/// The first few entries, as returned (newest first).
pub fn recent(feedback: &[FeedbackWithDetails]) -> &[FeedbackWithDetails] {
    &feedback[..feedback.len().min(RECENT_FEEDBACK_LIMIT)]
}

/// "Mar 1, 2024, 09:30 AM"
pub fn format_timestamp<Tz: TimeZone>(dt: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    dt.format("%b %-d, %Y, %I:%M %p").to_string()
}

/// "Mar 1, 2024"
pub fn format_date<Tz: TimeZone>(dt: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    dt.format("%b %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use core_types::{Feedback, Role, Sentiment};

    fn member(id: i64, active: bool) -> User {
        User {
            id,
            username: format!("user{id}"),
            email: None,
            role: Role::Employee,
            manager_id: Some(1),
            is_active: active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn feedback(id: i64, employee_id: i64, acknowledged: bool) -> FeedbackWithDetails {
        let now = Utc::now();
        FeedbackWithDetails {
            feedback: Feedback {
                id,
                employee_id,
                manager_id: 1,
                strengths: "Steady and dependable".to_string(),
                areas_to_improve: "Speak up in planning".to_string(),
                sentiment: Sentiment::Neutral,
                is_acknowledged: acknowledged,
                created_at: now,
                updated_at: now,
            },
            employee_name: format!("user{employee_id}"),
            manager_name: "john_manager".to_string(),
        }
    }

    #[test]
    fn test_team_rows_skip_inactive_and_count() {
        let team = vec![member(3, true), member(4, false), member(5, true)];
        let given = vec![feedback(1, 3, true), feedback(2, 3, false), feedback(3, 4, false)];

        let rows = team_rows(&team, &given);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].member.id, 3);
        assert_eq!(rows[0].feedback_count, 2);
        assert_eq!(rows[0].unacknowledged, 1);
        assert_eq!(rows[1].feedback_count, 0);
    }

    #[test]
    fn test_team_counts() {
        let counts = TeamCounts::of(&[member(3, true), member(4, false)]);
        assert_eq!(
            counts,
            TeamCounts {
                total: 2,
                active: 1,
                inactive: 1
            }
        );
    }

    #[test]
    fn test_pending_and_recent() {
        let items: Vec<_> = (1..=7).map(|i| feedback(i, 3, i % 2 == 0)).collect();

        assert_eq!(pending(&items).len(), 4);
        assert_eq!(recent(&items).len(), RECENT_FEEDBACK_LIMIT);
        assert_eq!(recent(&items[..2]).len(), 2);
    }

    #[test]
    fn test_format_timestamp() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 1, 15, 5, 0).unwrap();
        assert_eq!(format_timestamp(&dt), "Mar 1, 2024, 03:05 PM");
        assert_eq!(format_date(&dt), "Mar 1, 2024");
    }
}
