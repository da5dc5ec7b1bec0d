//! Client-side validation. A draft that fails validation never reaches the
//! network.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use core_types::{Sentiment, User};
use regex::Regex;
use web_types::{CreateFeedbackRequest, CreateUserRequest, UpdateFeedbackRequest, UpdateUserRequest};

/// Minimum length, in characters, of either feedback text.
pub const MIN_FEEDBACK_CHARS: usize = 10;

/// Minimum length of a username.
pub const MIN_USERNAME_CHARS: usize = 3;

/// Minimum length of a new password.
pub const MIN_PASSWORD_CHARS: usize = 6;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_]+$").expect("valid username pattern"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// New feedback as typed into the form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedbackDraft {
    pub employee_id: Option<i64>,
    pub strengths: String,
    pub areas_to_improve: String,
    pub sentiment: Option<Sentiment>,
}

impl FeedbackDraft {
    /// Whether every field has something in it; gates the submit button.
    pub fn is_complete(&self) -> bool {
        self.employee_id.is_some()
            && !self.strengths.is_empty()
            && !self.areas_to_improve.is_empty()
            && self.sentiment.is_some()
    }

    /// Build the request, or the first problem found.
    pub fn validate(&self) -> Result<CreateFeedbackRequest, &'static str> {
        let strengths = self.strengths.trim();
        let areas = self.areas_to_improve.trim();

        let Some(employee_id) = self.employee_id else {
            return Err("Please select a team member");
        };
        if strengths.is_empty() {
            return Err("Please provide strengths feedback");
        }
        if areas.is_empty() {
            return Err("Please provide areas to improve feedback");
        }
        let Some(sentiment) = self.sentiment else {
            return Err("Please select a sentiment");
        };
        if char_len(strengths) < MIN_FEEDBACK_CHARS {
            return Err("Strengths feedback must be at least 10 characters");
        }
        if char_len(areas) < MIN_FEEDBACK_CHARS {
            return Err("Areas to improve feedback must be at least 10 characters");
        }

        Ok(CreateFeedbackRequest {
            employee_id,
            strengths: strengths.to_string(),
            areas_to_improve: areas.to_string(),
            sentiment,
        })
    }
}

/// Edits to an existing feedback entry. All three fields are resubmitted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedbackEdit {
    pub strengths: String,
    pub areas_to_improve: String,
    pub sentiment: Option<Sentiment>,
}

impl FeedbackEdit {
    /// Start editing from the stored values.
    pub fn from_feedback(feedback: &core_types::Feedback) -> Self {
        Self {
            strengths: feedback.strengths.clone(),
            areas_to_improve: feedback.areas_to_improve.clone(),
            sentiment: Some(feedback.sentiment),
        }
    }

    pub fn validate(&self) -> Result<UpdateFeedbackRequest, &'static str> {
        let strengths = self.strengths.trim();
        let areas = self.areas_to_improve.trim();

        let Some(sentiment) = self.sentiment.filter(|_| !strengths.is_empty() && !areas.is_empty())
        else {
            return Err("All fields are required");
        };
        if char_len(strengths) < MIN_FEEDBACK_CHARS {
            return Err("Strengths must be at least 10 characters long");
        }
        if char_len(areas) < MIN_FEEDBACK_CHARS {
            return Err("Areas to improve must be at least 10 characters long");
        }

        Ok(UpdateFeedbackRequest {
            strengths: Some(strengths.to_string()),
            areas_to_improve: Some(areas.to_string()),
            sentiment: Some(sentiment),
        })
    }
}

/// Fields of the new team member form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MemberField {
    Username,
    Email,
    Password,
    ConfirmPassword,
}

/// Per-field validation messages.
pub type FieldErrors = BTreeMap<MemberField, &'static str>;

/// A new team member as typed into the form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewMemberDraft {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl NewMemberDraft {
    /// Check every field; all problems are reported at once.
    pub fn validate(&self) -> Result<CreateUserRequest, FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.username.trim().is_empty() {
            errors.insert(MemberField::Username, "Username is required");
        } else if char_len(&self.username) < MIN_USERNAME_CHARS {
            errors.insert(MemberField::Username, "Username must be at least 3 characters");
        } else if !USERNAME_RE.is_match(&self.username) {
            errors.insert(
                MemberField::Username,
                "Username can only contain letters, numbers, and underscores",
            );
        }

        if self.email.trim().is_empty() {
            errors.insert(MemberField::Email, "Email is required");
        } else if !is_valid_email(&self.email) {
            errors.insert(MemberField::Email, "Please enter a valid email address");
        }

        if self.password.is_empty() {
            errors.insert(MemberField::Password, "Password is required");
        } else if char_len(&self.password) < MIN_PASSWORD_CHARS {
            errors.insert(MemberField::Password, "Password must be at least 6 characters");
        }

        if self.confirm_password.is_empty() {
            errors.insert(MemberField::ConfirmPassword, "Please confirm your password");
        } else if self.password != self.confirm_password {
            errors.insert(MemberField::ConfirmPassword, "Passwords do not match");
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(CreateUserRequest::employee(
            self.username.clone(),
            self.email.clone(),
            self.password.clone(),
        ))
    }
}

/// Username/email edits for an existing user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserEdit {
    pub username: String,
    pub email: String,
}

impl UserEdit {
    pub fn from_user(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone().unwrap_or_default(),
        }
    }

    /// Changes relative to `original`; `Ok(None)` when nothing changed.
    ///
    /// A cleared email is not sent.
    pub fn changes(&self, original: &User) -> Result<Option<UpdateUserRequest>, &'static str> {
        if self.username.trim().is_empty() {
            return Err("Username is required");
        }
        if char_len(&self.username) < MIN_USERNAME_CHARS {
            return Err("Username must be at least 3 characters");
        }
        if !self.email.is_empty() && !is_valid_email(&self.email) {
            return Err("Please enter a valid email address");
        }

        let mut update = UpdateUserRequest::default();
        if self.username != original.username {
            update.username = Some(self.username.trim().to_string());
        }
        if self.email != original.email.as_deref().unwrap_or_default() {
            let email = self.email.trim();
            update.email = (!email.is_empty()).then(|| email.to_string());
        }

        Ok((!update.is_empty()).then_some(update))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use core_types::Role;

    fn complete_draft() -> FeedbackDraft {
        FeedbackDraft {
            employee_id: Some(3),
            strengths: "  Consistently unblocks others  ".to_string(),
            areas_to_improve: "Document decisions in writing".to_string(),
            sentiment: Some(Sentiment::Positive),
        }
    }

    fn member_draft() -> NewMemberDraft {
        NewMemberDraft {
            username: "carol_dev".to_string(),
            email: "carol@example.com".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
        }
    }

    fn user() -> User {
        User {
            id: 3,
            username: "alice_employee".to_string(),
            email: Some("alice@example.com".to_string()),
            role: Role::Employee,
            manager_id: Some(1),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_feedback_draft_trims_on_success() {
        let req = complete_draft().validate().unwrap();
        assert_eq!(req.strengths, "Consistently unblocks others");
        assert_eq!(req.employee_id, 3);
        assert_eq!(req.sentiment, Sentiment::Positive);
    }

    #[test]
    fn test_feedback_draft_error_order() {
        let empty = FeedbackDraft::default();
        assert_eq!(empty.validate(), Err("Please select a team member"));

        let draft = FeedbackDraft {
            employee_id: Some(3),
            ..Default::default()
        };
        assert_eq!(draft.validate(), Err("Please provide strengths feedback"));

        let draft = FeedbackDraft {
            areas_to_improve: "   ".to_string(),
            ..complete_draft()
        };
        assert_eq!(draft.validate(), Err("Please provide areas to improve feedback"));

        let draft = FeedbackDraft {
            sentiment: None,
            strengths: "short".to_string(),
            ..complete_draft()
        };
        // Missing sentiment is reported before length problems
        assert_eq!(draft.validate(), Err("Please select a sentiment"));
    }

    #[test]
    fn test_feedback_draft_minimum_length() {
        let draft = FeedbackDraft {
            strengths: "  too short   ".to_string(),
            ..complete_draft()
        };
        // "too short" is 9 characters once trimmed
        assert_eq!(
            draft.validate(),
            Err("Strengths feedback must be at least 10 characters")
        );

        let draft = FeedbackDraft {
            areas_to_improve: "Be nicer".to_string(),
            ..complete_draft()
        };
        assert_eq!(
            draft.validate(),
            Err("Areas to improve feedback must be at least 10 characters")
        );

        let exactly_ten = FeedbackDraft {
            strengths: "abcdefghij".to_string(),
            ..complete_draft()
        };
        assert!(exactly_ten.validate().is_ok());
    }

    #[test]
    fn test_feedback_draft_counts_characters_not_bytes() {
        let draft = FeedbackDraft {
            strengths: "ééééé".to_string(),
            ..complete_draft()
        };
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_feedback_draft_completeness() {
        assert!(complete_draft().is_complete());
        assert!(!FeedbackDraft::default().is_complete());
    }

    #[test]
    fn test_feedback_edit_rules() {
        let edit = FeedbackEdit {
            strengths: "Great mentoring".to_string(),
            areas_to_improve: String::new(),
            sentiment: Some(Sentiment::Neutral),
        };
        assert_eq!(edit.validate(), Err("All fields are required"));

        let edit = FeedbackEdit {
            strengths: "Great mentoring".to_string(),
            areas_to_improve: "More tests please".to_string(),
            sentiment: None,
        };
        assert_eq!(edit.validate(), Err("All fields are required"));

        let edit = FeedbackEdit {
            strengths: "Good".to_string(),
            areas_to_improve: "More tests please".to_string(),
            sentiment: Some(Sentiment::Neutral),
        };
        assert_eq!(
            edit.validate(),
            Err("Strengths must be at least 10 characters long")
        );

        let edit = FeedbackEdit {
            strengths: "Great mentoring".to_string(),
            areas_to_improve: "Tests".to_string(),
            sentiment: Some(Sentiment::Neutral),
        };
        assert_eq!(
            edit.validate(),
            Err("Areas to improve must be at least 10 characters long")
        );
    }

    #[test]
    fn test_feedback_edit_sends_all_fields() {
        let edit = FeedbackEdit {
            strengths: " Great mentoring ".to_string(),
            areas_to_improve: "More tests please".to_string(),
            sentiment: Some(Sentiment::Negative),
        };

        let req = edit.validate().unwrap();

        assert_eq!(req.strengths.as_deref(), Some("Great mentoring"));
        assert_eq!(req.sentiment, Some(Sentiment::Negative));
    }

    #[test]
    fn test_new_member_valid() {
        let req = member_draft().validate().unwrap();
        assert_eq!(req.role, Role::Employee);
        assert_eq!(req.username, "carol_dev");
    }

    #[test]
    fn test_new_member_password_mismatch() {
        let draft = NewMemberDraft {
            confirm_password: "secret2".to_string(),
            ..member_draft()
        };

        let errors = draft.validate().unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[&MemberField::ConfirmPassword], "Passwords do not match");
    }

    #[test]
    fn test_new_member_reports_every_field() {
        let errors = NewMemberDraft::default().validate().unwrap_err();

        assert_eq!(errors[&MemberField::Username], "Username is required");
        assert_eq!(errors[&MemberField::Email], "Email is required");
        assert_eq!(errors[&MemberField::Password], "Password is required");
        assert_eq!(errors[&MemberField::ConfirmPassword], "Please confirm your password");
    }

    #[test]
    fn test_new_member_field_formats() {
        let draft = NewMemberDraft {
            username: "ab".to_string(),
            email: "not-an-email".to_string(),
            password: "12345".to_string(),
            confirm_password: "12345".to_string(),
        };
        let errors = draft.validate().unwrap_err();
        assert_eq!(errors[&MemberField::Username], "Username must be at least 3 characters");
        assert_eq!(errors[&MemberField::Email], "Please enter a valid email address");
        assert_eq!(errors[&MemberField::Password], "Password must be at least 6 characters");

        let draft = NewMemberDraft {
            username: "carol.dev".to_string(),
            ..member_draft()
        };
        let errors = draft.validate().unwrap_err();
        assert_eq!(
            errors[&MemberField::Username],
            "Username can only contain letters, numbers, and underscores"
        );
    }

    #[test]
    fn test_email_pattern() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.de"));
        assert!(!is_valid_email("@c.de"));
    }

    #[test]
    fn test_user_edit_no_changes() {
        let original = user();
        let edit = UserEdit::from_user(&original);
        assert_eq!(edit.changes(&original), Ok(None));
    }

    #[test]
    fn test_user_edit_only_changed_fields() {
        let original = user();
        let edit = UserEdit {
            username: "alice_e".to_string(),
            ..UserEdit::from_user(&original)
        };

        let update = edit.changes(&original).unwrap().unwrap();

        assert_eq!(update.username.as_deref(), Some("alice_e"));
        assert!(update.email.is_none());
    }

    #[test]
    fn test_user_edit_cleared_email_not_sent() {
        let original = user();
        let edit = UserEdit {
            email: String::new(),
            ..UserEdit::from_user(&original)
        };
        assert_eq!(edit.changes(&original), Ok(None));
    }

    #[test]
    fn test_user_edit_validation() {
        let original = user();
        let edit = UserEdit {
            username: "al".to_string(),
            ..UserEdit::from_user(&original)
        };
        assert_eq!(edit.changes(&original), Err("Username must be at least 3 characters"));

        let edit = UserEdit {
            email: "alice@".to_string(),
            ..UserEdit::from_user(&original)
        };
        assert_eq!(edit.changes(&original), Err("Please enter a valid email address"));
    }
}
