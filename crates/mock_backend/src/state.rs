//! In-memory data behind the mock backend.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use chrono::Utc;
use core_types::{DashboardStats, Feedback, FeedbackWithDetails, Role, Sentiment, User};
use serde_json::{Value, json};
use tokio::sync::RwLock;
use uuid::Uuid;
use web_types::{CreateFeedbackRequest, CreateUserRequest, UpdateFeedbackRequest, UpdateUserRequest};

use crate::error::{BackendError, Result};

/// Password of every seeded account.
pub const DEMO_PASSWORD: &str = "password";

/// Shared application state.
#[derive(Clone, Default)]
pub struct AppState {
    store: Arc<RwLock<Store>>,
    requests: Arc<AtomicUsize>,
    faults: Arc<Faults>,
}

/// Misbehaviour switched on by tests.
#[derive(Default)]
struct Faults {
    malformed_bodies: AtomicBool,
    unregistered_tokens: AtomicBool,
}

#[derive(Default)]
struct Store {
    users: Vec<Account>,
    feedback: Vec<Feedback>,
    tokens: HashMap<String, i64>,
    next_user_id: i64,
    next_feedback_id: i64,
}

struct Account {
    user: User,
    password: String,
}

impl Store {
    fn user(&self, id: i64) -> Option<&User> {
        self.users.iter().map(|a| &a.user).find(|u| u.id == id)
    }

    fn user_mut(&mut self, id: i64) -> Option<&mut User> {
        self.users.iter_mut().map(|a| &mut a.user).find(|u| u.id == id)
    }

    fn username_taken(&self, username: &str, except: Option<i64>) -> bool {
        self.users
            .iter()
            .any(|a| a.user.username == username && Some(a.user.id) != except)
    }

    fn team_of(&self, manager_id: i64) -> Vec<User> {
        self.users
            .iter()
            .filter(|a| a.user.manager_id == Some(manager_id))
            .map(|a| a.user.clone())
            .collect()
    }

    fn insert_user(&mut self, mut user: User, password: &str) -> User {
        self.next_user_id += 1;
        user.id = self.next_user_id;
        self.users.push(Account {
            user: user.clone(),
            password: password.to_string(),
        });
        user
    }

    fn with_details(&self, feedback: &Feedback) -> FeedbackWithDetails {
        let name = |id| {
            self.user(id)
                .map(|u| u.username.clone())
                .unwrap_or_default()
        };
        FeedbackWithDetails {
            feedback: feedback.clone(),
            employee_name: name(feedback.employee_id),
            manager_name: name(feedback.manager_id),
        }
    }

    /// Newest first.
    fn list(&self, keep: impl Fn(&Feedback) -> bool) -> Vec<FeedbackWithDetails> {
        let mut items: Vec<&Feedback> = self.feedback.iter().filter(|f| keep(*f)).collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        items.into_iter().map(|f| self.with_details(f)).collect()
    }

    /// Managers may manage their own reports.
    fn managed_member(&self, manager: &User, member_id: i64) -> Result<&User> {
        let member = self
            .user(member_id)
            .ok_or_else(|| BackendError::NotFound("User not found".to_string()))?;
        if member.manager_id != Some(manager.id) {
            return Err(BackendError::Forbidden(
                "User is not a member of your team".to_string(),
            ));
        }
        Ok(member)
    }
}

fn require_manager(user: &User) -> Result<()> {
    if user.is_manager() {
        Ok(())
    } else {
        Err(BackendError::Forbidden(
            "Only managers can perform this action".to_string(),
        ))
    }
}

fn new_user(username: &str, role: Role, manager_id: Option<i64>) -> User {
    let now = Utc::now();
    User {
        id: 0,
        username: username.to_string(),
        email: Some(format!("{username}@example.com")),
        role,
        manager_id,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

fn count_stats<'a>(items: impl Iterator<Item = &'a Feedback>) -> DashboardStats {
    let mut stats = DashboardStats::default();
    for f in items {
        stats.total_feedback += 1;
        match f.sentiment {
            Sentiment::Positive => stats.positive_feedback += 1,
            Sentiment::Neutral => stats.neutral_feedback += 1,
            Sentiment::Negative => stats.negative_feedback += 1,
        }
        if f.is_acknowledged {
            stats.acknowledged_feedback += 1;
        }
    }
    stats
}

impl AppState {
    /// State holding the demo accounts: two managers and two employees
    /// reporting to `john_manager`.
    pub fn seeded() -> Self {
        let mut store = Store::default();
        let john = store.insert_user(new_user("john_manager", Role::Manager, None), DEMO_PASSWORD);
        store.insert_user(new_user("sarah_manager", Role::Manager, None), DEMO_PASSWORD);
        store.insert_user(
            new_user("alice_employee", Role::Employee, Some(john.id)),
            DEMO_PASSWORD,
        );
        store.insert_user(
            new_user("bob_employee", Role::Employee, Some(john.id)),
            DEMO_PASSWORD,
        );

        Self {
            store: Arc::new(RwLock::new(store)),
            ..Self::default()
        }
    }

    /// Number of requests received so far.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub(crate) fn record_request(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }

    /// Answer every following request with a 200 whose body is not JSON.
    pub fn serve_malformed_bodies(&self, on: bool) {
        self.faults.malformed_bodies.store(on, Ordering::SeqCst);
    }

    pub(crate) fn serves_malformed_bodies(&self) -> bool {
        self.faults.malformed_bodies.load(Ordering::SeqCst)
    }

    /// Let logins succeed but hand out tokens that no endpoint accepts.
    pub fn issue_unregistered_tokens(&self, on: bool) {
        self.faults.unregistered_tokens.store(on, Ordering::SeqCst);
    }

    // --- auth ---

    pub async fn login(&self, username: &str, password: &str) -> Result<String> {
        let mut store = self.store.write().await;
        let account = store
            .users
            .iter()
            .find(|a| a.user.username == username && a.password == password)
            .ok_or(BackendError::BadCredentials)?;
        if !account.user.is_active {
            return Err(BackendError::BadRequest("Inactive user".to_string()));
        }

        let user_id = account.user.id;
        let token = Uuid::new_v4().to_string();
        if !self.faults.unregistered_tokens.load(Ordering::SeqCst) {
            store.tokens.insert(token.clone(), user_id);
        }
        Ok(token)
    }

    pub async fn authenticate(&self, token: &str) -> Result<User> {
        let store = self.store.read().await;
        store
            .tokens
            .get(token)
            .and_then(|id| store.user(*id))
            .filter(|u| u.is_active)
            .cloned()
            .ok_or(BackendError::Unauthorized)
    }

    pub async fn revoke(&self, token: &str) {
        self.store.write().await.tokens.remove(token);
    }

    /// Drop every issued token, as if they had all expired.
    pub async fn expire_all_tokens(&self) {
        self.store.write().await.tokens.clear();
    }

    // --- users ---

    pub async fn create_user(&self, caller: &User, req: CreateUserRequest) -> Result<User> {
        require_manager(caller)?;
        if req.role != Role::Employee {
            return Err(BackendError::BadRequest(
                "Managers can only create employee accounts".to_string(),
            ));
        }

        let mut store = self.store.write().await;
        if store.username_taken(&req.username, None) {
            return Err(BackendError::BadRequest(
                "Username already registered".to_string(),
            ));
        }

        let mut user = new_user(&req.username, Role::Employee, Some(caller.id));
        user.email = Some(req.email);
        Ok(store.insert_user(user, &req.password))
    }

    pub async fn my_team(&self, caller: &User) -> Result<Vec<User>> {
        require_manager(caller)?;
        Ok(self.store.read().await.team_of(caller.id))
    }

    pub async fn get_user(&self, caller: &User, user_id: i64) -> Result<User> {
        let store = self.store.read().await;
        let user = store
            .user(user_id)
            .ok_or_else(|| BackendError::NotFound("User not found".to_string()))?;

        let visible = user.id == caller.id
            || user.manager_id == Some(caller.id)
            || caller.manager_id == Some(user.id);
        if !visible {
            return Err(BackendError::Forbidden(
                "Not allowed to view this user".to_string(),
            ));
        }
        Ok(user.clone())
    }

    pub async fn update_user(
        &self,
        caller: &User,
        user_id: i64,
        req: UpdateUserRequest,
    ) -> Result<User> {
        let mut store = self.store.write().await;
        if user_id != caller.id {
            require_manager(caller)?;
            store.managed_member(caller, user_id)?;
        }
        if let Some(ref username) = req.username
            && store.username_taken(username, Some(user_id))
        {
            return Err(BackendError::BadRequest(
                "Username already registered".to_string(),
            ));
        }
        if let Some(manager_id) = req.manager_id {
            require_manager(caller)?;
            let is_manager = store.user(manager_id).is_some_and(User::is_manager);
            if !is_manager {
                return Err(BackendError::BadRequest("Unknown manager".to_string()));
            }
        }

        let user = store
            .user_mut(user_id)
            .ok_or_else(|| BackendError::NotFound("User not found".to_string()))?;
        if let Some(username) = req.username {
            user.username = username;
        }
        if let Some(email) = req.email {
            user.email = Some(email);
        }
        if let Some(manager_id) = req.manager_id {
            user.manager_id = Some(manager_id);
        }
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    pub async fn toggle_status(&self, caller: &User, user_id: i64) -> Result<User> {
        require_manager(caller)?;
        let mut store = self.store.write().await;
        store.managed_member(caller, user_id)?;

        let user = store
            .user_mut(user_id)
            .ok_or_else(|| BackendError::NotFound("User not found".to_string()))?;
        user.is_active = !user.is_active;
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    pub async fn team_stats(&self, caller: &User, manager_id: i64) -> Result<Value> {
        require_manager(caller)?;
        if caller.id != manager_id {
            return Err(BackendError::Forbidden(
                "Not allowed to view another manager's team".to_string(),
            ));
        }

        let store = self.store.read().await;
        let team = store.team_of(manager_id);
        let members: Vec<Value> = team
            .iter()
            .map(|member| {
                let received = count_stats(
                    store
                        .feedback
                        .iter()
                        .filter(|f| f.employee_id == member.id && f.manager_id == manager_id),
                );
                json!({
                    "id": member.id,
                    "username": member.username,
                    "is_active": member.is_active,
                    "feedback_count": received.total_feedback,
                    "acknowledged_count": received.acknowledged_feedback,
                })
            })
            .collect();

        Ok(json!({
            "manager_id": manager_id,
            "team_size": team.len(),
            "active_team_size": team.iter().filter(|u| u.is_active).count(),
            "members": members,
        }))
    }

    // --- feedback ---

    pub async fn create_feedback(
        &self,
        caller: &User,
        req: CreateFeedbackRequest,
    ) -> Result<Feedback> {
        require_manager(caller)?;
        let mut store = self.store.write().await;
        let in_team = store
            .user(req.employee_id)
            .is_some_and(|u| u.manager_id == Some(caller.id) && u.is_active);
        if !in_team {
            return Err(BackendError::NotFound(
                "Employee not found in your team".to_string(),
            ));
        }

        store.next_feedback_id += 1;
        let now = Utc::now();
        let feedback = Feedback {
            id: store.next_feedback_id,
            employee_id: req.employee_id,
            manager_id: caller.id,
            strengths: req.strengths,
            areas_to_improve: req.areas_to_improve,
            sentiment: req.sentiment,
            is_acknowledged: false,
            created_at: now,
            updated_at: now,
        };
        store.feedback.push(feedback.clone());
        Ok(feedback)
    }

    pub async fn received_feedback(&self, caller: &User) -> Vec<FeedbackWithDetails> {
        self.store
            .read()
            .await
            .list(|f| f.employee_id == caller.id)
    }

    pub async fn given_feedback(&self, caller: &User) -> Result<Vec<FeedbackWithDetails>> {
        require_manager(caller)?;
        Ok(self.store.read().await.list(|f| f.manager_id == caller.id))
    }

    pub async fn member_feedback(
        &self,
        caller: &User,
        employee_id: i64,
    ) -> Result<Vec<FeedbackWithDetails>> {
        require_manager(caller)?;
        let store = self.store.read().await;
        store.managed_member(caller, employee_id)?;
        Ok(store.list(|f| f.employee_id == employee_id))
    }

    pub async fn update_feedback(
        &self,
        caller: &User,
        feedback_id: i64,
        req: UpdateFeedbackRequest,
    ) -> Result<Feedback> {
        let mut store = self.store.write().await;
        let feedback = store
            .feedback
            .iter_mut()
            .find(|f| f.id == feedback_id)
            .ok_or_else(|| BackendError::NotFound("Feedback not found".to_string()))?;
        if feedback.manager_id != caller.id {
            return Err(BackendError::Forbidden(
                "Only the authoring manager can edit this feedback".to_string(),
            ));
        }

        if let Some(strengths) = req.strengths {
            feedback.strengths = strengths;
        }
        if let Some(areas) = req.areas_to_improve {
            feedback.areas_to_improve = areas;
        }
        if let Some(sentiment) = req.sentiment {
            feedback.sentiment = sentiment;
        }
        feedback.updated_at = Utc::now();
        Ok(feedback.clone())
    }

    pub async fn acknowledge(&self, caller: &User, feedback_id: i64) -> Result<Feedback> {
        let mut store = self.store.write().await;
        let feedback = store
            .feedback
            .iter_mut()
            .find(|f| f.id == feedback_id)
            .ok_or_else(|| BackendError::NotFound("Feedback not found".to_string()))?;
        if feedback.employee_id != caller.id {
            return Err(BackendError::Forbidden(
                "Only the recipient can acknowledge this feedback".to_string(),
            ));
        }

        feedback.is_acknowledged = true;
        Ok(feedback.clone())
    }

    // --- dashboard ---

    pub async fn stats(&self, caller: &User) -> DashboardStats {
        let store = self.store.read().await;
        match caller.role {
            Role::Manager => {
                let team = store.team_of(caller.id);
                DashboardStats {
                    team_size: Some(team.len() as u32),
                    active_team_size: Some(team.iter().filter(|u| u.is_active).count() as u32),
                    ..count_stats(store.feedback.iter().filter(|f| f.manager_id == caller.id))
                }
            }
            Role::Employee => {
                count_stats(store.feedback.iter().filter(|f| f.employee_id == caller.id))
            }
        }
    }

    pub async fn team_overview(&self, caller: &User) -> Result<Value> {
        require_manager(caller)?;
        let store = self.store.read().await;
        let overview: Vec<Value> = store
            .team_of(caller.id)
            .iter()
            .map(|member| {
                let received = store.list(|f| f.employee_id == member.id);
                json!({
                    "employee_id": member.id,
                    "username": member.username,
                    "is_active": member.is_active,
                    "total_feedback": received.len(),
                    "unacknowledged_feedback": received
                        .iter()
                        .filter(|f| !f.feedback.is_acknowledged)
                        .count(),
                    "latest_sentiment": received.first().map(|f| f.feedback.sentiment),
                })
            })
            .collect();
        Ok(Value::Array(overview))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn sign_in(state: &AppState, username: &str) -> User {
        let token = state.login(username, DEMO_PASSWORD).await.unwrap();
        state.authenticate(&token).await.unwrap()
    }

    fn feedback_for(employee_id: i64) -> CreateFeedbackRequest {
        CreateFeedbackRequest {
            employee_id,
            strengths: "Clear communicator".to_string(),
            areas_to_improve: "Estimate tasks more carefully".to_string(),
            sentiment: Sentiment::Positive,
        }
    }

    #[tokio::test]
    async fn test_seeded_team() {
        let state = AppState::seeded();
        let john = sign_in(&state, "john_manager").await;
        let sarah = sign_in(&state, "sarah_manager").await;

        assert_eq!(state.my_team(&john).await.unwrap().len(), 2);
        assert!(state.my_team(&sarah).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_login_rejects_wrong_password() {
        let state = AppState::seeded();
        let err = state.login("john_manager", "nope").await.unwrap_err();
        assert!(matches!(err, BackendError::BadCredentials));
    }

    #[tokio::test]
    async fn test_only_author_can_edit() {
        let state = AppState::seeded();
        let john = sign_in(&state, "john_manager").await;
        let sarah = sign_in(&state, "sarah_manager").await;
        let alice = sign_in(&state, "alice_employee").await;

        let feedback = state.create_feedback(&john, feedback_for(alice.id)).await.unwrap();

        let err = state
            .update_feedback(&sarah, feedback.id, UpdateFeedbackRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::Forbidden(_)));

        let err = state.create_feedback(&alice, feedback_for(alice.id)).await.unwrap_err();
        assert!(matches!(err, BackendError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_stats_by_role() {
        let state = AppState::seeded();
        let john = sign_in(&state, "john_manager").await;
        let alice = sign_in(&state, "alice_employee").await;

        let feedback = state.create_feedback(&john, feedback_for(alice.id)).await.unwrap();
        state.acknowledge(&alice, feedback.id).await.unwrap();

        let manager_stats = state.stats(&john).await;
        assert_eq!(manager_stats.total_feedback, 1);
        assert_eq!(manager_stats.acknowledged_feedback, 1);
        assert_eq!(manager_stats.team_size, Some(2));

        let employee_stats = state.stats(&alice).await;
        assert_eq!(employee_stats.positive_feedback, 1);
        assert!(employee_stats.team_size.is_none());
    }

    #[tokio::test]
    async fn test_deactivated_user_loses_access() {
        let state = AppState::seeded();
        let john = sign_in(&state, "john_manager").await;
        let token = state.login("bob_employee", DEMO_PASSWORD).await.unwrap();
        let bob = state.authenticate(&token).await.unwrap();

        let toggled = state.toggle_status(&john, bob.id).await.unwrap();
        assert!(!toggled.is_active);

        assert!(state.authenticate(&token).await.is_err());
        assert!(state.login("bob_employee", DEMO_PASSWORD).await.is_err());
    }
}
