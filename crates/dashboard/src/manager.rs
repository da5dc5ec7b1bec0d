//! Manager dashboard view state.

use api_client::{ApiClient, Result};
use core_types::{DashboardStats, FeedbackWithDetails, User};
use tracing::debug;
use web_types::{
    CreateFeedbackRequest, CreateUserRequest, UpdateFeedbackRequest, UpdateUserRequest,
};

use crate::Outcome;
use crate::summary::{self, TeamCounts, TeamRow};

/// Shown when the initial load fails; paired with a Retry action.
pub const LOAD_FAILED: &str = "Failed to load dashboard data. Please refresh the page.";

/// Shown when a member's feedback cannot be fetched.
pub const MEMBER_FEEDBACK_FAILED: &str = "Failed to load employee feedback";

/// What the manager is looking at.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ManagerView {
    #[default]
    Overview,
    NewFeedback,
    TeamManagement,
    MemberFeedback {
        member: User,
        feedback: Vec<FeedbackWithDetails>,
    },
}

/// A change to [`ManagerDashboard`] produced by a finished request or a
/// navigation.
#[derive(Debug, Clone)]
pub enum ManagerUpdate {
    Loaded {
        team: Vec<User>,
        feedback: Vec<FeedbackWithDetails>,
        stats: DashboardStats,
    },
    Team(Vec<User>),
    /// Replaces the displayed copy of one member.
    Member(User),
    Given(Vec<FeedbackWithDetails>),
    /// Fresh feedback for a member; dropped unless that member's view is
    /// still open.
    MemberFeedback {
        member_id: i64,
        feedback: Vec<FeedbackWithDetails>,
    },
    Stats(DashboardStats),
    Show(ManagerView),
    BackToOverview,
    Failed(String),
}

/// Data and current view of the manager dashboard.
///
/// Every mutation goes to the backend first and then re-fetches the lists
/// it affects.
#[derive(Clone)]
pub struct ManagerDashboard {
    client: ApiClient,
    pub team: Vec<User>,
    pub feedback: Vec<FeedbackWithDetails>,
    pub stats: Option<DashboardStats>,
    pub view: ManagerView,
    pub error: Option<String>,
}

impl ManagerDashboard {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            team: Vec::new(),
            feedback: Vec::new(),
            stats: None,
            view: ManagerView::Overview,
            error: None,
        }
    }

    pub fn apply(&mut self, update: ManagerUpdate) {
        match update {
            ManagerUpdate::Loaded {
                team,
                feedback,
                stats,
            } => {
                self.team = team;
                self.feedback = feedback;
                self.stats = Some(stats);
                self.error = None;
            }
            ManagerUpdate::Team(team) => self.team = team,
            ManagerUpdate::Member(user) => {
                if let Some(member) = self.team.iter_mut().find(|m| m.id == user.id) {
                    *member = user;
                }
            }
            ManagerUpdate::Given(feedback) => self.feedback = feedback,
            ManagerUpdate::MemberFeedback {
                member_id,
                feedback,
            } => {
                if let ManagerView::MemberFeedback {
                    member,
                    feedback: shown,
                } = &mut self.view
                {
                    if member.id == member_id {
                        *shown = feedback;
                    }
                }
            }
            ManagerUpdate::Stats(stats) => self.stats = Some(stats),
            ManagerUpdate::Show(view) => self.view = view,
            ManagerUpdate::BackToOverview => {
                self.view = ManagerView::Overview;
                self.error = None;
            }
            ManagerUpdate::Failed(message) => self.error = Some(message),
        }
    }

    /// Fetch team, given feedback and stats together.
    pub async fn run_load(&self) -> Outcome<ManagerUpdate> {
        let loaded = futures::try_join!(
            self.client.my_team(),
            self.client.my_given_feedback(),
            self.client.dashboard_stats(),
        );

        match loaded {
            Ok((team, feedback, stats)) => Outcome::new(
                vec![ManagerUpdate::Loaded {
                    team,
                    feedback,
                    stats,
                }],
                Ok(()),
            ),
            Err(e) => {
                let failed = ManagerUpdate::Failed(LOAD_FAILED.to_string());
                Outcome::new(vec![failed], Err(e))
            }
        }
    }

    pub async fn run_submit_feedback(
        &self,
        request: &CreateFeedbackRequest,
    ) -> Outcome<ManagerUpdate> {
        let mut updates = Vec::new();
        let result = self.try_submit_feedback(request, &mut updates).await;
        Outcome::new(updates, result)
    }

    async fn try_submit_feedback(
        &self,
        request: &CreateFeedbackRequest,
        updates: &mut Vec<ManagerUpdate>,
    ) -> Result<()> {
        self.client.create_feedback(request).await?;

        updates.push(ManagerUpdate::Given(self.client.my_given_feedback().await?));
        updates.push(ManagerUpdate::Stats(self.client.dashboard_stats().await?));
        updates.push(ManagerUpdate::Show(ManagerView::Overview));
        Ok(())
    }

    /// Save an edit, then refresh the given list, the member view open when
    /// the edit started, and the stats.
    pub async fn run_edit_feedback(
        &self,
        feedback_id: i64,
        update: &UpdateFeedbackRequest,
    ) -> Outcome<ManagerUpdate> {
        let mut updates = Vec::new();
        let result = self.try_edit_feedback(feedback_id, update, &mut updates).await;
        Outcome::new(updates, result)
    }

    async fn try_edit_feedback(
        &self,
        feedback_id: i64,
        update: &UpdateFeedbackRequest,
        updates: &mut Vec<ManagerUpdate>,
    ) -> Result<()> {
        self.client.update_feedback(feedback_id, update).await?;

        updates.push(ManagerUpdate::Given(self.client.my_given_feedback().await?));
        if let ManagerView::MemberFeedback { member, .. } = &self.view {
            let feedback = self.client.team_member_feedback(member.id).await?;
            updates.push(ManagerUpdate::MemberFeedback {
                member_id: member.id,
                feedback,
            });
        }
        updates.push(ManagerUpdate::Stats(self.client.dashboard_stats().await?));
        Ok(())
    }

    pub async fn run_create_member(
        &self,
        request: &CreateUserRequest,
    ) -> Outcome<ManagerUpdate, User> {
        let mut updates = Vec::new();
        let result = self.try_create_member(request, &mut updates).await;
        Outcome::new(updates, result)
    }

    async fn try_create_member(
        &self,
        request: &CreateUserRequest,
        updates: &mut Vec<ManagerUpdate>,
    ) -> Result<User> {
        let created = self.client.create_user(request).await?;

        updates.push(ManagerUpdate::Team(self.client.my_team().await?));
        updates.push(ManagerUpdate::Stats(self.client.dashboard_stats().await?));
        Ok(created)
    }

    pub async fn run_update_member(
        &self,
        user_id: i64,
        update: &UpdateUserRequest,
    ) -> Outcome<ManagerUpdate> {
        let mut updates = Vec::new();
        let result = self.try_update_member(user_id, update, &mut updates).await;
        Outcome::new(updates, result)
    }

    async fn try_update_member(
        &self,
        user_id: i64,
        update: &UpdateUserRequest,
        updates: &mut Vec<ManagerUpdate>,
    ) -> Result<()> {
        self.client.update_user(user_id, update).await?;

        updates.push(ManagerUpdate::Team(self.client.my_team().await?));
        Ok(())
    }

    /// Flip a member's active flag. The returned user replaces the displayed
    /// one before team and stats are re-fetched.
    pub async fn run_toggle_member(&self, user_id: i64) -> Outcome<ManagerUpdate, User> {
        let mut updates = Vec::new();
        let result = self.try_toggle_member(user_id, &mut updates).await;
        Outcome::new(updates, result)
    }

    async fn try_toggle_member(
        &self,
        user_id: i64,
        updates: &mut Vec<ManagerUpdate>,
    ) -> Result<User> {
        let updated = self.client.toggle_user_status(user_id).await?;
        updates.push(ManagerUpdate::Member(updated.clone()));

        updates.push(ManagerUpdate::Team(self.client.my_team().await?));
        updates.push(ManagerUpdate::Stats(self.client.dashboard_stats().await?));
        Ok(updated)
    }

    pub async fn run_open_member_feedback(&self, member: User) -> Outcome<ManagerUpdate> {
        match self.client.team_member_feedback(member.id).await {
            Ok(feedback) => {
                debug!(member = member.id, count = feedback.len(), "opened member feedback");
                let view = ManagerView::MemberFeedback { member, feedback };
                Outcome::new(vec![ManagerUpdate::Show(view)], Ok(()))
            }
            Err(e) => {
                let failed = ManagerUpdate::Failed(MEMBER_FEEDBACK_FAILED.to_string());
                Outcome::new(vec![failed], Err(e))
            }
        }
    }

    pub async fn load(&mut self) -> Result<()> {
        let outcome = self.run_load().await;
        outcome.apply_to(|u| self.apply(u))
    }

    pub async fn submit_feedback(&mut self, request: &CreateFeedbackRequest) -> Result<()> {
        let outcome = self.run_submit_feedback(request).await;
        outcome.apply_to(|u| self.apply(u))
    }

    pub async fn edit_feedback(
        &mut self,
        feedback_id: i64,
        update: &UpdateFeedbackRequest,
    ) -> Result<()> {
        let outcome = self.run_edit_feedback(feedback_id, update).await;
        outcome.apply_to(|u| self.apply(u))
    }

    pub async fn create_member(&mut self, request: &CreateUserRequest) -> Result<User> {
        let outcome = self.run_create_member(request).await;
        outcome.apply_to(|u| self.apply(u))
    }

    pub async fn update_member(&mut self, user_id: i64, update: &UpdateUserRequest) -> Result<()> {
        let outcome = self.run_update_member(user_id, update).await;
        outcome.apply_to(|u| self.apply(u))
    }

    pub async fn toggle_member(&mut self, user_id: i64) -> Result<User> {
        let outcome = self.run_toggle_member(user_id).await;
        outcome.apply_to(|u| self.apply(u))
    }

    pub async fn open_member_feedback(&mut self, member: User) -> Result<()> {
        let outcome = self.run_open_member_feedback(member).await;
        outcome.apply_to(|u| self.apply(u))
    }

    /// Switch to a form view. Member views are opened with
    /// [`Self::open_member_feedback`].
    pub fn show(&mut self, view: ManagerView) {
        self.apply(ManagerUpdate::Show(view));
    }

    pub fn back_to_overview(&mut self) {
        self.apply(ManagerUpdate::BackToOverview);
    }

    /// Members that can receive feedback.
    pub fn active_team(&self) -> Vec<User> {
        self.team.iter().filter(|m| m.is_active).cloned().collect()
    }

    /// Team headcount, taken from the backend stats when they carry team
    /// figures and counted from the loaded team otherwise.
    pub fn member_counts(&self) -> TeamCounts {
        let Some(stats) = &self.stats else {
            return TeamCounts::of(&self.team);
        };
        match (stats.team_size, stats.active_team_size) {
            (Some(total), Some(active)) => TeamCounts {
                total: total as usize,
                active: active as usize,
                inactive: stats.inactive_team_size() as usize,
            },
            _ => TeamCounts::of(&self.team),
        }
    }

    pub fn team_rows(&self) -> Vec<TeamRow> {
        summary::team_rows(&self.team, &self.feedback)
    }

    pub fn recent_feedback(&self) -> &[FeedbackWithDetails] {
        summary::recent(&self.feedback)
    }
}
