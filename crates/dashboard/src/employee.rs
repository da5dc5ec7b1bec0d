//! Employee dashboard view state.

use api_client::{ApiClient, Result};
use core_types::{DashboardStats, FeedbackWithDetails};

use crate::{Outcome, summary};

pub const LOAD_FAILED: &str = "Failed to load dashboard data. Please refresh the page.";

pub const ACKNOWLEDGE_FAILED: &str = "Failed to acknowledge feedback. Please try again.";

/// A change to [`EmployeeDashboard`] produced by a finished request.
#[derive(Debug, Clone)]
pub enum EmployeeUpdate {
    Loaded {
        feedback: Vec<FeedbackWithDetails>,
        stats: DashboardStats,
    },
    /// Marks one item acknowledged without touching the rest of the list.
    Acknowledged(i64),
    Stats(DashboardStats),
    Failed(String),
}

/// Feedback received by the signed-in employee, plus their stats.
#[derive(Clone)]
pub struct EmployeeDashboard {
    client: ApiClient,
    pub feedback: Vec<FeedbackWithDetails>,
    pub stats: Option<DashboardStats>,
    pub error: Option<String>,
}

impl EmployeeDashboard {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            feedback: Vec::new(),
            stats: None,
            error: None,
        }
    }

    pub fn apply(&mut self, update: EmployeeUpdate) {
        match update {
            EmployeeUpdate::Loaded { feedback, stats } => {
                self.feedback = feedback;
                self.stats = Some(stats);
                self.error = None;
            }
            EmployeeUpdate::Acknowledged(id) => {
                if let Some(item) = self.feedback.iter_mut().find(|f| f.feedback.id == id) {
                    item.feedback.is_acknowledged = true;
                }
            }
            EmployeeUpdate::Stats(stats) => self.stats = Some(stats),
            EmployeeUpdate::Failed(message) => self.error = Some(message),
        }
    }

    /// Fetch received feedback and stats together.
    pub async fn run_load(&self) -> Outcome<EmployeeUpdate> {
        let loaded = futures::try_join!(
            self.client.my_received_feedback(),
            self.client.dashboard_stats(),
        );

        match loaded {
            Ok((feedback, stats)) => {
                Outcome::new(vec![EmployeeUpdate::Loaded { feedback, stats }], Ok(()))
            }
            Err(e) => {
                let failed = EmployeeUpdate::Failed(LOAD_FAILED.to_string());
                Outcome::new(vec![failed], Err(e))
            }
        }
    }

    /// Acknowledge one item. The local copy is flipped in place rather than
    /// re-fetching the list; only the stats are reloaded.
    pub async fn run_acknowledge(&self, feedback_id: i64) -> Outcome<EmployeeUpdate> {
        let mut updates = Vec::new();
        let result = self.try_acknowledge(feedback_id, &mut updates).await;
        if result.is_err() {
            updates.push(EmployeeUpdate::Failed(ACKNOWLEDGE_FAILED.to_string()));
        }
        Outcome::new(updates, result)
    }

    async fn try_acknowledge(
        &self,
        feedback_id: i64,
        updates: &mut Vec<EmployeeUpdate>,
    ) -> Result<()> {
        self.client.acknowledge_feedback(feedback_id).await?;
        updates.push(EmployeeUpdate::Acknowledged(feedback_id));

        updates.push(EmployeeUpdate::Stats(self.client.dashboard_stats().await?));
        Ok(())
    }

    pub async fn load(&mut self) -> Result<()> {
        let outcome = self.run_load().await;
        outcome.apply_to(|u| self.apply(u))
    }

    pub async fn acknowledge(&mut self, feedback_id: i64) -> Result<()> {
        let outcome = self.run_acknowledge(feedback_id).await;
        outcome.apply_to(|u| self.apply(u))
    }

    pub fn pending(&self) -> Vec<FeedbackWithDetails> {
        summary::pending(&self.feedback)
    }

    pub fn pending_count(&self) -> usize {
        self.feedback
            .iter()
            .filter(|f| !f.feedback.is_acknowledged)
            .count()
    }
}
