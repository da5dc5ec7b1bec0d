//! View state for the feedback tracker.
//!
//! Shared by the Yew frontend and the CLI: dashboard controllers that own the
//! fetched data and the current view, client-side form validation, and the
//! small derived figures the screens display.
//!
//! Controllers split every operation in two. `run_*` methods only talk to the
//! backend and describe what changed as a list of updates; `apply` folds an
//! update into whatever state is current. A UI that lets requests overlap
//! applies each batch to its latest state instead of the copy the request
//! started from.

pub mod employee;
pub mod forms;
pub mod manager;
pub mod summary;

pub use employee::{EmployeeDashboard, EmployeeUpdate};
pub use forms::{FeedbackDraft, FeedbackEdit, FieldErrors, MemberField, NewMemberDraft, UserEdit};
pub use manager::{ManagerDashboard, ManagerUpdate, ManagerView};
pub use summary::{TeamCounts, TeamRow};

use api_client::Result;

/// Updates produced by one operation, plus how it ended.
///
/// A failed operation still carries the updates gathered before the error.
#[must_use]
#[derive(Debug)]
pub struct Outcome<U, T = ()> {
    pub updates: Vec<U>,
    pub result: Result<T>,
}

impl<U, T> Outcome<U, T> {
    pub(crate) fn new(updates: Vec<U>, result: Result<T>) -> Self {
        Self { updates, result }
    }

    /// Feed every update to `apply` in order and return the result.
    pub fn apply_to(self, mut apply: impl FnMut(U)) -> Result<T> {
        for update in self.updates {
            apply(update);
        }
        self.result
    }
}
