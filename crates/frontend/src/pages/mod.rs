//! Page components.

mod employee_dashboard;
mod login;
mod manager_dashboard;
mod team_management;

pub use employee_dashboard::EmployeeDashboardPage;
pub use login::LoginPage;
pub use manager_dashboard::ManagerDashboardPage;
pub use team_management::TeamManagement;

use yew::Properties;

use crate::app::Auth;

/// Every top-level page gets the session handed down from the router.
#[derive(Properties, PartialEq)]
pub struct PageProps {
    pub auth: Auth,
}
