//! One function per subcommand.

use anyhow::{Context, Result, anyhow, bail};
use api_client::ApiClient;
use core_types::{FeedbackWithDetails, Sentiment, User};
use dashboard::forms::MemberField;
use dashboard::summary::{TeamCounts, format_date, format_timestamp};
use dashboard::{
    EmployeeDashboard, FeedbackDraft, FeedbackEdit, ManagerDashboard, NewMemberDraft, UserEdit,
};
use serde_json::Value;

pub async fn login(client: &ApiClient, username: &str, password: &str) -> Result<()> {
    let user = client
        .sign_in(username, password)
        .await
        .context("Login failed. Please try again.")?;
    println!("Signed in as {} ({})", user.username, user.role);
    Ok(())
}

pub async fn logout(client: &ApiClient) -> Result<()> {
    client.sign_out().await?;
    println!("Signed out");
    Ok(())
}

pub async fn whoami(client: &ApiClient) -> Result<()> {
    let user = client.current_user().await?;
    print_user(&user);
    println!("  Member since {}", format_date(&user.created_at));
    Ok(())
}

pub async fn stats(client: &ApiClient) -> Result<()> {
    let stats = client.dashboard_stats().await?;

    println!("=== Dashboard Stats ===");
    println!("Total feedback:      {}", stats.total_feedback);
    println!("  Positive:          {}", stats.positive_feedback);
    println!("  Neutral:           {}", stats.neutral_feedback);
    println!("  Constructive:      {}", stats.negative_feedback);
    println!("Acknowledged:        {}", stats.acknowledged_feedback);
    println!("Acknowledgment rate: {}%", stats.acknowledgment_rate());
    if let Some(team_size) = stats.team_size {
        println!("Team members:        {team_size}");
        println!("  Active:            {}", stats.active_team_size.unwrap_or_default());
        println!("  Inactive:          {}", stats.inactive_team_size());
    }
    Ok(())
}

pub async fn team(client: &ApiClient, all: bool) -> Result<()> {
    let mut dash = ManagerDashboard::new(client.clone());
    dash.load().await?;

    let counts = TeamCounts::of(&dash.team);
    println!(
        "Team: {} members ({} active, {} inactive)",
        counts.total, counts.active, counts.inactive
    );
    println!();

    for row in dash.team_rows() {
        println!(
            "#{:<4} {:<20} {:>3} feedback, {} pending",
            row.member.id, row.member.username, row.feedback_count, row.unacknowledged
        );
    }
    if all {
        for member in dash.team.iter().filter(|m| !m.is_active) {
            println!("#{:<4} {:<20} (inactive)", member.id, member.username);
        }
    }
    Ok(())
}

pub async fn received(client: &ApiClient) -> Result<()> {
    let mut dash = EmployeeDashboard::new(client.clone());
    dash.load().await?;

    print_feedback_list(&dash.feedback, false);
    if dash.pending_count() > 0 {
        println!();
        println!(
            "{} awaiting acknowledgment. Use `feedback ack <id>`.",
            dash.pending_count()
        );
    }
    Ok(())
}

pub async fn given(client: &ApiClient) -> Result<()> {
    let feedback = client.my_given_feedback().await?;
    print_feedback_list(&feedback, true);
    Ok(())
}

pub async fn member_feedback(client: &ApiClient, id: i64) -> Result<()> {
    let feedback = client
        .team_member_feedback(id)
        .await
        .context("Failed to load employee feedback")?;
    print_feedback_list(&feedback, true);
    Ok(())
}

pub async fn give(
    client: &ApiClient,
    employee_id: i64,
    strengths: String,
    areas_to_improve: String,
    sentiment: Sentiment,
) -> Result<()> {
    let draft = FeedbackDraft {
        employee_id: Some(employee_id),
        strengths,
        areas_to_improve,
        sentiment: Some(sentiment),
    };
    let request = draft.validate().map_err(|message| anyhow!(message))?;

    let created = client
        .create_feedback(&request)
        .await
        .context("Failed to submit feedback")?;
    println!("Feedback #{} submitted", created.id);
    Ok(())
}

pub async fn edit(
    client: &ApiClient,
    id: i64,
    strengths: String,
    areas_to_improve: String,
    sentiment: Sentiment,
) -> Result<()> {
    let edit = FeedbackEdit {
        strengths,
        areas_to_improve,
        sentiment: Some(sentiment),
    };
    let update = edit.validate().map_err(|message| anyhow!(message))?;

    client
        .update_feedback(id, &update)
        .await
        .context("Failed to update feedback")?;
    println!("Feedback #{id} updated");
    Ok(())
}

pub async fn acknowledge(client: &ApiClient, id: i64) -> Result<()> {
    client
        .acknowledge_feedback(id)
        .await
        .context("Failed to acknowledge feedback. Please try again.")?;
    println!("Feedback #{id} acknowledged");
    Ok(())
}

pub async fn add_member(
    client: &ApiClient,
    username: String,
    email: String,
    password: String,
    confirm_password: String,
) -> Result<()> {
    let draft = NewMemberDraft {
        username,
        email,
        password,
        confirm_password,
    };
    let request = match draft.validate() {
        Ok(request) => request,
        Err(errors) => {
            for (field, message) in &errors {
                eprintln!("  {}: {message}", field_flag(*field));
            }
            bail!("{} field(s) need fixing", errors.len());
        }
    };

    let created = client
        .create_user(&request)
        .await
        .context("Failed to create employee account")?;
    println!("Created #{} {}", created.id, created.username);
    Ok(())
}

pub async fn update_member(
    client: &ApiClient,
    id: i64,
    username: Option<String>,
    email: Option<String>,
) -> Result<()> {
    let current = client.get_user(id).await.context("Failed to update employee")?;

    let mut edit = UserEdit::from_user(&current);
    if let Some(username) = username {
        edit.username = username;
    }
    if let Some(email) = email {
        edit.email = email;
    }

    let Some(update) = edit.changes(&current).map_err(|message| anyhow!(message))? else {
        println!("Nothing to update");
        return Ok(());
    };

    let updated = client
        .update_user(id, &update)
        .await
        .context("Failed to update employee")?;
    print_user(&updated);
    Ok(())
}

pub async fn toggle_member(client: &ApiClient, id: i64) -> Result<()> {
    let user = client
        .toggle_user_status(id)
        .await
        .context("Failed to update employee status")?;
    let state = if user.is_active { "active" } else { "inactive" };
    println!("{} is now {state}", user.username);
    Ok(())
}

pub async fn team_stats(client: &ApiClient, manager_id: i64) -> Result<()> {
    print_json(&client.team_stats(manager_id).await?)
}

pub async fn overview(client: &ApiClient) -> Result<()> {
    print_json(&client.team_overview().await?)
}

fn field_flag(field: MemberField) -> &'static str {
    match field {
        MemberField::Username => "--username",
        MemberField::Email => "--email",
        MemberField::Password => "--password",
        MemberField::ConfirmPassword => "--confirm-password",
    }
}

fn print_user(user: &User) {
    println!("#{} {} ({})", user.id, user.username, user.role);
    if let Some(email) = &user.email {
        println!("  {email}");
    }
    if !user.is_active {
        println!("  (inactive)");
    }
}

fn print_feedback_list(feedback: &[FeedbackWithDetails], as_manager: bool) {
    if feedback.is_empty() {
        println!("No feedback available yet.");
        return;
    }

    for (i, item) in feedback.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print_feedback(item, as_manager);
    }
}

fn print_feedback(item: &FeedbackWithDetails, as_manager: bool) {
    let fb = &item.feedback;
    let who = if as_manager {
        format!("for {}", item.employee_name)
    } else {
        format!("from {}", item.manager_name)
    };
    let ack = if fb.is_acknowledged { " [acknowledged]" } else { "" };

    println!("#{} Feedback {who} [{}]{ack}", fb.id, fb.sentiment.label());
    print!("   {}", format_timestamp(&fb.created_at));
    if fb.is_edited() {
        print!(" (updated {})", format_timestamp(&fb.updated_at));
    }
    println!();
    println!("   Strengths:        {}", fb.strengths);
    println!("   Areas to improve: {}", fb.areas_to_improve);
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
