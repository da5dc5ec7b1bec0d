//! End-to-end tests of ApiClient against the mock backend.

use std::sync::Arc;

use api_client::{ApiClient, ApiError, ClientConfig, MemorySessionStore, SessionStore};
use core_types::{Role, Sentiment};
use mock_backend::{AppState, DEMO_PASSWORD};
use web_types::{
    CreateFeedbackRequest, CreateUserRequest, UpdateFeedbackRequest, UpdateUserRequest,
};

async fn setup() -> (AppState, ApiClient, Arc<MemorySessionStore>) {
    let state = AppState::seeded();
    let base = mock_backend::spawn(state.clone()).await.unwrap();
    let store = Arc::new(MemorySessionStore::new());
    let client = ApiClient::new(ClientConfig::new(base), store.clone());
    (state, client, store)
}

async fn signed_in(username: &str) -> (AppState, ApiClient, Arc<MemorySessionStore>) {
    let (state, client, store) = setup().await;
    client.sign_in(username, DEMO_PASSWORD).await.unwrap();
    (state, client, store)
}

fn feedback_for(employee_id: i64) -> CreateFeedbackRequest {
    CreateFeedbackRequest {
        employee_id,
        strengths: "Owns every incident end to end".to_string(),
        areas_to_improve: "Share context with the team earlier".to_string(),
        sentiment: Sentiment::Positive,
    }
}

#[tokio::test]
async fn test_sign_in_stores_token_and_user() {
    let (_state, client, store) = setup().await;

    let user = client.sign_in("john_manager", DEMO_PASSWORD).await.unwrap();

    assert_eq!(user.role, Role::Manager);
    let session = store.load();
    assert!(session.token.is_some());
    assert_eq!(session.user.map(|u| u.username), Some("john_manager".to_string()));
    assert_eq!(client.stored_user().map(|u| u.id), Some(user.id));
}

#[tokio::test]
async fn test_invalid_credentials_store_nothing() {
    let (_state, client, store) = setup().await;

    let err = client.sign_in("john_manager", "wrong").await.unwrap_err();

    assert!(matches!(err, ApiError::InvalidCredentials));
    assert_eq!(err.user_message(), "Invalid username or password");
    assert!(store.load().token.is_none());
    assert!(store.load().user.is_none());
    assert!(!client.is_signed_in());
}

#[tokio::test]
async fn test_profile_rejection_during_sign_in_is_invalid_credentials() {
    let (state, client, store) = setup().await;
    state.issue_unregistered_tokens(true);

    let err = client.sign_in("john_manager", DEMO_PASSWORD).await.unwrap_err();

    assert!(matches!(err, ApiError::InvalidCredentials));
    assert_eq!(err.user_message(), "Invalid username or password");
    assert!(store.load().token.is_none());
    assert!(!client.is_signed_in());
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let (state, client, _store) = signed_in("john_manager").await;
    state.serve_malformed_bodies(true);

    let err = client.my_team().await.unwrap_err();

    assert!(matches!(err, ApiError::Decode(_)));
    assert_eq!(
        err.user_message(),
        "Received an unexpected response from the server."
    );
    // the session survives a bad body
    assert!(client.is_signed_in());
}

#[tokio::test]
async fn test_401_clears_session() {
    let (state, client, store) = signed_in("john_manager").await;

    state.expire_all_tokens().await;
    let err = client.my_team().await.unwrap_err();

    assert!(err.is_unauthorized());
    assert!(store.load().token.is_none());
    assert!(store.load().user.is_none());
    assert!(client.stored_user().is_none());
}

#[tokio::test]
async fn test_requests_without_session_are_unauthorized() {
    let (_state, client, _store) = setup().await;

    let err = client.dashboard_stats().await.unwrap_err();

    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn test_network_failure_is_distinct() {
    // Nothing listens on port 9 locally
    let store = Arc::new(MemorySessionStore::new());
    let client = ApiClient::new(ClientConfig::new("http://127.0.0.1:9"), store);

    let err = client.sign_in("john_manager", DEMO_PASSWORD).await.unwrap_err();

    assert!(matches!(err, ApiError::Network(_)));
    assert!(err.user_message().contains("Unable to reach the server"));
}

#[tokio::test]
async fn test_sign_out_clears_and_revokes() {
    let (_state, client, store) = signed_in("alice_employee").await;
    let token = store.load().token.unwrap();

    client.sign_out().await.unwrap();

    assert!(store.load().token.is_none());

    // The old token no longer works
    store.save_token(&token).unwrap();
    let err = client.current_user().await.unwrap_err();
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn test_current_user_endpoints_agree() {
    let (_state, client, _store) = signed_in("alice_employee").await;

    let via_auth = client.current_user().await.unwrap();
    let via_users = client.users_me().await.unwrap();

    assert_eq!(via_auth, via_users);
    assert_eq!(via_auth.manager_id, Some(1));
}

#[tokio::test]
async fn test_manager_team_lifecycle() {
    let (_state, client, _store) = signed_in("john_manager").await;

    let team = client.my_team().await.unwrap();
    assert_eq!(team.len(), 2);

    let carol = client
        .create_user(&CreateUserRequest::employee(
            "carol".to_string(),
            "carol@example.com".to_string(),
            "secret1".to_string(),
        ))
        .await
        .unwrap();
    assert_eq!(carol.role, Role::Employee);
    assert_eq!(carol.manager_id, Some(1));

    let renamed = client
        .update_user(
            carol.id,
            &UpdateUserRequest {
                username: Some("carol_employee".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.username, "carol_employee");
    assert_eq!(client.get_user(carol.id).await.unwrap().username, "carol_employee");

    let toggled = client.toggle_user_status(carol.id).await.unwrap();
    assert!(!toggled.is_active);

    let stats = client.dashboard_stats().await.unwrap();
    assert_eq!(stats.team_size, Some(3));
    assert_eq!(stats.active_team_size, Some(2));
}

#[tokio::test]
async fn test_duplicate_username_carries_detail() {
    let (_state, client, _store) = signed_in("john_manager").await;

    let err = client
        .create_user(&CreateUserRequest::employee(
            "alice_employee".to_string(),
            "again@example.com".to_string(),
            "secret1".to_string(),
        ))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Rejected { status: 400, .. }));
    assert_eq!(
        err.message_or("Failed to create employee account"),
        "Username already registered"
    );
}

#[tokio::test]
async fn test_feedback_flow_between_manager_and_employee() {
    let (state, manager, _store) = signed_in("john_manager").await;
    let base = manager.config().base_url.clone();

    let created = manager.create_feedback(&feedback_for(3)).await.unwrap();
    assert!(!created.is_acknowledged);

    let updated = manager
        .update_feedback(
            created.id,
            &UpdateFeedbackRequest {
                sentiment: Some(Sentiment::Neutral),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.sentiment, Sentiment::Neutral);
    assert_eq!(updated.strengths, created.strengths);

    let given = manager.my_given_feedback().await.unwrap();
    assert_eq!(given.len(), 1);
    assert_eq!(given[0].employee_name, "alice_employee");
    assert_eq!(manager.team_member_feedback(3).await.unwrap().len(), 1);

    let employee = ApiClient::new(ClientConfig::new(base), Arc::new(MemorySessionStore::new()));
    employee.sign_in("alice_employee", DEMO_PASSWORD).await.unwrap();

    let received = employee.my_received_feedback().await.unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].manager_name, "john_manager");

    let acked = employee.acknowledge_feedback(created.id).await.unwrap();
    assert!(acked.is_acknowledged);

    // Employees may not edit
    let err = employee
        .update_feedback(created.id, &UpdateFeedbackRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Rejected { status: 403, .. }));

    assert_eq!(employee.dashboard_stats().await.unwrap().acknowledged_feedback, 1);
    assert!(state.request_count() > 0);
}

#[tokio::test]
async fn test_implementation_defined_payloads() {
    let (_state, client, _store) = signed_in("john_manager").await;
    client.create_feedback(&feedback_for(4)).await.unwrap();

    let team_stats = client.team_stats(1).await.unwrap();
    assert_eq!(team_stats["team_size"], 2);

    let overview = client.team_overview().await.unwrap();
    let rows = overview.as_array().unwrap();
    assert_eq!(rows.len(), 2);
}
