//! The username endpoint driving a debounced form field.

mod common;

use std::time::Duration;

use common::{MockSite, dead_url};
use fieldcheck::field::{AsyncFieldValidator, FieldConfig, RemoteStatus};
use fieldcheck::gate::SubmitGate;
use skillstack_api::api::{USERNAME_TAKEN, UsernameCheck};
use skillstack_api::SkillStackClient;

fn username_field(client: SkillStackClient) -> AsyncFieldValidator {
    AsyncFieldValidator::attach(
        FieldConfig::new("username")
            .min_local_length(3, "Username must be at least 3 characters.")
            .debounce(Duration::from_millis(20))
            .remote_check(UsernameCheck::new(client)),
    )
    .unwrap()
}

#[tokio::test]
async fn test_taken_username_over_http() {
    let (site, url) = MockSite::start(&["admin"]).await;
    let field = username_field(MockSite::client(&url));

    field.on_input("ad");
    field.on_input("adm");
    field.on_input("admin");
    tokio::time::sleep(Duration::from_millis(300)).await;

    let requests = site.requests_to("/users/check-username/");
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].param("username"), Some("admin"));

    let state = field.state();
    assert_eq!(state.remote_status, RemoteStatus::Confirmed { valid: false });
    assert_eq!(state.error.as_deref(), Some(USERNAME_TAKEN));
    assert!(!field.currently_acceptable());
}

#[tokio::test]
async fn test_free_username_submits() {
    let (_site, url) = MockSite::start(&["admin"]).await;
    let field = username_field(MockSite::client(&url));
    let gate = SubmitGate::new().field(&field);

    field.on_input("ada");
    gate.submit().await.unwrap();
    assert!(field.currently_acceptable());
}

#[tokio::test]
async fn test_server_down_fails_open() {
    let field = username_field(MockSite::client(&dead_url().await));

    field.on_input("ada");
    tokio::time::sleep(Duration::from_millis(300)).await;

    let state = field.state();
    assert!(state.check_failed);
    assert!(state.error.is_none());
    assert!(field.currently_acceptable());
}
