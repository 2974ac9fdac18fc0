//! Checks against a running SkillStack instance.
//!
//! These tests are ignored by default. To run them, create a `.env` file in
//! the skillstack-api directory with:
//!
//! ```env
//! SKILLSTACK_URL=http://127.0.0.1:8000
//! # Needed for the inbox endpoints
//! SKILLSTACK_SESSION=your-session-id
//! ```
//!
//! Then run: `cargo test -p skillstack-api -- --ignored`

use std::time::Duration;

use skillstack_api::SkillStackClient;
use skillstack_api::config::ClientConfig;

fn load_env() -> Option<ClientConfig> {
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env().timeout(Duration::from_secs(10));
    config.url.is_some().then_some(config)
}

fn client() -> SkillStackClient {
    load_env()
        .expect("Missing SKILLSTACK_URL. See module docs.")
        .build_client()
        .expect("Failed to build client")
}

#[tokio::test]
#[ignore = "requires a running SkillStack instance"]
async fn test_live_username_check() {
    let client = client();

    // A random name is free; the check must answer either way.
    let taken = client
        .check_username("no-such-user-4f1c")
        .await
        .expect("username check failed");
    assert!(!taken);
}

#[tokio::test]
#[ignore = "requires a running SkillStack instance and a session"]
async fn test_live_unread_count() {
    let client = client();

    let count = client.unread_count().await.expect("unread count failed");
    println!("unread: {count}");
}
