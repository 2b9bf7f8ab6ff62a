//! End-to-end test against a running Atelier backend.
//!
//! Needs `ATELIER_BACKEND_URL` (or a backend on localhost:8000) and is
//! ignored by default; run with `cargo test -- --ignored`.

use dotenv::dotenv;
use uuid::Uuid;

use atelier_client::preferences::{Preference, Size, SkinTone};
use atelier_client::products::SortKey;
use atelier_client::Atelier;

#[tokio::test]
#[ignore]
async fn register_save_preference_and_browse() {
    dotenv().ok();

    let atelier = Atelier::from_env();

    let email = format!("test-{}@example.com", Uuid::new_v4());
    let session = atelier
        .auth()
        .register(&email, "test_password123")
        .await
        .expect("registration against the live backend failed");
    assert!(!session.access_token.is_empty());

    let preference = Preference::new(Size::L, SkinTone::Fair);
    atelier.preferences().save(preference).await;
    assert_eq!(atelier.preferences().load(), preference);

    let state = atelier
        .feed()
        .refresh(atelier.preferences().current(), SortKey::Newest)
        .await
        .expect("feed fetch against the live backend failed");

    // Any state is acceptable here, the backend decides what the feed holds
    drop(state);

    atelier.auth().logout();
    assert!(!atelier.auth().is_authenticated());
}
