//! PostgreSQL store tests
//!
//! These start a PostgreSQL container (or use `TEST_DATABASE_URL`) and are
//! ignored by default. Run with `cargo test -- --ignored`.

mod helpers;

use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::{Duration, Utc};
use futures::future::join_all;
use serial_test::serial;
use uuid::Uuid;

use helpers::*;
use MeepleLog::config::InvitesConfig;
use MeepleLog::database::GroupStore;
use MeepleLog::models::{MemberRole, NewGroup};
use MeepleLog::services::{AuthContext, InviteService};
use MeepleLog::utils::helpers::{generate_invite_token, generate_join_code};
use MeepleLog::{StoreError, TrackerError};

async fn setup() -> (TestDatabase, InviteService) {
    let db = TestDatabase::new().await.expect("Failed to start test database");
    db.cleanup().await.expect("Failed to clean test database");
    let service = InviteService::new(Arc::new(db.store()), InvitesConfig::default());
    (db, service)
}

#[tokio::test]
#[serial]
#[ignore]
async fn issue_verify_and_join_round_trip() {
    let (db, service) = setup().await;
    let alice = AuthContext::authenticated(db.create_user("alice").await.id);
    let bob = AuthContext::authenticated(db.create_user("bob").await.id);

    let group = service.create_group(&alice, "Game Night").await.unwrap();
    assert_eq!(db.group_rows().await, 1);
    assert_eq!(db.membership_rows(group.id).await, 1);

    let verified = service
        .verify_invite(&bob, &group.join_code.to_lowercase(), &group.invite_token)
        .await
        .unwrap();
    assert_eq!(verified.group_id, group.id);

    let first = service
        .join_with_invite(&bob, &group.join_code, &group.invite_token)
        .await
        .unwrap();
    let second = service
        .join_with_invite(&bob, &group.join_code, &group.invite_token)
        .await
        .unwrap();

    assert!(first.is_new());
    assert!(!second.is_new());
    assert_eq!(second.membership().role, MemberRole::Member);
    assert_eq!(db.membership_rows(group.id).await, 2);
}

#[tokio::test]
#[serial]
#[ignore]
async fn regenerate_replaces_token_in_place() {
    let (db, service) = setup().await;
    let alice = AuthContext::authenticated(db.create_user("alice").await.id);

    let group = service.create_group(&alice, "Game Night").await.unwrap();
    let rotated = service.regenerate_invite(&alice, group.id).await.unwrap();

    assert_eq!(rotated.id, group.id);
    assert_eq!(rotated.join_code, group.join_code);
    assert_ne!(rotated.invite_token, group.invite_token);
    assert_matches!(
        service.verify_invite(&alice, &group.join_code, &group.invite_token).await,
        Err(TrackerError::InvalidCredential)
    );
}

#[tokio::test]
#[serial]
#[ignore]
async fn expired_invite_is_reported_with_expiry() {
    let (db, service) = setup().await;
    let alice = db.create_user("alice").await;
    let issued_at = Utc::now() - Duration::hours(3);

    let group = service
        .issuer()
        .issue_at("Game Night", alice.id, issued_at)
        .await
        .unwrap();

    assert_matches!(
        service.verifier().verify(&group.join_code, &group.invite_token).await,
        Err(TrackerError::Expired { .. })
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[serial]
#[ignore]
async fn concurrent_joins_leave_single_row() {
    let (db, service) = setup().await;
    let service = Arc::new(service);
    let alice = AuthContext::authenticated(db.create_user("alice").await.id);
    let bob = AuthContext::authenticated(db.create_user("bob").await.id);
    let group = service.create_group(&alice, "Game Night").await.unwrap();

    let handles = (0..8).map(|_| {
        let service = service.clone();
        let code = group.join_code.clone();
        let token = group.invite_token.clone();
        tokio::spawn(async move { service.join_with_invite(&bob, &code, &token).await })
    });

    let outcomes: Vec<_> = join_all(handles)
        .await
        .into_iter()
        .map(|handle| handle.unwrap().unwrap())
        .collect();

    assert_eq!(outcomes.iter().filter(|o| o.is_new()).count(), 1);
    assert_eq!(db.membership_rows(group.id).await, 2);
}

#[tokio::test]
#[serial]
#[ignore]
async fn duplicate_join_code_is_classified() {
    let (db, _service) = setup().await;
    let store = db.store();
    let alice = db.create_user("alice").await;
    let now = Utc::now();

    let first = NewGroup {
        id: Uuid::new_v4(),
        name: "First".to_string(),
        join_code: generate_join_code(),
        invite_token: generate_invite_token(),
        invite_token_expires_at: now + Duration::hours(1),
        created_by: alice.id,
        created_at: now,
    };
    store.insert_group(&first).await.unwrap();

    let clash = NewGroup {
        id: Uuid::new_v4(),
        name: "Second".to_string(),
        invite_token: generate_invite_token(),
        ..first.clone()
    };
    assert_matches!(store.insert_group(&clash).await, Err(StoreError::DuplicateJoinCode));
}

#[tokio::test]
#[serial]
#[ignore]
async fn unknown_creator_leaves_no_group() {
    let (db, _service) = setup().await;
    let store = db.store();
    let now = Utc::now();

    let orphan = NewGroup {
        id: Uuid::new_v4(),
        name: "Orphan".to_string(),
        join_code: generate_join_code(),
        invite_token: generate_invite_token(),
        invite_token_expires_at: now + Duration::hours(1),
        created_by: Uuid::new_v4(),
        created_at: now,
    };

    assert_matches!(store.create_group_with_admin(&orphan).await, Err(StoreError::NotFound));
    assert_eq!(db.group_rows().await, 0);
}

#[tokio::test]
#[serial]
#[ignore]
async fn store_health_check_passes() {
    let (db, _service) = setup().await;
    db.store().health_check().await.unwrap();
}
