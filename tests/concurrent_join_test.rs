//! Concurrent admission tests
//!
//! Many simultaneous joins by the same user must leave exactly one membership.

mod helpers;

use std::sync::Arc;

use futures::future::join_all;

use helpers::*;
use MeepleLog::config::InvitesConfig;
use MeepleLog::database::GroupStore;
use MeepleLog::models::MemberRole;

const CONCURRENT_JOINS: usize = 16;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn simultaneous_joins_create_one_membership() {
    let (store, service) = memory_service(InvitesConfig::default());
    let service = Arc::new(service);
    let alice = register_user(&store, "alice").await;
    let bob = register_user(&store, "bob").await;

    let group = service.create_group(&alice, "Game Night").await.unwrap();

    let handles = (0..CONCURRENT_JOINS).map(|_| {
        let service = service.clone();
        let code = group.join_code.clone();
        let token = group.invite_token.clone();
        tokio::spawn(async move { service.join_with_invite(&bob, &code, &token).await })
    });

    let outcomes: Vec<_> = join_all(handles)
        .await
        .into_iter()
        .map(|handle| handle.expect("join task panicked").expect("join failed"))
        .collect();

    assert_eq!(outcomes.iter().filter(|o| o.is_new()).count(), 1);
    assert!(outcomes
        .iter()
        .all(|o| o.membership().user_id == bob.user_id.unwrap()));

    let members = store.list_memberships(group.id).await.unwrap();
    assert_eq!(members.len(), 2);
    assert_eq!(
        members.iter().filter(|m| m.role == MemberRole::Member).count(),
        1
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn distinct_users_join_concurrently() {
    let (store, service) = memory_service(InvitesConfig::default());
    let service = Arc::new(service);
    let alice = register_user(&store, "alice").await;
    let group = service.create_group(&alice, "Game Night").await.unwrap();

    let mut players = Vec::with_capacity(CONCURRENT_JOINS);
    for i in 0..CONCURRENT_JOINS {
        players.push(register_user(&store, &format!("player{}", i)).await);
    }

    let handles = players.into_iter().map(|player| {
        let service = service.clone();
        let code = group.join_code.clone();
        let token = group.invite_token.clone();
        tokio::spawn(async move { service.join_with_invite(&player, &code, &token).await })
    });

    for handle in join_all(handles).await {
        assert!(handle.unwrap().unwrap().is_new());
    }
    assert_eq!(
        store.list_memberships(group.id).await.unwrap().len(),
        CONCURRENT_JOINS + 1
    );
}
