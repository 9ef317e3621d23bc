//! Repository contract suite.
//!
//! Each function takes a freshly built, empty `RecordStore` and panics on the
//! first violated expectation.

use std::collections::HashSet;
use std::time::Duration;

use futures::future::join_all;

use super::fixtures::{
    aggressive_profile, balanced_profile, bond_project, equity_project, new_user, sample_plan,
};
use crate::profiles::{InvestmentGoal, RiskPreference};
use crate::projects::ProjectUpdate;
use crate::errors::{DatabaseError, Error};
use crate::RecordStore;

pub async fn user_create_and_lookup(store: &RecordStore) {
    let alice = store.users.create_user(new_user("alice")).await.unwrap();
    let bob = store.users.create_user(new_user("bob")).await.unwrap();

    assert!(alice.id > 0);
    assert!(bob.id > alice.id);
    assert_eq!(alice.created_at, alice.updated_at);

    let by_id = store.users.get_user(alice.id).await.unwrap().unwrap();
    assert_eq!(by_id, alice);
    let by_name = store.users.get_user_by_username("bob").await.unwrap().unwrap();
    assert_eq!(by_name, bob);

    assert!(store.users.get_user(9_999).await.unwrap().is_none());
    assert!(store
        .users
        .get_user_by_username("carol")
        .await
        .unwrap()
        .is_none());

    let names: Vec<String> = store
        .users
        .list_users()
        .await
        .unwrap()
        .into_iter()
        .map(|u| u.username)
        .collect();
    assert_eq!(names, vec!["alice".to_string(), "bob".to_string()]);
}

pub async fn user_duplicate_username_rejected(store: &RecordStore) {
    store.users.create_user(new_user("alice")).await.unwrap();
    let err = store
        .users
        .create_user(new_user("alice"))
        .await
        .expect_err("second registration must fail");
    assert!(err.is_unique_violation(), "unexpected error: {err}");
    assert_eq!(store.users.list_users().await.unwrap().len(), 1);
}

pub async fn user_concurrent_registration_single_winner(store: &RecordStore) {
    let attempts = join_all((0..8).map(|_| store.users.create_user(new_user("racer")))).await;
    let winners = attempts.iter().filter(|r| r.is_ok()).count();
    assert_eq!(winners, 1);
    for failure in attempts.iter().filter_map(|r| r.as_ref().err()) {
        assert!(failure.is_unique_violation(), "unexpected error: {failure}");
    }
    let users = store.users.list_users().await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].username, "racer");
}

pub async fn profile_upsert_preserves_identity(store: &RecordStore) {
    let user = store.users.create_user(new_user("alice")).await.unwrap();
    assert!(store
        .profiles
        .get_profile_by_user_id(user.id)
        .await
        .unwrap()
        .is_none());

    let first = store
        .profiles
        .upsert_profile(user.id, balanced_profile(100_000.0))
        .await
        .unwrap();
    assert_eq!(first.user_id, user.id);
    assert_eq!(first.risk_preference, RiskPreference::Balanced);

    let second = store
        .profiles
        .upsert_profile(user.id, aggressive_profile(250_000.0))
        .await
        .unwrap();
    assert_eq!(second.id, first.id);
    assert_eq!(second.user_id, user.id);
    assert_eq!(second.risk_preference, RiskPreference::Aggressive);
    assert_eq!(second.investment_goal, InvestmentGoal::HighGrowth);
    assert_eq!(second.investment_amount, 250_000.0);
    assert!(second.updated_at >= first.updated_at);

    let stored = store
        .profiles
        .get_profile_by_user_id(user.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored, second);
    assert_eq!(
        store.profiles.get_profile(first.id).await.unwrap().unwrap(),
        second
    );
    assert_eq!(store.profiles.list_profiles().await.unwrap().len(), 1);
}

pub async fn profile_concurrent_first_save_single_row(store: &RecordStore) {
    let user = store.users.create_user(new_user("alice")).await.unwrap();
    let saves = join_all(
        (0..6).map(|i| {
            store
                .profiles
                .upsert_profile(user.id, balanced_profile(1_000.0 * (i + 1) as f64))
        }),
    )
    .await;

    let ids: HashSet<i64> = saves.into_iter().map(|r| r.unwrap().id).collect();
    assert_eq!(ids.len(), 1, "every save must land on the same profile");

    let all = store.profiles.list_profiles().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].user_id, user.id);
}

pub async fn profiles_are_per_user(store: &RecordStore) {
    let alice = store.users.create_user(new_user("alice")).await.unwrap();
    let bob = store.users.create_user(new_user("bob")).await.unwrap();

    let a = store
        .profiles
        .upsert_profile(alice.id, balanced_profile(10.0))
        .await
        .unwrap();
    let b = store
        .profiles
        .upsert_profile(bob.id, aggressive_profile(20.0))
        .await
        .unwrap();
    assert_ne!(a.id, b.id);

    let listed: Vec<i64> = store
        .profiles
        .list_profiles()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.user_id)
        .collect();
    assert_eq!(listed, vec![alice.id, bob.id]);
}

pub async fn project_update_merges_fields(store: &RecordStore) {
    let created = store
        .projects
        .create_project(bond_project("国债A"))
        .await
        .unwrap();
    assert_eq!(created.created_at, created.updated_at);
    tokio::time::sleep(Duration::from_millis(5)).await;

    let updated = store
        .projects
        .update_project(
            created.id,
            ProjectUpdate {
                expected_return: Some(3.6),
                risk_level: Some(2),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .expect("project exists");

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);
    assert_eq!(updated.expected_return, 3.6);
    assert_eq!(updated.risk_level, 2);
    assert_eq!(updated.name, created.name);
    assert_eq!(updated.project_type, created.project_type);
    assert_eq!(updated.investment_threshold, created.investment_threshold);
    assert_eq!(updated.description, created.description);

    let reread = store
        .projects
        .get_project(created.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reread, updated);
}

pub async fn project_delete_is_hard(store: &RecordStore) {
    let doomed = store
        .projects
        .create_project(bond_project("短债"))
        .await
        .unwrap();
    let kept = store
        .projects
        .create_project(equity_project("成长股"))
        .await
        .unwrap();

    assert!(store.projects.delete_project(doomed.id).await.unwrap());
    assert!(!store.projects.delete_project(doomed.id).await.unwrap());
    assert!(store.projects.get_project(doomed.id).await.unwrap().is_none());
    assert!(store
        .projects
        .update_project(
            doomed.id,
            ProjectUpdate {
                name: Some("复活".to_string()),
                ..Default::default()
            }
        )
        .await
        .unwrap()
        .is_none());

    let remaining = store.projects.list_projects().await.unwrap();
    assert_eq!(remaining, vec![kept.clone()]);

    // Identifiers are never reused after a delete.
    let next = store
        .projects
        .create_project(bond_project("新债"))
        .await
        .unwrap();
    assert!(next.id > kept.id);
}

pub async fn project_missing_id_is_not_an_error(store: &RecordStore) {
    assert!(store.projects.get_project(404).await.unwrap().is_none());
    assert!(store
        .projects
        .update_project(404, ProjectUpdate::default())
        .await
        .unwrap()
        .is_none());
    assert!(!store.projects.delete_project(404).await.unwrap());
}

pub async fn project_ids_unique_under_concurrency(store: &RecordStore) {
    let created = join_all(
        (0..20).map(|i| store.projects.create_project(bond_project(&format!("债券{i}")))),
    )
    .await;
    let ids: Vec<i64> = created.into_iter().map(|r| r.unwrap().id).collect();
    let unique: HashSet<i64> = ids.iter().copied().collect();
    assert_eq!(unique.len(), ids.len());
    assert!(ids.iter().all(|id| *id > 0));

    let listed: Vec<i64> = store
        .projects
        .list_projects()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    let mut sorted = listed.clone();
    sorted.sort_unstable();
    assert_eq!(listed, sorted, "list is in insertion order");
    assert_eq!(listed.len(), 20);
}

pub async fn recommendations_most_recent_first(store: &RecordStore) {
    let user = store.users.create_user(new_user("alice")).await.unwrap();
    let mut created = Vec::new();
    for _ in 0..3 {
        let rec = store
            .recommendations
            .create_recommendation(user.id, sample_plan(1, 2))
            .await
            .unwrap();
        created.push(rec);
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    let history = store
        .recommendations
        .list_recommendations_by_user_id(user.id)
        .await
        .unwrap();
    let expected: Vec<i64> = created.iter().rev().map(|r| r.id).collect();
    let actual: Vec<i64> = history.iter().map(|r| r.id).collect();
    assert_eq!(actual, expected);
    assert!(history.windows(2).all(|w| w[0].created_at >= w[1].created_at));

    // The embedded allocation list survives storage untouched.
    assert_eq!(history[0].plan(), sample_plan(1, 2));
    assert_eq!(history[0].project_allocations.len(), 2);
}

pub async fn recommendations_scoped_per_user(store: &RecordStore) {
    let alice = store.users.create_user(new_user("alice")).await.unwrap();
    let bob = store.users.create_user(new_user("bob")).await.unwrap();

    let a1 = store
        .recommendations
        .create_recommendation(alice.id, sample_plan(1, 2))
        .await
        .unwrap();
    let b1 = store
        .recommendations
        .create_recommendation(bob.id, sample_plan(3, 4))
        .await
        .unwrap();
    assert_ne!(a1.id, b1.id);
    assert_eq!(a1.user_id, alice.id);

    let alice_history = store
        .recommendations
        .list_recommendations_by_user_id(alice.id)
        .await
        .unwrap();
    assert_eq!(alice_history, vec![a1.clone()]);

    let fetched = store
        .recommendations
        .get_recommendation(b1.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched, b1);

    assert!(store
        .recommendations
        .list_recommendations_by_user_id(9_999)
        .await
        .unwrap()
        .is_empty());
    assert_eq!(
        store
            .recommendations
            .list_recommendations()
            .await
            .unwrap()
            .len(),
        2
    );
}

pub async fn owned_records_require_existing_user(store: &RecordStore) {
    let is_foreign_key = |err: &Error| {
        matches!(
            err,
            Error::Database(DatabaseError::ForeignKeyViolation(_))
        )
    };

    let err = store
        .profiles
        .upsert_profile(42, balanced_profile(1_000.0))
        .await
        .expect_err("profile for unknown user");
    assert!(is_foreign_key(&err), "unexpected error: {err}");

    let err = store
        .recommendations
        .create_recommendation(42, sample_plan(1, 2))
        .await
        .expect_err("recommendation for unknown user");
    assert!(is_foreign_key(&err), "unexpected error: {err}");

    assert!(store.profiles.list_profiles().await.unwrap().is_empty());
    assert!(store
        .recommendations
        .list_recommendations()
        .await
        .unwrap()
        .is_empty());
}
