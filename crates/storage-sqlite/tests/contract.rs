//! Runs the shared repository contract against a fresh SQLite file per test.

use folioadvisor_core::testing::contract;
use folioadvisor_core::RecordStore;
use folioadvisor_storage_sqlite::open_record_store;
use tempfile::TempDir;

fn fresh_store() -> (RecordStore, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let db_path = dir.path().join("advisor.db");
    let store = open_record_store(&db_path.to_string_lossy()).expect("Failed to open store");
    (store, dir)
}

macro_rules! contract_tests {
    ($($name:ident),+ $(,)?) => {
        $(
            #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
            async fn $name() {
                let (store, _dir) = fresh_store();
                contract::$name(&store).await;
            }
        )+
    };
}

contract_tests!(
    user_create_and_lookup,
    user_duplicate_username_rejected,
    user_concurrent_registration_single_winner,
    profile_upsert_preserves_identity,
    profile_concurrent_first_save_single_row,
    profiles_are_per_user,
    project_update_merges_fields,
    project_delete_is_hard,
    project_missing_id_is_not_an_error,
    project_ids_unique_under_concurrency,
    recommendations_most_recent_first,
    recommendations_scoped_per_user,
    owned_records_require_existing_user,
);

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_data_survives_reopen() {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let db_path = dir.path().join("advisor.db");
    let path = db_path.to_string_lossy().to_string();

    let user_id = {
        let store = open_record_store(&path).expect("Failed to open store");
        store
            .users
            .create_user(folioadvisor_core::testing::fixtures::new_user("alice"))
            .await
            .unwrap()
            .id
    };

    let reopened = open_record_store(&path).expect("Failed to reopen store");
    let user = reopened.users.get_user_by_username("alice").await.unwrap();
    assert_eq!(user.map(|u| u.id), Some(user_id));
}
