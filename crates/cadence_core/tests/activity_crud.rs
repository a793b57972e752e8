use cadence_core::db::migrations::latest_version;
use cadence_core::db::open_db_in_memory;
use cadence_core::{
    occurs_on, Activity, ActivityListQuery, ActivityRepository, ActivityService,
    CreateActivityRequest, Frequency, RepoError, SqliteActivityRepository,
};
use chrono::NaiveDate;
use rusqlite::Connection;
use std::collections::HashSet;
use uuid::Uuid;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteActivityRepository::try_new(&conn).unwrap();

    let mut activity = Activity::new("water plants", date(2024, 2, 1), Frequency::Weekly);
    activity.category = Some("home".to_string());
    let id = repo.create_activity(&activity).unwrap();

    let loaded = repo.get_activity(id, false).unwrap().unwrap();
    assert_eq!(loaded.uuid, activity.uuid);
    assert_eq!(loaded.title, "water plants");
    assert_eq!(loaded.category.as_deref(), Some("home"));
    assert_eq!(loaded.start_date, date(2024, 2, 1));
    assert_eq!(loaded.frequency, Frequency::Weekly);
    assert!(!loaded.is_deleted);
}

#[test]
fn update_existing_activity() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteActivityRepository::try_new(&conn).unwrap();

    let mut activity = Activity::new("draft habit", date(2024, 1, 1), Frequency::Daily);
    repo.create_activity(&activity).unwrap();

    activity.title = "evening walk".to_string();
    activity.frequency = Frequency::Weekdays;
    activity.start_date = date(2024, 3, 4);
    repo.update_activity(&activity).unwrap();

    let loaded = repo.get_activity(activity.uuid, false).unwrap().unwrap();
    assert_eq!(loaded.title, "evening walk");
    assert_eq!(loaded.frequency, Frequency::Weekdays);
    assert_eq!(loaded.start_date, date(2024, 3, 4));
}

#[test]
fn update_not_found_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteActivityRepository::try_new(&conn).unwrap();

    let activity = Activity::new("missing", date(2024, 1, 1), Frequency::Daily);
    let err = repo.update_activity(&activity).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == activity.uuid));
}

#[test]
fn list_excludes_deleted_by_default_and_can_include_them() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteActivityRepository::try_new(&conn).unwrap();

    let activity_a = Activity::new("keep", date(2024, 1, 1), Frequency::Daily);
    let activity_b = Activity::new("drop later", date(2024, 1, 2), Frequency::Weekly);
    repo.create_activity(&activity_a).unwrap();
    repo.create_activity(&activity_b).unwrap();
    repo.soft_delete_activity(activity_b.uuid).unwrap();

    let visible = repo.list_activities(&ActivityListQuery::default()).unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].uuid, activity_a.uuid);

    let include_deleted = ActivityListQuery {
        include_deleted: true,
        ..ActivityListQuery::default()
    };
    let all = repo.list_activities(&include_deleted).unwrap();
    assert_eq!(all.len(), 2);
}

#[test]
fn soft_delete_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteActivityRepository::try_new(&conn).unwrap();

    let activity = Activity::new("weekly review", date(2024, 1, 1), Frequency::Weekly);
    repo.create_activity(&activity).unwrap();

    repo.soft_delete_activity(activity.uuid).unwrap();
    repo.soft_delete_activity(activity.uuid).unwrap();

    assert!(repo.get_activity(activity.uuid, false).unwrap().is_none());
    let deleted = repo.get_activity(activity.uuid, true).unwrap().unwrap();
    assert!(deleted.is_deleted);
}

#[test]
fn validation_failure_blocks_create_and_update() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteActivityRepository::try_new(&conn).unwrap();

    let blank = Activity::new("   ", date(2024, 1, 1), Frequency::Daily);
    let create_err = repo.create_activity(&blank).unwrap_err();
    assert!(matches!(create_err, RepoError::Validation(_)));

    let mut valid = Activity::new("named", date(2024, 1, 1), Frequency::Daily);
    repo.create_activity(&valid).unwrap();

    valid.category = Some("  ".to_string());
    let update_err = repo.update_activity(&valid).unwrap_err();
    assert!(matches!(update_err, RepoError::Validation(_)));
}

#[test]
fn list_filters_by_category() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteActivityRepository::try_new(&conn).unwrap();

    let mut health = Activity::new("run", date(2024, 1, 1), Frequency::Daily);
    health.category = Some("health".to_string());
    let mut social = Activity::new("call parents", date(2024, 1, 1), Frequency::Weekly);
    social.category = Some("social".to_string());
    let untagged = Activity::new("misc", date(2024, 1, 1), Frequency::Daily);
    repo.create_activity(&health).unwrap();
    repo.create_activity(&social).unwrap();
    repo.create_activity(&untagged).unwrap();

    let query = ActivityListQuery {
        category: Some("social".to_string()),
        ..ActivityListQuery::default()
    };

    let result = repo.list_activities(&query).unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].uuid, social.uuid);
}

#[test]
fn list_orders_by_start_date_then_uuid() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteActivityRepository::try_new(&conn).unwrap();

    let later = Activity::new("later", date(2024, 3, 1), Frequency::Daily);
    let earlier = Activity::new("earlier", date(2024, 1, 1), Frequency::Daily);
    repo.create_activity(&later).unwrap();
    repo.create_activity(&earlier).unwrap();

    let listed = repo.list_activities(&ActivityListQuery::default()).unwrap();
    assert_eq!(listed[0].uuid, earlier.uuid);
    assert_eq!(listed[1].uuid, later.uuid);
}

#[test]
fn list_pagination_with_limit_and_offset_is_stable() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteActivityRepository::try_new(&conn).unwrap();

    let activity_a = activity_with_fixed_id("00000000-0000-4000-8000-000000000001", "a");
    let activity_b = activity_with_fixed_id("00000000-0000-4000-8000-000000000002", "b");
    let activity_c = activity_with_fixed_id("00000000-0000-4000-8000-000000000003", "c");
    repo.create_activity(&activity_c).unwrap();
    repo.create_activity(&activity_a).unwrap();
    repo.create_activity(&activity_b).unwrap();

    let query = ActivityListQuery {
        limit: Some(2),
        offset: 1,
        ..ActivityListQuery::default()
    };
    let page = repo.list_activities(&query).unwrap();

    assert_eq!(page.len(), 2);
    assert_eq!(page[0].uuid, activity_b.uuid);
    assert_eq!(page[1].uuid, activity_c.uuid);
}

#[test]
fn list_pagination_with_offset_only_path_is_stable() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteActivityRepository::try_new(&conn).unwrap();

    let activity_a = activity_with_fixed_id("00000000-0000-4000-8000-000000000001", "a");
    let activity_b = activity_with_fixed_id("00000000-0000-4000-8000-000000000002", "b");
    let activity_c = activity_with_fixed_id("00000000-0000-4000-8000-000000000003", "c");
    repo.create_activity(&activity_a).unwrap();
    repo.create_activity(&activity_b).unwrap();
    repo.create_activity(&activity_c).unwrap();

    let query = ActivityListQuery {
        offset: 1,
        ..ActivityListQuery::default()
    };
    let page = repo.list_activities(&query).unwrap();

    assert_eq!(page.len(), 2);
    assert_eq!(page[0].uuid, activity_b.uuid);
    assert_eq!(page[1].uuid, activity_c.uuid);
}

#[test]
fn stored_unknown_frequency_reads_back_permissively() {
    let conn = open_db_in_memory().unwrap();

    conn.execute(
        "INSERT INTO activities (uuid, title, category, start_date, frequency, is_deleted)
         VALUES (?1, 'typoed routine', NULL, '2024-01-01', 'dayly', 0);",
        ["00000000-0000-4000-8000-00000000000a"],
    )
    .unwrap();

    let repo = SqliteActivityRepository::try_new(&conn).unwrap();
    let id = Uuid::parse_str("00000000-0000-4000-8000-00000000000a").unwrap();
    let loaded = repo.get_activity(id, false).unwrap().unwrap();

    assert_eq!(loaded.frequency, Frequency::Unrecognized("dayly".to_string()));
    assert!(!occurs_on(&loaded, date(2024, 1, 1)));
}

#[test]
fn stored_malformed_start_date_is_rejected() {
    let conn = open_db_in_memory().unwrap();

    conn.execute(
        "INSERT INTO activities (uuid, title, category, start_date, frequency, is_deleted)
         VALUES (?1, 'broken row', NULL, 'not-a-date', 'daily', 0);",
        ["00000000-0000-4000-8000-00000000000b"],
    )
    .unwrap();

    let repo = SqliteActivityRepository::try_new(&conn).unwrap();
    let id = Uuid::parse_str("00000000-0000-4000-8000-00000000000b").unwrap();
    let err = repo.get_activity(id, false).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn service_wraps_repository_calls() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteActivityRepository::try_new(&conn).unwrap();
    let service = ActivityService::new(repo);

    let request = CreateActivityRequest {
        title: "  deep work  ".to_string(),
        category: Some(" focus ".to_string()),
        start_date: date(2024, 1, 8),
        frequency: Frequency::Weekdays,
    };
    let id = service.create_activity(&request).unwrap();

    let fetched = service.get_activity(id, false).unwrap().unwrap();
    assert_eq!(fetched.title, "deep work");
    assert_eq!(fetched.category.as_deref(), Some("focus"));

    let ids: HashSet<_> = service
        .list_activities(&ActivityListQuery::default())
        .unwrap()
        .into_iter()
        .map(|item| item.uuid)
        .collect();
    assert!(ids.contains(&id));

    service.soft_delete_activity(id).unwrap();
    assert!(service.get_activity(id, false).unwrap().is_none());
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteActivityRepository::try_new(&conn);
    match result {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_required_activities_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteActivityRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("activities"))
    ));
}

#[test]
fn repository_rejects_connection_missing_required_activities_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE activities (
            uuid TEXT PRIMARY KEY NOT NULL,
            title TEXT NOT NULL,
            is_deleted INTEGER NOT NULL DEFAULT 0
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteActivityRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "activities",
            column: "category"
        })
    ));
}

fn activity_with_fixed_id(id: &str, title: &str) -> Activity {
    Activity::with_id(
        Uuid::parse_str(id).unwrap(),
        title,
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        Frequency::Daily,
    )
    .unwrap()
}
