use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{
    activity_count, cld, init_db_with_fixtures, setup_test_db, submit_time_entry,
    time_entry_field, time_entry_status,
};

#[test]
fn test_clock_in_out_computes_duration_and_submitter() {
    let db_path = setup_test_db("clock_in_out");
    init_db_with_fixtures(&db_path);

    cld()
        .args([
            "--db", &db_path, "--test", "clock", "in", "--job", "1", "--user", "1", "--at",
            "2025-06-02 07:30",
        ])
        .assert()
        .success()
        .stdout(contains("entry 1"));

    assert_eq!(time_entry_status(&db_path, 1), "in_progress");
    assert_eq!(time_entry_field(&db_path, 1, "clock_out"), None);

    cld()
        .args([
            "--db", &db_path, "--test", "clock", "out", "--entry", "1", "--at",
            "2025-06-02 15:30",
        ])
        .assert()
        .success()
        .stdout(contains("08:00 worked"))
        .stdout(contains("status submitted"));

    assert_eq!(time_entry_status(&db_path, 1), "submitted");
    assert_eq!(
        time_entry_field(&db_path, 1, "duration_minutes").as_deref(),
        Some("480")
    );
    assert_eq!(
        time_entry_field(&db_path, 1, "submitted_by").as_deref(),
        Some("1")
    );
}

#[test]
fn test_location_round_trips_through_clock_in_and_out() {
    let db_path = setup_test_db("clock_locations");
    init_db_with_fixtures(&db_path);

    cld()
        .args([
            "--db", &db_path, "--test", "clock", "in", "--job", "1", "--user", "1",
            "--location", "45.07,7.68,12.5", "--at", "2025-06-02 07:30",
        ])
        .assert()
        .success();

    assert_eq!(
        time_entry_field(&db_path, 1, "clock_in_lat").as_deref(),
        Some("45.07")
    );
    assert_eq!(
        time_entry_field(&db_path, 1, "clock_in_lng").as_deref(),
        Some("7.68")
    );
    assert_eq!(
        time_entry_field(&db_path, 1, "clock_in_accuracy").as_deref(),
        Some("12.5")
    );
    assert_eq!(time_entry_field(&db_path, 1, "clock_out_lat"), None);

    // clock-out fix without an accuracy reading
    cld()
        .args([
            "--db", &db_path, "--test", "clock", "out", "--entry", "1", "--location",
            "45.08,7.69", "--at", "2025-06-02 15:30",
        ])
        .assert()
        .success();

    assert_eq!(
        time_entry_field(&db_path, 1, "clock_out_lat").as_deref(),
        Some("45.08")
    );
    assert_eq!(
        time_entry_field(&db_path, 1, "clock_out_lng").as_deref(),
        Some("7.69")
    );
    assert_eq!(time_entry_field(&db_path, 1, "clock_out_accuracy"), None);
    // the clock-in fix is untouched by the close
    assert_eq!(
        time_entry_field(&db_path, 1, "clock_in_lat").as_deref(),
        Some("45.07")
    );

    // a malformed fix is refused before any write
    cld()
        .args([
            "--db", &db_path, "--test", "clock", "in", "--job", "1", "--user", "3",
            "--location", "north-ish",
        ])
        .assert()
        .failure()
        .stderr(contains("Validation error"))
        .stderr(contains("location"));
}

#[test]
fn test_second_clock_in_same_job_user_conflicts() {
    let db_path = setup_test_db("double_clock_in");
    init_db_with_fixtures(&db_path);

    cld()
        .args([
            "--db", &db_path, "--test", "clock", "in", "--job", "1", "--user", "1",
        ])
        .assert()
        .success();

    cld()
        .args([
            "--db", &db_path, "--test", "clock", "in", "--job", "1", "--user", "1",
        ])
        .assert()
        .failure()
        .stderr(contains("Conflict"))
        .stderr(contains("already exists"));

    // only one open entry, only one clocked_in audit row
    assert_eq!(activity_count(&db_path, Some("time_entry.clocked_in")), 1);
}

#[test]
fn test_clock_out_requires_open_session() {
    let db_path = setup_test_db("clock_out_closed");
    init_db_with_fixtures(&db_path);
    submit_time_entry(&db_path);

    // second clock-out on the same entry: no longer in_progress
    cld()
        .args([
            "--db", &db_path, "--test", "clock", "out", "--entry", "1", "--at",
            "2025-06-02 16:00",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid state"));

    assert_eq!(time_entry_status(&db_path, 1), "submitted");
}

#[test]
fn test_clock_out_before_clock_in_is_validation_error() {
    let db_path = setup_test_db("clock_out_backwards");
    init_db_with_fixtures(&db_path);

    cld()
        .args([
            "--db", &db_path, "--test", "clock", "in", "--job", "1", "--user", "1", "--at",
            "2025-06-02 07:30",
        ])
        .assert()
        .success();

    cld()
        .args([
            "--db", &db_path, "--test", "clock", "out", "--entry", "1", "--at",
            "2025-06-02 07:00",
        ])
        .assert()
        .failure()
        .stderr(contains("Validation error"));

    assert_eq!(time_entry_status(&db_path, 1), "in_progress");
}

#[test]
fn test_full_reject_resubmit_approve_cycle() {
    let db_path = setup_test_db("reject_resubmit_approve");
    init_db_with_fixtures(&db_path);
    submit_time_entry(&db_path);

    // supervisor 2 rejects → adjustment_requested with reason stored
    cld()
        .args([
            "--db", &db_path, "--test", "time", "reject", "--entry", "1", "--approver", "2",
            "--reason", "missed break log",
        ])
        .assert()
        .success()
        .stdout(contains("adjustment requested"));

    assert_eq!(time_entry_status(&db_path, 1), "adjustment_requested");
    assert_eq!(
        time_entry_field(&db_path, 1, "rejection_reason").as_deref(),
        Some("missed break log")
    );

    // owner resubmits → back to submitted, reason cleared
    cld()
        .args([
            "--db", &db_path, "--test", "time", "resubmit", "--entry", "1", "--user", "1",
            "--notes", "break added",
        ])
        .assert()
        .success();

    assert_eq!(time_entry_status(&db_path, 1), "submitted");
    assert_eq!(time_entry_field(&db_path, 1, "rejection_reason"), None);

    // supervisor approves → terminal
    cld()
        .args([
            "--db", &db_path, "--test", "time", "approve", "--entry", "1", "--approver", "2",
        ])
        .assert()
        .success();

    assert_eq!(time_entry_status(&db_path, 1), "approved");
    assert_eq!(
        time_entry_field(&db_path, 1, "approver_id").as_deref(),
        Some("2")
    );
    assert!(time_entry_field(&db_path, 1, "approved_at").is_some());
}

#[test]
fn test_reject_with_blank_reason_fails_and_leaves_status() {
    let db_path = setup_test_db("blank_reason");
    init_db_with_fixtures(&db_path);
    submit_time_entry(&db_path);

    cld()
        .args([
            "--db", &db_path, "--test", "time", "reject", "--entry", "1", "--approver", "2",
            "--reason", "   ",
        ])
        .assert()
        .failure()
        .stderr(contains("Validation error"))
        .stderr(contains("reason"));

    assert_eq!(time_entry_status(&db_path, 1), "submitted");
    assert_eq!(activity_count(&db_path, Some("time_entry.rejected")), 0);
}

#[test]
fn test_reject_after_approve_is_invalid_state() {
    let db_path = setup_test_db("reject_after_approve");
    init_db_with_fixtures(&db_path);
    submit_time_entry(&db_path);

    cld()
        .args([
            "--db", &db_path, "--test", "time", "approve", "--entry", "1", "--approver", "2",
        ])
        .assert()
        .success();

    cld()
        .args([
            "--db", &db_path, "--test", "time", "reject", "--entry", "1", "--approver", "2",
            "--reason", "changed my mind",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid state"));

    assert_eq!(time_entry_status(&db_path, 1), "approved");
}

#[test]
fn test_self_approval_is_forbidden_and_unaudited() {
    let db_path = setup_test_db("self_approval");
    init_db_with_fixtures(&db_path);

    // supervisor 2 works a shift themselves, then tries to approve it
    cld()
        .args([
            "--db", &db_path, "--test", "clock", "in", "--job", "1", "--user", "2", "--at",
            "2025-06-02 07:30",
        ])
        .assert()
        .success();
    cld()
        .args([
            "--db", &db_path, "--test", "clock", "out", "--entry", "1", "--at",
            "2025-06-02 15:30",
        ])
        .assert()
        .success();

    let before = activity_count(&db_path, None);

    cld()
        .args([
            "--db", &db_path, "--test", "time", "approve", "--entry", "1", "--approver", "2",
        ])
        .assert()
        .failure()
        .stderr(contains("Forbidden"))
        .stderr(contains("own entry"));

    assert_eq!(time_entry_status(&db_path, 1), "submitted");
    assert_eq!(activity_count(&db_path, None), before);
}

#[test]
fn test_crew_member_cannot_approve() {
    let db_path = setup_test_db("crew_cannot_approve");
    init_db_with_fixtures(&db_path);
    submit_time_entry(&db_path);

    // actor 3 is crew, not supervisor
    cld()
        .args([
            "--db", &db_path, "--test", "time", "approve", "--entry", "1", "--approver", "3",
        ])
        .assert()
        .failure()
        .stderr(contains("Forbidden").and(contains("supervisor")));

    assert_eq!(time_entry_status(&db_path, 1), "submitted");
}

#[test]
fn test_resubmit_only_by_owner_and_only_after_adjustment() {
    let db_path = setup_test_db("resubmit_rules");
    init_db_with_fixtures(&db_path);
    submit_time_entry(&db_path);

    // not in adjustment_requested yet
    cld()
        .args([
            "--db", &db_path, "--test", "time", "resubmit", "--entry", "1", "--user", "1",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid state"));

    cld()
        .args([
            "--db", &db_path, "--test", "time", "reject", "--entry", "1", "--approver", "2",
            "--reason", "wrong job",
        ])
        .assert()
        .success();

    // wrong user
    cld()
        .args([
            "--db", &db_path, "--test", "time", "resubmit", "--entry", "1", "--user", "3",
        ])
        .assert()
        .failure()
        .stderr(contains("Forbidden"));

    assert_eq!(time_entry_status(&db_path, 1), "adjustment_requested");
}

#[test]
fn test_time_list_filters_by_status() {
    let db_path = setup_test_db("time_list_filter");
    init_db_with_fixtures(&db_path);
    submit_time_entry(&db_path);

    // a second, still-open entry for user 3
    cld()
        .args([
            "--db", &db_path, "--test", "clock", "in", "--job", "1", "--user", "3", "--at",
            "2025-06-02 08:00",
        ])
        .assert()
        .success();

    cld()
        .args([
            "--db", &db_path, "--test", "time", "list", "--job", "1", "--status", "submitted",
        ])
        .assert()
        .success()
        .stdout(contains("submitted"))
        .stdout(contains("in_progress").not());

    cld()
        .args(["--db", &db_path, "--test", "time", "list", "--job", "1"])
        .assert()
        .success()
        .stdout(contains("submitted"))
        .stdout(contains("in_progress"));
}

#[test]
fn test_clock_in_unknown_job_or_user_fails() {
    let db_path = setup_test_db("unknown_refs");
    init_db_with_fixtures(&db_path);

    cld()
        .args([
            "--db", &db_path, "--test", "clock", "in", "--job", "99", "--user", "1",
        ])
        .assert()
        .failure()
        .stderr(contains("Not found"));

    cld()
        .args([
            "--db", &db_path, "--test", "clock", "in", "--job", "1", "--user", "99",
        ])
        .assert()
        .failure()
        .stderr(contains("Not found"));
}
