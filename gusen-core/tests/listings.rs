#[path = "support/mod.rs"]
mod support;

use anyhow::Result;
use gusen_model::PageRequest;
use support::{harness, identity, log_entry};

fn twenty_five_users() -> Vec<gusen_core::Identity> {
    // Stored newest first so ranking has to reorder them.
    (0..25)
        .rev()
        .map(|i| identity(&format!("user{i:02}"), "pw", "TELLER", i))
        .collect()
}

#[tokio::test]
async fn user_pages_window_over_twenty_five_rows() -> Result<()> {
    let app = harness(twenty_five_users(), vec![]);

    let first = app.management.list_users(&PageRequest::new(1, 10, "")).await?;
    assert_eq!(first.items.len(), 10);
    assert_eq!(first.total, 25);
    assert_eq!(first.items[0].login_id.as_str(), "USER00");

    let third = app.management.list_users(&PageRequest::new(3, 10, "")).await?;
    assert_eq!(third.items.len(), 5);
    assert_eq!(third.total, 25);
    assert_eq!(third.items[4].login_id.as_str(), "USER24");

    let fourth = app.management.list_users(&PageRequest::new(4, 10, "")).await?;
    assert!(fourth.items.is_empty());
    assert_eq!(fourth.total, 25);
    Ok(())
}

#[tokio::test]
async fn invalid_page_inputs_fall_back_to_first_page_of_ten() -> Result<()> {
    let app = harness(twenty_five_users(), vec![]);

    let page = app.management.list_users(&PageRequest::new(0, -5, "")).await?;
    assert_eq!((page.page, page.size), (1, 10));
    assert_eq!(page.items.len(), 10);
    Ok(())
}

#[tokio::test]
async fn user_keyword_matches_name_or_email() -> Result<()> {
    let app = harness(twenty_five_users(), vec![]);

    // Full names are "userNN Person"; emails are "userNN@example.test".
    let by_name = app.management.list_users(&PageRequest::new(1, 10, "user1")).await?;
    assert_eq!(by_name.total, 10);

    let by_email = app
        .management
        .list_users(&PageRequest::new(1, 10, "user07@example"))
        .await?;
    assert_eq!(by_email.total, 1);
    assert_eq!(by_email.items[0].login_id.as_str(), "USER07");

    let none = app.management.list_users(&PageRequest::new(1, 10, "USER07")).await?;
    assert_eq!(none.total, 0);
    Ok(())
}

#[tokio::test]
async fn log_pages_are_most_recent_first_and_filtered_by_login_id() -> Result<()> {
    let entries = vec![
        log_entry("OPS01", 1),
        log_entry("OPS02", 5),
        log_entry("ADMIN1", 3),
        log_entry("OPS01", 9),
    ];
    let app = harness(vec![], entries);

    let all = app.activity.list_logs(&PageRequest::new(1, 10, "")).await?;
    let minutes: Vec<i64> = all
        .items
        .iter()
        .map(|entry| (entry.action_at - support::base_time()).num_minutes())
        .collect();
    assert_eq!(minutes, vec![9, 5, 3, 1]);

    let ops = app.activity.list_logs(&PageRequest::new(1, 1, "OPS")).await?;
    assert_eq!(ops.total, 3);
    assert_eq!(ops.items.len(), 1);
    assert_eq!(ops.items[0].login_id, "OPS01");

    let inner = app.activity.list_logs(&PageRequest::new(1, 10, "PS0")).await?;
    assert_eq!(inner.total, 3);
    assert!(inner.items.iter().all(|entry| entry.login_id.starts_with("OPS")));
    Ok(())
}
