mod common;

use common::{client, setup_store};

use chrono::Utc;
use repairflow::jobs::model::Job;
use repairflow::jobs::JobStore;

#[tokio::test]
async fn reserve_job_no_is_unique_and_monotonic() {
    let store = setup_store().await;

    let a = store.reserve_job_no().await.unwrap();
    let b = store.reserve_job_no().await.unwrap();
    let c = store.reserve_job_no().await.unwrap();

    assert_eq!(a, "JB-0001");
    assert_eq!(b, "JB-0002");
    assert_eq!(c, "JB-0003");
}

#[tokio::test]
async fn put_then_get_round_trips_the_record() {
    let store = setup_store().await;

    let mut job = Job::received("JB-0001".to_string(), client("Acme"), Utc::now());
    job.remarks = "bridge rectifier replaced".to_string();
    store.put(&job).await.unwrap();

    let fetched = store.get("JB-0001").await.unwrap().unwrap();
    assert_eq!(fetched.client_name, "Acme");
    assert_eq!(fetched.remarks, "bridge rectifier replaced");
    assert_eq!(fetched.status, "received");
    assert!(fetched.dispatch_date.is_none());
}

#[tokio::test]
async fn put_replaces_existing_record_keyed_by_job_no() {
    let store = setup_store().await;

    let job = Job::received("JB-0001".to_string(), client("Before"), Utc::now());
    store.put(&job).await.unwrap();

    let mut updated = job.clone();
    updated.client_name = "After".to_string();
    updated.status = "inspected".to_string();
    store.put(&updated).await.unwrap();

    let all = store.list_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].client_name, "After");
    assert_eq!(all[0].status, "inspected");
}

#[tokio::test]
async fn list_all_orders_by_creation() {
    let store = setup_store().await;

    let first = Job::received("JB-0001".to_string(), client("First"), Utc::now());
    let second = Job::received(
        "JB-0002".to_string(),
        client("Second"),
        Utc::now() + chrono::Duration::seconds(1),
    );
    store.put(&second).await.unwrap();
    store.put(&first).await.unwrap();

    let all = store.list_all().await.unwrap();
    let nos: Vec<&str> = all.iter().map(|j| j.job_no.as_str()).collect();
    assert_eq!(nos, ["JB-0001", "JB-0002"]);
}

#[tokio::test]
async fn get_unknown_job_is_none() {
    let store = setup_store().await;
    assert!(store.get("JB-0404").await.unwrap().is_none());
}
