use chrono::{DateTime, TimeDelta, Utc};

use crate::helpers::spawn_app;

#[derive(serde::Deserialize, Debug)]
struct SeriesPoint {
    #[allow(dead_code)]
    bucket: DateTime<Utc>,
    count: i64,
}

#[derive(serde::Deserialize, Debug, PartialEq)]
struct PathCount {
    path: String,
    count: i64,
}

#[derive(serde::Deserialize, Debug)]
struct ReferrerCount {
    referer: Option<String>,
    count: i64,
}

#[derive(serde::Deserialize, Debug)]
struct Snapshot {
    range: String,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    error_series: Vec<SeriesPoint>,
    top_paths: Vec<PathCount>,
    top_referrers: Vec<ReferrerCount>,
    total_redirects: i64,
    total_errors: i64,
    unfixed_errors: i64,
    avg_daily: i64,
}

fn minutes_ago(minutes: i64) -> DateTime<Utc> {
    Utc::now() - TimeDelta::minutes(minutes)
}

#[tokio::test]
async fn empty_shops_get_an_empty_snapshot() {
    let app = spawn_app().await;
    app.test_shop.login(&app).await;

    let response = app.get_analytics(Some("week")).await;
    assert_eq!(response.status().as_u16(), 200);

    let snapshot: Snapshot = response.json().await.expect("Failed to parse snapshot");
    assert_eq!(snapshot.range, "week");
    assert!(snapshot.error_series.is_empty());
    assert!(snapshot.top_paths.is_empty());
    assert!(snapshot.top_referrers.is_empty());
    assert_eq!(snapshot.total_errors, 0);
    assert_eq!(snapshot.unfixed_errors, 0);
    assert_eq!(snapshot.total_redirects, 0);
    assert_eq!(snapshot.avg_daily, 0);
}

#[tokio::test]
async fn day_snapshot_counts_paths_within_the_window() {
    let app = spawn_app().await;
    app.test_shop.login(&app).await;
    let shop = app.test_shop.shop_domain.clone();

    app.insert_error(&shop, "/a", Some("https://google.com"), minutes_ago(5), false).await;
    app.insert_error(&shop, "/b", None, minutes_ago(65), false).await;
    app.insert_error(&shop, "/a", Some("https://google.com"), minutes_ago(125), false).await;
    // outside the window
    app.insert_error(&shop, "/old", None, Utc::now() - TimeDelta::days(3), false).await;
    // another shop entirely
    app.insert_error("other.myshopify.com", "/a", None, minutes_ago(5), false).await;

    let response = app.get_analytics(Some("day")).await;
    assert_eq!(response.status().as_u16(), 200);
    let snapshot: Snapshot = response.json().await.expect("Failed to parse snapshot");

    assert_eq!(snapshot.range, "day");
    assert!(snapshot.error_series.len() <= 3);
    assert_eq!(snapshot.error_series.iter().map(|p| p.count).sum::<i64>(), 3);
    assert_eq!(snapshot.total_errors, 3);
    assert_eq!(snapshot.avg_daily, 3);
    assert_eq!(
        snapshot.top_paths,
        vec![
            PathCount { path: "/a".into(), count: 2 },
            PathCount { path: "/b".into(), count: 1 },
        ]
    );
    assert_eq!(snapshot.top_referrers[0].referer.as_deref(), Some("https://google.com"));
    assert_eq!(snapshot.top_referrers[0].count, 2);
    assert_eq!((snapshot.end_date - snapshot.start_date).num_days(), 1);
}

#[tokio::test]
async fn unsupported_ranges_behave_like_week() {
    let app = spawn_app().await;
    app.test_shop.login(&app).await;
    let shop = app.test_shop.shop_domain.clone();

    app.insert_error(&shop, "/recent", None, Utc::now() - TimeDelta::days(2), false).await;
    app.insert_error(&shop, "/stale", None, Utc::now() - TimeDelta::days(10), false).await;

    let quarter: Snapshot = app.get_analytics(Some("quarter")).await.json().await.unwrap();
    let week: Snapshot = app.get_analytics(Some("week")).await.json().await.unwrap();
    let missing: Snapshot = app.get_analytics(None).await.json().await.unwrap();

    for snapshot in [&quarter, &week, &missing] {
        assert_eq!(snapshot.range, "week");
        assert_eq!(snapshot.total_errors, 1);
        assert_eq!((snapshot.end_date - snapshot.start_date).num_days(), 7);
    }
}

#[tokio::test]
async fn repeated_ranges_use_the_first_value() {
    let app = spawn_app().await;
    app.test_shop.login(&app).await;

    let response = app.get_analytics(Some("day&range=month")).await;
    assert_eq!(response.status().as_u16(), 200);

    let snapshot: Snapshot = response.json().await.expect("Failed to parse snapshot");
    assert_eq!(snapshot.range, "day");
    assert_eq!((snapshot.end_date - snapshot.start_date).num_days(), 1);
}

#[tokio::test]
async fn undecodable_ranges_behave_like_week() {
    let app = spawn_app().await;
    app.test_shop.login(&app).await;

    let response = app.get_analytics(Some("%FF")).await;
    assert_eq!(response.status().as_u16(), 200);

    let snapshot: Snapshot = response.json().await.expect("Failed to parse snapshot");
    assert_eq!(snapshot.range, "week");
    assert_eq!((snapshot.end_date - snapshot.start_date).num_days(), 7);
}

#[tokio::test]
async fn redirects_and_unfixed_errors_are_counted() {
    let app = spawn_app().await;
    app.test_shop.login(&app).await;
    let shop = app.test_shop.shop_domain.clone();

    app.insert_error(&shop, "/fixed", None, minutes_ago(10), true).await;
    app.insert_error(&shop, "/broken", None, minutes_ago(20), false).await;
    app.insert_error(&shop, "/broken", None, minutes_ago(30), false).await;
    app.insert_redirect(&shop, minutes_ago(10)).await;
    app.insert_redirect(&shop, Utc::now() - TimeDelta::days(40)).await;

    let snapshot: Snapshot = app.get_analytics(Some("month")).await.json().await.unwrap();

    assert_eq!(snapshot.range, "month");
    assert_eq!(snapshot.total_errors, 3);
    assert_eq!(snapshot.unfixed_errors, 2);
    assert!(snapshot.unfixed_errors <= snapshot.total_errors);
    assert_eq!(snapshot.total_redirects, 1);
    // 3 errors over 30 days rounds down to zero
    assert_eq!(snapshot.avg_daily, 0);
}

#[tokio::test]
async fn top_lists_are_capped() {
    let app = spawn_app().await;
    app.test_shop.login(&app).await;
    let shop = app.test_shop.shop_domain.clone();

    for i in 0..8 {
        let path = format!("/missing-{i}");
        let referer = format!("https://ref-{i}.example");
        app.insert_error(&shop, &path, Some(&referer), minutes_ago(i + 1), false).await;
    }

    let snapshot: Snapshot = app.get_analytics(Some("day")).await.json().await.unwrap();

    assert_eq!(snapshot.total_errors, 8);
    assert_eq!(snapshot.top_paths.len(), 5);
    assert_eq!(snapshot.top_referrers.len(), 3);
}
