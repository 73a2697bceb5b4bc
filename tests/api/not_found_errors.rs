use chrono::{TimeDelta, Utc};

use crate::helpers::spawn_app;

#[derive(serde::Deserialize, Debug)]
struct ErrorRecord {
    path: String,
    redirected: bool,
}

#[derive(serde::Deserialize, Debug)]
struct Pagination {
    page: i64,
    page_size: i64,
    total_items: i64,
    total_pages: i64,
}

#[derive(serde::Deserialize, Debug)]
struct ErrorsResponse {
    data: Vec<ErrorRecord>,
    pagination: Pagination,
}

#[tokio::test]
async fn errors_are_paginated_newest_first() {
    let app = spawn_app().await;
    app.test_shop.login(&app).await;
    let shop = app.test_shop.shop_domain.clone();

    for i in 0..5 {
        let created_at = Utc::now() - TimeDelta::minutes(i);
        app.insert_error(&shop, &format!("/page-{i}"), None, created_at, false).await;
    }

    let response = app.get_errors("page=1&page_size=2").await;
    assert_eq!(response.status().as_u16(), 200);
    let body: ErrorsResponse = response.json().await.expect("Failed to parse errors");

    assert_eq!(body.data.len(), 2);
    assert_eq!(body.data[0].path, "/page-0");
    assert_eq!(body.pagination.page, 1);
    assert_eq!(body.pagination.page_size, 2);
    assert_eq!(body.pagination.total_items, 5);
    assert_eq!(body.pagination.total_pages, 3);

    let last: ErrorsResponse = app.get_errors("page=3&page_size=2").await.json().await.unwrap();
    assert_eq!(last.data.len(), 1);
    assert_eq!(last.data[0].path, "/page-4");
}

#[tokio::test]
async fn unfixed_filter_hides_redirected_errors() {
    let app = spawn_app().await;
    app.test_shop.login(&app).await;
    let shop = app.test_shop.shop_domain.clone();

    app.insert_error(&shop, "/fixed", None, Utc::now(), true).await;
    app.insert_error(&shop, "/broken", None, Utc::now(), false).await;
    app.insert_error("other.myshopify.com", "/elsewhere", None, Utc::now(), false).await;

    let body: ErrorsResponse = app.get_errors("unfixed_only=true").await.json().await.unwrap();

    assert_eq!(body.pagination.total_items, 1);
    assert_eq!(body.data.len(), 1);
    assert_eq!(body.data[0].path, "/broken");
    assert!(!body.data[0].redirected);
}
