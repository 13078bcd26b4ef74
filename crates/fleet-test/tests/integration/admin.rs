//! Tests for the administrative driver browser.

use salvo::http::StatusCode;

use super::helpers::*;

#[test_log::test(tokio::test)]
async fn changelist_shows_license_number() {
    let test_db = TestDb::new().await;
    let admin = test_db.seed_staff("admin").await;
    test_db.seed_driver("driver", Some("ADM56984")).await;
    let service = test_db.service();

    let context = TestRequest::get("/admin/taxi/driver/")
        .as_driver(&admin)
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .assert_body_contains("ADM56984")
        .json();
    assert_eq!(context["result_count"], 2);
    assert!(
        context["list_display"]
            .as_array()
            .is_some_and(|fields| fields.contains(&serde_json::json!("license_number")))
    );
}

#[test_log::test(tokio::test)]
async fn change_page_shows_license_number() {
    let test_db = TestDb::new().await;
    let admin = test_db.seed_staff("admin").await;
    let driver = test_db.seed_driver("driver", Some("ADM56984")).await;
    let service = test_db.service();

    let context = TestRequest::get(&format!("/admin/taxi/driver/{}/change/", driver.id))
        .as_driver(&admin)
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .assert_body_contains("ADM56984")
        .json();
    assert_eq!(context["original"]["username"], "driver");

    let _ = TestRequest::get(&format!(
        "/admin/taxi/driver/{}/change/",
        uuid::Uuid::now_v7()
    ))
    .as_driver(&admin)
    .send(&service)
    .await
    .assert_status(StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn admin_requires_staff() {
    let test_db = TestDb::new().await;
    let driver = test_db.seed_driver("driver", Some("ADM56984")).await;
    let service = test_db.service();

    let _ = TestRequest::get("/admin/taxi/driver/")
        .send(&service)
        .await
        .assert_redirect("/admin/login/?next=/admin/taxi/driver/");

    let _ = TestRequest::get("/admin/taxi/driver/")
        .as_driver(&driver)
        .send(&service)
        .await
        .assert_status(StatusCode::FORBIDDEN);
}
