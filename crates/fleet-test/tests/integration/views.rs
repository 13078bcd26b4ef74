//! Tests for the landing summary, listings and record pages.

use salvo::http::StatusCode;

use super::helpers::*;

// ============================================================================
// Login required
// ============================================================================

#[test_log::test(tokio::test)]
async fn anonymous_pages_redirect_to_login() {
    let test_db = TestDb::new().await;
    let service = test_db.service();

    for (path, location) in [
        ("/", "/accounts/login/?next=/"),
        ("/manufacturers/", "/accounts/login/?next=/manufacturers/"),
        ("/cars/", "/accounts/login/?next=/cars/"),
        ("/drivers/", "/accounts/login/?next=/drivers/"),
    ] {
        let _ = TestRequest::get(path)
            .send(&service)
            .await
            .assert_redirect(location);
    }
}

#[test_log::test(tokio::test)]
async fn wrong_basic_password_is_anonymous() {
    let test_db = TestDb::new().await;
    test_db.seed_driver("test_user", None).await;
    let service = test_db.service();

    let _ = TestRequest::get("/manufacturers/")
        .basic("test_user", "not-the-password")
        .send(&service)
        .await
        .assert_redirect("/accounts/login/?next=/manufacturers/");
}

// ============================================================================
// Landing summary
// ============================================================================

#[test_log::test(tokio::test)]
async fn index_counts_records_and_visits() {
    let test_db = TestDb::new().await;
    let user = test_db.seed_driver("test_user", None).await;
    let other = test_db.seed_driver("other", Some("ABC12345")).await;
    let toyota = test_db.seed_manufacturer("Toyota", "Japan").await;
    test_db.seed_car("Corolla", &toyota, &[&other]).await;
    let service = test_db.service();

    let first = TestRequest::get("/")
        .as_driver(&user)
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(first["num_drivers"], 2);
    assert_eq!(first["num_cars"], 1);
    assert_eq!(first["num_manufacturers"], 1);
    assert_eq!(first["num_visits"], 1);

    let second = TestRequest::get("/")
        .as_driver(&user)
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(second["num_visits"], 2);

    // Each account counts its own visits.
    let others = TestRequest::get("/")
        .as_driver(&other)
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(others["num_visits"], 1);
}

// ============================================================================
// Listings and search
// ============================================================================

#[test_log::test(tokio::test)]
async fn manufacturer_search_narrows_by_name() {
    let test_db = TestDb::new().await;
    let user = test_db.seed_driver("test_user", None).await;
    test_db.seed_manufacturer("Toyota", "Japan").await;
    test_db.seed_manufacturer("Ford", "USA").await;
    test_db.seed_manufacturer("Chevrolet", "USA").await;
    let service = test_db.service();

    let filtered = TestRequest::get("/manufacturers/?name=Ford")
        .as_driver(&user)
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(
        list_field(&filtered, "manufacturer_list", "name"),
        vec!["Ford"]
    );
    assert_eq!(filtered["search_form"]["initial"]["name"], "Ford");

    let lowercase = TestRequest::get("/manufacturers/?name=ford")
        .as_driver(&user)
        .send(&service)
        .await
        .json();
    assert_eq!(
        list_field(&lowercase, "manufacturer_list", "name"),
        vec!["Ford"]
    );

    let unfiltered = TestRequest::get("/manufacturers/")
        .as_driver(&user)
        .send(&service)
        .await
        .json();
    assert_eq!(
        list_field(&unfiltered, "manufacturer_list", "name"),
        vec!["Chevrolet", "Ford", "Toyota"]
    );
    assert_eq!(unfiltered["search_form"]["initial"]["name"], "");

    let empty = TestRequest::get("/manufacturers/?name=")
        .as_driver(&user)
        .send(&service)
        .await
        .json();
    assert_eq!(empty["manufacturer_list"], unfiltered["manufacturer_list"]);
}

#[test_log::test(tokio::test)]
async fn manufacturer_search_matches_wildcards_literally() {
    let test_db = TestDb::new().await;
    let user = test_db.seed_driver("test_user", None).await;
    test_db.seed_manufacturer("Ford", "USA").await;
    test_db.seed_manufacturer("100% Electric", "").await;
    let service = test_db.service();

    let context = TestRequest::get("/manufacturers/?name=%25")
        .as_driver(&user)
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(
        list_field(&context, "manufacturer_list", "name"),
        vec!["100% Electric"]
    );
}

#[test_log::test(tokio::test)]
async fn manufacturer_search_finds_non_ascii_names() {
    let test_db = TestDb::new().await;
    let user = test_db.seed_driver("test_user", None).await;
    test_db.seed_manufacturer("Straße Motors", "Germany").await;
    test_db.seed_manufacturer("Οδός Auto", "Greece").await;
    test_db.seed_manufacturer("Ford", "USA").await;
    let service = test_db.service();

    // Straße
    let german = TestRequest::get("/manufacturers/?name=Stra%C3%9Fe")
        .as_driver(&user)
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(
        list_field(&german, "manufacturer_list", "name"),
        vec!["Straße Motors"]
    );
    assert_eq!(german["search_form"]["initial"]["name"], "Straße");

    // Οδός, ending in a final sigma
    let greek = TestRequest::get("/manufacturers/?name=%CE%9F%CE%B4%CF%8C%CF%82")
        .as_driver(&user)
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(
        list_field(&greek, "manufacturer_list", "name"),
        vec!["Οδός Auto"]
    );
}

#[test_log::test(tokio::test)]
async fn car_search_narrows_by_model() {
    let test_db = TestDb::new().await;
    let user = test_db.seed_driver("test_user", None).await;
    let toyota = test_db.seed_manufacturer("Toyota", "Japan").await;
    let ford = test_db.seed_manufacturer("Ford", "USA").await;
    test_db.seed_car("Corolla", &toyota, &[]).await;
    test_db.seed_car("Camry", &toyota, &[]).await;
    test_db.seed_car("Mustang", &ford, &[]).await;
    let service = test_db.service();

    let context = TestRequest::get("/cars/?model=Corolla")
        .as_driver(&user)
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(list_field(&context, "car_list", "model"), vec!["Corolla"]);
    assert_eq!(context["car_list"][0]["manufacturer"]["name"], "Toyota");
    assert_eq!(context["search_form"]["initial"]["model"], "Corolla");

    let all = TestRequest::get("/cars/")
        .as_driver(&user)
        .send(&service)
        .await
        .json();
    assert_eq!(
        list_field(&all, "car_list", "model"),
        vec!["Camry", "Corolla", "Mustang"]
    );
}

#[test_log::test(tokio::test)]
async fn driver_search_narrows_by_username() {
    let test_db = TestDb::new().await;
    let user = test_db.seed_driver("test_user", None).await;
    test_db.seed_driver("driver1", Some("AAA11111")).await;
    test_db.seed_driver("driver2", Some("BBB22222")).await;
    test_db.seed_driver("driver3", Some("CCC33333")).await;
    let service = test_db.service();

    let context = TestRequest::get("/drivers/?username=driver")
        .as_driver(&user)
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(
        list_field(&context, "driver_list", "username"),
        vec!["driver1", "driver2", "driver3"]
    );
    assert_eq!(context["search_form"]["initial"]["username"], "driver");
    assert!(context["driver_list"][0].get("password_hash").is_none());

    let all = TestRequest::get("/drivers/")
        .as_driver(&user)
        .send(&service)
        .await
        .json();
    assert_eq!(all["driver_list"].as_array().map(Vec::len), Some(4));
}

#[test_log::test(tokio::test)]
async fn listing_paginates_and_keeps_filter() {
    let test_db = TestDb::new().await;
    let user = test_db.seed_driver("test_user", None).await;
    for index in 1..=7 {
        test_db.seed_manufacturer(&format!("Maker {index}"), "").await;
    }
    test_db.seed_manufacturer("Other", "").await;
    let service = test_db.service();

    let first = TestRequest::get("/manufacturers/?name=maker")
        .as_driver(&user)
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(first["is_paginated"], true);
    assert_eq!(first["page_obj"]["number"], 1);
    assert_eq!(first["page_obj"]["num_pages"], 2);
    assert_eq!(first["page_obj"]["has_next"], true);
    assert_eq!(first["page_obj"]["has_previous"], false);
    assert_eq!(
        first["manufacturer_list"].as_array().map(Vec::len),
        Some(usize::try_from(PAGINATE_BY).expect("page size fits usize"))
    );

    let second = TestRequest::get("/manufacturers/?name=maker&page=2")
        .as_driver(&user)
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(
        list_field(&second, "manufacturer_list", "name"),
        vec!["Maker 6", "Maker 7"]
    );
    assert_eq!(second["page_obj"]["has_next"], false);
    assert_eq!(second["page_obj"]["has_previous"], true);

    for path in [
        "/manufacturers/?name=maker&page=3",
        "/manufacturers/?page=0",
        "/manufacturers/?page=abc",
    ] {
        let _ = TestRequest::get(path)
            .as_driver(&user)
            .send(&service)
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}

#[test_log::test(tokio::test)]
async fn empty_listing_is_a_single_page() {
    let test_db = TestDb::new().await;
    let user = test_db.seed_driver("test_user", None).await;
    let service = test_db.service();

    let context = TestRequest::get("/cars/")
        .as_driver(&user)
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(context["car_list"], serde_json::json!([]));
    assert_eq!(context["is_paginated"], false);
    assert_eq!(context["page_obj"]["num_pages"], 1);
}

// ============================================================================
// Record pages
// ============================================================================

#[test_log::test(tokio::test)]
async fn car_detail_lists_manufacturer_and_drivers() {
    let test_db = TestDb::new().await;
    let user = test_db.seed_driver("test_user", None).await;
    let other = test_db.seed_driver("other", Some("ABC12345")).await;
    let toyota = test_db.seed_manufacturer("Toyota", "Japan").await;
    let car_id = test_db.seed_car("Corolla", &toyota, &[&other]).await;
    let service = test_db.service();

    let context = TestRequest::get(&format!("/cars/{car_id}/"))
        .as_driver(&user)
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(context["car"]["model"], "Corolla");
    assert_eq!(context["car"]["manufacturer"]["name"], "Toyota");
    assert_eq!(context["car"]["drivers"][0]["username"], "other");

    let _ = TestRequest::get(&format!("/cars/{}/", uuid::Uuid::now_v7()))
        .as_driver(&user)
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND);
    let _ = TestRequest::get("/cars/not-a-uuid/")
        .as_driver(&user)
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn toggle_assign_adds_then_removes_current_driver() {
    let test_db = TestDb::new().await;
    let user = test_db.seed_driver("test_user", None).await;
    let toyota = test_db.seed_manufacturer("Toyota", "Japan").await;
    let car_id = test_db.seed_car("Corolla", &toyota, &[]).await;
    let service = test_db.service();
    let toggle = format!("/cars/{car_id}/toggle-assign/");
    let detail = format!("/cars/{car_id}/");

    let _ = TestRequest::post(&toggle)
        .as_driver(&user)
        .send(&service)
        .await
        .assert_redirect(&detail);
    let assigned = TestRequest::get(&detail)
        .as_driver(&user)
        .send(&service)
        .await
        .json();
    assert_eq!(assigned["car"]["drivers"][0]["username"], "test_user");

    let _ = TestRequest::post(&toggle)
        .as_driver(&user)
        .send(&service)
        .await
        .assert_redirect(&detail);
    let removed = TestRequest::get(&detail)
        .as_driver(&user)
        .send(&service)
        .await
        .json();
    assert_eq!(removed["car"]["drivers"], serde_json::json!([]));
}

#[test_log::test(tokio::test)]
async fn driver_detail_lists_assigned_cars() {
    let test_db = TestDb::new().await;
    let user = test_db.seed_driver("test_user", None).await;
    let other = test_db.seed_driver("other", Some("ABC12345")).await;
    let toyota = test_db.seed_manufacturer("Toyota", "Japan").await;
    test_db.seed_car("Corolla", &toyota, &[&other]).await;
    let service = test_db.service();

    let context = TestRequest::get(&other.absolute_url())
        .as_driver(&user)
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(context["driver"]["username"], "other");
    assert_eq!(context["driver"]["license_number"], "ABC12345");
    assert_eq!(context["driver"]["absolute_url"], other.absolute_url());
    assert_eq!(context["driver"]["cars"][0]["model"], "Corolla");
}

#[test_log::test(tokio::test)]
async fn deleting_manufacturer_deletes_its_cars() {
    let test_db = TestDb::new().await;
    let user = test_db.seed_driver("test_user", None).await;
    let toyota = test_db.seed_manufacturer("Toyota", "Japan").await;
    let car_id = test_db.seed_car("Corolla", &toyota, &[]).await;
    let service = test_db.service();

    let _ = TestRequest::post(&format!("/manufacturers/{}/delete/", toyota.id))
        .as_driver(&user)
        .send(&service)
        .await
        .assert_redirect("/manufacturers/");

    let _ = TestRequest::get(&format!("/cars/{car_id}/"))
        .as_driver(&user)
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
