//! Tests for the create and update forms.

use salvo::http::StatusCode;
use serde_json::json;

use super::helpers::*;

fn driver_creation_data(username: &str, license_number: &str) -> serde_json::Value {
    json!({
        "username": username,
        "password1": "user12test",
        "password2": "user12test",
        "license_number": license_number,
        "first_name": "First",
        "last_name": "Last",
    })
}

#[test_log::test(tokio::test)]
async fn driver_creation_redirects_to_new_driver() {
    let test_db = TestDb::new().await;
    let user = test_db.seed_driver("test_user", None).await;
    let service = test_db.service();

    let response = TestRequest::post("/drivers/create/")
        .as_driver(&user)
        .json(&driver_creation_data("new_user", "QWE12345"))
        .send(&service)
        .await
        .assert_status(StatusCode::FOUND);
    let location = response.location.expect("Redirect should carry a location");
    assert!(location.starts_with("/drivers/"));

    let context = TestRequest::get(&location)
        .as_driver(&user)
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(context["driver"]["username"], "new_user");
    assert_eq!(context["driver"]["license_number"], "QWE12345");
    assert_eq!(context["driver"]["first_name"], "First");
    assert_eq!(context["driver"]["absolute_url"], location);
}

#[test_log::test(tokio::test)]
async fn new_driver_can_log_in() {
    let test_db = TestDb::new().await;
    let user = test_db.seed_driver("test_user", None).await;
    let service = test_db.service();

    let _ = TestRequest::post("/drivers/create/")
        .as_driver(&user)
        .json(&driver_creation_data("new_user", "QWE12345"))
        .send(&service)
        .await
        .assert_status(StatusCode::FOUND);

    let _ = TestRequest::get("/")
        .basic("new_user", "user12test")
        .send(&service)
        .await
        .assert_status(StatusCode::OK);
}

#[test_log::test(tokio::test)]
async fn invalid_license_number_is_rejected() {
    let test_db = TestDb::new().await;
    let user = test_db.seed_driver("test_user", None).await;
    let service = test_db.service();

    for license_number in ["qwe12345", "QW123456", "QWE1234", "QWE123456"] {
        let context = TestRequest::post("/drivers/create/")
            .as_driver(&user)
            .json(&driver_creation_data("new_user", license_number))
            .send(&service)
            .await
            .assert_status(StatusCode::BAD_REQUEST)
            .json();
        assert!(
            context["form"]["errors"]["license_number"].is_array(),
            "{license_number} should be rejected: {context}"
        );
        assert_eq!(context["form"]["data"]["license_number"], license_number);
        assert!(context["form"]["data"].get("password1").is_none());
    }

    let drivers = TestRequest::get("/drivers/")
        .as_driver(&user)
        .send(&service)
        .await
        .json();
    assert_eq!(
        list_field(&drivers, "driver_list", "username"),
        vec!["test_user"]
    );
}

#[test_log::test(tokio::test)]
async fn duplicate_license_number_is_a_field_error() {
    let test_db = TestDb::new().await;
    let user = test_db.seed_driver("test_user", None).await;
    test_db.seed_driver("holder", Some("QWE12345")).await;
    let service = test_db.service();

    let context = TestRequest::post("/drivers/create/")
        .as_driver(&user)
        .json(&driver_creation_data("new_user", "QWE12345"))
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .json();
    assert_eq!(
        context["form"]["errors"]["license_number"][0],
        "Driver with this License number already exists."
    );

    let duplicate_username = TestRequest::post("/drivers/create/")
        .as_driver(&user)
        .json(&driver_creation_data("holder", "ZZZ99999"))
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .json();
    assert!(duplicate_username["form"]["errors"]["username"].is_array());
}

#[test_log::test(tokio::test)]
async fn license_update_replaces_number() {
    let test_db = TestDb::new().await;
    let user = test_db.seed_driver("test_user", None).await;
    let other = test_db.seed_driver("other", Some("ABC12345")).await;
    let service = test_db.service();
    let update = format!("/drivers/{}/update/", other.id);

    let _ = TestRequest::post(&update)
        .as_driver(&user)
        .json(&json!({ "license_number": "xyz" }))
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let _ = TestRequest::post(&update)
        .as_driver(&user)
        .json(&json!({ "license_number": "XYZ54321" }))
        .send(&service)
        .await
        .assert_redirect("/drivers/");

    let context = TestRequest::get(&other.absolute_url())
        .as_driver(&user)
        .send(&service)
        .await
        .json();
    assert_eq!(context["driver"]["license_number"], "XYZ54321");
}

#[test_log::test(tokio::test)]
async fn manufacturer_create_and_update() {
    let test_db = TestDb::new().await;
    let user = test_db.seed_driver("test_user", None).await;
    let existing = test_db.seed_manufacturer("Ford", "USA").await;
    let service = test_db.service();

    let _ = TestRequest::post("/manufacturers/create/")
        .as_driver(&user)
        .json(&json!({ "name": "Toyota", "country": "Japan" }))
        .send(&service)
        .await
        .assert_redirect("/manufacturers/");

    let duplicate = TestRequest::post("/manufacturers/create/")
        .as_driver(&user)
        .json(&json!({ "name": "Ford", "country": "" }))
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .json();
    assert!(duplicate["form"]["errors"]["name"].is_array());

    let _ = TestRequest::post(&format!("/manufacturers/{}/update/", existing.id))
        .as_driver(&user)
        .json(&json!({ "name": "Ford Motor", "country": "USA" }))
        .send(&service)
        .await
        .assert_redirect("/manufacturers/");

    let context = TestRequest::get("/manufacturers/")
        .as_driver(&user)
        .send(&service)
        .await
        .json();
    assert_eq!(
        list_field(&context, "manufacturer_list", "name"),
        vec!["Ford Motor", "Toyota"]
    );
}

#[test_log::test(tokio::test)]
async fn car_form_requires_existing_manufacturer() {
    let test_db = TestDb::new().await;
    let user = test_db.seed_driver("test_user", None).await;
    let toyota = test_db.seed_manufacturer("Toyota", "Japan").await;
    let service = test_db.service();

    let missing = TestRequest::post("/cars/create/")
        .as_driver(&user)
        .json(&json!({ "model": "Corolla", "drivers": [] }))
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .json();
    assert!(missing["form"]["errors"]["manufacturer"].is_array());

    let unknown = TestRequest::post("/cars/create/")
        .as_driver(&user)
        .json(&json!({
            "model": "Corolla",
            "manufacturer": uuid::Uuid::now_v7().to_string(),
            "drivers": [],
        }))
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .json();
    assert!(unknown["form"]["errors"]["manufacturer"].is_array());

    let _ = TestRequest::post("/cars/create/")
        .as_driver(&user)
        .json(&json!({
            "model": "Corolla",
            "manufacturer": toyota.id.to_string(),
            "drivers": [user.id.to_string()],
        }))
        .send(&service)
        .await
        .assert_redirect("/cars/");

    let context = TestRequest::get("/cars/")
        .as_driver(&user)
        .send(&service)
        .await
        .json();
    assert_eq!(list_field(&context, "car_list", "model"), vec!["Corolla"]);
}
