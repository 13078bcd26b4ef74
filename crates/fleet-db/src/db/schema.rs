// Mirrors migrations/2026-01-01-000000_create_fleet/up.sql

diesel::table! {
    car (id) {
        id -> Uuid,
        model -> Text,
        manufacturer_id -> Uuid,
    }
}

diesel::table! {
    car_driver (car_id, driver_id) {
        car_id -> Uuid,
        driver_id -> Uuid,
    }
}

diesel::table! {
    driver (id) {
        id -> Uuid,
        username -> Text,
        password_hash -> Text,
        first_name -> Text,
        last_name -> Text,
        email -> Text,
        is_staff -> Bool,
        is_superuser -> Bool,
        is_active -> Bool,
        license_number -> Nullable<Text>,
        num_visits -> Int4,
        date_joined -> Timestamptz,
    }
}

diesel::table! {
    manufacturer (id) {
        id -> Uuid,
        name -> Text,
        country -> Text,
    }
}

diesel::table! {
    session (id) {
        id -> Uuid,
        driver_id -> Uuid,
        created_at -> Timestamptz,
        expires_at -> Timestamptz,
    }
}

diesel::joinable!(car -> manufacturer (manufacturer_id));
diesel::joinable!(car_driver -> car (car_id));
diesel::joinable!(car_driver -> driver (driver_id));
diesel::joinable!(session -> driver (driver_id));

diesel::allow_tables_to_appear_in_same_query!(car, car_driver, driver, manufacturer, session);
