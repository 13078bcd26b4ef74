/// Route component constants shared across crates
pub const MANUFACTURERS_ROUTE_COMPONENT: &str = "manufacturers";
pub const MANUFACTURERS_ROUTE_PREFIX: &str = const_str::concat!("/", MANUFACTURERS_ROUTE_COMPONENT);

pub const CARS_ROUTE_COMPONENT: &str = "cars";
pub const CARS_ROUTE_PREFIX: &str = const_str::concat!("/", CARS_ROUTE_COMPONENT);

pub const DRIVERS_ROUTE_COMPONENT: &str = "drivers";
pub const DRIVERS_ROUTE_PREFIX: &str = const_str::concat!("/", DRIVERS_ROUTE_COMPONENT);

pub const ACCOUNTS_ROUTE_COMPONENT: &str = "accounts";
pub const ACCOUNTS_ROUTE_PREFIX: &str = const_str::concat!("/", ACCOUNTS_ROUTE_COMPONENT);
pub const LOGIN_URL: &str = const_str::concat!(ACCOUNTS_ROUTE_PREFIX, "/login/");
pub const LOGOUT_URL: &str = const_str::concat!(ACCOUNTS_ROUTE_PREFIX, "/logout/");

pub const ADMIN_ROUTE_COMPONENT: &str = "admin";
pub const ADMIN_ROUTE_PREFIX: &str = const_str::concat!("/", ADMIN_ROUTE_COMPONENT);
pub const ADMIN_LOGIN_URL: &str = const_str::concat!(ADMIN_ROUTE_PREFIX, "/login/");
pub const ADMIN_DRIVER_PREFIX: &str = const_str::concat!(ADMIN_ROUTE_PREFIX, "/taxi/driver");

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE_NAME: &str = "sessionid";

/// Query parameter carrying the post-login destination.
pub const REDIRECT_FIELD_NAME: &str = "next";
