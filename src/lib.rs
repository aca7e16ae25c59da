#![warn(clippy::missing_docs_in_private_items)]

//! Helpers for reading the `ALA-Auth` authentication cookie off of incoming http requests, plus a
//! small tide server that reports on it.

/// Named cookie lookups over anything that can list a request's cookies.
pub mod cookies;

/// This module contains all of the web/http server types and logic.
pub mod server;

pub use cookies::{
  cookie_exists, cookie_value, find_cookie, is_user_logged_in, user_name, CookieSource, AUTH_COOKIE_NAME,
};
