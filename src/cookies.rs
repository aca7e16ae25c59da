//! Lookup helpers for reading the `ALA-Auth` cookie (or any other named cookie) off of an incoming
//! request. Nothing here verifies the value; callers decide what a present cookie means.

use tide::http::{headers::HeaderValues, Cookie};

/// The name of the cookie set by the rest of the deployment when a user has authenticated. This
/// literal is shared with the systems issuing the cookie and must not change.
pub const AUTH_COOKIE_NAME: &str = "ALA-Auth";

/// Anything that can produce the list of cookies sent along with a request.
///
/// Implementations should yield cookies in the order the client sent them; [`find_cookie`] relies
/// on that order when the same name appears more than once. `None` means the request carried no
/// cookies at all.
pub trait CookieSource {
  /// Returns the request's cookies, in wire order.
  fn cookies(&self) -> Option<Vec<Cookie<'static>>>;
}

impl CookieSource for tide::http::Request {
  fn cookies(&self) -> Option<Vec<Cookie<'static>>> {
    header_cookies(self.header("Cookie"))
  }
}

impl<State> CookieSource for tide::Request<State>
where
  State: Clone + Send + Sync + 'static,
{
  fn cookies(&self) -> Option<Vec<Cookie<'static>>> {
    header_cookies(self.header("Cookie"))
  }
}

impl<'c> CookieSource for [Cookie<'c>] {
  fn cookies(&self) -> Option<Vec<Cookie<'static>>> {
    Some(self.iter().map(|cook| cook.clone().into_owned()).collect())
  }
}

impl<'c> CookieSource for Vec<Cookie<'c>> {
  fn cookies(&self) -> Option<Vec<Cookie<'static>>> {
    self.as_slice().cookies()
  }
}

/// Header-backed sources share this; a missing `Cookie` header means no cookie collection.
fn header_cookies(values: Option<&HeaderValues>) -> Option<Vec<Cookie<'static>>> {
  values.map(|values| parse_cookie_header(values.iter().map(|value| value.as_str())))
}

/// Parses one or more `Cookie` header values into a flat list of name/value pairs.
///
/// Header values are consumed in the order given and each value is split on `;`, so the returned
/// list preserves wire order. Pairs with no `=` or an empty name are skipped. Values are kept as
/// sent (surrounding double quotes included), only outer whitespace is trimmed.
pub fn parse_cookie_header<'a, I>(values: I) -> Vec<Cookie<'static>>
where
  I: IntoIterator<Item = &'a str>,
{
  values
    .into_iter()
    .flat_map(|value| value.split(';'))
    .map(str::trim)
    .filter(|pair| !pair.is_empty())
    .filter_map(|pair| {
      let mut parts = pair.splitn(2, '=');
      match (parts.next().map(str::trim), parts.next().map(str::trim)) {
        (Some(name), Some(value)) if !name.is_empty() => Some(Cookie::new(name.to_string(), value.to_string())),
        _ => {
          log::debug!("skipping malformed cookie pair '{pair}'");
          None
        }
      }
    })
    .collect()
}

/// Returns the first cookie named `name` from the request. Names are compared exactly (case
/// sensitive). An absent request is not an error; it simply has no cookies.
pub fn find_cookie<R>(request: Option<&R>, name: &str) -> Option<Cookie<'static>>
where
  R: CookieSource + ?Sized,
{
  let request = match request {
    Some(request) => request,
    None => {
      log::warn!("no request available while looking for cookie '{name}'");
      return None;
    }
  };

  let found = request
    .cookies()
    .and_then(|list| list.into_iter().find(|cook| cook.name() == name));

  match found {
    Some(_) => log::debug!("cookie '{name}' found"),
    None => log::debug!("cookie '{name}' not found"),
  }

  found
}

/// Returns the value of the first cookie named `name`, if any.
pub fn cookie_value<R>(request: Option<&R>, name: &str) -> Option<String>
where
  R: CookieSource + ?Sized,
{
  find_cookie(request, name).map(|cook| cook.value().to_string())
}

/// True when the request carries a cookie named `name`.
pub fn cookie_exists<R>(request: Option<&R>, name: &str) -> bool
where
  R: CookieSource + ?Sized,
{
  cookie_value(request, name).is_some()
}

/// True when the request carries an [`AUTH_COOKIE_NAME`] cookie.
pub fn is_user_logged_in<R>(request: Option<&R>) -> bool
where
  R: CookieSource + ?Sized,
{
  cookie_exists(request, AUTH_COOKIE_NAME)
}

/// Returns the raw value of the [`AUTH_COOKIE_NAME`] cookie.
///
/// This is whatever opaque token the issuing system stored there, not a verified user identity.
pub fn user_name<R>(request: Option<&R>) -> Option<String>
where
  R: CookieSource + ?Sized,
{
  cookie_value(request, AUTH_COOKIE_NAME)
}
