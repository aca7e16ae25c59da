use serde::Serialize;
use tide::{Body, Request, Response, Result};

use super::State;
use crate::cookies;

/// The inner type sent in our identify endpoint when the auth cookie is present.
#[derive(Debug, Serialize)]
struct AuthIdentifySession {
  /// The raw auth cookie value. This is an opaque token, it has not been verified.
  user: String,
}

/// The json-serializable response structure for our identify endpoint.
#[derive(Debug, Serialize)]
struct AuthIdentifyResponse {
  /// True when the request carried the auth cookie.
  ok: bool,

  /// The current time.
  timestamp: chrono::DateTime<chrono::Utc>,

  /// The version of the server answering.
  version: String,

  /// Optionally-included cookie information if we found one.
  session: Option<AuthIdentifySession>,
}

impl AuthIdentifyResponse {
  #[allow(clippy::missing_docs_in_private_items)]
  fn new<S>(version: S) -> Self
  where
    S: std::convert::Into<String>,
  {
    Self {
      ok: false,
      timestamp: chrono::Utc::now(),
      version: version.into(),
      session: None,
    }
  }
}

/// ROUTE: reports whether the request carries the auth cookie, and its value.
pub async fn identify(request: Request<State>) -> Result {
  let mut res = AuthIdentifyResponse::new(request.state().version());
  res.ok = cookies::is_user_logged_in(Some(&request));
  res.session = cookies::user_name(Some(&request)).map(|user| AuthIdentifySession { user });

  log::info!("identify request resolved (logged in: {})", res.ok);

  Body::from_json(&res).map(|bod| Response::builder(200).body(bod).build())
}

#[cfg(test)]
mod tests {
  use crate::server::{app, Configuration, State};
  use tide::http::{Method, Request, Response, StatusCode, Url};

  async fn identify(cookies: Option<&str>) -> serde_json::Value {
    let state = State::builder()
      .config(Configuration::default())
      .version("test")
      .build()
      .unwrap();

    let mut req = Request::new(Method::Get, Url::parse("http://localhost/auth/identify").unwrap());
    if let Some(cookies) = cookies {
      req.insert_header("Cookie", cookies);
    }

    let mut res: Response = app(state).respond(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::Ok);
    res.body_json().await.unwrap()
  }

  #[async_std::test]
  async fn identify_with_auth_cookie() {
    let body = identify(Some("ALA-Auth=tok123; theme=dark")).await;
    assert_eq!(body["ok"], true);
    assert_eq!(body["version"], "test");
    assert_eq!(body["session"]["user"], "tok123");
  }

  #[async_std::test]
  async fn identify_without_cookies() {
    let body = identify(None).await;
    assert_eq!(body["ok"], false);
    assert!(body["session"].is_null());
  }

  #[async_std::test]
  async fn identify_ignores_differently_cased_cookie() {
    let body = identify(Some("ala-auth=tok123")).await;
    assert_eq!(body["ok"], false);
    assert!(body["session"].is_null());
  }
}
