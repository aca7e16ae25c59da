use std::io::{Error, ErrorKind, Result};

use serde::Deserialize;
use tide::{Request, Response};

pub mod auth;

/// The address we bind to when the configuration does not name one.
const DEFAULT_ADDR: &str = "0.0.0.0:8081";

#[allow(clippy::missing_docs_in_private_items)]
fn default_addr() -> String {
  DEFAULT_ADDR.to_string()
}

/// The `[server]` table of our runtime configuration file.
#[derive(Deserialize, Clone, Debug)]
pub struct Configuration {
  /// The `host:port` our http listener binds to.
  #[serde(default = "default_addr")]
  pub addr: String,
}

impl Default for Configuration {
  fn default() -> Self {
    Self { addr: default_addr() }
  }
}

/// Collects the pieces of our shared server state before it is handed to tide.
#[derive(Default, Clone)]
pub struct StateBuilder {
  /// The server configuration.
  config: Option<Configuration>,

  /// The build version reported by our routes.
  version: Option<String>,
}

impl StateBuilder {
  /// Sets the server configuration.
  pub fn config(mut self, config: Configuration) -> Self {
    self.config = Some(config);
    self
  }

  /// Sets the version reported in responses.
  pub fn version<S>(mut self, version: S) -> Self
  where
    S: std::convert::Into<String>,
  {
    self.version = Some(version.into());
    self
  }

  /// Validates and builds the state.
  pub fn build(self) -> Result<State> {
    let config = self
      .config
      .ok_or_else(|| Error::new(ErrorKind::NotFound, "no server config found"))?;
    let version = self.version.unwrap_or_else(|| "dev".into());
    Ok(State { config, version })
  }
}

/// The state shared by every request handled by our server.
#[derive(Clone, Debug)]
pub struct State {
  /// The server configuration.
  config: Configuration,

  /// The build version reported by our routes.
  version: String,
}

impl State {
  /// Starts a new builder.
  pub fn builder() -> StateBuilder {
    StateBuilder::default()
  }

  /// The address this server will listen on.
  pub fn addr(&self) -> &str {
    self.config.addr.as_str()
  }

  /// The version reported by our routes.
  pub fn version(&self) -> &str {
    self.version.as_str()
  }
}

/// ROUTE: fallback for anything we do not know about.
pub async fn missing(req: Request<State>) -> tide::Result {
  log::warn!("[warning] unknown request received - '{}'", req.url().path());
  Ok(Response::builder(404).build())
}

/// Builds the tide application with all of our routes mounted.
pub fn app(state: State) -> tide::Server<State> {
  let mut app = tide::with_state(state);
  app.at("/auth/identify").get(auth::identify);
  app.at("/*").all(missing);
  app
}

/// Binds to the configured address and serves requests until the listener fails.
pub async fn listen(state: State) -> Result<()> {
  let addr = state.addr().to_string();
  log::info!("listening on '{addr}' (version {})", state.version());
  app(state).listen(addr).await
}
