use clap::Parser;
use serde::Deserialize;
use std::io::Result;

/// The environment variable that, when set, replaces the configured listener address.
const ADDR_ENV: &str = "ALA_AUTH_LISTENER_ADDR";

#[derive(Deserialize, Debug)]
struct RuntimeConfiguration {
  #[serde(default)]
  server: ala_auth_cookie::server::Configuration,
}

#[derive(Deserialize, clap::Parser)]
#[command(author, version, about)]
struct CommandLineOptions {
  /// Path to the toml configuration file.
  config: String,

  /// Overrides the listener address from the config file and environment.
  #[arg(long)]
  addr: Option<String>,
}

fn main() -> Result<()> {
  if dotenv::dotenv().is_err() {
    eprintln!("warning: no '.env' file detected");
  }

  env_logger::init();
  let args = CommandLineOptions::parse();

  log::info!("loading config from '{}'", args.config);
  let contents = std::fs::read_to_string(&args.config)?;
  let mut parsed = toml::from_str::<RuntimeConfiguration>(&contents)?;

  if let Ok(addr) = std::env::var(ADDR_ENV) {
    log::debug!("using listener addr from environment ({ADDR_ENV})");
    parsed.server.addr = addr;
  }

  if let Some(addr) = args.addr {
    parsed.server.addr = addr;
  }

  let state = ala_auth_cookie::server::State::builder()
    .config(parsed.server)
    .version(option_env!("ALA_AUTH_COOKIE_VERSION").unwrap_or(env!("CARGO_PKG_VERSION")))
    .build()?;

  log::info!("starting async main thread");
  async_std::task::block_on(ala_auth_cookie::server::listen(state))?;
  Ok(())
}
