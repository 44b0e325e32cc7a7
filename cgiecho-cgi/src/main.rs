use std::io;

use anyhow::Result;
use cgiecho_responder::{Config, RequestContext, respond};
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Level directive for the log filter; a config that failed to load falls back to the default.
fn log_level(loaded: &Result<Config>) -> String {
    loaded.as_ref().map_or_else(
        |_| Config::default().logging.level,
        |c| c.logging.level.clone(),
    )
}

fn main() -> Result<()> {
    let loaded = Config::load();

    // stdout carries the response, so logs go to stderr where the web server collects them.
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level(&loaded)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .with_target(false)
        .init();

    let config = loaded.unwrap_or_else(|e| {
        warn!("failed to load config, using defaults: {e:#}");
        Config::default()
    });

    let ctx = RequestContext::from_env();
    let variables = config
        .page
        .show_environment
        .then(RequestContext::cgi_variables_from_env);

    respond(
        &config.page,
        &ctx,
        variables.as_deref(),
        io::stdin().lock(),
        io::stdout().lock(),
    )
}
