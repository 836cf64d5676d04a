//! `ideation` entry-point: wires the gateway to reqwest, the file session
//! store and the reload signal, then runs one command.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use ideation_client::ClientSettings;
use ideation_client::domain::{ApiGateway, ApiGatewayPorts};
use ideation_client::inbound::cli::{Cli, run_command};
use ideation_client::outbound::http::ReqwestTransport;
use ideation_client::outbound::reload::ReloadSignal;
use ideation_client::outbound::session::FileSessionStore;

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let Cli { api_url, command } = Cli::parse();
    // Clap owns argv, so the URL flag is applied over the loaded settings.
    let settings = ClientSettings::load_from_iter([OsString::from("ideation")])
        .map_err(|error| eyre!("failed to load configuration: {error}"))?
        .with_api_url(api_url);
    let base_url = settings.base_url().wrap_err("invalid API base URL")?;
    let session_dir = settings.session_dir();

    let reload = Arc::new(ReloadSignal::new());
    let gateway = ApiGateway::new(
        ApiGatewayPorts {
            transport: Arc::new(
                ReqwestTransport::new(settings.timeout()).wrap_err("build HTTP client")?,
            ),
            store: Arc::new(FileSessionStore::open(&session_dir).wrap_err_with(|| {
                format!("open session directory {}", session_dir.display())
            })?),
            reaction: reload.clone(),
        },
        base_url,
    );

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("create Tokio runtime")?;
    let mut stdout = io::stdout().lock();
    let outcome = runtime.block_on(run_command(&gateway, command, &mut stdout));

    if reload.generation() > 0 {
        info!(
            generation = reload.generation(),
            "session reset; local session state discarded"
        );
    }

    match outcome {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(error) => {
            if let Err(write_err) = writeln!(io::stderr().lock(), "{error}") {
                drop(write_err);
            }
            Ok(ExitCode::FAILURE)
        }
    }
}
