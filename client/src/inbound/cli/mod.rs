//! Command-line surface over the API gateway.
//!
//! Commands map one-to-one onto gateway operations and print pretty JSON to
//! a caller-supplied writer, so they run in tests without a process.

mod error;

use std::io::Write;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::debug;

pub use self::error::CliError;
use crate::domain::resources::{LoginRequest, SignupRequest};
use crate::domain::{ApiGateway, ApiRequest, HttpMethod};

/// `ideation` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "ideation",
    about = "Talk to the ideation platform backend from the terminal",
    version
)]
pub struct Cli {
    /// Backend base URL, overriding `IDEATION_API_URL`.
    #[arg(long, global = true, value_name = "url")]
    pub api_url: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Check the backend health endpoint.
    Health,
    /// Sign in and persist the session.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account and persist the session.
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the persisted session.
    Logout,
    /// Show the signed-in user.
    Whoami,
    /// Show a page of the feed.
    Feed {
        #[arg(long)]
        page: Option<u32>,
    },
    /// Send an arbitrary request relative to the API base URL.
    Request {
        #[arg(value_enum, ignore_case = true)]
        method: MethodArg,
        /// Endpoint such as `/ideas/42`.
        endpoint: String,
        /// JSON request body.
        #[arg(long, value_name = "json", value_parser = parse_json)]
        data: Option<Value>,
    },
}

/// HTTP verbs accepted by `ideation request`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MethodArg {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl From<MethodArg> for HttpMethod {
    fn from(value: MethodArg) -> Self {
        match value {
            MethodArg::Get => Self::Get,
            MethodArg::Post => Self::Post,
            MethodArg::Put => Self::Put,
            MethodArg::Patch => Self::Patch,
            MethodArg::Delete => Self::Delete,
        }
    }
}

fn parse_json(raw: &str) -> Result<Value, String> {
    serde_json::from_str(raw).map_err(|error| format!("--data must be valid JSON: {error}"))
}

/// Execute one command and write its result to `out`.
///
/// # Errors
///
/// Returns [`CliError::SessionExpired`] when the backend rejected the session
/// that was active before the command ran, [`CliError::Unhealthy`] for a
/// failed health check, and [`CliError::Api`] for other gateway failures.
pub async fn run_command(
    gateway: &ApiGateway,
    command: Command,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let had_session = gateway.is_authenticated();
    debug!(?had_session, "running command");
    let classify = |error| CliError::from_api(error, had_session);

    match command {
        Command::Health => {
            let health = gateway.health_check().await;
            write_json(out, &health)?;
            if !health.status {
                return Err(CliError::Unhealthy {
                    message: health.message,
                });
            }
        }
        Command::Login { email, password } => {
            let response = gateway
                .login(&LoginRequest::new(email, password))
                .await
                .map_err(classify)?;
            write_json(
                out,
                &json!({ "authenticated": response.has_token(), "user": response.user }),
            )?;
        }
        Command::Signup {
            name,
            email,
            password,
        } => {
            let response = gateway
                .signup(&SignupRequest::new(name, email, password))
                .await
                .map_err(classify)?;
            write_json(
                out,
                &json!({ "authenticated": response.has_token(), "user": response.user }),
            )?;
        }
        Command::Logout => {
            gateway.logout()?;
            write_json(out, &json!({ "authenticated": false }))?;
        }
        Command::Whoami => {
            if !had_session {
                return Err(CliError::NotSignedIn);
            }
            let user = match gateway.current_user()? {
                Some(user) => user,
                None => {
                    let profile = gateway.me().await.map_err(classify)?;
                    serde_json::to_value(profile).map_err(|error| CliError::Output {
                        message: error.to_string(),
                    })?
                }
            };
            write_json(out, &user)?;
        }
        Command::Feed { page } => {
            let feed = gateway.feed(page).await.map_err(classify)?;
            write_json(out, &feed)?;
        }
        Command::Request {
            method,
            endpoint,
            data,
        } => {
            let mut request = ApiRequest::new(method.into(), endpoint);
            if let Some(data) = data {
                request = request.json(&data)?;
            }
            let value = gateway.request_value(request).await.map_err(classify)?;
            write_json(out, &value)?;
        }
    }
    Ok(())
}

fn write_json<T: Serialize + ?Sized>(out: &mut impl Write, value: &T) -> Result<(), CliError> {
    let output_error = |message: String| CliError::Output { message };
    serde_json::to_writer_pretty(&mut *out, value)
        .map_err(|error| output_error(error.to_string()))?;
    writeln!(out).map_err(|error| output_error(error.to_string()))
}
