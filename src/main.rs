//! Marquee CLI entrypoint.

use std::io::{self, Write};
use std::process::ExitCode;

use marquee::pages::SessionContext;
use marquee::{ApiError, Backend, HttpGateway, MarqueeConfig, OperationMode};
use ortho_config::OrthoConfig;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod cli;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "MARQUEE_LOG";

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => report_failure(io::stderr().lock(), &error),
    }
}

/// Writes `error` for the user and picks the failing exit code.
fn report_failure(mut writer: impl Write, error: &ApiError) -> ExitCode {
    // Nothing is left to report to when stderr is gone.
    writeln!(writer, "{error}").ok();
    ExitCode::FAILURE
}

/// Installs the stderr subscriber; `MARQUEE_LOG` overrides the `warn` level.
fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    // Only fails when a subscriber is already installed.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .ok();
}

async fn run() -> Result<(), ApiError> {
    let config = load_config()?;
    config.validate()?;

    let gateway = HttpGateway::new(config.service_base()?, config.gateway_options()?)?;
    let mode = config.operation_mode();
    debug!(?mode, "operation mode resolved");

    if mode == OperationMode::Signup {
        return cli::auth::signup(&config, Backend::from_gateway(&gateway)).await;
    }

    let mut session = SessionContext::new();
    cli::auth::sign_in(&config, Backend::from_gateway(&gateway), &mut session).await?;

    if mode == OperationMode::Interactive {
        return cli::interactive::run(&config, gateway).await;
    }

    let backend = Backend::from_gateway(&gateway);
    match mode {
        OperationMode::Logout => cli::auth::logout(backend, &mut session).await,
        OperationMode::ReviewMutation => cli::movie::mutate(&config, backend, &mut session).await,
        OperationMode::Follow => cli::profile::follow(&config, backend, &mut session).await,
        OperationMode::AvatarUpload => {
            cli::profile::upload_avatar(&config, backend, &mut session).await
        }
        OperationMode::MovieDetail => cli::movie::show(&config, backend, &mut session).await,
        OperationMode::Profile => cli::profile::show(&config, backend, &mut session).await,
        OperationMode::Search => cli::browse::run_search(&config, backend, &mut session).await,
        OperationMode::Home | OperationMode::Signup | OperationMode::Interactive => {
            cli::browse::home(&config, backend, &mut session).await
        }
    }
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`ApiError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<MarqueeConfig, ApiError> {
    MarqueeConfig::load().map_err(|error| ApiError::Configuration {
        message: error.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::process::ExitCode;

    use marquee::ApiError;

    use super::report_failure;

    #[test]
    fn failure_is_written_as_one_line() {
        let mut output = Vec::new();
        let error = ApiError::InvalidInput {
            message: "movie id must be positive".to_owned(),
        };

        let code = report_failure(&mut output, &error);

        assert_eq!(code, ExitCode::FAILURE);
        assert_eq!(
            String::from_utf8(output).expect("utf-8 output"),
            "invalid input: movie id must be positive\n"
        );
    }
}
