use anyhow::{Context, bail};
use clap::Parser;
use inquire::{Password, PasswordDisplayMode};
use std::{io, path::PathBuf};
use tracing::{debug, warn};
use weather_core::{
    Config, OpenWeatherClient,
    config::{BASE_URL_ENV_VAR, TOKEN_ENV_VAR},
    run_cli,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weather",
    version,
    about = "Show the current weather for a location",
    after_help = "Examples:\n  weather London\n  weather Kingston upon Hull, UK"
)]
pub struct Cli {
    /// Location, optionally followed by a comma and a country code.
    #[arg(value_name = "LOCATION")]
    pub location: Vec<String>,

    /// OpenWeather API token; overrides the one in the config file.
    #[arg(long, env = TOKEN_ENV_VAR, hide_env_values = true)]
    pub token: Option<String>,

    /// Endpoint to query instead of the public OpenWeather API.
    #[arg(long, env = BASE_URL_ENV_VAR)]
    pub base_url: Option<String>,

    /// Prompt for an API token and store it in the config file.
    #[arg(long)]
    pub configure: bool,
}

impl Cli {
    /// Run the command and return the process exit code.
    pub async fn run(self) -> anyhow::Result<u8> {
        let explicit_token = if self.configure { None } else { self.token.as_deref() };
        let mut config = load_config(Config::config_file_path(), explicit_token)?;

        if self.configure {
            configure(&mut config)?;
            return Ok(0);
        }

        let token = config.resolve_token(self.token.as_deref()).unwrap_or_default();
        let client = match OpenWeatherClient::new(token) {
            Ok(client) => client,
            Err(err) => {
                eprintln!("{err}");
                return Ok(1);
            }
        };

        let base_url = config.resolve_base_url(self.base_url.as_deref());
        debug!(%base_url, "resolved endpoint");
        let client = client.with_base_url(base_url);

        let args = self.argv();
        let code = run_cli(&client, args.as_slice(), &mut io::stdout(), &mut io::stderr()).await;

        Ok(u8::try_from(code).unwrap_or(1))
    }

    /// Location tokens behind a program name, the shape `run_cli` expects.
    fn argv(&self) -> Vec<&str> {
        std::iter::once("weather")
            .chain(self.location.iter().map(String::as_str))
            .collect()
    }
}

/// Read the config file. When a token was given on the command line or in
/// the environment, an unreadable file only costs a warning.
fn load_config(
    path: anyhow::Result<PathBuf>,
    explicit_token: Option<&str>,
) -> anyhow::Result<Config> {
    match path.and_then(|path| Config::load_from(&path)) {
        Ok(config) => Ok(config),
        Err(err) if explicit_token.is_some_and(|token| !token.is_empty()) => {
            warn!("ignoring config file: {err:#}");
            Ok(Config::default())
        }
        Err(err) => Err(err),
    }
}

/// Exit code for a failed argument parse: 0 for `--help`/`--version`, 1 otherwise.
pub fn parse_error_exit_code(err: &clap::Error) -> u8 {
    if err.use_stderr() { 1 } else { 0 }
}

fn configure(config: &mut Config) -> anyhow::Result<()> {
    let token = Password::new("OpenWeather API token:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .with_help_message("Find it at https://home.openweathermap.org/api_keys")
        .prompt()
        .context("Failed to read API token")?;

    let token = token.trim();
    if token.is_empty() {
        bail!("missing api token");
    }

    config.set_api_token(token.to_string());
    let path = config.save()?;
    println!("Saved API token to {}", path.display());

    Ok(())
}
