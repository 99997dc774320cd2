use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use inquire::{
    Confirm, CustomType, InquireError, Password, PasswordDisplayMode, validator::Validation,
};
use localweather_core::{
    Config, FetchState, FixedLocation, IpLocationService, LocationResolver, LocationService,
    OpenWeatherClient, PermissionStatus, WeatherPipeline,
};

use crate::render;

const IP_LOOKUP_QUESTION: &str = "Allow looking up your approximate location from your IP address?";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "localweather",
    version,
    about = "Weather at your current location",
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub show: ShowArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the weather where you are (default).
    Show(ShowArgs),

    /// Store the API key and how your location is found.
    Configure,

    /// List every weather condition and how it is displayed.
    Conditions,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Latitude to use instead of detecting the location.
    #[arg(long, requires = "lon", allow_hyphen_values = true, value_parser = parse_latitude)]
    pub lat: Option<f64>,

    /// Longitude to use instead of detecting the location.
    #[arg(long, requires = "lat", allow_hyphen_values = true, value_parser = parse_longitude)]
    pub lon: Option<f64>,

    /// OpenWeather API key; overrides the configured one.
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Print the final state as JSON.
    #[arg(long)]
    pub json: bool,
}

fn parse_degrees(value: &str, limit: f64) -> Result<f64, String> {
    let degrees: f64 = value.parse().map_err(|_| format!("`{value}` is not a number"))?;
    if (-limit..=limit).contains(&degrees) {
        Ok(degrees)
    } else {
        Err(format!("must be between -{limit} and {limit}"))
    }
}

fn parse_latitude(value: &str) -> Result<f64, String> {
    parse_degrees(value, 90.0)
}

fn parse_longitude(value: &str) -> Result<f64, String> {
    parse_degrees(value, 180.0)
}

impl Cli {
    pub async fn run(self) -> Result<ExitCode> {
        match self.command.unwrap_or(Command::Show(self.show)) {
            Command::Show(args) => show(args).await,
            Command::Configure => {
                configure()?;
                Ok(ExitCode::SUCCESS)
            }
            Command::Conditions => {
                println!("{}", render::format_conditions());
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

async fn show(args: ShowArgs) -> Result<ExitCode> {
    let mut config = Config::load()?;
    let client = OpenWeatherClient::new(config.client_config(args.api_key.as_deref())?);
    let service = location_service(&mut config, args.lat.zip(args.lon))?;

    let pipeline = WeatherPipeline::new(LocationResolver::new(service), Box::new(client));
    let mut state = FetchState::default();

    if !args.json {
        println!("{}", render::format_state(&state));
    }

    pipeline.run_into(&mut state).await;

    if args.json {
        let json = serde_json::to_string_pretty(&state).context("Failed to serialize state")?;
        println!("{json}");
    } else {
        println!("{}", render::format_state(&state));
    }

    Ok(if state.is_failed() { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

/// Explicit coordinates win, then the configured fixed position, then an IP
/// lookup (asking for consent the first time).
fn location_service(
    config: &mut Config,
    explicit: Option<(f64, f64)>,
) -> Result<Box<dyn LocationService>> {
    let fixed = explicit.or_else(|| config.fixed_position().map(|p| (p.latitude, p.longitude)));
    if let Some((lat, lon)) = fixed {
        return Ok(Box::new(FixedLocation::new(lat, lon)));
    }

    let mut consent = config.ip_lookup_permission();
    if consent == PermissionStatus::Undetermined {
        let answer = Confirm::new(IP_LOOKUP_QUESTION)
            .with_default(true)
            .with_help_message("A request goes to ip-api.com. The answer is saved in your config.")
            .prompt();
        consent = record_consent(config, answer, Config::save);
    }

    Ok(Box::new(IpLocationService::new(consent)))
}

/// Apply a consent prompt answer. A failed prompt (e.g. no terminal) leaves
/// the status undetermined, which denies. A failed save only loses the
/// answer for later runs.
fn record_consent(
    config: &mut Config,
    answer: Result<bool, InquireError>,
    save: impl FnOnce(&Config) -> Result<()>,
) -> PermissionStatus {
    match answer {
        Ok(answer) => {
            config.set_ip_lookup_consent(answer);
            if let Err(err) = save(config) {
                tracing::warn!(error = %format!("{err:#}"), "could not save location consent");
            }
        }
        Err(err) => tracing::warn!(error = %err, "could not ask for location consent"),
    }
    config.ip_lookup_permission()
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(api_key.trim().to_string());

    let use_fixed = Confirm::new("Always use a fixed position instead of detecting it?")
        .with_default(config.fixed_position().is_some())
        .prompt()
        .context("Failed to read answer")?;

    if use_fixed {
        let latitude = prompt_degrees("Latitude:", 90.0)?;
        let longitude = prompt_degrees("Longitude:", 180.0)?;
        config.set_fixed_position(latitude, longitude);
    } else {
        config.clear_fixed_position();
        let consent = Confirm::new(IP_LOOKUP_QUESTION)
            .with_default(config.location.ip_lookup.unwrap_or(true))
            .prompt()
            .context("Failed to read answer")?;
        config.set_ip_lookup_consent(consent);
    }

    config.save()?;
    println!("Configuration saved to {}", Config::config_file_path()?.display());

    Ok(())
}

fn prompt_degrees(message: &str, limit: f64) -> Result<f64> {
    CustomType::<f64>::new(message)
        .with_error_message("Please type a number")
        .with_validator(move |value: &f64| {
            if (-limit..=limit).contains(value) {
                Ok(Validation::Valid)
            } else {
                Ok(Validation::Invalid(format!("Must be between -{limit} and {limit}").into()))
            }
        })
        .prompt()
        .with_context(|| format!("Failed to read {message}"))
}
