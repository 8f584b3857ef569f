//! Print the observation vocabulary of a group and which parcels cover a set of measures
//!
//! Usage:
//!   group_observations <client_id> <client_secret> <username> <password>
//!   group_observations <username> <password> <basic_token>
//!
//! Environment (.env supported):
//! - `LANDFILES_GROUP_ID` (required)
//! - `LANDFILES_MEASURE_TYPES` comma-separated codes (optional)
//! - `LANDFILES_START_DATE` / `LANDFILES_END_DATE` as YYYY-MM-DD (optional)
//! - `LANDFILES_BASE_URL`, `LANDFILES_TIMEOUT_SECS`, `RUST_LOG`

use {
    chrono::NaiveDate,
    landfiles::{
        ClientConfig, ConfigError, Credentials, LandfilesClient, LandfilesError, MeasureFilter,
        ObservationWindow,
    },
    std::{env, process},
};

/// Driver settings loaded from environment variables
struct DriverConfig {
    group_id: String,
    measure_types: Vec<String>,
    window: ObservationWindow,
}

impl DriverConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let group_id = env::var("LANDFILES_GROUP_ID")
            .map_err(|_| ConfigError::MissingVariable("LANDFILES_GROUP_ID".to_string()))?;

        let measure_types = env::var("LANDFILES_MEASURE_TYPES")
            .map(|s| {
                s.split(',')
                    .map(|code| code.trim().to_string())
                    .filter(|code| !code.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let window = ObservationWindow::new(
            date_from_env("LANDFILES_START_DATE")?,
            date_from_env("LANDFILES_END_DATE")?,
        );

        Ok(Self {
            group_id,
            measure_types,
            window,
        })
    }
}

fn date_from_env(key: &str) -> Result<Option<NaiveDate>, ConfigError> {
    match env::var(key) {
        Ok(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue(format!("{} must be YYYY-MM-DD, got '{}'", key, raw))),
        Err(_) => Ok(None),
    }
}

fn credentials_from_args(args: &[String]) -> Option<Credentials> {
    match args {
        [client_id, client_secret, username, password] => Some(Credentials::ClientCredentials {
            client_id: client_id.clone(),
            client_secret: client_secret.clone(),
            username: username.clone(),
            password: password.clone(),
        }),
        [username, password, basic_token] => Some(Credentials::BasicToken {
            username: username.clone(),
            password: password.clone(),
            basic_token: basic_token.clone(),
        }),
        _ => None,
    }
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(credentials) = credentials_from_args(&args) else {
        eprintln!("Usage: group_observations <client_id> <client_secret> <username> <password>");
        eprintln!("       group_observations <username> <password> <basic_token>");
        process::exit(1);
    };

    if let Err(e) = run(credentials).await {
        log::error!("❌ {}", e);
        process::exit(1);
    }
}

async fn run(credentials: Credentials) -> Result<(), LandfilesError> {
    let config = ClientConfig::from_env()?;
    let driver = DriverConfig::from_env()?;

    log::info!("🚀 Starting group_observations");
    log::info!("   Group: {}", driver.group_id);
    log::info!(
        "   Window: {} → {}",
        driver.window.start_param(),
        driver.window.end_param()
    );

    let client = LandfilesClient::connect(config, &credentials).await?;
    let group = client.get_group(&driver.group_id).await?;
    let observations = group.list_observations(driver.window).await?;

    println!("Observations of group '{}': {} parcels", group, observations.len());

    println!();
    println!("Measured types:");
    for def in observations.measured_type_defs() {
        println!("  {}", def);
    }

    if driver.measure_types.is_empty() {
        return Ok(());
    }

    let types = driver.measure_types;
    let any = observations.filter(&MeasureFilter::new().any_measured(types.iter().cloned()));
    let all = observations.filter(&MeasureFilter::new().all_measured(types.iter().cloned()));

    println!();
    println!("Parcels measured for any of {:?}: {}", types, any.len());
    println!("Parcels measured for all of {:?}: {}", types, all.len());
    for parcel in all.iter() {
        let dates: Vec<String> = parcel.observations.iter().map(|o| o.to_string()).collect();
        println!("  {} [{}]", parcel.parcel_id, dates.join(", "));
    }

    Ok(())
}
