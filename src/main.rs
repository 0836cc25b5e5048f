use std::path::Path;

use actix_web::{web, App, HttpServer};
use anyhow::{bail, Context};
use clap::Parser;
use env_logger::Env;
use log::info;

use prosub::interfaces::generate_subscription;
use prosub::models::AppState;
use prosub::utils::ReqwestClient;
use prosub::vfs::seed::import_data_file;
use prosub::vfs::MemoryKvStore;
use prosub::web_handlers::interfaces;
use prosub::Settings;

/// Compile stored proxy profiles into client subscriptions
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file (TOML or YAML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Listen address (e.g., 127.0.0.1 or 0.0.0.0)
    #[arg(short, long, value_name = "ADDRESS")]
    address: Option<String>,

    /// Listen port
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,

    /// Profile to compile directly instead of starting the server
    #[arg(long, value_name = "ID")]
    profile: Option<String>,

    /// Output file for the compiled profile (must be used with --profile)
    #[arg(short, long, value_name = "OUTPUT_FILE")]
    output: Option<String>,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Check if only one of profile or output is provided
    if args.profile.is_some() != args.output.is_some() {
        bail!("--profile and -o/--output must be used together");
    }

    let mut settings = match &args.config {
        Some(path) => Settings::load_from_file(path)
            .await
            .with_context(|| format!("Failed to load configuration from {}", path))?,
        None => Settings::new(),
    };

    // Initialize the logger
    env_logger::init_from_env(Env::default().default_filter_or(settings.log_level.as_str()));

    // Override settings with command line arguments if provided
    if let Some(address) = args.address {
        settings.listen_address = address;
    }
    if let Some(port) = args.port {
        settings.listen_port = port;
    }

    let store = MemoryKvStore::new();
    if let Some(data_file) = &settings.data_file {
        import_data_file(
            &store,
            Path::new(data_file),
            &settings.nodes_key,
            &settings.profiles_key,
        )
        .await
        .with_context(|| format!("Failed to import data file {}", data_file))?;
    }

    let http = ReqwestClient::new(settings.fetch_timeout())?;
    let app_state = web::Data::new(AppState::new(settings, store, http));

    if let (Some(profile_id), Some(output_file)) = (args.profile, args.output) {
        info!(
            "Compiling profile {} to file: {}",
            profile_id, output_file
        );

        let result = generate_subscription(app_state.get_ref(), &profile_id, &[]).await;
        if !result.is_success() {
            bail!(
                "Profile {} failed with status {}: {}",
                profile_id,
                result.status,
                result.text_body()
            );
        }
        tokio::fs::write(&output_file, &result.body)
            .await
            .with_context(|| format!("Failed to write to output file {}", output_file))?;
        info!("Successfully wrote subscription to {}", output_file);
        return Ok(());
    }

    let listen_address = app_state.config.listen_on();
    let max_concur_threads = app_state.config.max_concur_threads;

    info!("ProSub starting on {}", listen_address);

    // Start web server
    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .configure(interfaces::config::<MemoryKvStore, ReqwestClient>)
    })
    .bind(listen_address)?
    .workers(max_concur_threads)
    .run()
    .await?;

    Ok(())
}
