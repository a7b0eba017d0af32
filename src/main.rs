use clap::Parser;
use std::collections::BTreeMap;
use storefront::config::cli::Command;
use storefront::utils::error::ErrorSeverity;
use storefront::utils::{logger, validation, validation::Validate};
use storefront::{Cli, CloudinaryClient, ImageHost, StoreError, StorefrontConfig};

fn load_config(cli: &Cli) -> storefront::Result<StorefrontConfig> {
    let config = match &cli.config {
        Some(path) => StorefrontConfig::from_file(path)?,
        None => StorefrontConfig::from_env()?,
    };
    config.validate()?;
    Ok(config)
}

fn print_areas(json: bool) -> storefront::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(storefront::areas())?);
        return Ok(());
    }

    println!("{:<16} {:<16} {:>8}", "ID", "NAME", "FEE (RM)");
    for area in storefront::areas() {
        println!("{:<16} {:<16} {:>8}", area.id, area.name, area.fee);
    }
    Ok(())
}

async fn run(cli: Cli, config: Option<StorefrontConfig>) -> storefront::Result<()> {
    match cli.command {
        Command::Areas { json } => print_areas(json)?,
        Command::Fee { area_id } => {
            if storefront::find_area(&area_id).is_none() {
                // Unknown areas still resolve to a zero fee.
                tracing::warn!("⚠️ Unrecognised delivery area {:?}, fee falls back to 0", area_id);
            }
            println!("{}", storefront::delivery_fee(&area_id));
        }
        Command::Name { area_id } => println!("{}", storefront::delivery_area_name(&area_id)),
        Command::ImageUrl { public_id, options } => {
            let config = config.ok_or_else(|| StoreError::ConfigError {
                message: "CDN configuration is required".to_string(),
            })?;
            let host = CloudinaryClient::new(&config)?;
            println!("{}", host.image_url(&public_id, &options.into()));
        }
        Command::Upload {
            path,
            public_id,
            metadata,
        } => {
            let config = config.ok_or_else(|| StoreError::ConfigError {
                message: "CDN configuration is required".to_string(),
            })?;
            let metadata = metadata
                .iter()
                .map(|pair| validation::parse_key_value("meta", pair))
                .collect::<storefront::Result<BTreeMap<_, _>>>()?;

            let host = CloudinaryClient::new(&config)?;
            let uploaded = host.upload(&path, &public_id, &metadata).await?;
            println!("✅ Uploaded {}", uploaded.public_id);
            println!("🔗 {}", uploaded.secure_url);
        }
    }
    Ok(())
}

fn report_and_exit(e: &StoreError) -> ! {
    tracing::error!("❌ {} (Severity: {:?})", e, e.severity());
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // 設定檔只在需要 CDN 的指令時載入
    let config = if cli.command.needs_cdn() {
        Some(load_config(&cli))
    } else {
        None
    };

    let (level, json_from_file) = match &config {
        Some(Ok(c)) => (c.log_level().map(str::to_string), c.json_logs()),
        _ => (None, false),
    };
    if cli.json_logs || json_from_file {
        logger::init_json_logger(cli.verbose, level.as_deref());
    } else {
        logger::init_cli_logger(cli.verbose, level.as_deref());
    }

    tracing::debug!("CLI arguments: {:?}", cli);

    let config = match config.transpose() {
        Ok(config) => config,
        Err(e) => report_and_exit(&e),
    };

    if let Err(e) = run(cli, config).await {
        report_and_exit(&e);
    }
}
