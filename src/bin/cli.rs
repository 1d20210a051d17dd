//! Crop Yield CLI - run yield predictions and reports from the command line

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use serde_json::{json, Value};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crop_yield::config::ServiceConfig;
use crop_yield::report::OfflineReportGenerator;
use crop_yield::{
    build_service, load_yield_model, PredictionRequest, ReportBackend, ReportGenerator,
    SoilSuitabilityTable, YieldReportService,
};

#[derive(Parser)]
#[command(name = "cropyield")]
#[command(author, version, about = "Crop yield prediction CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the ONNX yield model (overrides MODEL_PATH)
    #[arg(long, global = true)]
    model_path: Option<PathBuf>,

    /// Show debug logs
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args, Clone)]
struct FieldArgs {
    /// State or region name
    #[arg(long)]
    state: String,

    /// Crop name (e.g. Wheat, Rice, Maize)
    #[arg(long)]
    crop: String,

    /// Soil type (e.g. Loamy, Clayey, Sandy)
    #[arg(long)]
    soil_type: String,

    /// Growing season
    #[arg(long)]
    season: String,

    /// Rainfall category
    #[arg(long)]
    rainfall: String,

    /// Cultivated area in hectares
    #[arg(long)]
    area: String,
}

impl FieldArgs {
    fn to_body(&self) -> Value {
        json!({
            "state": self.state,
            "crop": self.crop,
            "soil_type": self.soil_type,
            "season": self.season,
            "rainfall_category": self.rainfall,
            "area": self.area,
        })
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Predict yield and generate a farming report
    Predict {
        #[command(flatten)]
        fields: FieldArgs,

        /// Skip the Gemini API even if GEMINI_API_KEY is set
        #[arg(long)]
        offline: bool,

        /// Print the raw JSON response body
        #[arg(long)]
        json: bool,
    },

    /// Show the crop/soil suitability table
    Soils,

    /// Render the report prompt without calling a report backend
    Prompt {
        #[command(flatten)]
        fields: FieldArgs,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    let mut config = ServiceConfig::from_env().context("Invalid configuration")?;
    if let Some(path) = cli.model_path {
        config.model_path = path;
    }

    match cli.command {
        Some(Commands::Predict {
            fields,
            offline,
            json,
        }) => predict(&config, &fields, offline, json).await?,
        Some(Commands::Soils) => list_soils(),
        Some(Commands::Prompt { fields }) => show_prompt(&config, &fields)?,
        None => {
            println!("{}", "Crop Yield CLI".cyan().bold());
            println!("Use --help for usage information.");
        }
    }

    Ok(())
}

async fn predict(
    config: &ServiceConfig,
    fields: &FieldArgs,
    offline: bool,
    json: bool,
) -> Result<()> {
    let service = if offline {
        YieldReportService::new(
            load_yield_model(config),
            SoilSuitabilityTable::standard(),
            ReportBackend::Offline(OfflineReportGenerator),
        )
    } else {
        build_service(config).context("Failed to build report backend")?
    };

    let body = fields.to_body();

    if json {
        let response = service.handle_report_request(&body).await;
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!(
        "{}: {} in {} ({} season, {} rainfall)",
        "Predicting".green(),
        fields.crop,
        fields.state,
        fields.season,
        fields.rainfall
    );
    println!();

    let result = match service.run(&body).await {
        Ok(result) => result,
        Err(e) => {
            println!("{} {}", "Error:".red().bold(), e);
            return Ok(());
        }
    };

    let soil_line = if service
        .soil_table()
        .assess(&fields.crop, &fields.soil_type)
        .is_ideal()
    {
        result.soil_suitability.green()
    } else {
        result.soil_suitability.yellow()
    };

    println!("{}", "Yield:".yellow().bold());
    println!("{}", "-".repeat(50));
    println!("{:<24} {:>12.2} t/ha", "Predicted yield", result.predicted_yield);
    println!("{:<24} {:>12.2} t", "Total yield", result.total_yield);
    println!("{:<24} {}", "Soil", soil_line);
    println!(
        "{:<24} {} / {}",
        "Backends",
        service.model().name(),
        service.generator().name()
    );
    println!();

    println!("{}", "Report:".yellow().bold());
    println!("{}", "-".repeat(50));
    println!("{}", result.report);

    Ok(())
}

fn list_soils() {
    let table = SoilSuitabilityTable::standard();

    println!("{}", "Soil Suitability:".yellow().bold());
    println!("{:<12} {}", "Crop", "Acceptable soils");
    println!("{}", "-".repeat(40));
    for (crop, soils) in table.crops() {
        println!("{:<12} {}", crop.cyan(), soils.join(", "));
    }
    println!();
    println!("Crops not listed accept any soil type.");
}

fn show_prompt(config: &ServiceConfig, fields: &FieldArgs) -> Result<()> {
    let req = PredictionRequest::from_json(&fields.to_body())?;
    let service = YieldReportService::new(
        load_yield_model(config),
        SoilSuitabilityTable::standard(),
        OfflineReportGenerator,
    );

    println!("{}", service.render_prompt_for(&req)?);
    Ok(())
}
