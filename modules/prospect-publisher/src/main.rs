use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use prospect_common::store::CsvStore;
use prospect_common::Config;
use prospect_publisher::publisher::SheetPublisher;
use prospect_publisher::dashboard;
use sheets_client::SheetsClient;

#[derive(Parser, Debug)]
#[command(
    name = "prospect-publisher",
    about = "Sync the investor CSV into the shared spreadsheet"
)]
struct Args {
    /// CSV file written by prospect-scout (overrides OUTPUT_CSV)
    #[arg(long, value_name = "FILE")]
    csv: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("prospect_publisher=info".parse()?),
        )
        .init();

    let args = Args::parse();
    let mut config = Config::publisher_from_env();
    if let Some(csv) = args.csv {
        config.output_csv = csv;
    }
    config.log_redacted();

    let store = CsvStore::new(&config.output_csv);
    if !store.exists() {
        error!(path = %config.output_csv.display(), "CSV file not found");
        return Ok(ExitCode::FAILURE);
    }

    if config.gsheet_credentials.is_empty() {
        error!("GSHEET_CREDENTIALS environment variable not set");
        return Ok(ExitCode::FAILURE);
    }
    let sheets = match SheetsClient::connect(&config.gsheet_credentials).await {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "Failed to authenticate with the spreadsheet backend");
            return Ok(ExitCode::FAILURE);
        }
    };

    let table = match store.load() {
        Ok(table) => table,
        Err(e) => {
            error!(error = %e, "Failed to read the CSV store");
            return Ok(ExitCode::FAILURE);
        }
    };
    info!(count = table.len(), path = %config.output_csv.display(), "Loaded records");

    let publisher = SheetPublisher::new(&sheets, &config.spreadsheet_name, &config.worksheet_name);
    let spreadsheet = match publisher.publish(&table).await {
        Ok(spreadsheet) => spreadsheet,
        Err(e) => {
            error!(error = %e, "Publish failed");
            return Ok(ExitCode::FAILURE);
        }
    };

    // Best-effort: a dashboard failure never fails the sync.
    if let Err(e) = dashboard::update_dashboard(&sheets, &spreadsheet, &config.worksheet_name, &table).await
    {
        warn!(error = %e, "Could not update dashboard");
    }

    info!(url = spreadsheet.url.as_str(), "Sync complete");
    Ok(ExitCode::SUCCESS)
}
