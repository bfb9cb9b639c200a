use catalog_import::application::import_service::ImportService;
use catalog_import::config::{ImportRequest, ImportSettings};
use catalog_import::domain::ports::FileFetcher;
use catalog_import::infrastructure::{
    fs_adapter::LocalFileFetcher, http_adapter::HttpFileFetcher,
    jsonl::data_repo::JsonLinesDataRepository, memory::log_repo::BoundedImportLog,
};
use std::sync::Arc;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env()
            .add_directive("catalog_import=debug".parse()?))
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting catalog import");
    debug!("Environment variables: IMPORT_FILE={}, IMPORT_DOMAIN={}, IMPORT_CONFIG={}",
        std::env::var("IMPORT_FILE").unwrap_or_else(|_| "not set".to_string()),
        std::env::var("IMPORT_DOMAIN").unwrap_or_else(|_| "not set".to_string()),
        std::env::var("IMPORT_CONFIG").unwrap_or_else(|_| "not set".to_string())
    );

    let settings = ImportSettings::load()?;
    let request = ImportRequest::from_env()?;

    let file_fetcher: Arc<dyn FileFetcher> = if HttpFileFetcher::handles(&request.location) {
        debug!("Using HTTP file fetcher");
        Arc::new(HttpFileFetcher::new())
    } else {
        debug!("Using local file fetcher");
        Arc::new(LocalFileFetcher::new())
    };

    let service = ImportService::new(
        file_fetcher,
        Arc::new(JsonLinesDataRepository::new(settings.output_dir.clone())),
        Arc::new(BoundedImportLog::new(settings.log_capacity)),
        settings.import_options(),
        settings.batch_size,
    );
    info!("Import service initialized");

    let report = service.process_file(request).await?;
    if !report.success {
        warn!("Import finished with {} errors", report.errors.len());
    }
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
