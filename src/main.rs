
use coolbreeze_backend::app::app::App;
use coolbreeze_backend::util::logger::Logger;
use dotenv::dotenv;
use tracing::{info, warn};


#[tokio::main]
async fn main() {
    // The guards keep the non-blocking log writers alive for the whole
    // process; dropping them silences the file appenders.
    let _logger = Logger::new().expect("Failed to initialize logging");

    info!("🚀 Starting CoolBreeze Backend Application");

    // Load environment variables from .env file
    match dotenv() {
        Ok(_) => info!("✅ Successfully loaded .env file"),
        Err(e) => warn!("⚠️ Failed to load .env file: {} (using system env vars)", e),
    }

    // Create and start the App
    let app = App::new().await;
    app.start().await;
}
