//! Server startup utilities.

use tracing::info;

/// Prints the startup banner.
pub fn print_banner() {
    info!(r#"
  _____         _    _           _
 |_   _|_ _ ___| | _| |__  _   _| |__
   | |/ _` / __| |/ / '_ \| | | | '_ \
   | | (_| \__ \   <| | | | |_| | |_) |
   |_|\__,_|___/_|\_\_| |_|\__,_|_.__/
    "#);
}

/// Prints server startup information.
pub fn print_startup_info(addr: &str) {
    let separator = "=".repeat(60);
    info!("{}", separator);
    info!("REST API:  http://{}", addr);
    info!("Health:    http://{}/health", addr);
    info!("API Docs:  http://{}/swagger-ui", addr);
    info!("{}", separator);
}
