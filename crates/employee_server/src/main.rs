//! Employee registry HTTP server.
//!
//! # Responsibility
//! - Read configuration from the environment.
//! - Bring up logging and the SQLite database before accepting traffic.
//! - Serve the employee router until Ctrl-C.

use employee_core::db::open_db;
use employee_core::{core_version, init_logging};
use employee_http::{router, AppState, ServerConfig};
use log::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;

    let log_dir = config
        .log_dir
        .to_str()
        .ok_or("EMPLOYEE_LOG_DIR must be valid UTF-8")?;
    init_logging(&config.log_level, log_dir)?;

    let conn = open_db(&config.db_path)?;
    let app = router(AppState::new(conn));

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!(
        "event=server_start module=server status=ok bind={} db_path={} version={}",
        config.bind,
        config.db_path.display(),
        core_version()
    );
    println!("employee_server listening on http://{}", config.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("event=server_signal module=server status=error error={err}");
        // Without a signal handler, run until the process is killed.
        std::future::pending::<()>().await;
    }
}
