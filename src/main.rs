//! Application entry point and server initialization
//!
//! This module contains the main function that:
//! - Loads environment configuration
//! - Opens the embedded store and loads the link registry
//! - Starts the HTTP server with graceful shutdown support

use std::env;

use dotenvy::dotenv;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

// Module declarations
mod error;
mod handler;
mod logsink;
mod model;
mod registry;
mod resolver;
mod route;
mod store;

use logsink::LogSink;
use registry::LinkRegistry;
use route::{create_app, AppState};
use store::LinkStore;

/// Application entry point
///
/// This asynchronous main function:
/// 1. Loads environment variables from a .env file
/// 2. Reads configuration
/// 3. Opens the embedded database and loads the registry from it
/// 4. Creates the application state and router
/// 5. Starts the HTTP server with graceful shutdown handling
///
/// # Environment Variables
///
/// - `PORT` - Server port number (default: 8080)
/// - `DATABASE_URL` - Path to the database file (default: "shortly.db")
/// - `SHORT_HOST` - Host used in fabricated short aliases
///   (default: "localhost:<PORT>")
/// - `LOG_ENDPOINT` / `LOG_TOKEN` - Remote log collector; shipping is
///   disabled when no token is set
#[tokio::main]
async fn main() {
    // Load environment variables from .env file if it exists
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter("shortly=debug,tower_http=debug")
        .init();

    // Read and parse the server port from environment
    let port_str = env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let port: u16 = port_str.parse().unwrap_or(8080);

    // Read the database file path from environment
    let db_name = env::var("DATABASE_URL").unwrap_or_else(|_| "shortly.db".to_string());

    // Host part of fabricated short aliases
    let short_host = env::var("SHORT_HOST").unwrap_or_else(|_| format!("localhost:{}", port));

    // The registry loads the persisted collection before the listener
    // binds, so redirect resolution never observes partial data
    let store = LinkStore::open(&db_name).expect("Failed to open database");
    let registry = LinkRegistry::new(store, short_host);

    let sink = LogSink::from_env();
    sink.info("main", "URL shortener service initialized");

    // Create the application state and the router
    let state = AppState::new(registry, sink);
    let app = create_app(state).layer(TraceLayer::new_for_http());

    // Bind to all network interfaces on the specified port
    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Failed to bind address");

    // Print startup information
    println!("🚀 Server running at http://localhost:{}", port);
    println!("📂 Using database: {}", db_name);

    // The server runs until it receives SIGTERM or SIGINT
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Handles graceful shutdown signals
///
/// Returns when one of the following is received:
/// - SIGINT (Ctrl+C) - Interrupt signal from terminal
/// - SIGTERM - Termination signal (common in Docker/Kubernetes)
///
/// Open connections are allowed to complete before the process exits.
async fn shutdown_signal() {
    // Handle Ctrl+C (SIGINT)
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    // Handle SIGTERM on Unix systems (Linux, macOS)
    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    // On non-Unix systems (Windows), only handle Ctrl+C
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    // Wait for either signal to be received
    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    println!("\n🛑 Shutdown signal received, stopping server.");
}
