use std::sync::Arc;

use auth::PasswordHasher;
use sso_service::config::Config;
use sso_service::config::DeploymentEnv;
use sso_service::domain::auth::service::AuthService;
use sso_service::inbound::grpc::AuthGrpcService;
use sso_service::inbound::http::router::create_router;
use sso_service::outbound::repositories::Storage;
use sso_service::proto::auth_server::AuthServer;
use tokio::signal;
use tonic::transport::Server;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::load()?;

    init_tracing(config.env);

    tracing::info!(
        service = "sso-service",
        version = env!("CARGO_PKG_VERSION"),
        env = ?config.env,
        "Service starting"
    );

    tracing::info!(
        storage_backend = ?config.storage.backend,
        http_port = config.server.http_port,
        grpc_port = config.server.grpc_port,
        request_timeout_ms = config.server.request_timeout_ms,
        token_ttl_seconds = config.token.ttl_seconds,
        "Configuration loaded"
    );

    let storage = Storage::connect(&config.storage).await?;
    tracing::info!(
        max_connections = config.storage.max_connections,
        storage_backend = ?storage.backend(),
        "Storage connection pool created"
    );

    storage.migrate().await?;
    tracing::info!(storage_backend = ?storage.backend(), "Storage migrations completed");

    let password_hasher = PasswordHasher::with_params(
        config.password.memory_kib,
        config.password.iterations,
        config.password.parallelism,
    )?;

    let storage = Arc::new(storage);
    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&storage),
        Arc::clone(&storage),
        password_hasher,
        config.token.ttl(),
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application =
        create_router(Arc::clone(&auth_service), config.server.request_timeout());
    let http_server = tokio::spawn(async move {
        axum::serve(http_listener, http_application)
            .with_graceful_shutdown(shutdown_signal())
            .await
    });

    let grpc_address = format!("0.0.0.0:{}", config.server.grpc_port).parse()?;
    let grpc_service =
        AuthGrpcService::new(Arc::clone(&auth_service), config.server.request_timeout());
    tracing::info!(
        address = %grpc_address,
        port = config.server.grpc_port,
        protocol = "grpc",
        "gRpc server listening"
    );

    let grpc_server = tokio::spawn(async move {
        Server::builder()
            .add_service(AuthServer::new(grpc_service))
            .serve_with_shutdown(grpc_address, shutdown_signal())
            .await
    });

    let (http_result, grpc_result) = tokio::try_join!(http_server, grpc_server)?;
    if let Err(e) = http_result {
        tracing::error!(error = %e, protocol = "http", "Server error");
    }
    if let Err(e) = grpc_result {
        tracing::error!(error = %e, protocol = "grpc", "Server error");
    }

    tracing::info!("Servers stopped");
    Ok(())
}

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set. Otherwise local runs get human-readable debug
/// output, dev gets debug JSON and prod gets info JSON.
fn init_tracing(env: DeploymentEnv) {
    let default_filter = match env {
        DeploymentEnv::Local | DeploymentEnv::Dev => "sso_service=debug,auth=debug,tower_http=debug",
        DeploymentEnv::Prod => "sso_service=info,auth=info,tower_http=info",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    let registry = tracing_subscriber::registry().with(filter);
    match env {
        DeploymentEnv::Local => registry.with(tracing_subscriber::fmt::layer().pretty()).init(),
        DeploymentEnv::Dev | DeploymentEnv::Prod => {
            registry.with(tracing_subscriber::fmt::layer().json()).init()
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
