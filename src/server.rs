use crate::{
    catalog::Catalog,
    client::{ActionResult, Client, Intent, invoker::ProcessInvoker},
    metrics::{INVOCATION_DURATION, INVOCATIONS_TOTAL, STATUS_MALFORMED_LINES, encode_metrics},
};
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::json;
use std::{net::IpAddr, sync::Arc, time::Duration};
use tokio::{net::TcpListener, sync::Mutex};

struct AppState {
    client: Client<ProcessInvoker>,
    token: Option<String>,
    // The external client holds a single connection, so write-path
    // actions take this lock and run one at a time.
    action_lock: Mutex<()>,
}

/// Start the control service
///
/// # Errors
///
/// Returns an error if the service fails to bind or to serve
pub async fn start(
    program: String,
    catalog: Catalog,
    listen: Option<IpAddr>,
    port: u16,
    timeout: Duration,
    token: Option<String>,
) -> anyhow::Result<()> {
    let state = Arc::new(AppState {
        client: Client::new(program, catalog, timeout, ProcessInvoker),
        token,
        action_lock: Mutex::new(()),
    });

    let app = Router::new()
        .route("/command", post(command_handler))
        .route("/status", get(status_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(Arc::clone(&state));

    // Bind to socket with smart fallback
    let (listener, bind_addr) = match listen {
        Some(addr) => {
            // Explicit address specified - bind to it
            let socket_addr = format!("{addr}:{port}");
            let listener = TcpListener::bind(&socket_addr).await?;
            (listener, socket_addr)
        }
        None => {
            // Auto mode: try IPv6 first, fallback to IPv4
            if let Ok(l) = TcpListener::bind(format!("::0:{port}")).await {
                (l, format!("[::]:{port}"))
            } else {
                // Fallback to IPv4 if IPv6 fails
                let socket_addr = format!("0.0.0.0:{port}");
                (TcpListener::bind(&socket_addr).await?, socket_addr)
            }
        }
    };

    println!(
        "{} - Listening on {}, client: {}, timeout: {}s",
        Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        bind_addr,
        state.client.program(),
        timeout.as_secs()
    );

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("failed to install Ctrl+C handler: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => eprintln!("failed to install SIGTERM handler: {e}"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}

#[derive(Debug, Deserialize)]
struct CommandRequest {
    #[serde(rename = "type")]
    kind: String,
    region: Option<String>,
}

async fn command_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CommandRequest>,
) -> Response {
    let intent = match Intent::from_request(&request.kind, request.region.as_deref()) {
        Ok(intent) => intent,
        Err(err) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": err.to_string() })),
            )
                .into_response();
        }
    };

    // One writer at a time against the shared external client
    let _guard = state.action_lock.lock().await;

    let timer = INVOCATION_DURATION
        .with_label_values(&[intent.label()])
        .start_timer();
    let result = state.client.dispatch(&intent, state.token.as_deref()).await;
    timer.observe_duration();

    match &result {
        ActionResult::Output(_) => {
            INVOCATIONS_TOTAL
                .with_label_values(&[intent.label(), "ok"])
                .inc();
        }
        ActionResult::Error(err) => {
            INVOCATIONS_TOTAL
                .with_label_values(&[intent.label(), "error"])
                .inc();
            eprintln!(
                "{} - {} failed: {}",
                Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
                intent.label(),
                err.trim_end()
            );
        }
    }

    (StatusCode::OK, Json(result)).into_response()
}

async fn status_handler(State(state): State<Arc<AppState>>) -> Response {
    let timer = INVOCATION_DURATION
        .with_label_values(&["status"])
        .start_timer();
    let result = state.client.status().await;
    timer.observe_duration();

    match result {
        Ok(status) => {
            INVOCATIONS_TOTAL
                .with_label_values(&["status", "ok"])
                .inc();

            let malformed = status.malformed_lines().len();
            if malformed > 0 {
                STATUS_MALFORMED_LINES.inc_by(malformed as u64);
                eprintln!(
                    "{} - status output contained {malformed} line(s) without a separator",
                    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
                );
            }

            (StatusCode::OK, Json(json!({ "output": status }))).into_response()
        }
        Err(err) => {
            INVOCATIONS_TOTAL
                .with_label_values(&["status", "error"])
                .inc();
            eprintln!(
                "{} - status query failed: {err:#}",
                Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            );

            (StatusCode::OK, Json(json!({ "error": format!("{err:#}") }))).into_response()
        }
    }
}

async fn metrics_handler() -> impl IntoResponse {
    match encode_metrics() {
        Ok(buffer) => (StatusCode::OK, buffer),
        Err(e) => {
            eprintln!("{e}");
            (StatusCode::INTERNAL_SERVER_ERROR, Vec::new())
        }
    }
}
