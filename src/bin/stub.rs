//! Local stub of the quiz backend.
//!
//! Env variables:
//!   STUB_PORT  : u16 (default 8089)
//!   LOG_LEVEL  : tracing filter
//!   LOG_FORMAT : "pretty" (default) or "json"

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::info;

use codequiz_client::stub::{build_router, StubState, API_PREFIX};
use codequiz_client::telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing("info,codequiz_stub=debug,tower_http=info");

  let app = build_router(StubState::new());

  let addr: SocketAddr = std::env::var("STUB_PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([127, 0, 0, 1], port)))
    .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 8089)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "codequiz_stub", %addr, prefix = API_PREFIX, "Stub quiz backend listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(async {
      let _ = tokio::signal::ctrl_c().await;
      info!(target: "codequiz_stub", "Shutting down");
    })
    .await?;
  Ok(())
}
