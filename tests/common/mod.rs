#![allow(dead_code)]

use std::net::SocketAddr;

use codequiz_client::config::ApiConfig;
use codequiz_client::stub::{build_router, StubState, API_PREFIX};
use codequiz_client::HttpQuizApi;
use tokio::net::TcpListener;

pub struct TestBackend {
    pub addr: SocketAddr,
    pub state: StubState,
}

impl TestBackend {
    pub fn base_url(&self) -> String {
        format!("http://{}{}", self.addr, API_PREFIX)
    }

    pub fn api(&self) -> HttpQuizApi {
        HttpQuizApi::new(&ApiConfig { base_url: self.base_url(), timeout_secs: 5 }).unwrap()
    }
}

/// Serve the stub backend on an ephemeral port for the rest of the test.
pub async fn spawn_backend(state: StubState) -> TestBackend {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = build_router(state.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    TestBackend { addr, state }
}

/// A port nothing listens on.
pub async fn dead_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}{}", addr, API_PREFIX)
}
