/* src/testing.rs */

//! Local HTTP fixtures for tests. Each server runs on its own runtime thread
//! so it can back both async and blocking clients.

use std::net::{SocketAddr, TcpListener};
use std::sync::mpsc;
use std::thread;

use axum::{
    Json, Router,
    http::{HeaderMap, header::USER_AGENT},
};
use serde_json::{Value, json};
use tokio::sync::oneshot;

pub(crate) struct FixtureServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
}

impl FixtureServer {
    pub fn start(router: Router) -> Self {
        let (addr_tx, addr_rx) = mpsc::channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(2)
                .enable_all()
                .build()
                .expect("fixture runtime");

            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind fixture listener");
                addr_tx
                    .send(listener.local_addr().expect("fixture address"))
                    .expect("report fixture address");

                axum::serve(listener, router)
                    .with_graceful_shutdown(async {
                        let _ = shutdown_rx.await;
                    })
                    .await
                    .expect("fixture server");
            });
        });

        let addr = addr_rx.recv().expect("fixture server failed to start");
        Self {
            addr,
            shutdown: Some(shutdown_tx),
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }
}

impl Drop for FixtureServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}

/// A base URL on a port nothing listens on.
pub(crate) fn unused_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind scratch listener");
    let addr = listener.local_addr().expect("scratch address");
    drop(listener);
    format!("http://{addr}")
}

/// Handler echoing request headers as a JSON map, plus the number of
/// `User-Agent` headers under `x-user-agent-count`.
pub(crate) async fn echo_headers(headers: HeaderMap) -> Json<Value> {
    let mut map = serde_json::Map::new();
    for (name, value) in headers.iter() {
        if let Ok(value) = value.to_str() {
            map.insert(name.as_str().to_string(), Value::from(value));
        }
    }
    map.insert(
        "x-user-agent-count".to_string(),
        Value::from(headers.get_all(USER_AGENT).iter().count().to_string()),
    );
    Json(Value::Object(map))
}

/// Handler answering `{"userAgent": ...}` like the live service.
pub(crate) async fn echo_user_agent(headers: HeaderMap) -> Json<Value> {
    let agent = headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    Json(json!({ "userAgent": agent }))
}

/// A `/ip` fixture that answers `address` only when the request carries
/// exactly one `User-Agent` equal to `expected`, and 400 otherwise.
pub(crate) fn strict_agent_fixture(address: &'static str, expected: &'static str) -> FixtureServer {
    use axum::{http::StatusCode, routing::get};

    FixtureServer::start(Router::new().route(
        "/ip",
        get(move |headers: HeaderMap| async move {
            let agents: Vec<_> = headers.get_all(USER_AGENT).iter().collect();
            if agents.len() == 1 && agents[0] == expected {
                (StatusCode::OK, address)
            } else {
                (StatusCode::BAD_REQUEST, "unexpected user agent")
            }
        }),
    ))
}
