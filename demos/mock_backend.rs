//! demos/mock_backend.rs
//! Run: cargo run --example mock_backend -- <port> [status]
//!
//! Serves `/api/health` for manual runs of the status view.

use hyper::{
    service::{make_service_fn, service_fn},
    Body, Request, Response, Server, StatusCode,
};
use rand::Rng;
use std::{
    convert::Infallible,
    net::SocketAddr,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};
use tokio::time::sleep;

#[derive(Clone)]
struct MockState {
    status:      StatusCode,
    req_counter: Arc<AtomicU64>,
    base_delay:  u64,
    jitter_ms:   u64,
}

async fn handle(
    req: Request<Body>,
    state: MockState,
) -> Result<Response<Body>, Infallible> {
    let n = state.req_counter.fetch_add(1, Ordering::SeqCst) + 1;

    if req.uri().path() != "/api/health" {
        let mut response = Response::new(Body::from("Not Found"));
        *response.status_mut() = StatusCode::NOT_FOUND;
        return Ok(response);
    }

    let delay =
        state.base_delay + rand::thread_rng().gen_range(0..=state.jitter_ms);
    if delay > 0 {
        sleep(Duration::from_millis(delay)).await;
    }

    println!("health check #{n} -> {} after {delay}ms", state.status);

    let mut response = Response::new(Body::from(format!(
        r#"{{"status":{},"req":{}}}"#,
        state.status.as_u16(),
        n
    )));
    *response.status_mut() = state.status;
    Ok(response)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let port: u16 = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "8000".into())
        .parse()?;
    let status: u16 = std::env::args()
        .nth(2)
        .or_else(|| std::env::var("HEALTH_STATUS").ok())
        .unwrap_or_else(|| "200".into())
        .parse()?;

    let base_delay =
        std::env::var("BASE_DELAY_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(0);
    let jitter_ms =
        std::env::var("JITTER_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(0);

    let state = MockState {
        status: StatusCode::from_u16(status)?,
        req_counter: Arc::new(AtomicU64::new(0)),
        base_delay,
        jitter_ms,
    };

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let make_svc = make_service_fn(move |_conn| {
        let st = state.clone();
        async move {
            Ok::<_, Infallible>(service_fn(move |req| handle(req, st.clone())))
        }
    });

    println!(
        "Mock backend on http://{}/api/health  [status={} delay={}ms±{}]",
        addr, status, base_delay, jitter_ms
    );

    Server::bind(&addr).serve(make_svc).await?;
    Ok(())
}
