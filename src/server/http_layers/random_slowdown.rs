//! Random slowdown middleware for front-end testing

use axum::body::Body;
use axum::extract::Request;
use axum::middleware::Next;
use axum::response::IntoResponse;
use rand_distr::{Distribution, Normal};

/// Delays each request by a gaussian amount of time, mean 1s and standard
/// deviation 2s, clamped at zero.
pub async fn slowdown_request(request: Request<Body>, next: Next) -> impl IntoResponse {
    let delay_ms = match Normal::new(1000.0, 2000.0) {
        Ok(normal) => 0.0f64.max(normal.sample(&mut rand::rng())),
        Err(_) => 0.0,
    };

    tokio::time::sleep(std::time::Duration::from_millis(delay_ms as u64)).await;
    next.run(request).await
}
