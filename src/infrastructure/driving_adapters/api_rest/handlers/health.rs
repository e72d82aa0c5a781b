//! Liveness Handler

/// GET / - Plain-text liveness check
pub async fn liveness() -> &'static str {
    "Car Xpress server is running!"
}
