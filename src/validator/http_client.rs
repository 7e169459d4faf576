use reqwest::Client;
use std::time::Duration;

pub const PROBE_TIMEOUT_SECS: u64 = 10;

pub fn build_probe_client() -> Client {
    build_probe_client_with_timeout(PROBE_TIMEOUT_SECS)
}

pub fn build_probe_client_with_timeout(timeout_secs: u64) -> Client {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(timeout_secs))
        .build()
        .unwrap_or_else(|_| Client::new())
}
