//! Live API key checks.
//!
//! Keys are classified locally first; only candidates cost a request. Probes
//! run one at a time, each bounded by [`http_client::PROBE_TIMEOUT_SECS`].

pub mod http_client;

use reqwest::{Client, StatusCode};
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::{ConfigDocument, Provider, mask_secret};

/// Secrets shorter than this are treated as placeholders.
pub const MIN_CANDIDATE_LEN: usize = 15;

/// Values shipped in the config template.
pub const PLACEHOLDER_SECRETS: &[&str] = &["sk-xxx", "sk-xxxx", "sk-yyy", "sk-zzz"];

const ANTHROPIC_VERSION: &str = "2023-06-01";
const FALLBACK_PROBE_MODEL: &str = "claude-3-5-haiku-latest";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyClass {
    Empty,
    Placeholder,
    Candidate,
}

pub fn classify(secret: &str) -> KeyClass {
    let trimmed = secret.trim();
    if trimmed.is_empty() {
        KeyClass::Empty
    } else if PLACEHOLDER_SECRETS.contains(&trimmed) || trimmed.chars().count() < MIN_CANDIDATE_LEN
    {
        KeyClass::Placeholder
    } else {
        KeyClass::Candidate
    }
}

/// Result of one live probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeVerdict {
    Valid { status: u16 },
    Invalid { reason: String },
}

impl ProbeVerdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }
}

/// Status policy: only 401/403 reject a key. Any other status, including
/// 5xx, means the request got past authentication.
pub fn verdict_for_status(status: StatusCode) -> ProbeVerdict {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProbeVerdict::Invalid {
            reason: format!("HTTP {}", status.as_u16()),
        },
        _ => ProbeVerdict::Valid {
            status: status.as_u16(),
        },
    }
}

#[derive(Serialize)]
struct ProbeRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [ProbeMessage<'a>; 1],
}

#[derive(Serialize)]
struct ProbeMessage<'a> {
    role: &'a str,
    content: &'a str,
}

pub struct KeyProber {
    client: Client,
}

impl KeyProber {
    pub fn new() -> Self {
        Self::with_client(http_client::build_probe_client())
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Send one minimal chat request with `secret` against `provider`.
    /// Transport failures and timeouts are [`ProbeVerdict::Invalid`].
    pub async fn probe(&self, provider: &Provider, secret: &str) -> ProbeVerdict {
        let body = ProbeRequest {
            model: provider.display_models().next().unwrap_or(FALLBACK_PROBE_MODEL),
            max_tokens: 1,
            messages: [ProbeMessage {
                role: "user",
                content: "hi",
            }],
        };
        let url = provider.messages_url();

        let response = self
            .client
            .post(&url)
            .bearer_auth(secret)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await;

        match response {
            Ok(response) => {
                let verdict = verdict_for_status(response.status());
                debug!(%url, key = %mask_secret(secret), ?verdict, "probe finished");
                verdict
            }
            Err(e) => {
                warn!(%url, key = %mask_secret(secret), error = %e, "probe failed");
                let reason = if e.is_timeout() {
                    "timeout".to_string()
                } else {
                    e.to_string()
                };
                ProbeVerdict::Invalid { reason }
            }
        }
    }
}

impl Default for KeyProber {
    fn default() -> Self {
        Self::new()
    }
}

// ── Report ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyStatus {
    Empty,
    /// Placeholder secrets are skipped without a request.
    Skipped,
    Valid { status: u16 },
    Invalid { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCheck {
    pub name: String,
    pub masked: String,
    pub status: KeyStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderCheck {
    pub id: String,
    pub name: String,
    pub keys: Vec<KeyCheck>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyTotals {
    pub valid: usize,
    pub invalid: usize,
    pub skipped: usize,
    pub empty: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub providers: Vec<ProviderCheck>,
}

impl ValidationReport {
    pub fn totals(&self) -> KeyTotals {
        let mut totals = KeyTotals::default();
        for key in self.providers.iter().flat_map(|p| &p.keys) {
            match key.status {
                KeyStatus::Empty => totals.empty += 1,
                KeyStatus::Skipped => totals.skipped += 1,
                KeyStatus::Valid { .. } => totals.valid += 1,
                KeyStatus::Invalid { .. } => totals.invalid += 1,
            }
        }
        totals
    }
}

/// Check every key of every provider, in document order.
pub async fn validate_all(document: &ConfigDocument, prober: &KeyProber) -> ValidationReport {
    let mut report = ValidationReport::default();
    for (id, provider) in &document.providers {
        let mut keys = Vec::with_capacity(provider.api_keys.len());
        for api_key in &provider.api_keys {
            let status = match classify(&api_key.key) {
                KeyClass::Empty => KeyStatus::Empty,
                KeyClass::Placeholder => KeyStatus::Skipped,
                KeyClass::Candidate => match prober.probe(provider, api_key.key.trim()).await {
                    ProbeVerdict::Valid { status } => KeyStatus::Valid { status },
                    ProbeVerdict::Invalid { reason } => KeyStatus::Invalid { reason },
                },
            };
            keys.push(KeyCheck {
                name: api_key.name.clone(),
                masked: api_key.masked(),
                status,
            });
        }
        report.providers.push(ProviderCheck {
            id: id.clone(),
            name: provider.name.clone(),
            keys,
        });
    }
    report
}
