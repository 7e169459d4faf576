use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::{CcsError, Result};

/// Stored as the model when a provider is selected that has no models.
pub const UNKNOWN_MODEL: &str = "unknown-model";

/// Environment variables written by the export step, in block order.
pub const BASE_URL_VAR: &str = "ANTHROPIC_BASE_URL";
pub const AUTH_TOKEN_VAR: &str = "ANTHROPIC_AUTH_TOKEN";
pub const MODEL_VAR: &str = "ANTHROPIC_MODEL";

/// Model hub pages for well-known provider ids without a configured `modelHubUrl`.
const DEFAULT_MODEL_HUB_URLS: &[(&str, &str)] = &[
    ("siliconflow", "https://cloud.siliconflow.cn/me/models"),
    ("bigmodel", "https://bigmodel.cn/console/modelcenter/square"),
    ("modelscope", "https://modelscope.cn/models"),
    ("deepseek", "https://platform.deepseek.com/"),
    (
        "dashscope",
        "https://bailian.console.aliyun.com/?tab=model#/model-market/all",
    ),
];

// ── Top-level document ───────────────────────────────────────────

/// The provider document persisted as `ccs-providers.json`.
///
/// Fields the tool does not know about are kept in `extra` so hand edits
/// survive a save.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDocument {
    pub providers: IndexMap<String, Provider>,
    pub current: Selection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_config_path: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_hub_url: Option<String>,
    /// Non-string entries are dropped on load.
    #[serde(default, deserialize_with = "string_entries")]
    pub models: Vec<String>,
    #[serde(default)]
    pub api_keys: Vec<ApiKey>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKey {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub key: String,
}

/// The `current` triple the wizard edits and eventually exports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub provider: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub api_key_index: usize,
}

fn string_entries<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .filter_map(|entry| match entry {
            Value::String(s) => Some(s),
            _ => None,
        })
        .collect())
}

// ── Secrets ──────────────────────────────────────────────────────

/// Display form of a secret: first 6 chars, `...`, last 4 chars.
///
/// Secrets shorter than 8 characters are returned unchanged.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() < 8 {
        return secret.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

impl ApiKey {
    /// Both a name and a secret are present.
    pub fn is_usable(&self) -> bool {
        !self.name.is_empty() && !self.key.is_empty()
    }

    pub fn masked(&self) -> String {
        mask_secret(&self.key)
    }
}

// ── Provider helpers ─────────────────────────────────────────────

impl Provider {
    /// Model names worth offering: blank entries are skipped.
    pub fn display_models(&self) -> impl Iterator<Item = &str> {
        self.models
            .iter()
            .map(String::as_str)
            .filter(|m| !m.trim().is_empty())
    }

    /// Usable keys paired with their index in the unfiltered list.
    pub fn usable_keys(&self) -> impl Iterator<Item = (usize, &ApiKey)> {
        self.api_keys
            .iter()
            .enumerate()
            .filter(|(_, key)| key.is_usable())
    }

    pub fn has_model(&self, model: &str) -> bool {
        self.models.iter().any(|m| m == model)
    }

    pub fn first_model(&self) -> Option<&str> {
        self.models.first().map(String::as_str)
    }

    /// Configured hub URL, falling back to the built-in table for known ids.
    pub fn model_hub_url(&self, id: &str) -> Option<&str> {
        self.model_hub_url.as_deref().or_else(|| {
            DEFAULT_MODEL_HUB_URLS
                .iter()
                .find(|(known, _)| *known == id)
                .map(|(_, url)| *url)
        })
    }

    /// `POST` target for a chat request, following the trailing-slash base URL convention.
    pub fn messages_url(&self) -> String {
        if self.base_url.ends_with('/') {
            format!("{}messages", self.base_url)
        } else {
            format!("{}/messages", self.base_url)
        }
    }
}

// ── Selection transitions ────────────────────────────────────────

impl Selection {
    /// Point the selection at another provider, resetting model and key
    /// unconditionally.
    pub fn switch_provider(&mut self, id: &str, provider: &Provider) {
        self.provider = id.to_string();
        self.model = provider
            .first_model()
            .unwrap_or(UNKNOWN_MODEL)
            .to_string();
        self.api_key_index = 0;
    }
}

// ── Validation ───────────────────────────────────────────────────

impl ConfigDocument {
    /// Parse a raw JSON value, running the structural checks a load requires.
    pub fn from_value(value: Value) -> Result<Self> {
        let Some(root) = value.as_object() else {
            return Err(CcsError::invalid("config root must be a JSON object"));
        };
        if !root.get("providers").is_some_and(Value::is_object) {
            return Err(CcsError::invalid("config must contain a `providers` object"));
        }
        if !root.get("current").is_some_and(Value::is_object) {
            return Err(CcsError::invalid("config must contain a `current` object"));
        }

        let document: Self =
            serde_json::from_value(value).map_err(|e| CcsError::invalid(e.to_string()))?;
        document.validate_structure()?;
        Ok(document)
    }

    /// The current provider must exist.
    pub fn validate_structure(&self) -> Result<()> {
        if self.providers.contains_key(&self.current.provider) {
            Ok(())
        } else {
            Err(CcsError::invalid(format!(
                "current provider \"{}\" does not exist in `providers`",
                self.current.provider
            )))
        }
    }

    /// Checks every invariant an export depends on.
    pub fn validate_full(&self) -> Result<()> {
        self.validate_structure()?;
        let id = &self.current.provider;
        let provider = &self.providers[id];

        if url::Url::parse(&provider.base_url).is_err() {
            return Err(CcsError::invalid(format!(
                "provider \"{id}\" has an invalid baseUrl \"{}\"",
                provider.base_url
            )));
        }
        if !provider.has_model(&self.current.model) {
            return Err(CcsError::invalid(format!(
                "current model \"{}\" is not offered by provider \"{id}\"",
                self.current.model
            )));
        }
        if provider.api_keys.is_empty() {
            return Err(CcsError::invalid(format!(
                "provider \"{id}\" must have at least one API key"
            )));
        }
        if self.current.api_key_index >= provider.api_keys.len() {
            return Err(CcsError::invalid(format!(
                "API key index {} is out of range for provider \"{id}\" ({} keys)",
                self.current.api_key_index,
                provider.api_keys.len()
            )));
        }
        Ok(())
    }

    pub fn current_provider(&self) -> Option<&Provider> {
        self.providers.get(&self.current.provider)
    }

    pub fn current_api_key(&self) -> Option<&ApiKey> {
        self.current_provider()
            .and_then(|p| p.api_keys.get(self.current.api_key_index))
    }

    /// The three exported variables; fails unless [`Self::validate_full`] holds.
    pub fn export_vars(&self) -> Result<IndexMap<String, String>> {
        self.validate_full()?;
        let provider = &self.providers[&self.current.provider];
        let key = &provider.api_keys[self.current.api_key_index];

        let mut vars = IndexMap::new();
        vars.insert(BASE_URL_VAR.to_string(), provider.base_url.clone());
        vars.insert(AUTH_TOKEN_VAR.to_string(), key.key.clone());
        vars.insert(MODEL_VAR.to_string(), self.current.model.clone());
        Ok(vars)
    }

    /// Reset a drifted model to the provider's first model. Returns whether it changed.
    pub fn heal_model(&mut self) -> bool {
        let Some(provider) = self.providers.get(&self.current.provider) else {
            return false;
        };
        if provider.has_model(&self.current.model) {
            return false;
        }
        match provider.first_model() {
            Some(first) => {
                self.current.model = first.to_string();
                true
            }
            None => false,
        }
    }

    /// Reset an out-of-range key index to 0. Returns whether it changed.
    pub fn heal_api_key_index(&mut self) -> bool {
        let Some(provider) = self.providers.get(&self.current.provider) else {
            return false;
        };
        if self.current.api_key_index < provider.api_keys.len() {
            return false;
        }
        self.current.api_key_index = 0;
        true
    }
}
