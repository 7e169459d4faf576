use crate::config::{ConfigDocument, Provider, mask_secret};

use super::prompts::Choice;

/// Providers with a display name, labeled `name (id)`.
pub fn provider_choices(document: &ConfigDocument) -> Vec<Choice<String>> {
    document
        .providers
        .iter()
        .filter(|(id, provider)| !id.is_empty() && !provider.name.is_empty())
        .map(|(id, provider)| Choice::new(format!("{} ({id})", provider.name), id.clone()))
        .collect()
}

pub fn model_choices(provider: &Provider) -> Vec<Choice<String>> {
    provider
        .display_models()
        .map(|model| Choice::new(model, model.to_string()))
        .collect()
}

/// Usable keys labeled `name (masked)`. The value is the index into the
/// provider's full key list so it can be stored as `apiKeyIndex` directly.
pub fn api_key_choices(provider: &Provider) -> Vec<Choice<usize>> {
    provider
        .usable_keys()
        .map(|(index, key)| Choice::new(format!("{} ({})", key.name, key.masked()), index))
        .collect()
}

/// Token-bearing variables are shown masked.
pub fn display_env_value(key: &str, value: &str) -> String {
    if key.contains("TOKEN") {
        mask_secret(value)
    } else {
        value.to_string()
    }
}

/// Display-safe view of the current selection; tolerates dangling references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentSummary {
    pub provider_id: String,
    pub provider_name: Option<String>,
    pub base_url: Option<String>,
    pub model_hub_url: Option<String>,
    pub model: Option<String>,
    pub api_key_name: Option<String>,
    pub api_key_masked: Option<String>,
}

impl CurrentSummary {
    pub fn of(document: &ConfigDocument) -> Self {
        let id = &document.current.provider;
        let provider = document.current_provider();
        let key = document.current_api_key();
        Self {
            provider_id: id.clone(),
            provider_name: provider.map(|p| p.name.clone()).filter(|n| !n.is_empty()),
            base_url: provider
                .map(|p| p.base_url.clone())
                .filter(|u| !u.is_empty()),
            model_hub_url: provider.and_then(|p| p.model_hub_url(id)).map(str::to_string),
            model: Some(document.current.model.clone()).filter(|m| !m.is_empty()),
            api_key_name: key.map(|k| k.name.clone()).filter(|n| !n.is_empty()),
            api_key_masked: key.map(|k| k.masked()).filter(|k| !k.is_empty()),
        }
    }
}
