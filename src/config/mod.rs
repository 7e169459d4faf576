pub mod schema;
pub mod settings;
pub mod store;

pub use schema::{
    ApiKey, AUTH_TOKEN_VAR, BASE_URL_VAR, ConfigDocument, MODEL_VAR, Provider, Selection,
    UNKNOWN_MODEL, mask_secret,
};
pub use settings::Settings;
pub use store::{ConfigStore, TemplateSource};
