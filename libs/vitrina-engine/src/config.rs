use std::collections::HashSet;

use serde::Deserialize;

use vitrina_api::resource::ResourceKind;

use crate::error::EngineError;

/// Route names the server keeps for itself.
const RESERVED_NAMES: &[&str] = &["healthz", "resources"];

/// Root configuration, parsed from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct VitrinaConfig {
    /// HTTP port. The PORT environment variable takes precedence.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory served at `/` (index page and assets). Optional.
    /// Resource routes claim every top-level path, so assets must live
    /// in subdirectories (`css/style.css`, not `style.css`).
    #[serde(default)]
    pub static_dir: Option<String>,

    /// Resource definitions.
    #[serde(default)]
    pub resources: Vec<ResourceConfig>,
}

fn default_port() -> u16 {
    3000
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResourceConfig {
    pub name: String,
    pub kind: ResourceKind,

    /// Document served by a snapshot resource.
    #[serde(default)]
    pub data: Option<toml::Value>,

    /// Fields a submitted record must carry, present and non-empty.
    #[serde(default)]
    pub required: Vec<String>,

    /// Records a collection starts with. Validated like submitted ones.
    #[serde(default)]
    pub seed: Vec<toml::Value>,
}

impl VitrinaConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self, EngineError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| EngineError::Config(format!("{path}: {e}")))?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(toml_str: &str) -> Result<Self, EngineError> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| EngineError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Port to bind: the PORT environment variable wins over the file value.
    pub fn effective_port(&self) -> u16 {
        resolve_port(std::env::var("PORT").ok(), self.port)
    }

    fn validate(&self) -> Result<(), EngineError> {
        let mut seen = HashSet::new();
        for res in &self.resources {
            if res.name.is_empty() || res.name.contains('/') {
                return Err(EngineError::Config(format!(
                    "resource name '{}' is not routable",
                    res.name
                )));
            }
            if RESERVED_NAMES.contains(&res.name.as_str()) {
                return Err(EngineError::Config(format!(
                    "resource '{}': name is reserved for the server itself",
                    res.name
                )));
            }
            if !seen.insert(res.name.as_str()) {
                return Err(EngineError::Config(format!(
                    "duplicate resource '{}'",
                    res.name
                )));
            }
            match res.kind {
                ResourceKind::Snapshot => {
                    if res.data.is_none() {
                        return Err(EngineError::Config(format!(
                            "snapshot '{}': missing `data`",
                            res.name
                        )));
                    }
                    if !res.required.is_empty() || !res.seed.is_empty() {
                        return Err(EngineError::Config(format!(
                            "snapshot '{}': `required` and `seed` only apply to collections",
                            res.name
                        )));
                    }
                }
                ResourceKind::Collection => {
                    if res.data.is_some() {
                        return Err(EngineError::Config(format!(
                            "collection '{}': `data` only applies to snapshots",
                            res.name
                        )));
                    }
                    if res.required.iter().any(|field| field.is_empty()) {
                        return Err(EngineError::Config(format!(
                            "collection '{}': required field names cannot be empty",
                            res.name
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

fn resolve_port(env_value: Option<String>, file_value: u16) -> u16 {
    match env_value {
        Some(raw) => match raw.parse() {
            Ok(port) => port,
            Err(_) => {
                tracing::warn!(value = %raw, "ignoring unparseable PORT variable");
                file_value
            }
        },
        None => file_value,
    }
}
