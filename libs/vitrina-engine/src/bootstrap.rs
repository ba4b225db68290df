use vitrina_api::record::Record;
use vitrina_api::resource::ResourceKind;

use crate::config::{ResourceConfig, VitrinaConfig};
use crate::error::EngineError;
use crate::registry::{Resource, ResourceRegistry};

/// Build the resource registry from a parsed configuration.
///
/// Snapshot documents are rendered to JSON bytes once here; every later
/// read serves the same buffer. Collection seeds go through the same
/// validated append path as submitted records, so a seed violating the
/// required fields aborts startup.
pub fn bootstrap(config: &VitrinaConfig) -> Result<ResourceRegistry, EngineError> {
    let mut registry = ResourceRegistry::new();

    for res_cfg in &config.resources {
        let resource = match res_cfg.kind {
            ResourceKind::Snapshot => build_snapshot(res_cfg)?,
            ResourceKind::Collection => build_collection(res_cfg)?,
        };
        tracing::info!(resource = %res_cfg.name, kind = %res_cfg.kind, "registered resource");
        registry.register(resource);
    }

    Ok(registry)
}

fn build_snapshot(cfg: &ResourceConfig) -> Result<Resource, EngineError> {
    let data = cfg
        .data
        .as_ref()
        .ok_or_else(|| EngineError::Config(format!("snapshot '{}': missing `data`", cfg.name)))?;
    let body = toml_to_json(data)
        .and_then(|value| serde_json::to_vec(&value))
        .map_err(|e| EngineError::Config(format!("snapshot '{}': {e}", cfg.name)))?;
    Ok(Resource::snapshot(cfg.name.clone(), body))
}

fn build_collection(cfg: &ResourceConfig) -> Result<Resource, EngineError> {
    let resource = Resource::collection(cfg.name.clone(), cfg.required.clone());
    for seed in &cfg.seed {
        let value = toml_to_json(seed)
            .map_err(|e| EngineError::Config(format!("collection '{}' seed: {e}", cfg.name)))?;
        let record = Record::from_value(value).map_err(|e| EngineError::Store {
            resource: cfg.name.clone(),
            source: e,
        })?;
        resource.append(record).map_err(|e| EngineError::Store {
            resource: cfg.name.clone(),
            source: e,
        })?;
    }
    Ok(resource)
}

/// TOML payloads cross into the JSON world through the serde bridge.
fn toml_to_json(value: &toml::Value) -> Result<serde_json::Value, serde_json::Error> {
    serde_json::to_value(value)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use vitrina_api::resource::{ResourceContext, ResourceRead};

    use super::*;

    #[test]
    fn snapshot_body_is_rendered_once_at_startup() {
        let config = VitrinaConfig::parse(
            r#"
            [[resources]]
            name = "cursos"
            kind = "snapshot"
            data = { cursos = ["algebra", "historia"], cupos = [30, 25] }
            "#,
        )
        .unwrap();
        let registry = bootstrap(&config).unwrap();

        let first = match registry.read("cursos").unwrap() {
            ResourceRead::Snapshot(body) => body,
            ResourceRead::Records(_) => panic!("expected snapshot"),
        };
        let second = match registry.read("cursos").unwrap() {
            ResourceRead::Snapshot(body) => body,
            ResourceRead::Records(_) => panic!("expected snapshot"),
        };

        assert_eq!(first, second);
        assert_eq!(
            first,
            br#"{"cursos":["algebra","historia"],"cupos":[30,25]}"#
        );
    }

    #[test]
    fn seeds_populate_the_collection_in_order() {
        let config = VitrinaConfig::parse(
            r#"
            [[resources]]
            name = "personas"
            kind = "collection"
            required = ["nombre"]
            seed = [{ nombre = "Ana" }, { nombre = "Luis" }]
            "#,
        )
        .unwrap();
        let registry = bootstrap(&config).unwrap();

        match registry.read("personas").unwrap() {
            ResourceRead::Records(records) => {
                assert_eq!(records.len(), 2);
                assert_eq!(records[0].get("nombre"), Some(&json!("Ana")));
                assert_eq!(records[1].get("nombre"), Some(&json!("Luis")));
            }
            ResourceRead::Snapshot(_) => panic!("expected records"),
        }
    }

    #[test]
    fn seed_violating_required_fields_aborts_startup() {
        let config = VitrinaConfig::parse(
            r#"
            [[resources]]
            name = "personas"
            kind = "collection"
            required = ["nombre", "apellido"]
            seed = [{ nombre = "Ana" }]
            "#,
        )
        .unwrap();
        let err = bootstrap(&config).unwrap_err();
        assert!(err.to_string().contains("missing required fields"));
    }
}
