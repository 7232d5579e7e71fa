//! MCP Resource providers

use mutation_engine::MutateError;
use serde_json::json;

use super::protocol::{Resource, ResourceContent};
use super::server::MutaDocServer;
use crate::error::ServerError;

const PRESETS_URI: &str = "mutadoc://presets";
const PRESET_URI_PREFIX: &str = "mutadoc://presets/";

/// Get all resource definitions
pub fn get_resource_definitions(server: &MutaDocServer) -> Vec<Resource> {
    let mut resources = vec![Resource {
        uri: PRESETS_URI.to_string(),
        name: "Preset Index".to_string(),
        description: Some("Names of all presets the server can resolve".to_string()),
        mime_type: Some("application/json".to_string()),
    }];

    for name in server.engine().presets().list() {
        resources.push(Resource {
            uri: format!("{}{}", PRESET_URI_PREFIX, name),
            description: Some(format!("Preset definition for '{}'", name)),
            name,
            mime_type: Some("text/markdown".to_string()),
        });
    }

    resources
}

/// Read a resource by URI
pub fn read_resource(server: &MutaDocServer, uri: &str) -> Result<ResourceContent, ServerError> {
    let registry = server.engine().presets();

    if uri == PRESETS_URI {
        let index = json!({ "presets": registry.list() });
        Ok(ResourceContent {
            uri: uri.to_string(),
            mime_type: Some("application/json".to_string()),
            text: Some(serde_json::to_string_pretty(&index)?),
        })
    } else if let Some(name) = uri.strip_prefix(PRESET_URI_PREFIX) {
        let source = registry.source(name).map_err(|e| match e {
            MutateError::PresetNotFound(_) => ServerError::ResourceNotFound(uri.to_string()),
            other => ServerError::Engine(other),
        })?;
        Ok(ResourceContent {
            uri: uri.to_string(),
            mime_type: Some("text/markdown".to_string()),
            text: Some(source),
        })
    } else {
        Err(ServerError::ResourceNotFound(uri.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_definitions_cover_builtins() {
        let server = MutaDocServer::default();
        let uris: Vec<_> = get_resource_definitions(&server)
            .into_iter()
            .map(|r| r.uri)
            .collect();
        assert_eq!(
            uris,
            vec![
                "mutadoc://presets",
                "mutadoc://presets/academic_paper",
                "mutadoc://presets/api_spec",
                "mutadoc://presets/contract",
                "mutadoc://presets/policy",
            ]
        );
    }

    #[test]
    fn test_read_preset_source() {
        let server = MutaDocServer::default();
        let content = read_resource(&server, "mutadoc://presets/contract").unwrap();
        let text = content.text.unwrap();
        assert!(text.starts_with("---\nname: contract"));
        assert_eq!(content.mime_type.as_deref(), Some("text/markdown"));
    }

    #[test]
    fn test_read_index() {
        let server = MutaDocServer::default();
        let content = read_resource(&server, "mutadoc://presets").unwrap();
        let index: serde_json::Value = serde_json::from_str(&content.text.unwrap()).unwrap();
        assert_eq!(index["presets"].as_array().map(|a| a.len()), Some(4));
    }

    #[test]
    fn test_unknown_resources() {
        let server = MutaDocServer::default();
        assert!(matches!(
            read_resource(&server, "mutadoc://presets/legal"),
            Err(ServerError::ResourceNotFound(_))
        ));
        assert!(matches!(
            read_resource(&server, "file:///etc/hosts"),
            Err(ServerError::ResourceNotFound(_))
        ));
    }
}
