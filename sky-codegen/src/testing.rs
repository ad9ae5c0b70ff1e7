//! Test helpers shared by unit tests.

use skyway_manifest::{ApiDescription, BindingsManifest, CompiledConfig};

/// Build a config from an API description and a wrangler.toml, with an
/// empty environment.
pub fn config(api: &str, bindings: &str) -> CompiledConfig {
    CompiledConfig {
        api: api.parse::<ApiDescription>().expect("Failed to parse test API"),
        bindings: bindings
            .parse::<BindingsManifest>()
            .expect("Failed to parse test bindings"),
        env: Default::default(),
    }
}
