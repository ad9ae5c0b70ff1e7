//! Lint for declared bindings that no operation uses.

use std::collections::BTreeSet;

use skyway_ir::{OperationUnit, ResourceClass};
use skyway_manifest::CompiledConfig;

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Reports bindings in wrangler.toml that no step references.
pub struct UnusedBindingLint;

impl Lint for UnusedBindingLint {
    fn name(&self) -> &'static str {
        "unused-binding"
    }

    fn check(
        &self,
        config: &CompiledConfig,
        units: &[OperationUnit],
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        let used: BTreeSet<(ResourceClass, &str)> = units
            .iter()
            .flat_map(|unit| unit.resource_steps())
            .filter_map(|(_, step, class)| step.binding.as_ref().map(|b| (class, b.name.as_str())))
            .collect();

        for class in [ResourceClass::D1, ResourceClass::Kv, ResourceClass::R2] {
            for name in config.bindings.binding_names(class) {
                if !used.contains(&(class, name)) {
                    diagnostics.push(
                        Diagnostic::info(
                            "validate",
                            format!("binding '{name}' is not used by any operation"),
                        )
                        .at(class.manifest_key()),
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{pipeline::phases::build_units, testing::config};

    #[test]
    fn test_unused_binding_reported() {
        let config = config(
            r#"
x-defaults:
  d1: TEST_DB
paths:
  /users:
    get:
      x-operations:
        - action: d1.query
          sql: SELECT * FROM users
"#,
            r#"
[[d1_databases]]
binding = "TEST_DB"

[[kv_namespaces]]
binding = "TEST_KV"

[[r2_buckets]]
binding = "TEST_DB"
"#,
        );
        let units = build_units(&config.api);

        let mut diagnostics = Vec::new();
        UnusedBindingLint.check(&config, &units, &mut diagnostics);

        let reported: Vec<_> = diagnostics
            .iter()
            .map(|d| format!("{} @ {}", d.message, d.location.as_deref().unwrap_or("")))
            .collect();
        assert_eq!(
            reported,
            vec![
                "binding 'TEST_KV' is not used by any operation @ kv_namespaces",
                "binding 'TEST_DB' is not used by any operation @ r2_buckets",
            ]
        );
    }
}
