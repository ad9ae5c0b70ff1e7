//! Analyze phase - derives the routing table.

use std::collections::HashMap;

use eyre::{Result, eyre};
use skyway_ir::{HttpMethod, OperationUnit, Route};
use skyway_manifest::ApiDescription;

use crate::pipeline::{CompilationContext, Phase};

/// Phase that builds a [`Route`] for every `(path, method)` in the document.
///
/// Must run after `LowerPhase`: routes point at the handler ids of the
/// lowered units.
pub struct AnalyzePhase;

impl Phase for AnalyzePhase {
    fn name(&self) -> &'static str {
        "analyze"
    }

    fn description(&self) -> &'static str {
        "Derive the routing table"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let units = ctx.units.as_deref().ok_or_else(|| {
            eyre!("operation units not set - AnalyzePhase must run after LowerPhase")
        })?;

        let routes = build_routes(&ctx.config.api, units);
        tracing::debug!(
            routes = routes.len(),
            passthrough = routes.iter().filter(|r| r.is_passthrough()).count(),
            "built routing table"
        );
        ctx.routes = Some(routes);
        Ok(())
    }
}

/// Build routes in match order.
///
/// Routes with fewer path parameters come first so `/users/me` wins over
/// `/users/{id}`; ties keep document order.
pub fn build_routes(api: &ApiDescription, units: &[OperationUnit]) -> Vec<Route> {
    let handlers: HashMap<(&str, HttpMethod), &str> = units
        .iter()
        .map(|u| ((u.path.as_str(), u.method), u.id.as_str()))
        .collect();

    let mut routes: Vec<Route> = api
        .operations()
        .map(|(path, method, _)| {
            let handler = handlers.get(&(path, method)).map(|id| id.to_string());
            Route::new(method, path, handler)
        })
        .collect();

    routes.sort_by_key(Route::param_count);
    routes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::phases::build_units;

    #[test]
    fn test_routes_ordered_by_specificity() {
        let api: ApiDescription = r#"
paths:
  /users/{id}:
    get:
      x-operations: []
  /users/me:
    get:
      operationId: getMe
      x-operations: []
  /kv/{key}:
    put:
      x-operations: []
  /health:
    get: {}
"#
        .parse()
        .unwrap();
        let units = build_units(&api);

        let routes = build_routes(&api, &units);

        let table: Vec<_> = routes
            .iter()
            .map(|r| {
                format!(
                    "{} {} -> {}",
                    r.method,
                    r.path,
                    r.handler.as_deref().unwrap_or("passthrough")
                )
            })
            .collect();
        insta::assert_debug_snapshot!(table, @r#"
        [
            "get /users/me -> getMe",
            "get /health -> passthrough",
            "get /users/{id} -> get_users__id_",
            "put /kv/{key} -> put_kv__key_",
        ]
        "#);
    }

    #[test]
    fn test_analyze_requires_units() {
        let mut ctx = CompilationContext::new(Default::default());
        assert!(AnalyzePhase.run(&mut ctx).is_err());

        ctx.units = Some(Vec::new());
        AnalyzePhase.run(&mut ctx).expect("analyze should succeed");
        assert_eq!(ctx.routes().unwrap().len(), 0);
    }
}
