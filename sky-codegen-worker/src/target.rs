//! The Cloudflare Worker target.

use eyre::{Result, WrapErr};
use skyway_codegen::{GlobalData, HandlerData, Target};
use tera::Context;

use crate::templates::{HANDLER_TEMPLATE, TemplateEngine, TeraTemplates};

/// Global artifacts of a worker build, in render order.
pub const GLOBAL_ARTIFACTS: &[&str] = &[
    "index.js",
    "router.js",
    "db.js",
    "keys.js",
    "files.js",
    "support.js",
];

/// Renders a compiled API as an ES-module Cloudflare Worker.
pub struct WorkerTarget<E = TeraTemplates> {
    engine: E,
}

impl WorkerTarget {
    /// Worker target backed by the built-in templates.
    pub fn new() -> Result<Self> {
        Ok(Self {
            engine: TeraTemplates::new()?,
        })
    }
}

impl<E: TemplateEngine> WorkerTarget<E> {
    pub fn with_engine(engine: E) -> Self {
        Self { engine }
    }
}

impl<E: TemplateEngine> Target for WorkerTarget<E> {
    fn name(&self) -> &'static str {
        "worker"
    }

    fn handler_extension(&self) -> &'static str {
        "js"
    }

    fn global_artifacts(&self) -> &[&'static str] {
        GLOBAL_ARTIFACTS
    }

    fn render_global(&self, artifact: &str, data: &GlobalData<'_>) -> Result<String> {
        let context = Context::from_serialize(data).wrap_err("invalid render context")?;
        self.engine.render(artifact, &context)
    }

    fn render_handler(&self, data: &HandlerData<'_>) -> Result<String> {
        let context = Context::from_serialize(data).wrap_err("invalid render context")?;
        self.engine.render(HANDLER_TEMPLATE, &context)
    }
}

#[cfg(test)]
mod tests {
    use skyway_codegen::Emitter;
    use skyway_ir::{
        Action, Binding, HttpMethod, KeyParams, OperationStep, OperationUnit, ResolvedDefaults,
        Route, SqlParams,
    };
    use skyway_manifest::{ApiDescription, BindingsManifest, CompiledConfig};

    use super::*;

    fn config() -> CompiledConfig {
        CompiledConfig {
            bindings: r#"
name = "demo"

[[d1_databases]]
binding = "MAIN_DB"
database_name = "main"

[[kv_namespaces]]
binding = "CACHE"

[[r2_buckets]]
binding = "ASSETS"
bucket_name = "assets-prod"
"#
            .parse::<BindingsManifest>()
            .unwrap(),
            api: "info:\n  title: Demo\n  version: '1.0'\n"
                .parse::<ApiDescription>()
                .unwrap(),
            env: Default::default(),
        }
    }

    fn unit() -> OperationUnit {
        OperationUnit {
            id: "getUser".into(),
            method: HttpMethod::Get,
            path: "/users/{id}".into(),
            steps: vec![
                OperationStep {
                    name: "user".into(),
                    binding: Some(Binding::inherited("MAIN_DB")),
                    action: Action::D1First(SqlParams {
                        sql: "SELECT * FROM users WHERE id = ?".into(),
                        params: vec!["${params.id}".into()],
                    }),
                },
                OperationStep {
                    name: "avatar".into(),
                    binding: Some(Binding::explicit("ASSETS")),
                    action: Action::R2Get(KeyParams {
                        key: "avatars/${params.id}".into(),
                    }),
                },
            ],
            response: None,
            defaults: ResolvedDefaults {
                d1: Some("MAIN_DB".into()),
                kv: None,
                r2: None,
            },
        }
    }

    fn render(name: &str, routes: &[Route], units: &[OperationUnit]) -> String {
        let emitter = Emitter::new(WorkerTarget::new().unwrap());
        let files = emitter.render(&config(), routes, units).unwrap();
        files
            .into_iter()
            .find(|f| f.path().to_str() == Some(name))
            .map(|f| f.content().to_string())
            .unwrap_or_else(|| panic!("{name} was not rendered"))
    }

    #[test]
    fn test_handler_unrolls_steps() {
        let out = render("handlers/getUser.js", &[], &[unit()]);
        assert!(out.contains(concat!(
            r#"last = results["user"] = await db.first(env, "MAIN_DB", "#,
            r#""SELECT * FROM users WHERE id = ?", resolve(["${params.id}"], scope));"#
        )));
        assert!(out.contains(concat!(
            r#"last = results["avatar"] = await files.get(env, "ASSETS", "#,
            r#"resolve("avatars/${params.id}", scope));"#
        )));
        assert!(out.contains("const RESPONSE = null;"));
        assert!(out.contains("return respond(RESPONSE, last, scope);"));
    }

    #[test]
    fn test_result_name_is_only_written_as_a_string() {
        let mut unit = unit();
        unit.steps[0].name = "user\nthrow 1; //".into();

        let out = render("handlers/getUser.js", &[], &[unit]);

        assert!(out.contains(r#"last = results["user\nthrow 1; //"] = await db.first("#));
        assert!(out.contains("  // 1. d1.first\n"));
        assert!(!out.lines().any(|line| line.trim_start().starts_with("throw")));
    }

    #[test]
    fn test_binding_tables() {
        let db = render("db.js", &[], &[]);
        assert!(db.contains(r#""MAIN_DB": "main","#));
        let keys = render("keys.js", &[], &[]);
        assert!(keys.contains(r#""CACHE","#));
        let files = render("files.js", &[], &[]);
        assert!(files.contains(r#""ASSETS": "assets-prod","#));
    }

    #[test]
    fn test_index_header() {
        let index = render("index.js", &[], &[]);
        assert!(index.contains("// Worker: demo"));
        assert!(index.contains("// API: Demo 1.0"));
        assert!(index.contains("export default {"));
    }

    #[test]
    fn test_router_imports_handlers_and_keeps_passthrough() {
        let routes = vec![
            Route::new(HttpMethod::Get, "/users/{id}", Some("getUser".into())),
            Route::new(HttpMethod::Get, "/health", None),
        ];
        let router = render("router.js", &routes, &[unit()]);
        assert!(router.contains(
            r#"import { handle as handle_0_getUser } from "./handlers/getUser.js";"#
        ));
        assert!(router.contains("handler: handle_0_getUser,"));
        assert!(router.contains(r#"path: "/health","#));
        assert!(router.contains("handler: null,"));
        assert!(router.contains(r#"method: "GET","#));
    }

    #[test]
    fn test_router_guards_param_decoding() {
        let routes = vec![Route::new(HttpMethod::Get, "/users/{id}", Some("getUser".into()))];
        let router = render("router.js", &routes, &[unit()]);

        assert_eq!(router.matches("decodeURIComponent(").count(), 1);
        assert!(router.contains("  try {\n    return decodeURIComponent(part);\n  } catch {"));
        assert!(router.contains("const value = decodeSegment(parts[i]);"));
        assert!(router.contains("if (value === null) {\n        return null;"));
    }

    struct Failing;

    impl TemplateEngine for Failing {
        fn render(&self, name: &str, _context: &Context) -> Result<String> {
            eyre::bail!("cannot render {name}")
        }
    }

    #[test]
    fn test_custom_engine_errors_propagate() {
        let target = WorkerTarget::with_engine(Failing);
        let emitter = Emitter::new(target);
        let err = emitter.render(&config(), &[], &[]).unwrap_err();
        assert!(err.to_string().contains("index.js"));
    }
}
