//! End-to-end tests: project directory in, worker build directory out.

use std::{fs, path::Path};

use skyway_codegen::{EmitReport, Emitter, pipeline::Pipeline};
use skyway_codegen_worker::WorkerTarget;
use skyway_manifest::Loader;
use tempfile::TempDir;

const API: &str = r#"
openapi: 3.0.0
info:
  title: Users
  version: 1.0.0
x-defaults:
  d1: MAIN_DB
paths:
  /users/{id}:
    get:
      x-operations:
        - action: d1.first
          sql: SELECT * FROM users WHERE id = ?
          params: ["${params.id}"]
          as: user
      x-response:
        status: 200
        body: "${results.user}"
  /users/me:
    get:
      operationId: currentUser
      x-operations:
        - action: kv.get
          binding: SESSIONS
          key: "session:${headers.authorization}"
          type: json
  /health:
    get:
      summary: Served by the origin
"#;

const WRANGLER: &str = r#"
name = "users-api"
main = "build/index.js"

[[d1_databases]]
binding = "MAIN_DB"
database_name = "users"

[[kv_namespaces]]
binding = "SESSIONS"
id = "abc123"
"#;

fn project(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    for (name, content) in files {
        fs::write(dir.path().join(name), content).expect("Failed to write fixture");
    }
    dir
}

fn build(root: &Path) -> EmitReport {
    let loaded = Loader::new(root).load("api.yaml").expect("Failed to load project");
    let ctx = Pipeline::new().run_loaded(loaded).expect("Pipeline failed");
    let emitter = Emitter::new(WorkerTarget::new().expect("Failed to load templates"));
    emitter
        .emit(
            &root.join("build"),
            &ctx.config,
            ctx.routes().expect("routes"),
            ctx.units().expect("units"),
        )
        .expect("Emit failed")
}

fn read(root: &Path, path: &str) -> String {
    fs::read_to_string(root.join("build").join(path))
        .unwrap_or_else(|e| panic!("Failed to read {path}: {e}"))
}

#[test]
fn test_emitted_files() {
    let dir = project(&[("api.yaml", API), ("wrangler.toml", WRANGLER)]);
    let report = build(dir.path());

    let files: Vec<_> = report
        .files
        .iter()
        .map(|p| p.display().to_string())
        .collect();
    insta::assert_snapshot!(files.join("\n"), @r"
    index.js
    router.js
    db.js
    keys.js
    files.js
    support.js
    handlers/get_users__id_.js
    handlers/currentUser.js
    ");
    assert_eq!(report.handlers, ["get_users__id_", "currentUser"]);
}

#[test]
fn test_only_operations_with_steps_get_handlers() {
    let dir = project(&[("api.yaml", API), ("wrangler.toml", WRANGLER)]);
    build(dir.path());

    let mut handlers: Vec<_> = fs::read_dir(dir.path().join("build/handlers"))
        .expect("handlers dir")
        .map(|e| e.expect("entry").file_name().to_string_lossy().into_owned())
        .collect();
    handlers.sort();
    assert_eq!(handlers, ["currentUser.js", "get_users__id_.js"]);
}

#[test]
fn test_stale_output_is_removed() {
    let dir = project(&[("api.yaml", API), ("wrangler.toml", WRANGLER)]);
    let stale = dir.path().join("build/handlers");
    fs::create_dir_all(&stale).expect("create stale dir");
    fs::write(stale.join("removed.js"), "old").expect("write stale handler");
    fs::write(dir.path().join("build/notes.txt"), "old").expect("write stale file");

    build(dir.path());

    assert!(!stale.join("removed.js").exists());
    assert!(!dir.path().join("build/notes.txt").exists());
    assert!(dir.path().join("build/index.js").exists());
}

#[test]
fn test_builds_are_byte_identical() {
    let dir = project(&[("api.yaml", API), ("wrangler.toml", WRANGLER)]);
    let contents = |report: &EmitReport| -> Vec<String> {
        report
            .files
            .iter()
            .map(|p| read(dir.path(), &p.display().to_string()))
            .collect()
    };

    let first = build(dir.path());
    let before = contents(&first);

    let second = build(dir.path());
    let after = contents(&second);

    assert_eq!(first.files, second.files);
    assert_eq!(before, after);
}

#[test]
fn test_default_binding_is_inherited() {
    let dir = project(&[("api.yaml", API), ("wrangler.toml", WRANGLER)]);
    build(dir.path());

    let handler = read(dir.path(), "handlers/get_users__id_.js");
    assert!(handler.contains(
        r#"await db.first(env, "MAIN_DB", "SELECT * FROM users WHERE id = ?""#
    ));
    assert!(handler.contains(r#"results["user"]"#));
    assert!(handler.contains(
        r#"const RESPONSE = {"status":200,"headers":{},"body":"${results.user}"};"#
    ));

    let current = read(dir.path(), "handlers/currentUser.js");
    assert!(current.contains(concat!(
        r#"await keys.get(env, "SESSIONS", "#,
        r#"resolve("session:${headers.authorization}", scope), "json")"#
    )));
    assert!(current.contains(r#"results["step1"]"#));
}

#[test]
fn test_router_orders_literal_routes_first() {
    let dir = project(&[("api.yaml", API), ("wrangler.toml", WRANGLER)]);
    build(dir.path());

    let router = read(dir.path(), "router.js");
    let me = router.find(r#"path: "/users/me","#).expect("/users/me route");
    let by_id = router.find(r#"path: "/users/{id}","#).expect("/users/{id} route");
    let health = router.find(r#"path: "/health","#).expect("/health route");
    assert!(me < by_id);
    assert!(health < by_id);
    assert!(router.contains("return fetch(request);"));
    assert!(router.contains("handler: null,"));
}

#[test]
fn test_bindings_reach_helpers() {
    let dir = project(&[("api.yaml", API), ("wrangler.toml", WRANGLER)]);
    build(dir.path());

    assert!(read(dir.path(), "db.js").contains(r#""MAIN_DB": "users","#));
    assert!(read(dir.path(), "keys.js").contains(r#""SESSIONS","#));
    assert!(read(dir.path(), "index.js").contains("// Worker: users-api"));
}

#[test]
fn test_unresolved_binding_fails_before_writing() {
    let api = r#"
paths:
  /files/{key}:
    get:
      x-operations:
        - action: r2.get
          key: "${params.key}"
"#;
    let dir = project(&[("api.yaml", api), ("wrangler.toml", WRANGLER)]);
    let loaded = Loader::new(dir.path()).load("api.yaml").expect("Failed to load project");
    let err = Pipeline::new().run_loaded(loaded).unwrap_err();

    assert!(err.to_string().contains("unresolved binding reference"));
    assert!(!dir.path().join("build").exists());
}
