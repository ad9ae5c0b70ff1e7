//! Cloudflare Worker target for the skyway generator.
//!
//! Renders a compiled API into an ES-module Worker:
//!
//! - `index.js` - Worker entry point, turns uncaught errors into 500 responses
//! - `router.js` - Routing table, most specific routes first
//! - `db.js`, `keys.js`, `files.js` - D1, KV and R2 access helpers
//! - `support.js` - Placeholder resolution, request scope and responses
//! - `handlers/<id>.js` - One module per operation with `x-operations`
//!
//! # Usage
//!
//! ```ignore
//! use skyway_codegen::Emitter;
//! use skyway_codegen_worker::WorkerTarget;
//!
//! let emitter = Emitter::new(WorkerTarget::new()?);
//! let report = emitter.emit(Path::new("build"), &config, &routes, &units)?;
//! ```

mod target;
mod templates;

pub use target::{GLOBAL_ARTIFACTS, WorkerTarget};
pub use templates::{HANDLER_TEMPLATE, TemplateEngine, TeraTemplates};
