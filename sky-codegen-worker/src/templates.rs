//! Template registry for worker artifacts.

use std::collections::HashMap;

use eyre::{Result, WrapErr};
use skyway_core::to_js_identifier;
use tera::{Context, Tera, Value};

/// Templates compiled into the binary, keyed by the artifact they produce.
const TEMPLATES: &[(&str, &str)] = &[
    ("index.js", include_str!("../templates/index.js.tera")),
    ("router.js", include_str!("../templates/router.js.tera")),
    ("db.js", include_str!("../templates/db.js.tera")),
    ("keys.js", include_str!("../templates/keys.js.tera")),
    ("files.js", include_str!("../templates/files.js.tera")),
    ("support.js", include_str!("../templates/support.js.tera")),
    ("handler.js", include_str!("../templates/handler.js.tera")),
];

/// Name of the template every handler is rendered from.
pub const HANDLER_TEMPLATE: &str = "handler.js";

/// Something that turns a named template and a context into text.
pub trait TemplateEngine {
    fn render(&self, name: &str, context: &Context) -> Result<String>;
}

/// Tera-backed engine holding the built-in worker templates.
///
/// Autoescaping is off: templates emit JavaScript, and every interpolated
/// value goes through `json_encode` instead.
pub struct TeraTemplates {
    tera: Tera,
}

impl TeraTemplates {
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.register_filter("js_ident", js_ident);
        tera.add_raw_templates(TEMPLATES.iter().copied())
            .wrap_err("failed to compile worker templates")?;
        Ok(Self { tera })
    }

    /// Names of every registered template.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tera.get_template_names()
    }
}

impl TemplateEngine for TeraTemplates {
    fn render(&self, name: &str, context: &Context) -> Result<String> {
        self.tera
            .render(name, context)
            .wrap_err_with(|| format!("failed to render template '{name}'"))
    }
}

fn js_ident(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("js_ident expects a string"))?;
    Ok(Value::String(to_js_identifier(s)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_templates_compile() {
        let templates = TeraTemplates::new().unwrap();
        let mut names: Vec<_> = templates.names().collect();
        names.sort_unstable();
        assert_eq!(
            names,
            [
                "db.js",
                "files.js",
                "handler.js",
                "index.js",
                "keys.js",
                "router.js",
                "support.js"
            ]
        );
    }

    #[test]
    fn test_js_ident_filter() {
        let args = HashMap::new();
        let out = js_ident(&Value::String("list-users".into()), &args).unwrap();
        assert_eq!(out, Value::String("list_users".into()));
        assert!(js_ident(&Value::Null, &args).is_err());
    }

    #[test]
    fn test_unknown_template_is_an_error() {
        let templates = TeraTemplates::new().unwrap();
        let err = templates.render("nope.js", &Context::new()).unwrap_err();
        assert!(err.to_string().contains("nope.js"));
    }
}
