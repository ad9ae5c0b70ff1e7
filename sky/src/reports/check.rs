//! Check command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from input validation.
#[derive(Debug)]
pub struct CheckReport {
    /// Resolved path of the API description.
    pub api_path: PathBuf,
    /// Error messages.
    pub errors: Vec<String>,
    /// Warning messages.
    pub warnings: Vec<String>,
    /// Info messages.
    pub infos: Vec<String>,
    /// Handler ids that a build would generate.
    pub handlers: Vec<String>,
    pub route_count: usize,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for error in &self.errors {
            out.error(error);
        }

        for warning in &self.warnings {
            out.warning(warning);
        }

        for info in &self.infos {
            out.preformatted(&format!("info: {}", info));
        }

        if !self.warnings.is_empty() || !self.errors.is_empty() || !self.infos.is_empty() {
            out.newline();
        }

        if !self.is_valid() {
            return;
        }

        out.preformatted(&format!("✓ {} is valid", self.api_path.display()));
        out.newline();
        out.section(&format!(
            "{} route{}, {} handler{}",
            self.route_count,
            if self.route_count == 1 { "" } else { "s" },
            self.handlers.len(),
            if self.handlers.len() == 1 { "" } else { "s" }
        ));
        for handler in &self.handlers {
            out.list_item(handler);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::BufferOutput;

    #[test]
    fn test_render_valid() {
        let report = CheckReport {
            api_path: PathBuf::from("api.yaml"),
            errors: vec![],
            warnings: vec![],
            infos: vec!["binding 'CACHE' is not used by any operation\n  --> kv_namespaces".into()],
            handlers: vec!["listUsers".into()],
            route_count: 2,
        };
        let mut out = BufferOutput::default();
        report.render(&mut out);

        assert_eq!(
            out.stdout,
            [
                "info: binding 'CACHE' is not used by any operation\n  --> kv_namespaces",
                "",
                "✓ api.yaml is valid",
                "",
                "2 routes, 1 handler:",
                "  - listUsers"
            ]
        );
        assert!(out.stderr.is_empty());
    }

    #[test]
    fn test_render_invalid() {
        let report = CheckReport {
            api_path: PathBuf::from("api.yaml"),
            errors: vec!["boom".into()],
            warnings: vec![],
            infos: vec![],
            handlers: vec![],
            route_count: 0,
        };
        let mut out = BufferOutput::default();
        report.render(&mut out);

        assert_eq!(out.stderr, ["error: boom"]);
        assert_eq!(out.stdout, [""]);
    }
}
