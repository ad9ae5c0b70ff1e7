//! Build command report data structures.

use std::path::PathBuf;

use skyway_codegen::build_dir::HANDLERS_DIR;

use super::output::{Output, Report};

/// Report data from a build.
#[derive(Debug)]
pub struct BuildReport {
    /// Resolved path of the API description.
    pub api_path: PathBuf,

    /// Worker name from wrangler.toml.
    pub worker_name: Option<String>,

    /// `info.title` of the API description.
    pub api_title: Option<String>,

    /// `info.version` of the API description.
    pub api_version: Option<String>,

    /// Warning messages from loading and the pipeline.
    pub warnings: Vec<String>,

    /// Number of routed `(path, method)` pairs.
    pub route_count: usize,

    /// Routes forwarded without a handler.
    pub passthrough_count: usize,

    /// Build result (files written or preview).
    pub result: BuildResult,
}

/// Result of a build.
#[derive(Debug)]
pub enum BuildResult {
    /// Files were written to disk.
    Written(WrittenResult),
    /// Dry-run preview.
    Preview(PreviewResult),
}

/// Result when files were written to disk.
#[derive(Debug)]
pub struct WrittenResult {
    pub output_dir: PathBuf,
    /// Number of artifacts written.
    pub file_count: usize,
    /// Handler ids, in document order.
    pub handlers: Vec<String>,
}

/// Result of a dry-run preview.
#[derive(Debug)]
pub struct PreviewResult {
    /// Files that would be generated.
    pub files: Vec<PreviewFile>,
}

/// A file in preview mode.
#[derive(Debug)]
pub struct PreviewFile {
    /// Path relative to the output directory.
    pub path: String,
    pub content: String,
}

impl Report for BuildReport {
    fn render(&self, out: &mut dyn Output) {
        match &self.result {
            BuildResult::Written(written) => self.render_written(out, written),
            BuildResult::Preview(preview) => self.render_preview(out, preview),
        }
    }
}

impl BuildReport {
    fn heading(&self) -> String {
        let name = self
            .worker_name
            .as_deref()
            .or(self.api_title.as_deref())
            .unwrap_or("worker");
        match &self.api_version {
            Some(version) => format!("{} v{}", name, version),
            None => name.to_string(),
        }
    }

    fn render_written(&self, out: &mut dyn Output, written: &WrittenResult) {
        for warning in &self.warnings {
            out.warning(warning);
        }

        out.preformatted(&self.heading());
        out.key_value("API", &self.api_path.display().to_string());
        out.key_value(
            "Routes",
            &format!(
                "{} ({} passthrough)",
                self.route_count, self.passthrough_count
            ),
        );
        out.newline();

        if !written.handlers.is_empty() {
            out.section(&format!("Handlers ({})", written.handlers.len()));
            for handler in &written.handlers {
                out.added_item(&format!("{}/{}.js", HANDLERS_DIR, handler));
            }
            out.newline();
        }

        out.key_value(
            "Generated",
            &format!(
                "{} ({} files)",
                written.output_dir.display(),
                written.file_count
            ),
        );
    }

    fn render_preview(&self, out: &mut dyn Output, preview: &PreviewResult) {
        for warning in &self.warnings {
            out.warning(warning);
        }

        for file in &preview.files {
            out.divider(&file.path);
            out.preformatted(&file.content);
        }

        out.divider("Summary");
        out.preformatted(&format!("{} files would be generated", preview.files.len()));
    }
}
