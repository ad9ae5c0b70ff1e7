//! Routing table entries.

use serde::Serialize;

use crate::HttpMethod;

/// One segment of a route path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Segment {
    /// Matches the segment text exactly.
    Literal(String),
    /// Captures the segment under the given parameter name.
    Param(String),
}

/// A routed `(path, method)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub method: HttpMethod,
    pub path: String,
    pub segments: Vec<Segment>,
    /// Handler id, or `None` for a passthrough route.
    pub handler: Option<String>,
}

impl Route {
    /// Build a route, splitting `path` into segments.
    ///
    /// Only whole-segment templates (`{id}`) become parameters; anything else
    /// is matched literally.
    pub fn new(method: HttpMethod, path: impl Into<String>, handler: Option<String>) -> Self {
        let path = path.into();
        let segments = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| match s.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                Some(name) if !name.is_empty() => Segment::Param(name.to_string()),
                _ => Segment::Literal(s.to_string()),
            })
            .collect();

        Self {
            method,
            path,
            segments,
            handler,
        }
    }

    /// Number of captured parameters; fewer means more specific.
    pub fn param_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Param(_)))
            .count()
    }

    /// Whether requests are forwarded instead of handled.
    pub fn is_passthrough(&self) -> bool {
        self.handler.is_none()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_segments() {
        let route = Route::new(HttpMethod::Get, "/users/{id}/files", Some("getFiles".into()));
        assert_eq!(
            route.segments,
            vec![
                Segment::Literal("users".into()),
                Segment::Param("id".into()),
                Segment::Literal("files".into()),
            ]
        );
        assert_eq!(route.param_count(), 1);
        assert!(!route.is_passthrough());
    }

    #[test]
    fn test_root_path_has_no_segments() {
        let route = Route::new(HttpMethod::Get, "/", None);
        assert!(route.segments.is_empty());
        assert!(route.is_passthrough());
    }

    #[test]
    fn test_partial_template_is_literal() {
        let route = Route::new(HttpMethod::Get, "/files/{name}.txt", None);
        assert_eq!(route.segments[1], Segment::Literal("{name}.txt".into()));
        assert_eq!(route.param_count(), 0);
    }

    #[test]
    fn test_serializes_segments_for_router() {
        let route = Route::new(HttpMethod::Post, "/kv/{key}", None);
        assert_eq!(
            serde_json::to_value(&route.segments).unwrap(),
            json!([{ "literal": "kv" }, { "param": "key" }])
        );
    }
}
