//! Handler id derivation.

use skyway_ir::HttpMethod;

/// Handler id for an entry without an `operationId`.
///
/// The method is followed by the path with its leading slash dropped and
/// every `/`, `{` and `}` replaced by `_`, so `get /users/{id}` becomes
/// `get_users__id_`.
pub fn fallback_handler_id(path: &str, method: HttpMethod) -> String {
    let path = path.strip_prefix('/').unwrap_or(path);
    format!("{}_{}", method.as_str(), path.replace(['/', '{', '}'], "_"))
}

/// The handler id for an entry: its `operationId`, or the fallback.
pub fn handler_id(operation_id: Option<&str>, path: &str, method: HttpMethod) -> String {
    match operation_id {
        Some(id) => id.to_string(),
        None => fallback_handler_id(path, method),
    }
}
