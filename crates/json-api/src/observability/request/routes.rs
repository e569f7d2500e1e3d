//! Route labels for spans and metrics.

/// Literal path segments served by the router. Anything else is client text.
const STATIC_SEGMENTS: &[&str] = &[
    "api",
    "api-doc",
    "category",
    "docs",
    "healthcheck",
    "login",
    "openapi.json",
    "price-range",
    "products",
    "register",
    "transactions",
    "username",
    "users",
];

/// Collapses every client-chosen path segment so label cardinality stays
/// bounded: numeric ids become `{id}`, the username and category lookup
/// segments become `{username}` and `{category}`, and any other unknown
/// segment becomes `{other}`.
pub(super) fn route_label(path: &str) -> String {
    let mut label = String::with_capacity(path.len());
    let mut previous = "";

    for segment in path.split('/').filter(|segment| !segment.is_empty()) {
        label.push('/');

        if segment.bytes().all(|byte| byte.is_ascii_digit()) {
            label.push_str("{id}");
        } else if previous == "username" {
            label.push_str("{username}");
        } else if previous == "category" {
            label.push_str("{category}");
        } else if STATIC_SEGMENTS.contains(&segment) {
            label.push_str(segment);
        } else {
            label.push_str("{other}");
        }

        previous = segment;
    }

    if label.is_empty() {
        label.push('/');
    }

    label
}
