//! JSON-LD extraction and traversal.
//!
//! Structured data in the wild is deeply irregular: bare objects,
//! top-level arrays, `@graph` wrappers, `@type` as string or array.
//! The search here is total - it never fails on unexpected shapes,
//! it just finds nothing.

use scraper::{Html, Selector};
use serde_json::Value;
use std::sync::OnceLock;

/// Parse every `<script type="application/ld+json">` block in the
/// document, skipping malformed ones and flattening top-level arrays.
pub fn extract_blocks(document: &Html) -> Vec<Value> {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    let selector = SELECTOR
        .get_or_init(|| Selector::parse("script[type='application/ld+json']").unwrap());

    let mut blocks = Vec::new();
    for script in document.select(selector) {
        let raw = script.text().collect::<String>();
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(items)) => blocks.extend(items),
            Ok(value) => blocks.push(value),
            Err(_) => {} // malformed block, skip
        }
    }
    blocks
}

/// Find the first node whose `@type` matches `target`, recursing into
/// `@graph` arrays.
pub fn find_by_type<'a>(schemas: &'a [Value], target: &str) -> Option<&'a Value> {
    schemas.iter().find_map(|schema| search_node(schema, target))
}

fn search_node<'a>(node: &'a Value, target: &str) -> Option<&'a Value> {
    if type_matches(node.get("@type"), target) {
        return Some(node);
    }
    if let Some(Value::Array(graph)) = node.get("@graph") {
        return graph.iter().find_map(|child| search_node(child, target));
    }
    None
}

fn type_matches(type_value: Option<&Value>, target: &str) -> bool {
    match type_value {
        Some(Value::String(s)) => s == target,
        Some(Value::Array(types)) => types.iter().any(|t| t.as_str() == Some(target)),
        _ => false,
    }
}

/// Field presence the way template-driven consumers see it: null,
/// false, 0 and the empty string all count as absent.
pub fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Render a JSON scalar for a detail string (strings unquoted).
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_skips_malformed_blocks() {
        let html = r#"
            <html><head>
                <script type="application/ld+json">{"@type": "Product", "name": "A"}</script>
                <script type="application/ld+json">{not json at all</script>
                <script type="application/ld+json">[{"@type": "FAQPage"}, {"@type": "Review"}]</script>
            </head></html>
        "#;
        let document = Html::parse_document(html);
        let blocks = extract_blocks(&document);
        assert_eq!(blocks.len(), 3, "array blocks flatten, bad block skipped");
    }

    #[test]
    fn test_find_by_type_string_and_array() {
        let schemas = vec![
            json!({"@type": "WebSite"}),
            json!({"@type": ["Thing", "Product"], "name": "X"}),
        ];
        let found = find_by_type(&schemas, "Product").unwrap();
        assert_eq!(found["name"], "X");
        assert!(find_by_type(&schemas, "FAQPage").is_none());
    }

    #[test]
    fn test_find_by_type_recurses_into_graph() {
        let schemas = vec![json!({
            "@context": "https://schema.org",
            "@graph": [
                {"@type": "Organization"},
                {"@graph": [{"@type": "HowTo", "step": []}]}
            ]
        })];
        assert!(find_by_type(&schemas, "HowTo").is_some());
    }

    #[test]
    fn test_find_by_type_tolerates_junk_shapes() {
        let schemas = vec![
            json!(null),
            json!(42),
            json!("Product"),
            json!({"@type": 7}),
            json!({"@graph": "not an array"}),
        ];
        assert!(find_by_type(&schemas, "Product").is_none());
    }

    #[test]
    fn test_is_present_follows_template_semantics() {
        assert!(!is_present(None));
        assert!(!is_present(Some(&json!(null))));
        assert!(!is_present(Some(&json!(""))));
        assert!(!is_present(Some(&json!(0))));
        assert!(!is_present(Some(&json!(false))));
        assert!(is_present(Some(&json!("BrandCo"))));
        assert!(is_present(Some(&json!(12900))));
        assert!(is_present(Some(&json!({}))));
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&json!("4.5")), "4.5");
        assert_eq!(display_value(&json!(4.5)), "4.5");
        assert_eq!(display_value(&json!(132)), "132");
    }
}
