// ABOUTME: Reads the hiring organization name from JSON-LD structured data scripts.
// ABOUTME: Malformed scripts are skipped; nested objects and @graph arrays are searched.

use serde_json::Value;

use crate::dom::text::raw_text;
use crate::dom::Page;
use crate::error::ExtractError;

const LD_JSON: &str = r#"script[type="application/ld+json"]"#;

/// `hiringOrganization.name` from the first JSON-LD script that has one.
pub fn hiring_organization(page: &Page) -> Result<Option<String>, ExtractError> {
    for script in page.select(LD_JSON)? {
        let body = raw_text(&script);
        let value: Value = match serde_json::from_str(body.trim()) {
            Ok(v) => v,
            Err(err) => {
                tracing::debug!(url = page.url(), error = %err, "skipping malformed JSON-LD");
                continue;
            }
        };
        if let Some(name) = find_org_name(&value) {
            return Ok(Some(name));
        }
    }
    Ok(None)
}

fn find_org_name(value: &Value) -> Option<String> {
    match value {
        Value::Object(map) => {
            if let Some(org) = map.get("hiringOrganization") {
                let name = match org {
                    Value::String(s) => Some(s.as_str()),
                    Value::Object(o) => o.get("name").and_then(Value::as_str),
                    _ => None,
                };
                if let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) {
                    return Some(name.to_string());
                }
            }
            if let Some(found) = map.get("@graph").and_then(find_org_name) {
                return Some(found);
            }
            map.values().find_map(find_org_name)
        }
        Value::Array(items) => items.iter().find_map(find_org_name),
        _ => None,
    }
}
