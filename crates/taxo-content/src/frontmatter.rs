//! Frontmatter extraction
//!
//! Content authors declare taxonomy codes and tags in the YAML header of
//! each markdown file. Fields may be scalar or list valued; both forms are
//! accepted, and absent fields yield empty lists.

use serde_yaml::Value;

/// Header values relevant to resolution, pulled from one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontmatter {
    /// Declared taxonomy codes, in declaration order.
    pub taxonomy_codes: Vec<String>,
    /// Tags already present in the file.
    pub tags: Vec<String>,
    /// Declared difficulty values, carried through verbatim.
    pub difficulty: Vec<String>,
}

/// Split a document into its YAML frontmatter block and body.
///
/// The body keeps everything after the closing `---`. A document without a
/// frontmatter block is all body.
#[must_use]
pub fn split_frontmatter(content: &str) -> (Option<&str>, &str) {
    let Some(rest) = content.strip_prefix("---") else {
        return (None, content);
    };
    match rest.find("\n---") {
        Some(end) => {
            let header = &rest[..end];
            let after = &rest[end + 4..];
            // Skip the remainder of the closing marker line.
            let body = after.strip_prefix('\n').unwrap_or(after);
            (Some(header), body)
        }
        None => (None, content),
    }
}

/// Extract the resolution-relevant header fields from a document.
#[must_use]
pub fn extract(content: &str) -> Frontmatter {
    let (header, _) = split_frontmatter(content);
    let Some(header) = header else {
        return Frontmatter::default();
    };
    let Ok(value) = serde_yaml::from_str::<Value>(header) else {
        return Frontmatter::default();
    };

    Frontmatter {
        taxonomy_codes: field_values(&value, "taxonomie"),
        tags: field_values(&value, "tags"),
        difficulty: field_values(&value, "difficulty"),
    }
}

/// Read a header field as a list of strings, accepting scalar, numeric and
/// sequence forms. Empty entries are dropped.
fn field_values(header: &Value, key: &str) -> Vec<String> {
    let Some(field) = header.get(key) else {
        return Vec::new();
    };
    match field {
        Value::Sequence(items) => items.iter().filter_map(scalar_to_string).collect(),
        other => scalar_to_string(other).into_iter().collect(),
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}
