//! Path parsing and descent through plain data
//!
//! A configuration path is a slash-delimited list of keys. Keys are matched
//! case-insensitively, so parsing lowercases every segment and drops empty
//! ones:
//!
//! ```
//! use cfgtree_core::path::parse_path;
//!
//! assert_eq!(parse_path("/App//DB/host/"), vec!["app", "db", "host"]);
//! assert!(parse_path("/").is_empty());
//! ```

use serde_json::Value;

/// Split a path into lowercase, non-empty segments.
pub fn parse_path(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Follow `segments` through loader data.
///
/// Mappings are entered by key (exact lowercase match first, then a
/// case-insensitive match), sequences by decimal index. Anything else ends
/// the descent.
pub(crate) fn descend<'a>(value: &'a Value, segments: &[String]) -> Option<&'a Value> {
    segments
        .iter()
        .try_fold(value, |branch, segment| step(branch, segment))
}

fn step<'a>(branch: &'a Value, segment: &str) -> Option<&'a Value> {
    match branch {
        Value::Object(map) => map.get(segment).or_else(|| {
            map.iter()
                .find(|(key, _)| key.to_lowercase() == segment)
                .map(|(_, value)| value)
        }),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|idx| items.get(idx)),
        _ => None,
    }
}

/// Whether `name` can be used with `ConfigNode::property`
pub(crate) fn is_property_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
}
