//! # Configuration patches
//!
//! A patch is a JSON object whose keys are property names. Plain keys replace the top-level
//! field; keys containing a dot (`image.src`) are routed through nested-path assignment so
//! sibling fields of the sub-object are left untouched.

use crate::BlockError;
use serde_json::{Map, Value};

pub type ConfigPatch = Map<String, Value>;

/// Apply a patch to a configuration value in place
pub fn apply_patch(target: &mut Value, patch: &ConfigPatch) -> Result<(), BlockError> {
    for (key, value) in patch {
        if key.contains('.') {
            set_path(target, key, value.clone())?;
        } else {
            let object = target
                .as_object_mut()
                .ok_or_else(|| BlockError::InvalidPath(key.clone()))?;
            object.insert(key.clone(), value.clone());
        }
    }
    Ok(())
}

/// Assign `value` at a dotted path, creating intermediate objects when missing
pub fn set_path(target: &mut Value, path: &str, value: Value) -> Result<(), BlockError> {
    let segments: Vec<&str> = path.split('.').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(BlockError::InvalidPath(path.to_string()));
    }

    let (last, parents) = segments
        .split_last()
        .ok_or_else(|| BlockError::InvalidPath(path.to_string()))?;

    let mut cursor = target;
    for segment in parents {
        let object = cursor
            .as_object_mut()
            .ok_or_else(|| BlockError::InvalidPath(path.to_string()))?;
        cursor = object
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
    }

    let object = cursor
        .as_object_mut()
        .ok_or_else(|| BlockError::InvalidPath(path.to_string()))?;
    object.insert(last.to_string(), value);
    Ok(())
}

/// Read the value at a dotted path
pub fn get_path<'a>(target: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(target, |value, segment| value.as_object()?.get(segment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_shallow_merge() {
        let mut config = json!({ "text": "a", "color": "#000" });
        let patch = json!({ "text": "b" });
        apply_patch(&mut config, patch.as_object().unwrap()).unwrap();
        assert_eq!(config, json!({ "text": "b", "color": "#000" }));
    }

    #[test]
    fn test_dotted_path_keeps_siblings() {
        let mut config = json!({ "image": { "src": "a.png", "alt": "A" } });
        let patch = json!({ "image.src": "b.png" });
        apply_patch(&mut config, patch.as_object().unwrap()).unwrap();
        assert_eq!(config, json!({ "image": { "src": "b.png", "alt": "A" } }));
    }

    #[test]
    fn test_set_path_creates_intermediate_objects() {
        let mut config = json!({});
        set_path(&mut config, "link.url", json!("https://x.com")).unwrap();
        assert_eq!(get_path(&config, "link.url"), Some(&json!("https://x.com")));
    }

    #[test]
    fn test_set_path_through_scalar_fails() {
        let mut config = json!({ "title": "plain" });
        let err = set_path(&mut config, "title.text", json!("x")).unwrap_err();
        assert_eq!(err, BlockError::InvalidPath("title.text".to_string()));
    }

    #[test]
    fn test_empty_segment_rejected() {
        let mut config = json!({});
        assert!(set_path(&mut config, "image..src", json!("x")).is_err());
    }
}
