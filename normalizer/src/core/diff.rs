//! Path-level comparison of two options trees.

use crate::core::value::OptionValue;

/// List the paths at which `left` and `right` differ.
///
/// Unset mapping entries compare equal to missing keys. Paths use `.` for
/// mapping keys and `[i]` for sequence indices; the root is `$`.
pub fn diff_paths(left: &OptionValue, right: &OptionValue) -> Vec<String> {
    let mut paths = Vec::new();
    diff_inner(left, right, "$", &mut paths);
    paths
}

fn diff_inner(left: &OptionValue, right: &OptionValue, path: &str, paths: &mut Vec<String>) {
    match (left, right) {
        (OptionValue::Mapping(left_map), OptionValue::Mapping(right_map)) => {
            let mut keys: Vec<&str> = left_map.keys().collect();
            for key in right_map.keys() {
                if !left_map.contains_key(key) {
                    keys.push(key);
                }
            }
            for key in keys {
                let unset = OptionValue::Unset;
                let left_value = left_map.get(key).unwrap_or(&unset);
                let right_value = right_map.get(key).unwrap_or(&unset);
                diff_inner(left_value, right_value, &format!("{path}.{key}"), paths);
            }
        }
        (OptionValue::Sequence(left_items), OptionValue::Sequence(right_items)) => {
            if left_items.len() != right_items.len() {
                paths.push(path.to_string());
                return;
            }
            for (index, (left_item, right_item)) in left_items.iter().zip(right_items).enumerate()
            {
                diff_inner(left_item, right_item, &format!("{path}[{index}]"), paths);
            }
        }
        _ => {
            if left != right {
                paths.push(path.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn identical_trees_have_no_differences() {
        let tree = OptionValue::from(json!({"a": [1, {"b": "c"}]}));
        assert!(diff_paths(&tree, &tree.clone()).is_empty());
    }

    #[test]
    fn reports_nested_paths() {
        let left = OptionValue::from(json!({"topBar": {"title": {"color": 1}}, "list": [1, 2]}));
        let right = OptionValue::from(json!({"topBar": {"title": {"color": 2}}, "list": [1, 3]}));
        assert_eq!(
            diff_paths(&left, &right),
            vec!["$.topBar.title.color".to_string(), "$.list[1]".to_string()]
        );
    }

    #[test]
    fn unset_entry_equals_missing_key() {
        let mut left = OptionValue::from(json!({"passProps": {"a": 1}, "x": 1}));
        left.as_mapping_mut().expect("mapping").clear("passProps");
        let right = OptionValue::from(json!({"x": 1}));
        assert!(diff_paths(&left, &right).is_empty());
    }

    #[test]
    fn sequence_length_change_reports_the_sequence() {
        let left = OptionValue::from(json!({"items": [1]}));
        let right = OptionValue::from(json!({"items": [1, 2]}));
        assert_eq!(diff_paths(&left, &right), vec!["$.items".to_string()]);
    }
}
