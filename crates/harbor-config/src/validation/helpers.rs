//! Shared helpers used by the domain validators.

use harbor_common::url::is_url;

/// Push an error if `value` is non-empty and not a URL.
pub(crate) fn validate_url(errors: &mut Vec<String>, name: &str, value: &str) {
    if !value.is_empty() && !is_url(value) {
        errors.push(format!("{name} = {value:?} is not a URL"));
    }
}

/// Push an error if `value` does not contain `needle`.
pub(crate) fn validate_contains(errors: &mut Vec<String>, name: &str, value: &str, needle: &str) {
    if !value.contains(needle) {
        errors.push(format!("{name} = {value:?} must contain {needle:?}"));
    }
}

/// Push an error if `index` is not below `len`.
pub(crate) fn validate_index(errors: &mut Vec<String>, name: &str, index: usize, len: usize) {
    if index >= len {
        errors.push(format!("{name} = {index} is out of range [0, {len})"));
    }
}
