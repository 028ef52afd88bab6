//! Validation for search engines.

use crate::schema::{UserConfig, QUERY_PLACEHOLDER};

use super::helpers::{validate_contains, validate_index};

pub(crate) fn validate_search(errors: &mut Vec<String>, config: &UserConfig) {
    let search = &config.search;
    if search.engines.is_empty() {
        errors.push("search.engines must not be empty".into());
        return;
    }

    for (i, engine) in search.engines.iter().enumerate() {
        if engine.name.trim().is_empty() {
            errors.push(format!("search.engines[{i}].name must not be empty"));
        }
        validate_contains(
            errors,
            &format!("search.engines[{i}].url"),
            &engine.url,
            QUERY_PLACEHOLDER,
        );
    }

    validate_index(
        errors,
        "search.default_engine",
        search.default_engine,
        search.engines.len(),
    );
}
