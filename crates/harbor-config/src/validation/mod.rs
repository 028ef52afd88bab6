//! Settings validation.
//!
//! Each section has its own submodule; `validate` runs them all and
//! collects every error into a single `ConfigError`.

mod helpers;
mod pages;
mod search;


use crate::schema::UserConfig;
use harbor_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &UserConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    pages::validate_startup(&mut errors, config);
    pages::validate_home(&mut errors, config);
    search::validate_search(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
