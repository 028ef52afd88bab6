//! Validation for startup and home pages.

use crate::schema::{HomeMode, StartupMode, UserConfig};

use super::helpers::validate_url;

pub(crate) fn validate_startup(errors: &mut Vec<String>, config: &UserConfig) {
    let startup = &config.pages.startup;
    if startup.mode != StartupMode::Custom {
        return;
    }
    for (i, url) in startup.urls.iter().enumerate() {
        validate_url(errors, &format!("pages.startup.urls[{i}]"), url);
    }
}

pub(crate) fn validate_home(errors: &mut Vec<String>, config: &UserConfig) {
    let home = &config.pages.home;
    if home.mode == HomeMode::Custom {
        validate_url(errors, "pages.home.url", &home.url);
    }
}
