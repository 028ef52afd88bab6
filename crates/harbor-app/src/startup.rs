//! Choosing the profile and tabs of the first window.

use harbor_common::{ProfileError, ProfileId, WindowId};
use harbor_profile::ProfileManager;
use harbor_shell::Shell;

/// The profile the first window opens with.
///
/// An explicitly requested profile must exist. Otherwise the last used
/// profile wins, then the first known one, and a fresh profile is created
/// when there are none.
pub fn startup_profile(
    profiles: &mut ProfileManager,
    requested: Option<&str>,
) -> Result<ProfileId, ProfileError> {
    if let Some(requested) = requested {
        let id = ProfileId::from(requested);
        return profiles
            .get(&id)
            .filter(|p| !p.is_incognito())
            .map(|p| p.id().clone())
            .ok_or_else(|| ProfileError::NotFound(id.to_string()));
    }

    let last = profiles
        .last_user_id()
        .filter(|id| profiles.get(id).is_some())
        .cloned();
    if let Some(id) = last {
        return Ok(id);
    }
    if let Some(profile) = profiles.normal_profiles().next() {
        return Ok(profile.id().clone());
    }
    Ok(profiles.create()?.id().clone())
}

/// Open the first window, in incognito mode if asked.
pub fn open_startup_window(
    shell: &mut Shell,
    profile: &ProfileId,
    incognito: bool,
    urls: Vec<String>,
) -> harbor_common::Result<WindowId> {
    if incognito {
        shell.open_incognito_window(profile, urls)
    } else {
        shell.open_window(profile, urls)
    }
}
