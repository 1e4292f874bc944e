pub mod paths;
pub mod profile;
pub mod settings;

pub use paths::AppPaths;
pub use profile::{PROFILE_ENV, resolve_profile};
pub use settings::{ExtractFailurePolicy, Settings};

use crate::error::AppResult;

pub fn load_settings(paths: &AppPaths, profile: &str) -> AppResult<Settings> {
    settings::load(paths.settings_file(profile))
}
