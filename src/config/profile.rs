pub const PROFILE_ENV: &str = "LISTMAIL_PROFILE";

const DEFAULT_PROFILE: &str = "default";

pub fn resolve_profile(requested: Option<&str>) -> String {
    let trimmed = requested.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return DEFAULT_PROFILE.to_string();
    }

    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_profile_falls_back_to_default() {
        assert_eq!(resolve_profile(None), "default");
        assert_eq!(resolve_profile(Some("   ")), "default");
        assert_eq!(resolve_profile(Some(" work ")), "work");
    }
}
