pub const GOOGLE_USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";

#[derive(Clone, Debug)]
pub struct IdentityConfig {
    pub userinfo_url: String,
    pub timeout_seconds: u64,
}

impl IdentityConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(crate::env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            userinfo_url: lookup("GOOGLE_USERINFO_URL")
                .unwrap_or_else(|| GOOGLE_USERINFO_URL.to_string()),
            timeout_seconds: crate::parse_or(&lookup, "IDENTITY_TIMEOUT_SECONDS", 10),
        }
    }
}
