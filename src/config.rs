use serde::Deserialize;

/// Fixed application-wide salt appended to passwords before hashing.
/// Deliberately not per-user: the stored hash format predates this server
/// and existing rows must keep verifying. Unsuitable for anything beyond
/// low-stakes game credentials; changing the scheme is a data migration.
const DEFAULT_PASSWORD_SALT: &str = "unvAIl_s3cr3t_salt";

const DEFAULT_ADS_TXT: &str = "google.com, pub-7388329784955167, DIRECT, f08c47fec0942fa0";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub password_salt: String,
    /// User-Agent sent on outbound image fetches so origin operators can
    /// allow-list or rate-limit the proxy.
    pub proxy_user_agent: String,
    /// Header an upstream trusted proxy uses to pass the caller identity.
    pub identity_header: String,
    pub ads_txt: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://realguess.db".into()),
            password_salt: std::env::var("PASSWORD_SALT")
                .unwrap_or_else(|_| DEFAULT_PASSWORD_SALT.into()),
            proxy_user_agent: std::env::var("PROXY_USER_AGENT")
                .unwrap_or_else(|_| "realguess-image-proxy/1.0".into()),
            identity_header: std::env::var("IDENTITY_HEADER")
                .unwrap_or_else(|_| "x-authenticated-user".into()),
            ads_txt: std::env::var("ADS_TXT").unwrap_or_else(|_| DEFAULT_ADS_TXT.into()),
        })
    }

    pub fn for_tests() -> Self {
        Self {
            database_url: "sqlite::memory:".into(),
            password_salt: "test-salt".into(),
            proxy_user_agent: "test-proxy/0".into(),
            identity_header: "x-authenticated-user".into(),
            ads_txt: "test, test, DIRECT, test".into(),
        }
    }
}
