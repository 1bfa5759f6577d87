//! Server configuration, loaded from environment variables at startup.

use std::path::PathBuf;

/// Runtime configuration for carlot-server.
///
/// Every field has a default so the server starts without any environment
/// variables set.
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP address to bind (default: `"0.0.0.0:7000"`).
    pub bind_address: String,

    /// sqlx SQLite URL of the catalog (default: `"sqlite://carlot.db"`).
    pub database_url: String,

    /// Origin that image URLs are built on, e.g. `http://localhost:7000`.
    pub public_base_url: String,

    /// Directory served under `/uploads`.
    pub uploads_dir: PathBuf,

    /// `tracing` filter string, e.g. `"info"` or `"debug,tower_http=warn"`.
    pub log_level: String,

    /// When `true`, emit log records as newline-delimited JSON.
    pub log_json: bool,

    /// Comma-separated CORS origins; `None` allows any origin.
    pub cors_allowed_origins: Option<String>,

    /// Serve Swagger UI at `/swagger-ui`.
    pub enable_swagger: bool,

    /// Reject unknown filter names instead of passing them through.
    pub strict_filters: bool,

    /// Narrow search results by an "N airbags" phrase in the query.
    pub search_airbag_hint: bool,
}

impl Config {
    /// Build [`Config`] from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_address: env_or("CARLOT_BIND", &defaults.bind_address),
            database_url: env_or("CARLOT_DATABASE_URL", &defaults.database_url),
            public_base_url: env_or("CARLOT_PUBLIC_BASE_URL", &defaults.public_base_url),
            uploads_dir: std::env::var_os("CARLOT_UPLOADS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.uploads_dir),
            log_level: env_or("CARLOT_LOG", &defaults.log_level),
            log_json: env_flag("CARLOT_LOG_JSON", defaults.log_json),
            cors_allowed_origins: std::env::var("CARLOT_CORS_ORIGINS")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            enable_swagger: env_flag("CARLOT_ENABLE_SWAGGER", defaults.enable_swagger),
            strict_filters: env_flag("CARLOT_STRICT_FILTERS", defaults.strict_filters),
            search_airbag_hint: env_flag("CARLOT_SEARCH_AIRBAG_HINT", defaults.search_airbag_hint),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:7000".to_owned(),
            database_url: "sqlite://carlot.db".to_owned(),
            public_base_url: "http://localhost:7000".to_owned(),
            uploads_dir: PathBuf::from("uploads"),
            log_level: "info".to_owned(),
            log_json: false,
            cors_allowed_origins: None,
            enable_swagger: true,
            strict_filters: false,
            search_airbag_hint: false,
        }
    }
}

// ── private helpers ──────────────────────────────────────────────────────────

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn env_flag(key: &str, default: bool) -> bool {
    std::env::var(key)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_storefront() {
        let cfg = Config::default();
        assert_eq!(cfg.bind_address, "0.0.0.0:7000");
        assert_eq!(cfg.public_base_url, "http://localhost:7000");
        assert!(cfg.enable_swagger);
        assert!(!cfg.strict_filters);
    }

    #[test]
    fn unset_flags_fall_back() {
        assert!(env_flag("CARLOT_TEST_UNSET_FLAG", true));
        assert!(!env_flag("CARLOT_TEST_UNSET_FLAG", false));
    }
}
