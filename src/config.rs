use std::env;

/// Longest session lifetime accepted from `SESSION_TTL_SECS` (one year).
pub const MAX_SESSION_TTL_SECS: i64 = 365 * 24 * 60 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub storage_backend: StorageBackend,
    pub database_url: Option<String>,
    pub host: String,
    pub port: u16,
    pub frontend_url: String,
    pub cors_extra_origins: Vec<String>,

    pub session_secret: String,
    pub session_ttl_secs: i64,
    pub cookie_secure: bool,

    // Bootstrap account created on first start
    pub seed_username: String,
    pub seed_password: String,
}

impl Config {
    pub fn from_env() -> Self {
        let storage_backend = match env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "postgres".into())
            .to_ascii_lowercase()
            .as_str()
        {
            "memory" => StorageBackend::Memory,
            "postgres" => StorageBackend::Postgres,
            other => panic!("STORAGE_BACKEND must be 'postgres' or 'memory', got '{}'", other),
        };

        let database_url = env::var("DATABASE_URL").ok().filter(|s| !s.is_empty());
        if storage_backend == StorageBackend::Postgres && database_url.is_none() {
            panic!("DATABASE_URL must be set when STORAGE_BACKEND=postgres");
        }

        Self {
            storage_backend,
            database_url,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()
                .expect("PORT must be a number"),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".into()),
            // e.g. testing from another device on the LAN
            cors_extra_origins: env::var("CORS_EXTRA_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(|o| o.trim().to_string())
                        .filter(|o| !o.is_empty())
                        .collect()
                })
                .unwrap_or_default(),

            session_secret: env::var("SESSION_SECRET").expect("SESSION_SECRET must be set"),
            session_ttl_secs: parse_session_ttl(
                &env::var("SESSION_TTL_SECS").unwrap_or_else(|_| "604800".into()),
            )
            .unwrap_or_else(|e| panic!("{}", e)),
            cookie_secure: env::var("COOKIE_SECURE")
                .unwrap_or_else(|_| "false".into())
                .parse()
                .unwrap_or(false),

            seed_username: env::var("SEED_USERNAME").unwrap_or_else(|_| "Sakthi".into()),
            seed_password: env::var("SEED_PASSWORD").unwrap_or_else(|_| "Sakthi@123".into()),
        }
    }

    /// In-memory configuration with fixed secrets, for tests and local runs.
    pub fn test_default() -> Self {
        Self {
            storage_backend: StorageBackend::Memory,
            database_url: None,
            host: "127.0.0.1".into(),
            port: 0,
            frontend_url: "http://localhost:5173".into(),
            cors_extra_origins: Vec::new(),
            session_secret: "test-session-secret".into(),
            session_ttl_secs: 3600,
            cookie_secure: false,
            seed_username: "Sakthi".into(),
            seed_password: "Sakthi@123".into(),
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_session_ttl(raw: &str) -> Result<i64, String> {
    let secs: i64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("SESSION_TTL_SECS must be a number, got '{}'", raw))?;
    if !(1..=MAX_SESSION_TTL_SECS).contains(&secs) {
        return Err(format!(
            "SESSION_TTL_SECS must be between 1 and {}, got {}",
            MAX_SESSION_TTL_SECS, secs
        ));
    }
    Ok(secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_ttl_accepts_default_week() {
        assert_eq!(parse_session_ttl("604800"), Ok(604800));
    }

    #[test]
    fn test_session_ttl_rejects_out_of_range() {
        assert!(parse_session_ttl("0").is_err());
        assert!(parse_session_ttl("-60").is_err());
        assert!(parse_session_ttl(&(MAX_SESSION_TTL_SECS + 1).to_string()).is_err());
        assert!(parse_session_ttl(&i64::MAX.to_string()).is_err());
        assert!(parse_session_ttl("week").is_err());
    }

    #[test]
    fn test_session_ttl_upper_bound_is_inclusive() {
        assert_eq!(
            parse_session_ttl(&MAX_SESSION_TTL_SECS.to_string()),
            Ok(MAX_SESSION_TTL_SECS)
        );
    }
}
