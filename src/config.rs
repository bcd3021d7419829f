/// Remote service origin, resolved once at startup and handed to
/// [`crate::api::ApiClient::new`]. Call sites never read the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub server_url: String,
}

const DEV_SERVER: &str = "http://localhost:8000";
const RELEASE_SERVER: &str = "https://wikiquiz-service.onrender.com";

impl Config {
    /// Precedence: explicit flag, then `WIKIQUIZ_SERVER`, then the built-in
    /// default for this build profile.
    pub fn resolve(flag: Option<&str>) -> Self {
        let from_env = std::env::var("WIKIQUIZ_SERVER")
            .ok()
            .filter(|s| !s.trim().is_empty());
        let server_url = flag
            .map(str::to_string)
            .or(from_env)
            .unwrap_or_else(|| default_server().to_string());
        Self::with_server(&server_url)
    }

    pub fn with_server(server_url: &str) -> Self {
        Self {
            server_url: server_url.trim().trim_end_matches('/').to_string(),
        }
    }
}

fn default_server() -> &'static str {
    if cfg!(debug_assertions) {
        DEV_SERVER
    } else {
        RELEASE_SERVER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_wins() {
        let config = Config::resolve(Some("http://127.0.0.1:9999"));
        assert_eq!(config.server_url, "http://127.0.0.1:9999");
    }

    #[test]
    fn trailing_slash_trimmed() {
        let config = Config::with_server("http://localhost:8000/");
        assert_eq!(config.server_url, "http://localhost:8000");

        let config = Config::with_server("  http://localhost:8000//  ");
        assert_eq!(config.server_url, "http://localhost:8000");
    }
}
