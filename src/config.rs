//! Environment-derived configuration, read once at startup.

use std::env;

/// Default listen port when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 5000;

/// Relay configuration.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Jenkins root URL. Empty when `JENKINS_URL` is unset.
    pub jenkins_url: String,
    /// Branch names for which build triggers are suppressed.
    pub ignore_branches: Vec<String>,
    /// Server listen port.
    pub port: u16,
    /// Verbose logging toggle.
    pub debug: bool,
}

impl RelayConfig {
    /// Create configuration from environment.
    pub fn from_env() -> RelayConfig {
        RelayConfig {
            jenkins_url: normalize_base_url(&env_to_str("JENKINS_URL", "")),
            ignore_branches: split_branch_list(&env_to_str("IGNORE_BRANCHES", "")),
            port: env_to_u16("PORT", DEFAULT_PORT),
            debug: env_to_bool("DEBUG", false),
        }
    }

    /// Returns true if a non-empty Jenkins URL was configured.
    pub fn jenkins_url_configured(&self) -> bool {
        !self.jenkins_url.is_empty()
    }

    /// Returns true if pushes on `branch` must not trigger builds.
    pub fn is_ignored(&self, branch: &str) -> bool {
        self.ignore_branches.iter().any(|b| b == branch)
    }

    /// Socket address the server binds to.
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

fn env_to_str(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn env_to_u16(name: &str, default: u16) -> u16 {
    env::var(name)
        .map(|e| e.parse().unwrap_or(default))
        .unwrap_or(default)
}

fn env_to_bool(name: &str, default: bool) -> bool {
    env::var(name).map(|e| e == "true").unwrap_or(default)
}

/// Splits a comma-separated branch list, dropping empty entries.
fn split_branch_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .filter(|b| !b.is_empty())
        .map(str::to_string)
        .collect()
}

/// Trims trailing slashes so the outbound URL never doubles one up.
fn normalize_base_url(raw: &str) -> String {
    raw.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_split_branch_list() {
        assert_eq!(split_branch_list(""), Vec::<String>::new());
        assert_eq!(split_branch_list("main"), vec!["main"]);
        assert_eq!(
            split_branch_list("main,develop,gh-pages"),
            vec!["main", "develop", "gh-pages"]
        );
        // Stray commas produce empty entries; they are dropped, not matched.
        assert_eq!(split_branch_list(",main,,"), vec!["main"]);
    }

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(
            normalize_base_url("https://ci.example.com"),
            "https://ci.example.com"
        );
        assert_eq!(
            normalize_base_url("https://ci.example.com/"),
            "https://ci.example.com"
        );
        assert_eq!(normalize_base_url(""), "");
    }

    #[test]
    fn test_is_ignored() {
        let config = RelayConfig {
            jenkins_url: "https://ci.example.com".to_string(),
            ignore_branches: vec!["main".to_string(), "gh-pages".to_string()],
            port: DEFAULT_PORT,
            debug: false,
        };
        assert!(config.is_ignored("main"));
        assert!(config.is_ignored("gh-pages"));
        assert!(!config.is_ignored("develop"));
    }
}
