use std::path::PathBuf;

/// Account the portfolio is built for. Override with `PORTFOLIO_GITHUB_USER` at build time.
const DEFAULT_USERNAME: &str = "surajadhikari";
const DEFAULT_API_BASE: &str = "https://api.github.com";
const DEFAULT_GRAPHQL_URL: &str = "https://api.github.com/graphql";

/// What to do when one repository's language lookup fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LanguagePolicy {
    /// Keep the repository with an empty language map and record it.
    #[default]
    Skip,
    /// Fail the whole profile fetch.
    FailAll,
}

impl LanguagePolicy {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skip" => Some(Self::Skip),
            "fail-all" | "fail_all" | "failall" => Some(Self::FailAll),
            _ => None,
        }
    }
}

/// Build-time token first, then the runtime variables. Blank values count as absent.
fn resolve_token(
    build_time: Option<&str>,
    lookup: &impl Fn(&str) -> Option<String>,
) -> Option<String> {
    [build_time.map(str::to_string), lookup("GITHUB_TOKEN"), lookup("ACCESS_TOKEN")]
        .into_iter()
        .flatten()
        .find(|t| !t.trim().is_empty())
}

#[derive(Debug, Clone)]
pub struct Config {
    pub username: String,
    pub token: Option<String>,
    pub api_base: String,
    pub graphql_url: String,
    pub output_dir: PathBuf,
    pub language_policy: LanguagePolicy,
}

impl Config {
    /// Resolve configuration from build-time constants and the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let username = option_env!("PORTFOLIO_GITHUB_USER")
            .unwrap_or(DEFAULT_USERNAME)
            .to_string();

        let token = resolve_token(option_env!("GITHUB_TOKEN"), &lookup);

        let language_policy = match lookup("PORTFOLIO_LANGUAGE_POLICY") {
            Some(raw) => LanguagePolicy::parse(&raw).unwrap_or_else(|| {
                log::warn!("Unknown PORTFOLIO_LANGUAGE_POLICY {raw:?}, using skip");
                LanguagePolicy::Skip
            }),
            None => LanguagePolicy::Skip,
        };

        Self {
            username,
            token,
            api_base: lookup("PORTFOLIO_API_BASE")
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
                .trim_end_matches('/')
                .to_string(),
            graphql_url: lookup("PORTFOLIO_GRAPHQL_URL")
                .unwrap_or_else(|| DEFAULT_GRAPHQL_URL.to_string()),
            output_dir: lookup("PORTFOLIO_OUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            language_policy,
        }
    }

    /// Configuration pointing every endpoint at `base`, for tests against a mock server.
    #[cfg(test)]
    pub fn for_server(base: &str, token: Option<&str>) -> Self {
        Self {
            username: "octocat".to_string(),
            token: token.map(str::to_string),
            api_base: base.trim_end_matches('/').to_string(),
            graphql_url: format!("{}/graphql", base.trim_end_matches('/')),
            output_dir: PathBuf::from("."),
            language_policy: LanguagePolicy::Skip,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|k| vars.get(k).cloned())
    }

    #[test]
    fn defaults_point_at_github() {
        let config = config_with(&[]);
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.graphql_url, DEFAULT_GRAPHQL_URL);
        assert_eq!(config.language_policy, LanguagePolicy::Skip);
        assert_eq!(config.output_dir, PathBuf::from("."));
    }

    fn lookup_from(vars: &[(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<&str, &str> = vars.iter().copied().collect();
        move |k: &str| vars.get(k).map(|v| v.to_string())
    }

    #[test]
    fn blank_tokens_count_as_missing() {
        assert_eq!(resolve_token(None, &lookup_from(&[])), None);
        assert_eq!(resolve_token(None, &lookup_from(&[("GITHUB_TOKEN", "  ")])), None);
        assert_eq!(resolve_token(Some(""), &lookup_from(&[])), None);
    }

    #[test]
    fn token_sources_are_tried_in_order() {
        let both = lookup_from(&[("GITHUB_TOKEN", "runtime"), ("ACCESS_TOKEN", "legacy")]);
        assert_eq!(resolve_token(Some("baked"), &both).as_deref(), Some("baked"));
        assert_eq!(resolve_token(None, &both).as_deref(), Some("runtime"));
        let blank_first = lookup_from(&[("GITHUB_TOKEN", " "), ("ACCESS_TOKEN", "legacy")]);
        assert_eq!(resolve_token(None, &blank_first).as_deref(), Some("legacy"));
    }

    #[test]
    fn overrides_are_applied() {
        let config = config_with(&[
            ("PORTFOLIO_API_BASE", "http://localhost:9000/"),
            ("PORTFOLIO_LANGUAGE_POLICY", "fail-all"),
            ("PORTFOLIO_OUT_DIR", "out"),
        ]);
        assert_eq!(config.api_base, "http://localhost:9000");
        assert_eq!(config.language_policy, LanguagePolicy::FailAll);
        assert_eq!(config.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn unknown_policy_falls_back_to_skip() {
        let config = config_with(&[("PORTFOLIO_LANGUAGE_POLICY", "sometimes")]);
        assert_eq!(config.language_policy, LanguagePolicy::Skip);
    }
}
