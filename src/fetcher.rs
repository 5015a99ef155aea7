//! One-shot loading of the portfolio's GitHub data.
//!
//! The profile burst (profile, repository list, per-repository languages) and
//! the contribution calendar are independent: a failed calendar never marks the
//! page as failed, and a failed profile burst never leaks partial data.

use crate::config::LanguagePolicy;
use crate::error::{FetchError, FetchResult};
use crate::github::GithubClient;
use crate::models::{ActivityDay, LanguageTotals, Profile, Repository};
use crate::stats;
use futures::StreamExt;
use futures::stream;
use tokio_util::sync::CancellationToken;

/// Language lookups allowed in flight at once.
const LANGUAGE_CONCURRENCY: usize = 8;

#[derive(Debug, Default)]
pub struct ProfileState {
    pub profile: Option<Profile>,
    pub repositories: Vec<Repository>,
    pub language_totals: LanguageTotals,
    /// Repositories whose language lookup failed and were kept with no languages.
    pub language_failures: Vec<String>,
    pub loading: bool,
    pub error: Option<FetchError>,
}

impl ProfileState {
    fn failed(error: FetchError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }
}

/// Load profile, repositories and their languages. Never returns partial data on error.
pub async fn fetch_profile_state(
    client: &GithubClient,
    username: &str,
    policy: LanguagePolicy,
    cancel: &CancellationToken,
) -> ProfileState {
    log::info!("Fetching profile and repositories for {username}");

    let result = tokio::select! {
        _ = cancel.cancelled() => Err(FetchError::Cancelled),
        r = load_profile(client, username, policy) => r,
    };

    match result {
        Ok(state) => {
            log::info!(
                "Loaded {} repositories with {} languages",
                state.repositories.len(),
                state.language_totals.len()
            );
            state
        }
        Err(e) => {
            log::error!("Profile fetch failed: {e}");
            ProfileState::failed(e)
        }
    }
}

async fn load_profile(
    client: &GithubClient,
    username: &str,
    policy: LanguagePolicy,
) -> FetchResult<ProfileState> {
    let (profile, repositories) =
        tokio::try_join!(client.profile(username), client.repositories(username))?;

    let (repositories, language_failures) = attach_languages(client, repositories, policy).await?;
    let language_totals = stats::language_totals(&repositories);

    Ok(ProfileState {
        profile: Some(profile),
        repositories,
        language_totals,
        language_failures,
        loading: false,
        error: None,
    })
}

/// Fan out the language lookups, then join them back in source order.
async fn attach_languages(
    client: &GithubClient,
    repositories: Vec<Repository>,
    policy: LanguagePolicy,
) -> FetchResult<(Vec<Repository>, Vec<String>)> {
    let results: Vec<_> = stream::iter(repositories)
        .map(|repo| async move {
            let languages = client.languages(&repo.languages_url).await;
            (repo, languages)
        })
        .buffered(LANGUAGE_CONCURRENCY)
        .collect()
        .await;

    let mut out = Vec::with_capacity(results.len());
    let mut failures = Vec::new();
    for (mut repo, languages) in results {
        match languages {
            Ok(languages) => repo.languages = languages,
            Err(e) if policy == LanguagePolicy::FailAll => return Err(e),
            Err(e) => {
                log::warn!("Skipping languages for {}: {e}", repo.name);
                failures.push(repo.name.clone());
            }
        }
        out.push(repo);
    }

    Ok((out, failures))
}

/// Load the contribution calendar. Failures are logged and yield an empty calendar.
pub async fn fetch_activity(
    client: &GithubClient,
    username: &str,
    cancel: &CancellationToken,
) -> Vec<ActivityDay> {
    let result = tokio::select! {
        _ = cancel.cancelled() => Err(FetchError::Cancelled),
        r = client.contribution_calendar(username) => r,
    };

    match result {
        Ok(days) => {
            log::info!("Loaded {} contribution days", days.len());
            days
        }
        Err(e) => {
            log::warn!("Contribution calendar unavailable: {e}");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::github::test_support::*;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount_profile(server: &MockServer, repos: &[&str]) {
        let base = server.uri();
        Mock::given(method("GET"))
            .and(path("/users/octocat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(profile_json("octocat")))
            .mount(server)
            .await;
        let repos: Vec<_> = repos
            .iter()
            .enumerate()
            .map(|(i, name)| repo_json(&base, i as u64 + 1, name))
            .collect();
        Mock::given(method("GET"))
            .and(path("/users/octocat/repos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(repos))
            .mount(server)
            .await;
    }

    async fn mount_languages(server: &MockServer, repo: &str, body: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/repos/octocat/{repo}/languages")))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(body.to_string(), "application/json"),
            )
            .mount(server)
            .await;
    }

    async fn three_repos_one_failing() -> MockServer {
        let server = MockServer::start().await;
        mount_profile(&server, &["alpha", "beta", "gamma"]).await;
        mount_languages(&server, "alpha", r#"{"Rust":100}"#).await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/beta/languages"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        mount_languages(&server, "gamma", r#"{"Rust":20,"Go":30}"#).await;
        server
    }

    fn client(server: &MockServer) -> GithubClient {
        GithubClient::new(&Config::for_server(&server.uri(), Some("secret")))
    }

    #[tokio::test]
    async fn success_populates_everything_in_source_order() {
        let server = MockServer::start().await;
        mount_profile(&server, &["site", "tool"]).await;
        mount_languages(&server, "site", r#"{"JavaScript":100}"#).await;
        mount_languages(&server, "tool", r#"{"JavaScript":50,"Go":30}"#).await;

        let state = fetch_profile_state(
            &client(&server),
            "octocat",
            LanguagePolicy::Skip,
            &CancellationToken::new(),
        )
        .await;

        assert!(!state.loading);
        assert!(state.error.is_none());
        assert_eq!(state.profile.unwrap().login, "octocat");
        let names: Vec<_> = state.repositories.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["site", "tool"]);
        assert_eq!(state.repositories[1].languages.get("Go"), Some(30));
        assert_eq!(
            state.language_totals.iter().collect::<Vec<_>>(),
            vec![("JavaScript", 150), ("Go", 30)]
        );
        assert!(state.language_failures.is_empty());
    }

    #[tokio::test]
    async fn skip_policy_keeps_failing_repository_without_languages() {
        let server = three_repos_one_failing().await;

        let state = fetch_profile_state(
            &client(&server),
            "octocat",
            LanguagePolicy::Skip,
            &CancellationToken::new(),
        )
        .await;

        assert!(state.error.is_none());
        assert_eq!(state.repositories.len(), 3);
        assert!(state.repositories[1].languages.is_empty());
        assert_eq!(state.language_failures, vec!["beta".to_string()]);
        assert_eq!(
            state.language_totals.iter().collect::<Vec<_>>(),
            vec![("Rust", 120), ("Go", 30)]
        );
    }

    #[tokio::test]
    async fn fail_all_policy_fails_the_whole_fetch() {
        let server = three_repos_one_failing().await;

        let state = fetch_profile_state(
            &client(&server),
            "octocat",
            LanguagePolicy::FailAll,
            &CancellationToken::new(),
        )
        .await;

        assert!(!state.loading);
        assert!(matches!(state.error, Some(FetchError::Status { .. })));
        assert!(state.profile.is_none());
        assert!(state.repositories.is_empty());
        assert!(state.language_totals.is_empty());
    }

    #[tokio::test]
    async fn repository_list_failure_leaks_no_profile() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/octocat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(profile_json("octocat")))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/users/octocat/repos"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let state = fetch_profile_state(
            &client(&server),
            "octocat",
            LanguagePolicy::Skip,
            &CancellationToken::new(),
        )
        .await;

        assert!(state.error.is_some());
        assert!(state.profile.is_none());
        assert!(state.repositories.is_empty());
    }

    #[tokio::test]
    async fn missing_credential_surfaces_as_error_state() {
        let server = MockServer::start().await;
        let client = GithubClient::new(&Config::for_server(&server.uri(), None));

        let cancel = CancellationToken::new();
        let state = fetch_profile_state(&client, "octocat", LanguagePolicy::Skip, &cancel).await;
        assert!(matches!(state.error, Some(FetchError::MissingCredential)));

        let activity = fetch_activity(&client, "octocat", &cancel).await;
        assert!(activity.is_empty());
    }

    #[tokio::test]
    async fn activity_failure_resolves_to_empty() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let days = fetch_activity(&client(&server), "octocat", &CancellationToken::new()).await;
        assert!(days.is_empty());
    }

    #[tokio::test]
    async fn activity_success_returns_days() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(calendar_json(&[("2024-03-01", 1), ("2024-03-02", 0)])),
            )
            .mount(&server)
            .await;

        let days = fetch_activity(&client(&server), "octocat", &CancellationToken::new()).await;
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].contributions, 1);
    }

    #[tokio::test]
    async fn cancellation_stops_both_fetches() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(profile_json("octocat"))
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let client = client(&server);
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            trigger.cancel();
        });

        let (state, activity) = tokio::join!(
            fetch_profile_state(&client, "octocat", LanguagePolicy::Skip, &cancel),
            fetch_activity(&client, "octocat", &cancel),
        );

        assert!(matches!(state.error, Some(FetchError::Cancelled)));
        assert!(state.profile.is_none());
        assert!(activity.is_empty());
    }
}
