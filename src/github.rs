use crate::config::Config;
use crate::error::{FetchError, FetchResult};
use crate::models::{ActivityDay, LanguageMap, Profile, Repository};
use reqwest::header::{ACCEPT, HeaderMap, RETRY_AFTER, USER_AGENT};
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

const USER_AGENT_VALUE: &str = "portfolio-stats";
const REST_ACCEPT: &str = "application/vnd.github+json";

const CONTRIBUTIONS_QUERY: &str = r#"
query($login: String!) {
    user(login: $login) {
        contributionsCollection {
            contributionCalendar {
                totalContributions
                weeks {
                    contributionDays {
                        date
                        contributionCount
                    }
                }
            }
        }
    }
}
"#;

const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";

fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
}

/// Non-2xx response as an error, keeping the rate-limit headers GitHub sends.
fn status_error(resp: &Response, url: &str) -> FetchError {
    let headers = resp.headers();
    FetchError::Status {
        status: resp.status(),
        url: url.to_string(),
        rate_limit_remaining: header_u64(headers, RATE_LIMIT_REMAINING),
        retry_after: header_u64(headers, RETRY_AFTER.as_str()),
    }
}

#[derive(Clone)]
pub struct GithubClient {
    token: Option<Arc<String>>,
    http: Arc<Client>,
    api_base: Arc<String>,
    graphql_url: Arc<String>,
}

impl GithubClient {
    /// Build a client from configuration. A missing token is reported per request, not here.
    pub fn new(config: &Config) -> Self {
        Self {
            token: config.token.clone().map(Arc::new),
            http: Arc::new(Client::new()),
            api_base: Arc::new(config.api_base.clone()),
            graphql_url: Arc::new(config.graphql_url.clone()),
        }
    }

    fn authorized(&self, req: RequestBuilder) -> FetchResult<RequestBuilder> {
        let token = self.token.as_ref().ok_or(FetchError::MissingCredential)?;
        Ok(req.bearer_auth(&**token).header(USER_AGENT, USER_AGENT_VALUE))
    }

    /// Low-level REST GET returning the decoded body.
    async fn rest_get<T: DeserializeOwned>(&self, url: &str) -> FetchResult<T> {
        log::debug!("GET {url}");
        let req = self.authorized(self.http.get(url).header(ACCEPT, REST_ACCEPT))?;

        let resp = req.send().await.map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })?;

        if !resp.status().is_success() {
            return Err(status_error(&resp, url));
        }

        let body = resp.text().await.map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })?;
        serde_json::from_str(&body).map_err(|e| FetchError::payload(url, e))
    }

    /// Low-level GraphQL request with `errors` checking. No retries.
    async fn graphql(&self, query: &str, variables: Value) -> FetchResult<Value> {
        let url = self.graphql_url.as_str();
        log::debug!("POST {url}");
        let req = self.authorized(
            self.http
                .post(url)
                .json(&serde_json::json!({ "query": query, "variables": variables })),
        )?;

        let resp = req.send().await.map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })?;

        if !resp.status().is_success() {
            return Err(status_error(&resp, url));
        }

        let json: Value = resp.json().await.map_err(|e| {
            if e.is_decode() {
                FetchError::payload(url, e)
            } else {
                FetchError::Transport {
                    url: url.to_string(),
                    source: e,
                }
            }
        })?;

        if let Some(errors) = json.get("errors") {
            return Err(FetchError::GraphQl(errors.to_string()));
        }

        Ok(json)
    }

    /// Fetch the profile of `username`.
    pub async fn profile(&self, username: &str) -> FetchResult<Profile> {
        let url = format!("{}/users/{username}", self.api_base);
        self.rest_get(&url).await
    }

    /// First page (100) of repositories, most recently updated first. Languages are left empty.
    pub async fn repositories(&self, username: &str) -> FetchResult<Vec<Repository>> {
        let url = format!(
            "{}/users/{username}/repos?sort=updated&per_page=100",
            self.api_base
        );
        self.rest_get(&url).await
    }

    /// Language breakdown behind a repository's `languages_url`.
    pub async fn languages(&self, languages_url: &str) -> FetchResult<LanguageMap> {
        let raw: serde_json::Map<String, Value> = self.rest_get(languages_url).await?;

        let mut map = LanguageMap::new();
        for (name, bytes) in raw {
            let bytes = bytes.as_u64().ok_or_else(|| {
                FetchError::payload(languages_url, format!("byte count for {name} is {bytes}"))
            })?;
            map.add(&name, bytes);
        }
        Ok(map)
    }

    /// One-year daily contribution calendar, flattened in chronological order.
    pub async fn contribution_calendar(&self, username: &str) -> FetchResult<Vec<ActivityDay>> {
        #[derive(Deserialize)]
        struct CalendarResponse {
            data: Option<CalendarData>,
        }
        #[derive(Deserialize)]
        struct CalendarData {
            user: Option<CalendarUser>,
        }
        #[derive(Deserialize)]
        struct CalendarUser {
            #[serde(rename = "contributionsCollection")]
            contributions_collection: ContributionsCollection,
        }
        #[derive(Deserialize)]
        struct ContributionsCollection {
            #[serde(rename = "contributionCalendar")]
            contribution_calendar: ContributionCalendar,
        }
        #[derive(Deserialize)]
        struct ContributionCalendar {
            weeks: Vec<Week>,
        }
        #[derive(Deserialize)]
        struct Week {
            #[serde(rename = "contributionDays")]
            contribution_days: Vec<Day>,
        }
        #[derive(Deserialize)]
        struct Day {
            date: chrono::NaiveDate,
            #[serde(rename = "contributionCount")]
            contribution_count: u32,
        }

        let json = self
            .graphql(CONTRIBUTIONS_QUERY, serde_json::json!({ "login": username }))
            .await?;
        let parsed: CalendarResponse = serde_json::from_value(json)
            .map_err(|e| FetchError::payload(&self.graphql_url, e))?;

        let user = parsed.data.and_then(|d| d.user).ok_or_else(|| {
            FetchError::payload(&self.graphql_url, format!("no user named {username}"))
        })?;

        Ok(user
            .contributions_collection
            .contribution_calendar
            .weeks
            .into_iter()
            .flat_map(|w| w.contribution_days)
            .map(|d| ActivityDay {
                date: d.date,
                contributions: d.contribution_count,
            })
            .collect())
    }
}
