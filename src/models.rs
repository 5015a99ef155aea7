use chrono::NaiveDate;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Represents a GitHub user profile from the `/users/{username}` API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profile {
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: String,
    pub html_url: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub public_repos: u32,
    #[serde(default)]
    pub followers: u32,
}

impl Profile {
    /// Display name, falling back to the login.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.login)
    }
}

/// Language name to byte count, in the order the languages were listed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageMap {
    entries: Vec<(String, u64)>,
}

impl LanguageMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `bytes` to `name`, inserting it at the end when unseen.
    pub fn add(&mut self, name: &str, bytes: u64) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, total)) => *total = total.saturating_add(bytes),
            None => self.entries.push((name.to_string(), bytes)),
        }
    }

    pub fn get(&self, name: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, b)| *b)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(n, b)| (n.as_str(), *b))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_bytes(&self) -> u64 {
        self.entries
            .iter()
            .fold(0u64, |acc, (_, b)| acc.saturating_add(*b))
    }

    pub(crate) fn retain(&mut self, f: impl FnMut(&(String, u64)) -> bool) {
        self.entries.retain(f);
    }
}

impl<S: AsRef<str>> FromIterator<(S, u64)> for LanguageMap {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (name, bytes) in iter {
            map.add(name.as_ref(), bytes);
        }
        map
    }
}

impl Serialize for LanguageMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, bytes) in &self.entries {
            map.serialize_entry(name, bytes)?;
        }
        map.end()
    }
}

/// Summed per-language byte counts across every repository.
pub type LanguageTotals = LanguageMap;

/// One repository from `/users/{username}/repos`, annotated with its languages.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub html_url: String,
    #[serde(skip_serializing)]
    pub languages_url: String,
    #[serde(skip_deserializing)]
    pub languages: LanguageMap,
}

/// One calendar day from the contribution calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActivityDay {
    pub date: NaiveDate,
    pub contributions: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Skill {
    pub name: String,
    /// Share of all bytes, in percent, unrounded.
    pub level: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistributionSlice {
    pub name: String,
    pub value: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ActivitySummary {
    pub total_contributions: u64,
    pub active_days: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_map_sums_and_keeps_first_seen_order() {
        let mut map = LanguageMap::new();
        map.add("Rust", 10);
        map.add("Go", 5);
        map.add("Rust", 7);
        let entries: Vec<_> = map.iter().collect();
        assert_eq!(entries, vec![("Rust", 17), ("Go", 5)]);
        assert_eq!(map.total_bytes(), 22);
        assert_eq!(map.get("Go"), Some(5));
        assert_eq!(map.get("C"), None);
    }

    #[test]
    fn language_map_serializes_as_ordered_object() {
        let map: LanguageMap = [("TypeScript", 3), ("CSS", 1)].into_iter().collect();
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"TypeScript":3,"CSS":1}"#);
    }

    #[test]
    fn display_name_falls_back_to_login() {
        let mut profile = Profile {
            login: "octocat".into(),
            name: None,
            avatar_url: String::new(),
            html_url: String::new(),
            bio: None,
            public_repos: 0,
            followers: 0,
        };
        assert_eq!(profile.display_name(), "octocat");
        profile.name = Some("The Octocat".into());
        assert_eq!(profile.display_name(), "The Octocat");
    }
}
