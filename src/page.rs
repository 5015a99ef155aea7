use crate::content::{self, CatalogSkill, ContactLink, Intro, Project, Testimonial};
use crate::fetcher::ProfileState;
use crate::models::{LanguageTotals, Profile, Repository};
use crate::stats::Aggregate;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// What the fetcher exposes to the rest of the page.
#[derive(Debug, Serialize)]
pub struct GithubSection<'a> {
    pub profile: Option<&'a Profile>,
    pub repositories: &'a [Repository],
    pub language_totals: &'a LanguageTotals,
    pub language_failures: &'a [String],
    pub loading: bool,
    pub error: Option<String>,
}

impl<'a> GithubSection<'a> {
    pub fn from_state(state: &'a ProfileState) -> Self {
        Self {
            profile: state.profile.as_ref(),
            repositories: &state.repositories,
            language_totals: &state.language_totals,
            language_failures: &state.language_failures,
            loading: state.loading,
            error: state.error.as_ref().map(|e| e.user_message()),
        }
    }
}

/// One filter button with the catalog entries it selects.
#[derive(Debug, Serialize)]
pub struct SkillGroup {
    pub label: &'static str,
    pub skills: Vec<CatalogSkill>,
}

/// Serializable data for every section of the page.
#[derive(Debug, Serialize)]
pub struct PageSnapshot<'a> {
    pub generated_at: DateTime<Utc>,
    pub username: &'a str,
    pub intro: Intro,
    pub about: &'static str,
    pub skill_groups: Vec<SkillGroup>,
    pub projects: &'static [Project],
    pub testimonials: &'static [Testimonial],
    pub contact: &'static [ContactLink],
    pub github: GithubSection<'a>,
    pub stats: &'a Aggregate,
}

impl<'a> PageSnapshot<'a> {
    pub fn assemble(
        username: &'a str,
        state: &'a ProfileState,
        aggregate: &'a Aggregate,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            generated_at,
            username,
            intro: content::INTRO,
            about: content::ABOUT,
            skill_groups: content::categories()
                .into_iter()
                .map(|filter| SkillGroup {
                    label: filter.label(),
                    skills: content::filter_skills(filter),
                })
                .collect(),
            projects: content::PROJECTS,
            testimonials: content::TESTIMONIALS,
            contact: content::CONTACT_LINKS,
            github: GithubSection::from_state(state),
            stats: aggregate,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
