//! Static sections of the portfolio page.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SkillCategory {
    Frontend,
    #[serde(rename = "AI")]
    Ai,
    General,
}

impl SkillCategory {
    pub fn label(self) -> &'static str {
        match self {
            Self::Frontend => "Frontend",
            Self::Ai => "AI",
            Self::General => "General",
        }
    }
}

/// Category filter shown above the skill catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Only(SkillCategory),
}

impl CategoryFilter {
    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Only(c) => c.label(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogSkill {
    pub name: &'static str,
    pub category: SkillCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Project {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub image: &'static str,
    pub github_url: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Testimonial {
    pub id: u32,
    pub name: &'static str,
    pub role: &'static str,
    pub comment: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContactLink {
    pub label: &'static str,
    pub url: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Intro {
    pub greeting: &'static str,
    pub name: &'static str,
    pub tagline: &'static str,
}

pub const INTRO: Intro = Intro {
    greeting: "Sup!",
    name: "Suraj Adhikari",
    tagline: "I am a developer",
};

pub const ABOUT: &str = "Developer working across web frontends, AI tooling and systems code.";

pub const SKILL_CATALOG: &[CatalogSkill] = &[
    CatalogSkill {
        name: "HTML",
        category: SkillCategory::Frontend,
    },
    CatalogSkill {
        name: "JavaScript",
        category: SkillCategory::Frontend,
    },
    CatalogSkill {
        name: "React",
        category: SkillCategory::Frontend,
    },
    CatalogSkill {
        name: "CSS",
        category: SkillCategory::Frontend,
    },
    CatalogSkill {
        name: "Python",
        category: SkillCategory::Ai,
    },
    CatalogSkill {
        name: "C",
        category: SkillCategory::General,
    },
    CatalogSkill {
        name: "C++",
        category: SkillCategory::General,
    },
    CatalogSkill {
        name: "Java",
        category: SkillCategory::General,
    },
];

pub const PROJECTS: &[Project] = &[
    Project {
        id: 1,
        title: "Project 1",
        description: "This is the description for Project 1.",
        image: "project1.jpg",
        github_url: "https://github.com/project1",
    },
    Project {
        id: 2,
        title: "Project 2",
        description: "This is the description for Project 2.",
        image: "project2.jpg",
        github_url: "https://github.com/project2",
    },
];

pub const TESTIMONIALS: &[Testimonial] = &[
    Testimonial {
        id: 1,
        name: "John Doe",
        role: "Developer",
        comment: "This is a testimonial from John Doe.",
    },
    Testimonial {
        id: 2,
        name: "Jane Smith",
        role: "Designer",
        comment: "This is a testimonial from Jane Smith.",
    },
];

pub const CONTACT_LINKS: &[ContactLink] = &[
    ContactLink {
        label: "Email",
        url: "mailto:surajadhikari@example.com",
    },
    ContactLink {
        label: "Phone",
        url: "tel:+977-9800000000",
    },
    ContactLink {
        label: "LinkedIn",
        url: "https://www.linkedin.com/in/surajadhikari",
    },
    ContactLink {
        label: "GitHub",
        url: "https://github.com/surajadhikari",
    },
    ContactLink {
        label: "Twitter",
        url: "https://twitter.com/",
    },
    ContactLink {
        label: "Instagram",
        url: "https://instagram.com/",
    },
];

/// Filter buttons, in display order.
pub fn categories() -> [CategoryFilter; 4] {
    [
        CategoryFilter::All,
        CategoryFilter::Only(SkillCategory::Frontend),
        CategoryFilter::Only(SkillCategory::Ai),
        CategoryFilter::Only(SkillCategory::General),
    ]
}

pub fn filter_skills(filter: CategoryFilter) -> Vec<CatalogSkill> {
    SKILL_CATALOG
        .iter()
        .filter(|s| match filter {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => s.category == c,
        })
        .copied()
        .collect()
}
