use crate::fetcher::ProfileState;
use crate::stats::{Aggregate, round_one_decimal};

const START_Y: i32 = 30;
const LINE_HEIGHT: i32 = 20;
const LEFT_PADDING: f32 = 15.0;
const RIGHT_PADDING: f32 = 30.0;
const CHAR_WIDTH: f32 = 9.6;
const MIN_COL_CHARS: usize = 40;
const BAR_HEIGHT: f32 = 10.0;

/// Slice colors for the distribution bar, in rank order.
const SLICE_COLORS: [&str; 6] = [
    "#3572a5", "#f1e05a", "#dea584", "#00add8", "#e34c26", "#563d7c",
];

#[derive(Clone, Copy)]
pub enum Theme {
    Dark,
    Light,
}

pub struct ThemeColors {
    pub bg: &'static str,
    pub text: &'static str,
    pub key: &'static str,
    pub value: &'static str,
    pub cc: &'static str,
}

impl Theme {
    pub fn colors(self) -> ThemeColors {
        match self {
            Theme::Dark => ThemeColors {
                bg: "#161b22",
                text: "#c9d1d9",
                key: "#ffa657",
                value: "#a5d6ff",
                cc: "#616e7f",
            },
            Theme::Light => ThemeColors {
                bg: "#ffffff",
                text: "#24292f",
                key: "#d73a49",
                value: "#0366d6",
                cc: "#6a737d",
            },
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Theme::Dark => "dark_mode.svg",
            Theme::Light => "light_mode.svg",
        }
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Key, dotted leader and value, padded so values line up at `align_width`.
pub fn build_stat_row(key: &str, value: &str, align_width: usize) -> (String, String, String) {
    let key_part = format!("{key}: ");
    let base_len = key_part.chars().count() + value.chars().count();
    let available = align_width.saturating_sub(base_len);

    let dots = match available {
        0 => "".to_string(),
        1 => " ".to_string(),
        2 => ". ".to_string(),
        n => ".".repeat(n),
    };

    (key_part, dots, value.to_string())
}

fn build_header_line(label: &str, align_width: usize) -> String {
    let base = format!("{label} ");
    let dash_count = align_width.saturating_sub(base.chars().count()) + 2;
    format!("{base}{}", "-".repeat(dash_count))
}

enum Line {
    Header(String),
    Blank,
    Stat(String, String),
}

fn card_lines(state: &ProfileState, aggregate: &Aggregate, username: &str) -> Vec<Line> {
    let mut lines = Vec::new();

    let title = match &state.profile {
        Some(p) => format!("{}@github", p.login),
        None => format!("{username}@github"),
    };
    lines.push(Line::Header(title));

    // The calendar is fetched independently, so its counters survive a failed profile fetch.
    if let Some(err) = &state.error {
        lines.push(Line::Stat("Status".into(), err.user_message()));
    } else if let Some(profile) = &state.profile {
        lines.push(Line::Stat("Name".into(), profile.display_name().to_string()));
        lines.push(Line::Stat("Repos".into(), profile.public_repos.to_string()));
        lines.push(Line::Stat("Followers".into(), profile.followers.to_string()));
    }
    lines.push(Line::Stat(
        "Contributions".into(),
        aggregate.total_contributions.to_string(),
    ));
    lines.push(Line::Stat(
        "Active days".into(),
        aggregate.active_days.to_string(),
    ));

    if state.error.is_some() {
        return lines;
    }

    lines.push(Line::Blank);
    lines.push(Line::Header("- Languages".into()));
    if aggregate.skills.is_empty() {
        lines.push(Line::Stat("Languages".into(), "none".into()));
    }
    for skill in &aggregate.skills {
        lines.push(Line::Stat(
            skill.name.clone(),
            format!("{:.1}%", round_one_decimal(skill.level)),
        ));
    }

    lines
}

/// Proportional bar of the distribution slices; empty when there is nothing to show.
fn build_distribution_bar(aggregate: &Aggregate, x: f32, y: f32, width: f32) -> String {
    let total: u64 = aggregate.distribution.iter().map(|s| s.value).sum();
    if total == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut offset = x;
    for (slice, color) in aggregate.distribution.iter().zip(SLICE_COLORS.iter()) {
        let w = width * slice.value as f32 / total as f32;
        out.push_str(&format!(
            "<rect x=\"{offset:.1}\" y=\"{y}\" width=\"{w:.1}\" height=\"{BAR_HEIGHT}\" fill=\"{color}\"><title>{}</title></rect>\n",
            escape_xml(&slice.name)
        ));
        offset += w;
    }
    out
}

/// Main SVG generation function
pub fn generate_svg(
    state: &ProfileState,
    aggregate: &Aggregate,
    username: &str,
    theme: Theme,
) -> String {
    let colors = theme.colors();
    let lines = card_lines(state, aggregate, username);

    let align_width = lines
        .iter()
        .map(|l| match l {
            Line::Stat(k, v) => k.chars().count() + 2 + v.chars().count(),
            _ => 0,
        })
        .max()
        .unwrap_or(0)
        .max(MIN_COL_CHARS);

    let mut tspans = String::new();
    for (i, line) in lines.iter().enumerate() {
        let y = START_Y + (i as i32) * LINE_HEIGHT;
        match line {
            Line::Blank => {}
            Line::Header(text) => {
                tspans.push_str(&format!(
                    r#"<tspan x="{LEFT_PADDING}" y="{y}">{}</tspan>
"#,
                    escape_xml(&build_header_line(text, align_width))
                ));
            }
            Line::Stat(key, value) => {
                let (k, d, v) = build_stat_row(key, value, align_width);
                tspans.push_str(&format!(
                    r#"<tspan x="{LEFT_PADDING}" y="{y}" class="cc">. </tspan>
<tspan class="key">{}</tspan><tspan class="cc">{}</tspan><tspan class="value">{}</tspan>
"#,
                    escape_xml(&k),
                    escape_xml(&d),
                    escape_xml(&v)
                ));
            }
        }
    }

    let text_width = (align_width as f32 + 4.0) * CHAR_WIDTH;
    let bar_y = START_Y as f32 + lines.len() as f32 * LINE_HEIGHT as f32;
    let bar = build_distribution_bar(aggregate, LEFT_PADDING, bar_y, text_width);
    let w = LEFT_PADDING + text_width + RIGHT_PADDING;
    let h = bar_y + if bar.is_empty() { 0.0 } else { BAR_HEIGHT } + 20.0;

    format!(
        r#"<?xml version='1.0' encoding='UTF-8'?>
<svg xmlns="http://www.w3.org/2000/svg"
     width="{w}px" height="{h}px"
     font-family="ConsolasFallback,Consolas,monospace"
     font-size="16px">

<style>
.key      {{ fill: {key}; }}
.value    {{ fill: {value}; }}
.cc       {{ fill: {cc}; }}
</style>

<rect width="{w}px" height="{h}px" fill="{bg}" rx="15"/>

<text fill="{text}" xml:space="preserve">
{tspans}
</text>

{bar}
</svg>
"#,
        bg = colors.bg,
        text = colors.text,
        key = colors.key,
        value = colors.value,
        cc = colors.cc,
    )
}
