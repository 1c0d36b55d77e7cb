//! Site chrome and the static pages

use crate::model::SiteInfo;

use super::DisplayOptions;

pub const HOME_TITLE: &str = "Early Black Students at Yale";
pub const HOME_SUBTITLE: &str =
    "A project to identify and share research about early Black students at Yale, 1830 to 1940";

const NEWS_COUNT: usize = 6;

pub fn header(site: &SiteInfo, version: Option<&str>) -> String {
    let title = if site.title.is_empty() { "Exhibit" } else { &site.title };
    let mut out = format!("[{}](/) · [About](/about)\n", title);
    if let Some(version) = version {
        out.push_str(&format!("_{}_\n", version));
    }
    out
}

/// Copyright line plus the two display toggles with their browse commands
pub fn footer(copyright: &str, year: i32, options: DisplayOptions) -> String {
    let verb = |on: bool| if on { "Hide" } else { "Show" };
    format!(
        "\n---\n© {} {} • All Rights Reserved\n\n{} Property Info (`:props`) · {} Change Highlights (`:changes`)\n",
        year,
        copyright,
        verb(options.show_property_info),
        verb(options.show_changes)
    )
}

pub fn home() -> String {
    format!("# {}\n\n## {}\n\n[Search →](/search/)\n", HOME_TITLE, HOME_SUBTITLE)
}

pub fn about(site: &SiteInfo) -> String {
    let mut out = format!("# About\n\n{}\n", site.about);
    if !site.sparql.is_empty() {
        out.push_str(&format!("\n**SPARQL:**\n\n```sparql\n{}\n```\n", site.sparql.trim_end()));
    }
    out
}

pub fn news() -> String {
    let mut out = format!(
        "# Shining Light on Truth: {}\n\n## News about a project to identify and share research about early Black students at Yale, 1830 to 1940\n\n## News\n",
        HOME_TITLE
    );
    for n in 1..=NEWS_COUNT {
        let blurb = format!("{}.", HOME_SUBTITLE);
        out.push_str(&format!(
            "\n### News Item {n}\n\nNew Item {n} text. {blurb} {blurb} {blurb}\n"
        ));
    }
    out
}
