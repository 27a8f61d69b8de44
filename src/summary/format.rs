//! Heading normalization and final framing
//!
//! Model output marks sections in bold (`**Team**`, `**Team:**`, often as a
//! bullet). These are rewritten to `#### Team` headings. Every rule is a
//! `(pattern, heading)` pair generated from the section table, so adding a
//! section needs no change here. No rule matches its own output, which keeps
//! [`format_summary`] idempotent.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::llm::prompts::SECTIONS;

/// Markdown prefix of a canonical section heading.
pub const HEADING_PREFIX: &str = "#### ";

struct HeadingRule {
    bold: Regex,
    bullet: Regex,
    heading: String,
}

static RULES: Lazy<Vec<HeadingRule>> = Lazy::new(|| {
    SECTIONS
        .iter()
        .map(|section| {
            let name = regex::escape(section.name);
            let heading = format!("{}{}", HEADING_PREFIX, section.name);
            HeadingRule {
                bold: Regex::new(&format!(r"\*\*{name}(?::\*\*|\*\*:?)"))
                    .expect("valid bold rule"),
                bullet: Regex::new(&format!(r"(?m)^[ \t]*- ({})", regex::escape(&heading)))
                    .expect("valid bullet rule"),
                heading,
            }
        })
        .collect()
});

/// Rewrite bold section markers as canonical headings and drop the bullet
/// marker in front of them.
pub fn normalize_headings(text: &str) -> String {
    let mut out = text.to_string();

    for rule in RULES.iter() {
        out = rule
            .bold
            .replace_all(&out, rule.heading.as_str())
            .into_owned();
    }
    for rule in RULES.iter() {
        out = rule.bullet.replace_all(&out, "$1").into_owned();
    }

    out
}

/// The two framing lines placed above every summary.
pub fn title_block(title: &str, tag: &str) -> String {
    format!("## {} call summary\n{}\n", title, tag)
}

/// Normalize headings and frame the summary with its title and tag.
///
/// The title block is never run through the heading rules, so a title that
/// happens to contain a section marker survives a second pass unchanged.
pub fn format_summary(summary: &str, title: &str, tag: &str) -> String {
    let header = title_block(title, tag);
    let body = summary.strip_prefix(header.as_str()).unwrap_or(summary);

    header + &normalize_headings(body)
}
