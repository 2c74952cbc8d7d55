//! Message rendering
//!
//! Turns raw message text into markup that is safe to inject into the page.
//! The order is fixed: strip templating delimiters, escape, then add the
//! small amount of markup we generate ourselves (`<br>`, `<strong>`).

use regex::Regex;
use std::sync::OnceLock;

use super::message::{ChatMessage, SentimentStyle};

/// Delimiter tokens of the server-side template language
const TEMPLATE_TOKENS: [&str; 6] = ["{{", "}}", "{%", "%}", "{#", "#}"];

fn template_span() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)\{\{.*?\}\}|\{%.*?%\}|\{#.*?#\}").expect("template span pattern")
    })
}

fn bold_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*\*(.+?)\*\*").expect("bold marker pattern"))
}

/// Remove placeholder-shaped substrings until none are left.
///
/// Whole spans (`{{ x }}`) go first, then stray tokens. Removal can splice
/// new tokens together, so this repeats until the text stops changing.
pub fn strip_template_delimiters(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let mut next = template_span().replace_all(&current, "").into_owned();
        for token in TEMPLATE_TOKENS {
            next = next.replace(token, "");
        }
        if next == current {
            return next;
        }
        current = next;
    }
}

/// Escape every character with special meaning in HTML
pub fn escape_html(text: &str) -> String {
    html_escape::encode_safe(text).into_owned()
}

/// Turn author line breaks into `<br>`
pub fn line_breaks(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\n', "<br>")
}

/// Render chat text for display
pub fn format_message(text: &str) -> String {
    line_breaks(&escape_html(&strip_template_delimiters(text)))
}

/// Render a coping strategy; `**text**` becomes bold
pub fn format_strategy(text: &str) -> String {
    let escaped = escape_html(&strip_template_delimiters(text));
    let bolded = bold_marker().replace_all(&escaped, "<strong>$1</strong>");
    line_breaks(&bolded)
}

/// Plain-text rendering for terminals: delimiters stripped, no markup
pub fn format_plain(text: &str) -> String {
    strip_template_delimiters(text)
}

/// View model for one transcript entry
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedMessage {
    pub body_html: String,
    /// Escaped timestamp
    pub timestamp: String,
    pub is_user: bool,
    /// Flex alignment of the row
    pub align_class: &'static str,
    pub bubble_class: &'static str,
    pub avatar_icon: &'static str,
    pub avatar_class: &'static str,
    pub timestamp_class: &'static str,
    /// Only AI messages carry a badge
    pub badge: Option<SentimentStyle>,
}

pub fn render_message(message: &ChatMessage) -> RenderedMessage {
    let is_user = message.is_user();
    let badge = if is_user {
        None
    } else {
        message.sentiment.map(|s| s.style())
    };

    RenderedMessage {
        body_html: format_message(&message.text),
        timestamp: escape_html(&strip_template_delimiters(&message.timestamp)),
        is_user,
        align_class: if is_user { "justify-content-end" } else { "" },
        bubble_class: if is_user {
            "bg-primary text-white"
        } else {
            "bg-light"
        },
        avatar_icon: if is_user { "bi-person" } else { "bi-robot" },
        avatar_class: if is_user { "bg-secondary" } else { "bg-success" },
        timestamp_class: if is_user { "opacity-75" } else { "text-muted" },
        badge,
    }
}
