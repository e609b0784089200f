use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tags are color names (`[red]`), hex colors (`[#ff8000]`) or the pop tag
/// (`[]`). Anything else inside brackets is kept as literal text.
static TAG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new("^(#[0-9a-fA-F]{6}|#[0-9a-fA-F]{8}|[a-zA-Z][a-zA-Z-]*)?$").unwrap());

/// Who a message is rendered for. Clients understand markup tags, the server
/// console does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Audience {
    Client,
    Server,
}

/// Removes markup tags from `input`. `[[` escapes a literal opening bracket.
pub fn strip_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '[' {
            out.push(ch);
            continue;
        }

        if chars.peek() == Some(&'[') {
            chars.next();
            out.push('[');
            continue;
        }

        let mut tag = String::new();
        let mut closed = false;
        for c in chars.by_ref() {
            if c == ']' {
                closed = true;
                break;
            }
            tag.push(c);
        }

        if !closed {
            out.push('[');
            out.push_str(&tag);
        } else if !TAG_REGEX.is_match(&tag) {
            out.push('[');
            out.push_str(&tag);
            out.push(']');
        }
    }

    out
}

/// A user-facing message. Either a finished string or a template whose
/// arguments were captured early and whose rendering is deferred until the
/// audience is known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Message {
    Plain(String),
    Template { template: String, args: Vec<String> },
}

impl Message {
    pub fn plain(text: impl Into<String>) -> Message {
        Message::Plain(text.into())
    }

    pub fn template<I, S>(template: impl Into<String>, args: I) -> Message
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Message::Template {
            template: template.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn render(&self, audience: Audience) -> String {
        let filled = match self {
            Message::Plain(text) => text.clone(),
            Message::Template { template, args } => fill_template(template, args),
        };
        match audience {
            Audience::Client => filled,
            Audience::Server => strip_tags(&filled),
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(Audience::Client))
    }
}

impl From<String> for Message {
    fn from(text: String) -> Message {
        Message::Plain(text)
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Message {
        Message::Plain(text.to_string())
    }
}

fn fill_template(template: &str, args: &[String]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    let mut args = args.iter();

    while let Some(start) = rest.find("{}") {
        out.push_str(&rest[..start]);
        match args.next() {
            Some(arg) => out.push_str(arg),
            None => out.push_str("{}"),
        }
        rest = &rest[start + 2..];
    }
    out.push_str(rest);
    out
}

/// Formats a number with thousands separators, keeping up to two decimal
/// places when the value is not integral.
pub fn format_number(value: f64) -> String {
    let negative = value < 0.0;
    // Round to cents up front so a fraction close to 1 carries into the
    // integral part instead of printing as "1.00".
    let cents = (value.abs() * 100.0).round() as u64;
    let integral = cents / 100;
    let fraction = cents % 100;

    let digits = integral.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i != 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if fraction != 0 {
        out.push_str(&format!(".{:02}", fraction));
    }
    out
}

pub fn format_bool(value: bool) -> &'static str {
    if value { "enabled" } else { "disabled" }
}

/// Pretty-prints a millisecond duration, e.g. `1h 30m` or `45s`.
pub fn format_duration(millis: u64) -> String {
    let mut seconds = millis / 1000;
    if seconds == 0 {
        return "0s".to_string();
    }

    const UNITS: [(u64, &str); 4] = [(86400, "d"), (3600, "h"), (60, "m"), (1, "s")];

    let mut parts = Vec::new();
    for (size, suffix) in UNITS {
        if seconds >= size {
            parts.push(format!("{}{}", seconds / size, suffix));
            seconds %= size;
        }
    }
    parts.join(" ")
}
