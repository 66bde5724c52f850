//! Line-level rewrite of a header's include guard
//!
//! The rewrite works on a header's lines and never touches the filesystem:
//!
//! ```text
//! ┌──────────────────────┐
//! │ leading comments     │  kept verbatim, stays first
//! ├──────────────────────┤
//! │ #ifndef OLD          │  ┐
//! │ #define OLD          │  │ recognized guard, dropped
//! │                      │  ┘
//! │ body ...             │  kept
//! │                      │  ┐ dropped with the guard
//! │ #endif               │  ┘
//! └──────────────────────┘
//! ```
//!
//! A guard is only recognized when it matches this exact shape. Anything else
//! starting with `#ifndef` is kept as body and wrapped again, which is reported
//! as [`GuardOutcome::Nested`].

use serde::Serialize;

const IFNDEF: &str = "#ifndef ";
const DEFINE: &str = "#define ";
const ENDIF: &str = "#endif";

/// Prefixes marking a line as part of the leading comment block
const COMMENT_PREFIXES: [&str; 3] = ["/*", "*", "//"];

/// What happened to the guard that was already in the header
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GuardOutcome {
    /// No guard-like block was present; a new guard wraps the whole body
    Inserted,
    /// A recognized guard was stripped and replaced
    Replaced { previous: String },
    /// Content starts with `#ifndef` but not in the recognized shape; it was
    /// kept as body and wrapped by a second guard
    Nested { previous: String },
}

impl GuardOutcome {
    /// Short label for summaries and logs
    pub fn label(&self) -> &'static str {
        match self {
            GuardOutcome::Inserted => "inserted",
            GuardOutcome::Replaced { .. } => "replaced",
            GuardOutcome::Nested { .. } => "nested",
        }
    }
}

/// Result of rewriting one header's lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub lines: Vec<String>,
    pub outcome: GuardOutcome,
}

impl Rewrite {
    /// Rendered file content
    pub fn text(&self) -> String {
        render(self.lines.as_slice())
    }
}

/// Split file content into lines, dropping line terminators
///
/// `\n`, `\r\n` and a lone `\r` all end a line. A final terminator does not
/// produce an extra empty line, matching line-by-line reading of a text file.
pub fn split_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut rest = text;
    while let Some(end) = rest.find(['\r', '\n']) {
        lines.push(rest[..end].to_string());
        let skip = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[end + skip..];
    }
    if !rest.is_empty() {
        lines.push(rest.to_string());
    }
    lines
}

/// Join lines back into file content, each followed by a single `\n`
pub fn render<S: AsRef<str>>(lines: &[S]) -> String {
    let capacity = lines.iter().map(|line| line.as_ref().len() + 1).sum();
    let mut text = String::with_capacity(capacity);
    for line in lines {
        text.push_str(line.as_ref());
        text.push('\n');
    }
    text
}

/// Whether a line belongs to the leading comment block
///
/// Only spaces are skipped before matching; a tab-indented line is body.
pub fn is_leading_comment(line: &str) -> bool {
    let trimmed = line.trim_start_matches(' ');
    trimmed.is_empty() || COMMENT_PREFIXES.iter().any(|prefix| trimmed.starts_with(prefix))
}

/// Number of lines forming the leading comment block
pub fn leading_comment_len(lines: &[String]) -> usize {
    lines.iter().take_while(|line| is_leading_comment(line)).count()
}

/// Body lines inside a recognized guard block, if `lines` is one
pub fn strip_guard(lines: &[String]) -> Option<&[String]> {
    let n = lines.len();
    let recognized = n >= 4
        && lines[0].starts_with(IFNDEF)
        && lines[1].starts_with(DEFINE)
        && lines[2].is_empty()
        && lines[n - 2].is_empty()
        && lines[n - 1] == ENDIF;

    // With exactly four lines the leading blank and the trailing blank are the
    // same line, so there is no body left.
    recognized.then(move || if n >= 5 { &lines[3..n - 2] } else { &lines[n..] })
}

fn guard_name(line: &str) -> String {
    line.trim_start_matches("#ifndef").trim().to_string()
}

/// Rewrite a header's lines so they carry the guard `token`
pub fn rewrite_lines(mut lines: Vec<String>, token: &str) -> Rewrite {
    if lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }

    let comment_end = leading_comment_len(&lines);
    let (comments, rest) = lines.split_at(comment_end);

    let (body, outcome) = match strip_guard(rest) {
        Some(body) => (
            body,
            GuardOutcome::Replaced {
                previous: guard_name(&rest[0]),
            },
        ),
        None => {
            let outcome = match rest.first() {
                Some(first) if first.starts_with("#ifndef") => GuardOutcome::Nested {
                    previous: guard_name(first),
                },
                _ => GuardOutcome::Inserted,
            };
            (rest, outcome)
        }
    };

    let mut rewritten = Vec::with_capacity(comments.len() + body.len() + 5);
    rewritten.extend_from_slice(comments);
    rewritten.push(format!("{IFNDEF}{token}"));
    rewritten.push(format!("{DEFINE}{token}"));
    rewritten.push(String::new());
    rewritten.extend_from_slice(body);
    rewritten.push(String::new());
    rewritten.push(ENDIF.to_string());

    Rewrite {
        lines: rewritten,
        outcome,
    }
}

/// Rewrite raw file content so it carries the guard `token`
pub fn rewrite_text(text: &str, token: &str) -> Rewrite {
    rewrite_lines(split_lines(text), token)
}
