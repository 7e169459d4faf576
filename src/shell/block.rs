use std::ops::Range;
use std::sync::LazyLock;

use chrono::{DateTime, TimeZone};
use regex::Regex;

use super::{EnvVars, ShellKind};

pub const START_MARKER: &str = "# ==== ccs start ====";
pub const END_MARKER: &str = "# ==== ccs end ====";
const HEADER_COMMENT: &str = "# AI 模型配置 - 由 ccs 命令自动生成";
const TIMESTAMP_PREFIX: &str = "# 配置时间: ";

static POSIX_ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^export\s+(\w+)\s*=\s*"(.*)"$"#).expect("static regex")
});
static FISH_ASSIGNMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^set\s+-gx\s+(\w+)\s+"(.*)"$"#).expect("static regex"));

/// Escape `"` and `$` so the value stays one literal double-quoted string.
pub fn escape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '"' | '$') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Inverse of [`escape_value`]: `\"` becomes `"`, `\$` becomes `$`.
pub fn unescape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(&next) = chars.peek() {
                if matches!(next, '"' | '$') {
                    out.push(next);
                    chars.next();
                    continue;
                }
            }
        }
        out.push(ch);
    }
    out
}

pub fn render_assignment(shell: ShellKind, key: &str, value: &str) -> String {
    let value = escape_value(value);
    match shell {
        ShellKind::Zsh | ShellKind::Bash => format!("export {key}=\"{value}\""),
        ShellKind::Fish => format!("set -gx {key} \"{value}\""),
    }
}

/// Render the full marker-delimited block, newline-terminated.
pub fn render_block(shell: ShellKind, vars: &EnvVars, timestamp: &str) -> String {
    let mut block = String::new();
    block.push_str(START_MARKER);
    block.push('\n');
    block.push_str(HEADER_COMMENT);
    block.push('\n');
    for (key, value) in vars {
        block.push_str(&render_assignment(shell, key, value));
        block.push('\n');
    }
    block.push_str(TIMESTAMP_PREFIX);
    block.push_str(timestamp);
    block.push('\n');
    block.push_str(END_MARKER);
    block.push('\n');
    block
}

/// Byte range of the first `start_marker` through the first `end_marker`
/// that follows it, end marker included.
pub fn locate_block(content: &str, start_marker: &str, end_marker: &str) -> Option<Range<usize>> {
    let start = content.find(start_marker)?;
    let after_start = start + start_marker.len();
    let end = after_start + content[after_start..].find(end_marker)?;
    Some(start..end + end_marker.len())
}

/// Replace the previous block in `existing` (if any) with `new_block`.
///
/// Everything outside the markers is kept; trailing whitespace of the
/// remaining text is normalized to one blank line before the new block.
pub fn splice_block(
    existing: &str,
    new_block: &str,
    start_marker: &str,
    end_marker: &str,
) -> String {
    let remaining = match locate_block(existing, start_marker, end_marker) {
        Some(span) => {
            let mut tail = span.end;
            if existing[tail..].starts_with("\r\n") {
                tail += 2;
            } else if existing[tail..].starts_with('\n') {
                tail += 1;
            }
            format!("{}{}", &existing[..span.start], &existing[tail..])
        }
        None => existing.to_string(),
    };

    let head = remaining.trim_end();
    if head.is_empty() {
        new_block.to_string()
    } else {
        format!("{head}\n\n{new_block}")
    }
}

/// Parse assignment lines of `section`; anything else is skipped.
pub fn parse_assignments(shell: ShellKind, section: &str) -> EnvVars {
    let pattern = match shell {
        ShellKind::Zsh | ShellKind::Bash => &*POSIX_ASSIGNMENT,
        ShellKind::Fish => &*FISH_ASSIGNMENT,
    };
    section
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter_map(|line| pattern.captures(line))
        .map(|caps| (caps[1].to_string(), unescape_value(&caps[2])))
        .collect()
}

/// Timestamp for the block's comment line, in the style of the UI locale.
pub fn format_timestamp<Tz>(now: &DateTime<Tz>, locale: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    if locale.starts_with("zh") {
        now.format("%Y/%-m/%-d %H:%M:%S").to_string()
    } else {
        now.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
    }
}
