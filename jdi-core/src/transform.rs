//! The per-line state machine and the one-shot finalizer.
//!
//! State is an explicit [`ClassifierState`] value: callers thread it from one
//! [`classify`] call to the next and hand the last one to [`finalize`]. Neither
//! function touches I/O and neither can fail; every line maps to some output.
//!
//! Output lines carry no terminator. Whoever writes them appends one per line.

use chrono::{DateTime, Local, TimeZone};
use std::fmt::Display;
use tracing::debug;

use crate::classify::{fence_close, fence_open, line_kind, LineKind};
use crate::config::TransformConfig;

/// Horizontal rule opening the footer.
pub const FOOTER_RULE: &str = "------------------------";

/// Rendering of the footer timestamp, e.g. `Fri Oct 16 2026 09:30:00 GMT+0200`.
pub const TIMESTAMP_FORMAT: &str = "%a %b %d %Y %H:%M:%S GMT%z";

/// Mode of one file's transform. Starts empty and is dropped after finalize.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassifierState {
    /// Set once the first line has been seen; only used for shebangs.
    pub seen_first_line: bool,
    /// True while the most recently classified line was code.
    pub in_code_block: bool,
}

/// Transforms one input line. Returns the lines to emit, in order, and the
/// state to pass along with the next line.
pub fn classify(
    line: &str,
    state: ClassifierState,
    config: &TransformConfig,
) -> (Vec<String>, ClassifierState) {
    let kind = line_kind(line, !state.seen_first_line);
    let mut next = ClassifierState {
        seen_first_line: true,
        ..state
    };

    let text = match kind {
        LineKind::Shebang | LineKind::Ignored => return (Vec::new(), next),
        LineKind::Blank => return (vec![line.to_string()], next),
        LineKind::Doc(text) => text,
        LineKind::Code => line,
    };

    next.in_code_block = kind == LineKind::Code;
    let mut out = Vec::with_capacity(2);
    match (state.in_code_block, next.in_code_block) {
        (false, true) => {
            debug!(language_tag = %config.language_tag, "Opening code block");
            out.push(fence_open(&config.language_tag));
        }
        (true, false) => {
            debug!("Closing code block");
            out.push(fence_close());
        }
        _ => {}
    }
    out.push(text.to_string());
    (out, next)
}

/// Ends a document: closes a dangling code block and appends the footer,
/// stamped with the current local time.
pub fn finalize(state: ClassifierState, config: &TransformConfig) -> Vec<String> {
    finalize_at(state, config, Local::now())
}

/// Like [`finalize`] with an explicit instant for the footer.
pub fn finalize_at<Tz>(
    state: ClassifierState,
    config: &TransformConfig,
    at: DateTime<Tz>,
) -> Vec<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut out = Vec::with_capacity(4);
    if state.in_code_block {
        debug!("Closing trailing code block");
        out.push(fence_close());
    }
    out.push(FOOTER_RULE.to_string());
    out.push(footer_line(&at.format(TIMESTAMP_FORMAT).to_string(), &config.display_name));
    out.push(String::new());
    out
}

fn footer_line(timestamp: &str, display_name: &str) -> String {
    format!(
        "Generated _{timestamp}_ from [&#x24C8; {display_name}]({display_name} \"View in source\")"
    )
}
