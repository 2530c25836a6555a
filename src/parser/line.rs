//! Line grammar
//!
//! ```text
//! # comment
//! owner.tag=username,password
//! owner=username,password
//! ```

use std::sync::LazyLock;

use regex::Regex;

use crate::credential::Credential;
use crate::parser::results::ParsedRecord;

/// `=` with optional ASCII whitespace on either side, split on the first match only.
static ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?-u:\s)*=(?-u:\s)*").expect("assignment pattern is valid")
});

/// Control characters and space; other Unicode whitespace is content.
fn is_trimmed(c: char) -> bool {
    c <= ' '
}

/// Parses a single line. Returns `None` for blank lines, comments and
/// lines missing either the `=` or the `,` separator.
pub fn parse_line(line: &str) -> Option<ParsedRecord> {
    let line = line.trim_matches(is_trimmed);
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let mut sides = ASSIGNMENT.splitn(line, 2);
    let lhs = sides.next()?;
    let rhs = sides.next()?;

    let (owner, tag) = match lhs.split_once('.') {
        Some((owner, tag)) => (owner, Some(tag.to_string())),
        None => (lhs, None),
    };

    // Only the first comma separates; the password keeps any others.
    let (username, password) = rhs.split_once(',')?;

    Some(ParsedRecord {
        owner: owner.to_string(),
        tag,
        credential: Credential::new(username, password),
    })
}

/// Parses the full text of a credential file, keeping file order.
pub fn parse_credentials(content: &str) -> Vec<ParsedRecord> {
    content.lines().filter_map(parse_line).collect()
}
