//! Parser result types

use crate::credential::Credential;

/// One accepted line of a credential file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRecord {
    pub owner: String,
    /// `None` when the line had no `.tag` part. An explicit empty tag (`owner.=...`)
    /// is `Some("")`.
    pub tag: Option<String>,
    pub credential: Credential,
}

impl ParsedRecord {
    /// Tag component of the lookup key. Untagged records use the empty string.
    pub fn key_tag(&self) -> &str {
        self.tag.as_deref().unwrap_or("")
    }
}
