//! Immutable credential index
//!
//! One index is built per successful reload and never mutated afterwards.
//! Keys are structured: owner, then tag (or username for the reverse map).

use std::collections::HashMap;

use crate::credential::Credential;
use crate::parser::ParsedRecord;

/// Snapshot of every credential from one load of the file.
#[derive(Debug, Default)]
pub struct CredentialIndex {
    /// owner -> tag -> credentials in file order. Never holds an empty `Vec`.
    credentials: HashMap<String, HashMap<String, Vec<Credential>>>,
    /// owner -> username -> tag, for lines that carried an explicit tag.
    tags: HashMap<String, HashMap<String, String>>,
    records: usize,
    generation: u64,
}

impl CredentialIndex {
    /// Index with no credentials, installed when the file is absent.
    pub fn empty(generation: u64) -> Self {
        Self {
            generation,
            ..Self::default()
        }
    }

    pub fn from_records<I>(records: I, generation: u64) -> Self
    where
        I: IntoIterator<Item = ParsedRecord>,
    {
        let mut index = Self::empty(generation);

        for record in records {
            let ParsedRecord {
                owner,
                tag,
                credential,
            } = record;

            if let Some(tag) = &tag {
                // Later lines win for the reverse map.
                index
                    .tags
                    .entry(owner.clone())
                    .or_default()
                    .insert(credential.username.clone(), tag.clone());
            }

            index
                .credentials
                .entry(owner)
                .or_default()
                .entry(tag.unwrap_or_default())
                .or_default()
                .push(credential);
            index.records += 1;
        }

        index
    }

    fn entries(&self, owner: &str, tag: &str) -> Option<&[Credential]> {
        self.credentials
            .get(owner)
            .and_then(|tags| tags.get(tag))
            .map(Vec::as_slice)
    }

    /// Default (first in file order) credential of the untagged key.
    pub fn get_cred(&self, owner: &str) -> Option<&Credential> {
        self.get_tagged_cred(owner, "")
    }

    /// Default (first in file order) credential of `(owner, tag)`.
    pub fn get_tagged_cred(&self, owner: &str, tag: &str) -> Option<&Credential> {
        self.entries(owner, tag).and_then(<[Credential]>::first)
    }

    /// Tag recorded for `username` under `owner`, if its line carried one.
    pub fn get_tag(&self, owner: &str, username: &str) -> Option<&str> {
        self.tags
            .get(owner)
            .and_then(|users| users.get(username))
            .map(String::as_str)
    }

    pub fn verify(&self, owner: &str, user: &str, pwd: &str) -> bool {
        self.verify_tagged(owner, "", user, pwd)
    }

    /// Checks `pwd` against the first credential under `(owner, tag)` whose
    /// username is `user`. Later duplicates of that username are never consulted.
    pub fn verify_tagged(&self, owner: &str, tag: &str, user: &str, pwd: &str) -> bool {
        self.entries(owner, tag)
            .and_then(|creds| creds.iter().find(|c| c.username == user))
            .is_some_and(|c| c.password == pwd)
    }

    /// All credentials of `(owner, tag)` in file order.
    pub fn credentials(&self, owner: &str, tag: &str) -> &[Credential] {
        self.entries(owner, tag).unwrap_or(&[])
    }

    pub fn owners(&self) -> impl Iterator<Item = &str> {
        self.credentials.keys().map(String::as_str)
    }

    /// Number of records loaded, duplicates included.
    pub fn len(&self) -> usize {
        self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records == 0
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
