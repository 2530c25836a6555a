//! Credential file parsing
//!
//! Turns the text of a credential file into records. Malformed lines are
//! dropped so that a file caught mid-edit still yields its valid entries.

pub mod file;
pub mod line;
pub mod results;

pub use file::read_credential_file;
pub use line::{parse_credentials, parse_line};
pub use results::ParsedRecord;
