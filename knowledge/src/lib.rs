//! # Knowledge
//!
//! Read-only plant-care catalogue backing the retrieval pipeline.
//!
//! [`KnowledgeStore`] loads [`PlantRecord`]s from a JSON file once per call;
//! records are immutable for the process lifetime. The store also synthesizes
//! the text each record is embedded under and the truncated description kept
//! as index metadata.

mod record;
mod store;

pub use record::PlantRecord;
pub use store::{KnowledgeStore, DEFAULT_KNOWLEDGE_FILE};

/// Maximum length of the description kept in index metadata.
pub const METADATA_DESCRIPTION_LIMIT: usize = 200;

/// Truncates a description for index metadata: first 200 chars plus "..." when longer.
pub fn metadata_description(description: &str) -> String {
    if description.chars().count() <= METADATA_DESCRIPTION_LIMIT {
        description.to_string()
    } else {
        let truncated: String = description.chars().take(METADATA_DESCRIPTION_LIMIT).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_description_unchanged() {
        assert_eq!(metadata_description("short"), "short");
    }

    #[test]
    fn long_description_truncated_with_ellipsis() {
        let long = "x".repeat(250);
        let out = metadata_description(&long);
        assert_eq!(out.chars().count(), METADATA_DESCRIPTION_LIMIT + 3);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn exactly_at_limit_unchanged() {
        let exact = "y".repeat(METADATA_DESCRIPTION_LIMIT);
        assert_eq!(metadata_description(&exact), exact);
    }
}
