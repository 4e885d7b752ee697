//! Plant record type and embedding-text synthesis.

use serde::{Deserialize, Serialize};

/// One plant/crop entry of the knowledge catalogue.
///
/// The sequence fields are optional in the source JSON and default to empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlantRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub how_to_plant: Vec<String>,
    #[serde(default)]
    pub common_diseases: Vec<String>,
    #[serde(default)]
    pub causes: Vec<String>,
    #[serde(default)]
    pub treatments: Vec<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
}

impl PlantRecord {
    /// Synthesizes the text this record is embedded under.
    ///
    /// Fixed order: name, description, then only the sections that are
    /// present. Disease names read naturally comma-joined; the instruction
    /// sections are sentence fragments joined by spaces.
    pub fn embedding_text(&self) -> String {
        let mut text_parts = vec![
            format!("Plant: {}", self.name),
            format!("Description: {}", self.description),
        ];

        if !self.how_to_plant.is_empty() {
            text_parts.push(format!(
                "Planting instructions: {}",
                self.how_to_plant.join(" ")
            ));
        }

        if !self.common_diseases.is_empty() {
            text_parts.push(format!(
                "Common diseases: {}",
                self.common_diseases.join(", ")
            ));
        }

        if !self.causes.is_empty() {
            text_parts.push(format!("Causes: {}", self.causes.join(" ")));
        }

        if !self.treatments.is_empty() {
            text_parts.push(format!("Treatments: {}", self.treatments.join(" ")));
        }

        if !self.benefits.is_empty() {
            text_parts.push(format!("Benefits: {}", self.benefits.join(" ")));
        }

        text_parts.join(" ")
    }
}
