//! Drug reference catalog.
//!
//! The indications list (`used_for`) is the tag surface for matching,
//! although the default drug-panel configuration matches on name only.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::record::{RecordId, Searchable};

/// A drug catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Drug {
    pub id: RecordId,
    pub name: String,
    pub description: String,
    pub category: String,
    pub used_for: Vec<String>,
    pub side_effects: Vec<String>,
    pub dosage: String,
    pub warnings: Vec<String>,
}

impl Searchable for Drug {
    fn id(&self) -> RecordId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn tags(&self) -> &[String] {
        &self.used_for
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

static DRUGS: Lazy<Vec<Drug>> = Lazy::new(|| {
    vec![
        Drug {
            id: 1,
            name: "Aspirin".into(),
            description: "Pain reliever and fever reducer".into(),
            category: "NSAID".into(),
            used_for: strings(&["Pain relief", "Fever reduction", "Anti-inflammatory"]),
            side_effects: strings(&["Stomach upset", "Heartburn", "Nausea"]),
            dosage: "325-650mg every 4-6 hours".into(),
            warnings: strings(&[
                "Avoid if allergic to NSAIDs",
                "Consult doctor if pregnant",
            ]),
        },
        Drug {
            id: 2,
            name: "Ibuprofen".into(),
            description: "Anti-inflammatory medication".into(),
            category: "NSAID".into(),
            used_for: strings(&["Pain relief", "Inflammation", "Fever reduction"]),
            side_effects: strings(&["Stomach pain", "Headache", "Dizziness"]),
            dosage: "200-400mg every 4-6 hours".into(),
            warnings: strings(&["Do not exceed 1200mg per day", "Take with food"]),
        },
    ]
});

/// Returns the compiled-in drug catalog in declaration order.
pub fn drug_catalog() -> &'static [Drug] {
    &DRUGS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_declaration_ordered() {
        let ids: Vec<RecordId> = drug_catalog().iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_tags_are_indications() {
        let aspirin = &drug_catalog()[0];
        assert_eq!(aspirin.name, "Aspirin");
        assert!(aspirin.tags().iter().any(|s| s == "Fever reduction"));
    }

    #[test]
    fn test_drug_serializes() {
        let json = serde_json::to_string(&drug_catalog()[1]).unwrap();
        assert!(json.contains("Ibuprofen"));
        assert!(json.contains("Take with food"));
    }
}
