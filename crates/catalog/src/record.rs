//! The searchable-record capability shared by all catalogs.
//!
//! Each catalog entry exposes the same four match surfaces: a name, a free
//! text description, a category, and a list of tag-like strings (symptoms
//! for diseases, indications for drugs). Which of those surfaces actually
//! participate in matching is a per-catalog decision carried by
//! [`MatchFields`], not a universal rule.

use serde::{Deserialize, Serialize};

/// Identifier of a record within its catalog.
///
/// Ids are small integers assigned in catalog declaration order and are
/// only meaningful within a single catalog.
pub type RecordId = u32;

/// Capability exposed by every catalog record type.
///
/// The search service matches against these accessors only; record types
/// are free to carry additional presentation fields (dosage, prevention
/// steps, warnings) that never participate in matching.
pub trait Searchable {
    /// Record identifier within its catalog.
    fn id(&self) -> RecordId;

    /// Display name of the record.
    fn name(&self) -> &str;

    /// Free-text description.
    fn description(&self) -> &str;

    /// Category label (e.g. "Respiratory", "NSAID").
    fn category(&self) -> &str;

    /// Tag-like list field: symptoms for diseases, indications for drugs.
    fn tags(&self) -> &[String];
}

/// Which record fields participate in substring matching for a catalog.
///
/// The disease panel matches name, description, category and symptoms; the
/// drug panel matches name only. Both are defaults, not invariants, so the
/// breadth is configuration rather than code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchFields {
    pub name: bool,
    pub description: bool,
    pub category: bool,
    pub tags: bool,
}

impl MatchFields {
    /// Match against every surface: name, description, category and tags.
    pub const BROAD: Self = Self {
        name: true,
        description: true,
        category: true,
        tags: true,
    };

    /// Match against the record name only.
    pub const NAME_ONLY: Self = Self {
        name: true,
        description: false,
        category: false,
        tags: false,
    };

    /// Returns true if no field is enabled. A catalog configured this way
    /// can never produce matches, which is almost certainly a mistake.
    pub fn is_empty(&self) -> bool {
        !(self.name || self.description || self.category || self.tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broad_enables_everything() {
        let f = MatchFields::BROAD;
        assert!(f.name && f.description && f.category && f.tags);
        assert!(!f.is_empty());
    }

    #[test]
    fn test_name_only() {
        let f = MatchFields::NAME_ONLY;
        assert!(f.name);
        assert!(!f.description && !f.category && !f.tags);
    }

    #[test]
    fn test_is_empty() {
        let f = MatchFields {
            name: false,
            description: false,
            category: false,
            tags: false,
        };
        assert!(f.is_empty());
    }
}
