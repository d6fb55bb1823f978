use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{ForgeError, ForgeResult};

/// One selectable option inside a trait.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub name: String,
    /// Percentage of the whole collection that should carry this variant.
    pub rarity: f64,
    /// Opaque handle handed to the renderer, never interpreted here.
    #[serde(default)]
    pub asset: String,
}

/// A visual layer. Order inside [`CollectionDefinition::traits`] is the
/// stacking order, bottom to top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trait {
    pub name: String,
    pub variants: Vec<Variant>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionMeta {
    pub name: String,
    pub size: usize,
    #[serde(default)]
    pub description_prefix: String,
    #[serde(default = "default_base_uri")]
    pub base_uri: String,
}

fn default_base_uri() -> String {
    "ipfs://placeholder/".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionDefinition {
    pub meta: CollectionMeta,
    pub traits: Vec<Trait>,
}

impl Variant {
    pub fn new(name: &str, rarity: f64) -> Self {
        Self {
            name: name.to_string(),
            rarity,
            asset: String::new(),
        }
    }
}

impl Trait {
    pub fn new(name: &str, variants: Vec<Variant>) -> Self {
        Self {
            name: name.to_string(),
            variants,
        }
    }

    /// Sum of the configured percentages.
    pub fn total_rarity(&self) -> f64 {
        self.variants.iter().map(|v| v.rarity).sum()
    }
}

impl CollectionDefinition {
    pub fn new(name: &str, size: usize, traits: Vec<Trait>) -> Self {
        Self {
            meta: CollectionMeta {
                name: name.to_string(),
                size,
                description_prefix: String::new(),
                base_uri: default_base_uri(),
            },
            traits,
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> ForgeResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ForgeError::Config(format!(
                "could not read collection '{}': {}",
                path.display(),
                e
            ))
        })?;

        let def: Self = serde_json::from_str(&content)?;
        def.validate()?;
        Ok(def)
    }

    /// Rejects values the pool builder cannot interpret and variant names that
    /// cannot be told apart or written to disk. Rarity sums are not checked
    /// here: over- and under-full tables are handled while building pools.
    pub fn validate(&self) -> ForgeResult<()> {
        for t in &self.traits {
            if t.name.trim().is_empty() {
                return Err(ForgeError::Config("trait with an empty name".into()));
            }
            let mut seen = HashSet::with_capacity(t.variants.len());
            for v in &t.variants {
                // names end up in identifiers, and identifiers end up in file names
                if v.name.is_empty() || v.name.contains(['/', '\\']) {
                    return Err(ForgeError::Config(format!(
                        "variant '{}' of trait '{}' is not usable in a file name",
                        v.name, t.name
                    )));
                }
                if !seen.insert(v.name.as_str()) {
                    return Err(ForgeError::Config(format!(
                        "trait '{}' lists variant '{}' more than once",
                        t.name, v.name
                    )));
                }
                if !v.rarity.is_finite() || !(0.0..=100.0).contains(&v.rarity) {
                    return Err(ForgeError::Config(format!(
                        "variant '{}' of trait '{}' has rarity {} outside [0, 100]",
                        v.name, t.name, v.rarity
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn trait_count(&self) -> usize {
        self.traits.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_definition() {
        let json = r#"{
            "meta": { "name": "Dan", "size": 10 },
            "traits": [
                { "name": "Background", "variants": [
                    { "name": "Blue", "rarity": 60, "asset": "bg/blue.png" },
                    { "name": "Red", "rarity": 40.5 }
                ]}
            ]
        }"#;
        let def: CollectionDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(def.meta.size, 10);
        assert_eq!(def.meta.base_uri, "ipfs://placeholder/");
        assert_eq!(def.traits[0].variants[1].asset, "");
        assert!((def.traits[0].total_rarity() - 100.5).abs() < 1e-9);
        assert!(def.validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_rarity() {
        let def = CollectionDefinition::new(
            "x",
            4,
            vec![Trait::new("Hat", vec![Variant::new("Cap", 120.0)])],
        );
        assert!(matches!(def.validate(), Err(ForgeError::Config(_))));

        let def = CollectionDefinition::new(
            "x",
            4,
            vec![Trait::new("Hat", vec![Variant::new("Cap", f64::NAN)])],
        );
        assert!(def.validate().is_err());
    }

    #[test]
    fn rejects_path_separators_in_variant_names() {
        for name in ["hats/cap", "hats\\cap", ""] {
            let def = CollectionDefinition::new(
                "x",
                4,
                vec![Trait::new("Hat", vec![Variant::new(name, 100.0)])],
            );
            assert!(
                matches!(def.validate(), Err(ForgeError::Config(_))),
                "accepted {:?}",
                name
            );
        }
    }

    #[test]
    fn rejects_repeated_variant_names_within_a_trait() {
        let def = CollectionDefinition::new(
            "x",
            4,
            vec![Trait::new(
                "Hat",
                vec![Variant::new("Cap", 50.0), Variant::new("Cap", 50.0)],
            )],
        );
        assert!(matches!(def.validate(), Err(ForgeError::Config(_))));

        let def = CollectionDefinition::new(
            "x",
            4,
            vec![
                Trait::new("Hat", vec![Variant::new("Blue", 100.0)]),
                Trait::new("Shirt", vec![Variant::new("Blue", 100.0)]),
            ],
        );
        assert!(def.validate().is_ok());
    }
}
