#![allow(dead_code)]

use pfpforge::collection::{CollectionDefinition, Trait, Variant};
use pfpforge::config::{CollisionPolicy, Config, GenerationParams, OutputPaths};
use std::path::Path;

/// Trait whose variants are named `<name>0`, `<name>1`, ...
pub fn trait_with(name: &str, rarities: &[f64]) -> Trait {
    let variants = rarities
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let mut v = Variant::new(&format!("{}{}", name, i), *r);
            v.asset = format!("layers/{}/{}.png", name, i);
            v
        })
        .collect();
    Trait::new(name, variants)
}

pub fn definition(size: usize, traits: Vec<Trait>) -> CollectionDefinition {
    let mut def = CollectionDefinition::new("Test", size, traits);
    def.meta.description_prefix = "Test_".to_string();
    def.meta.base_uri = "ipfs://test/".to_string();
    def
}

/// Four traits of five equally likely variants: 625 combinations.
pub fn roomy_definition(size: usize) -> CollectionDefinition {
    let even = [20.0; 5];
    definition(
        size,
        vec![
            trait_with("Bg", &even),
            trait_with("Body", &even),
            trait_with("Eyes", &even),
            trait_with("Hat", &even),
        ],
    )
}

pub fn params(seed: u64, policy: CollisionPolicy) -> GenerationParams {
    GenerationParams {
        seed: Some(seed),
        collision_policy: policy,
        ..Default::default()
    }
}

pub fn config_in(dir: &Path, generation: GenerationParams) -> Config {
    Config {
        generation,
        paths: OutputPaths {
            record: dir.join("PFP").join("pfp.json").to_string_lossy().to_string(),
            metadata_dir: dir.join("JSON").to_string_lossy().to_string(),
            render_dir: dir.join("NFT").to_string_lossy().to_string(),
        },
    }
}
