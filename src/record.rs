use crate::collection::CollectionDefinition;
use crate::error::{ForgeError, ForgeResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// One generated item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pfp {
    pub file_name: String,
    pub score: f64,
    /// One entry per trait; `None` marks a slot the item does not use.
    pub selection: Vec<Option<usize>>,
    pub unique_id: String,
}

impl Pfp {
    /// `sequence` starts at 1; `combination` is the `_Variant` suffix of the identifier.
    pub fn new(sequence: usize, combination: &str, selection: Vec<Option<usize>>, score: f64) -> Self {
        let file_name = format!("{:04}", sequence);
        Self {
            unique_id: format!("{}{}", file_name, combination),
            file_name,
            score,
            selection,
        }
    }

    pub fn used_slots(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.selection
            .iter()
            .enumerate()
            .filter_map(|(t, slot)| slot.map(|v| (t, v)))
    }
}

/// Snapshot of a finished allocation phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GenerationRecord {
    pub collection_size: usize,
    pub pfps: Vec<Pfp>,
    /// Uses of each variant, per trait, at the end of allocation.
    pub trait_usage: Vec<Vec<usize>>,
}

impl GenerationRecord {
    /// Checks that every item fits the collection's trait table.
    pub fn validate_against(&self, def: &CollectionDefinition) -> ForgeResult<()> {
        let trait_count = def.trait_count();
        for pfp in &self.pfps {
            if pfp.selection.len() != trait_count {
                return Err(ForgeError::Record(format!(
                    "item '{}' has {} slots but the collection defines {} traits",
                    pfp.unique_id,
                    pfp.selection.len(),
                    trait_count
                )));
            }
            for (t, v) in pfp.used_slots() {
                let variants = def.traits[t].variants.len();
                if v >= variants {
                    return Err(ForgeError::Record(format!(
                        "item '{}' selects variant {} of trait '{}', which has {}",
                        pfp.unique_id, v, def.traits[t].name, variants
                    )));
                }
            }
        }
        Ok(())
    }

    /// How often each variant of `trait_index` appears across all items.
    pub fn variant_counts(&self, trait_index: usize, variant_count: usize) -> Vec<usize> {
        let mut counts = vec![0; variant_count];
        for pfp in &self.pfps {
            if let Some(Some(v)) = pfp.selection.get(trait_index) {
                if *v < variant_count {
                    counts[*v] += 1;
                }
            }
        }
        counts
    }
}

/// Whole-file JSON persistence for a [`GenerationRecord`].
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Writes the full snapshot. The file is replaced in one rename, so a
    /// reader never sees a half-written record.
    pub fn save(&self, record: &GenerationRecord) -> ForgeResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(record)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;

        info!(
            "💾 Saved {} items to {}",
            record.pfps.len(),
            self.path.display()
        );
        Ok(())
    }

    /// `Ok(None)` when no record has been saved yet.
    pub fn load(&self) -> ForgeResult<Option<GenerationRecord>> {
        if !self.exists() {
            debug!("No record at {}", self.path.display());
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        let record: GenerationRecord = serde_json::from_str(&content).map_err(|e| {
            ForgeError::Record(format!("could not parse {}: {}", self.path.display(), e))
        })?;

        info!(
            "📂 Loaded {} items from {}",
            record.pfps.len(),
            self.path.display()
        );
        Ok(Some(record))
    }
}
