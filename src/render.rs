use crate::collection::CollectionDefinition;
use crate::error::{ForgeError, ForgeResult};
use crate::generator::rarity::RarityTracker;
use crate::generator::{ProgressCallback, Stage};
use crate::metadata::{Attribute, Metadata, MetadataSink};
use crate::record::{GenerationRecord, Pfp};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// One visible layer of an item, bottom to top.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedLayer {
    pub trait_name: String,
    pub variant_name: String,
    pub asset: String,
}

/// Compositing happens outside the engine; implementors get the resolved
/// stack for an item and export whatever they like under its identifier.
pub trait LayerRenderer {
    fn render(&mut self, identifier: &str, layers: &[ResolvedLayer]) -> ForgeResult<()>;
}

impl LayerRenderer for Box<dyn LayerRenderer> {
    fn render(&mut self, identifier: &str, layers: &[ResolvedLayer]) -> ForgeResult<()> {
        (**self).render(identifier, layers)
    }
}

/// Metadata-only runs.
pub struct NullRenderer;

impl LayerRenderer for NullRenderer {
    fn render(&mut self, _identifier: &str, _layers: &[ResolvedLayer]) -> ForgeResult<()> {
        Ok(())
    }
}

/// Writes `<dir>/<identifier>.layers.json` for an external compositor to pick up.
pub struct ManifestRenderer {
    dir: PathBuf,
}

impl ManifestRenderer {
    pub fn new<P: AsRef<Path>>(dir: P) -> ForgeResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }
}

impl LayerRenderer for ManifestRenderer {
    fn render(&mut self, identifier: &str, layers: &[ResolvedLayer]) -> ForgeResult<()> {
        let path = self.dir.join(format!("{}.layers.json", identifier));
        fs::write(path, serde_json::to_string_pretty(layers)?)?;
        Ok(())
    }
}

/// Used slots of `pfp`, in stacking order.
pub fn resolve_layers(def: &CollectionDefinition, pfp: &Pfp) -> Vec<ResolvedLayer> {
    pfp.used_slots()
        .map(|(t, v)| {
            let tr = &def.traits[t];
            let variant = &tr.variants[v];
            ResolvedLayer {
                trait_name: tr.name.clone(),
                variant_name: variant.name.clone(),
                asset: variant.asset.clone(),
            }
        })
        .collect()
}

pub fn attributes_for(layers: &[ResolvedLayer]) -> Vec<Attribute> {
    layers
        .iter()
        .map(|l| Attribute {
            trait_type: l.trait_name.clone(),
            value: l.variant_name.clone(),
        })
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderSummary {
    pub items: usize,
    pub layers: usize,
}

/// Rendering/metadata phase over a saved record.
///
/// Slot weights are recomputed from fresh counters in record order and added
/// to each stored score, so a score that went through allocation and one
/// render pass carries both contributions.
pub fn render_record<R, S, CB>(
    def: &CollectionDefinition,
    record: &mut GenerationRecord,
    renderer: &mut R,
    sink: &mut S,
    callback: &CB,
) -> ForgeResult<RenderSummary>
where
    R: LayerRenderer,
    S: MetadataSink,
    CB: ProgressCallback,
{
    record.validate_against(def)?;

    let total = record.pfps.len();
    let mut tracker = RarityTracker::for_traits(record.collection_size, &def.traits);
    let mut summary = RenderSummary::default();
    info!("🖼️  Rendering {} items", total);

    for (i, pfp) in record.pfps.iter_mut().enumerate() {
        let layers = resolve_layers(def, pfp);
        pfp.score += tracker.record(&pfp.selection);

        let metadata = Metadata::new(&def.meta, pfp, attributes_for(&layers));
        sink.publish(&metadata)?;
        renderer.render(&pfp.unique_id, &layers)?;

        summary.items += 1;
        summary.layers += layers.len();

        if !callback.on_progress(Stage::Rendering, i + 1, total) {
            return Err(ForgeError::Cancelled {
                produced: i + 1,
                target: total,
            });
        }
    }

    if !record.trait_usage.is_empty() && tracker.usage() != record.trait_usage.as_slice() {
        warn!("⚠️  Usage counters in the record do not match its items");
    }

    Ok(summary)
}
