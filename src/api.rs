use crate::collection::CollectionDefinition;
use crate::config::Config;
use crate::error::{ForgeError, ForgeResult};
use crate::generator::{Generator, ProgressCallback};
use crate::metadata::JsonMetadataWriter;
use crate::record::{GenerationRecord, RecordStore};
use crate::render::{self, LayerRenderer, ManifestRenderer, NullRenderer, RenderSummary};
use tracing::info;

/// What a phase-deciding run ended up doing.
#[derive(Debug, Clone, PartialEq)]
pub enum PhaseOutcome {
    Allocated(GenerationRecord),
    Rendered(RenderSummary),
}

/// Service: allocation phase. The record is saved only once every item exists.
pub fn run_allocation<CB: ProgressCallback>(
    def: &CollectionDefinition,
    config: &Config,
    callback: &CB,
) -> ForgeResult<GenerationRecord> {
    let record = Generator::new(def, config.generation.clone()).run(callback)?;
    RecordStore::new(&config.paths.record).save(&record)?;
    Ok(record)
}

/// Service: rendering/metadata phase from a saved record.
pub fn run_render<CB: ProgressCallback>(
    def: &CollectionDefinition,
    config: &Config,
    metadata_only: bool,
    callback: &CB,
) -> ForgeResult<RenderSummary> {
    let store = RecordStore::new(&config.paths.record);
    let mut record = store.load()?.ok_or_else(|| {
        ForgeError::Record(format!(
            "no record at {}; run the allocation phase first",
            store.path().display()
        ))
    })?;

    render_loaded(def, config, &mut record, metadata_only, callback)
}

fn render_loaded<CB: ProgressCallback>(
    def: &CollectionDefinition,
    config: &Config,
    record: &mut GenerationRecord,
    metadata_only: bool,
    callback: &CB,
) -> ForgeResult<RenderSummary> {
    let mut sink = JsonMetadataWriter::new(&config.paths.metadata_dir)?;
    let mut renderer: Box<dyn LayerRenderer> = if metadata_only {
        Box::new(NullRenderer)
    } else {
        Box::new(ManifestRenderer::new(&config.paths.render_dir)?)
    };

    let summary = render::render_record(def, record, &mut renderer, &mut sink, callback)?;
    info!(
        "✅ Rendered {} items ({} layers)",
        summary.items, summary.layers
    );
    Ok(summary)
}

/// Service: allocate when no record exists yet, otherwise render from it.
pub fn run_auto<CB: ProgressCallback>(
    def: &CollectionDefinition,
    config: &Config,
    metadata_only: bool,
    callback: &CB,
) -> ForgeResult<PhaseOutcome> {
    let store = RecordStore::new(&config.paths.record);
    match store.load()? {
        None => {
            info!("No record found, starting allocation");
            run_allocation(def, config, callback).map(PhaseOutcome::Allocated)
        }
        Some(mut record) => {
            info!("Record found, starting render");
            render_loaded(def, config, &mut record, metadata_only, callback)
                .map(PhaseOutcome::Rendered)
        }
    }
}
