pub mod allocator;
pub mod pool;
pub mod rarity;
pub mod shuffle;

use self::allocator::{strategy_for, Allocator, Step};
use self::pool::TraitPool;
use crate::collection::CollectionDefinition;
use crate::config::GenerationParams;
use crate::error::{ForgeError, ForgeResult};
use crate::record::GenerationRecord;
use std::time::Instant;
use strum_macros::Display;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Stage {
    BuildingPools,
    Shuffling,
    Allocating,
    Rendering,
}

/// Receives updates between units of work.
/// Boolean return value indicates if the run should continue (true) or abort (false).
pub trait ProgressCallback: Send + Sync {
    fn on_progress(&self, stage: Stage, done: usize, total: usize) -> bool;
}

pub struct NoProgress;

impl ProgressCallback for NoProgress {
    fn on_progress(&self, _stage: Stage, _done: usize, _total: usize) -> bool {
        true
    }
}

/// One allocation session over a collection definition.
pub struct Generator<'a> {
    definition: &'a CollectionDefinition,
    params: GenerationParams,
}

impl<'a> Generator<'a> {
    pub fn new(definition: &'a CollectionDefinition, params: GenerationParams) -> Self {
        Self { definition, params }
    }

    pub fn collection_size(&self) -> usize {
        self.params.size.unwrap_or(self.definition.meta.size)
    }

    fn rng(&self) -> fastrand::Rng {
        match self.params.seed {
            Some(s) => fastrand::Rng::with_seed(s),
            None => fastrand::Rng::new(),
        }
    }

    /// Builds and shuffles one pool per trait.
    pub fn prepare_pools<CB: ProgressCallback>(
        &self,
        rng: &mut fastrand::Rng,
        callback: &CB,
    ) -> ForgeResult<Vec<TraitPool>> {
        let size = self.collection_size();
        let traits = &self.definition.traits;
        let builds = pool::build_pools(traits, size, self.params.strict)?;

        let trait_count = traits.len();
        let cancelled = || ForgeError::Cancelled {
            produced: 0,
            target: size,
        };

        // pools are built in parallel, so there is one event for the whole batch
        if !callback.on_progress(Stage::BuildingPools, trait_count, trait_count) {
            return Err(cancelled());
        }

        let mut pools: Vec<TraitPool> = builds.into_iter().map(|b| b.pool).collect();
        for (i, p) in pools.iter_mut().enumerate() {
            shuffle::shuffle(rng, p.as_mut_slice());
            if !callback.on_progress(Stage::Shuffling, i + 1, trait_count) {
                return Err(cancelled());
            }
        }

        Ok(pools)
    }

    /// Runs the full allocation phase. Nothing is persisted here.
    pub fn run<CB: ProgressCallback>(&self, callback: &CB) -> ForgeResult<GenerationRecord> {
        let size = self.collection_size();
        let start = Instant::now();
        info!(
            "🎲 Allocating {} items across {} traits ({} policy)",
            size,
            self.definition.trait_count(),
            self.params.collision_policy
        );

        self.definition.validate()?;
        let mut rng = self.rng();
        let pools = self.prepare_pools(&mut rng, callback)?;

        let mut allocator = Allocator::new(
            &self.definition.traits,
            pools,
            rng,
            strategy_for(self.params.collision_policy),
            size,
            self.params.max_collision_retries,
        );

        let interval = self.params.progress_interval.max(1);
        loop {
            match allocator.step()? {
                Step::Complete => break,
                Step::Collided => {}
                Step::Accepted(n) => {
                    if (n % interval == 0 || n == size)
                        && !callback.on_progress(Stage::Allocating, n, size)
                    {
                        return Err(ForgeError::Cancelled {
                            produced: n,
                            target: size,
                        });
                    }
                }
            }
        }

        info!(
            "✅ Allocated {} items in {:.2?} ({} collisions)",
            allocator.produced(),
            start.elapsed(),
            allocator.total_collisions()
        );
        Ok(allocator.into_record())
    }
}
