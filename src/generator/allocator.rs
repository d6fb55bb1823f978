use super::pool::TraitPool;
use super::rarity::RarityTracker;
use super::shuffle::shuffle_all;
use crate::collection::Trait;
use crate::config::CollisionPolicy;
use crate::error::{ForgeError, ForgeResult};
use crate::record::{GenerationRecord, Pfp};
use fastrand::Rng;
use std::collections::HashSet;
use tracing::debug;

/// Decides what happens to the entries popped for a draw that collided.
/// The allocator reshuffles every pool afterwards either way.
pub trait CollisionStrategy: Send {
    fn on_collision(&mut self, pools: &mut [TraitPool], drawn: &[usize]);
    fn name(&self) -> &'static str;

    /// Strategies that shrink the pools on every collision are bounded by
    /// exhaustion and never hit the retry budget.
    fn consumes_draws(&self) -> bool {
        false
    }
}

/// Popped entries are dropped for good.
pub struct DiscardDraw;

impl CollisionStrategy for DiscardDraw {
    fn on_collision(&mut self, _pools: &mut [TraitPool], _drawn: &[usize]) {}

    fn name(&self) -> &'static str {
        "discard"
    }

    fn consumes_draws(&self) -> bool {
        true
    }
}

/// Popped entries go back into their pools.
pub struct RestoreDraw;

impl CollisionStrategy for RestoreDraw {
    fn on_collision(&mut self, pools: &mut [TraitPool], drawn: &[usize]) {
        for (pool, &variant) in pools.iter_mut().zip(drawn) {
            pool.push(variant);
        }
    }

    fn name(&self) -> &'static str {
        "restore"
    }
}

pub fn strategy_for(policy: CollisionPolicy) -> Box<dyn CollisionStrategy> {
    match policy {
        CollisionPolicy::Discard => Box::new(DiscardDraw),
        CollisionPolicy::Restore => Box::new(RestoreDraw),
    }
}

/// `"_" + variant name` for every used slot, in trait order.
pub fn combination_key(traits: &[Trait], selection: &[Option<usize>]) -> String {
    let mut key = String::new();
    for (t, slot) in selection.iter().enumerate() {
        if let Some(v) = *slot {
            key.push('_');
            key.push_str(&traits[t].variants[v].name);
        }
    }
    key
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Carries the sequence number of the accepted item.
    Accepted(usize),
    Collided,
    Complete,
}

/// Draws one variant per trait per item until `target` unique combinations exist.
pub struct Allocator<'a> {
    traits: &'a [Trait],
    pools: Vec<TraitPool>,
    rng: Rng,
    strategy: Box<dyn CollisionStrategy>,
    tracker: RarityTracker,
    accepted: HashSet<String>,
    pfps: Vec<Pfp>,
    target: usize,
    max_retries: usize,
    consecutive_collisions: usize,
    total_collisions: usize,
}

impl<'a> Allocator<'a> {
    /// `pools` must already be shuffled and line up with `traits`.
    pub fn new(
        traits: &'a [Trait],
        pools: Vec<TraitPool>,
        rng: Rng,
        strategy: Box<dyn CollisionStrategy>,
        target: usize,
        max_retries: usize,
    ) -> Self {
        Self {
            traits,
            pools,
            rng,
            strategy,
            tracker: RarityTracker::for_traits(target, traits),
            accepted: HashSet::with_capacity(target),
            pfps: Vec::with_capacity(target),
            target,
            max_retries,
            consecutive_collisions: 0,
            total_collisions: 0,
        }
    }

    pub fn produced(&self) -> usize {
        self.pfps.len()
    }

    pub fn is_complete(&self) -> bool {
        self.pfps.len() >= self.target
    }

    pub fn pools(&self) -> &[TraitPool] {
        &self.pools
    }

    pub fn total_collisions(&self) -> usize {
        self.total_collisions
    }

    /// One draw attempt.
    pub fn step(&mut self) -> ForgeResult<Step> {
        if self.is_complete() {
            return Ok(Step::Complete);
        }

        let mut drawn = Vec::with_capacity(self.pools.len());
        for (t, pool) in self.pools.iter_mut().enumerate() {
            match pool.pop() {
                Some(v) => drawn.push(v),
                None => {
                    return Err(ForgeError::Exhausted {
                        trait_name: self.traits[t].name.clone(),
                        produced: self.pfps.len(),
                        target: self.target,
                    })
                }
            }
        }

        let selection: Vec<Option<usize>> = drawn.iter().copied().map(Some).collect();
        let key = combination_key(self.traits, &selection);
        let sequence = self.pfps.len() + 1;

        if self.accepted.contains(&key) {
            self.total_collisions += 1;
            self.consecutive_collisions += 1;
            debug!("Repeat combination '{}' at item {}", key, sequence);

            if self.pools.is_empty() {
                return Err(ForgeError::DuplicateCombination {
                    identifier: format!("{:04}{}", sequence, key),
                });
            }
            if !self.strategy.consumes_draws() && self.consecutive_collisions > self.max_retries {
                return Err(ForgeError::RetriesExceeded {
                    produced: self.pfps.len(),
                    target: self.target,
                    retries: self.max_retries,
                });
            }

            self.strategy.on_collision(&mut self.pools, &drawn);
            shuffle_all(&mut self.rng, &mut self.pools);
            debug!("Reshuffled all pools ({} policy)", self.strategy.name());
            return Ok(Step::Collided);
        }

        self.consecutive_collisions = 0;
        let score = self.tracker.record(&selection);
        self.pfps.push(Pfp::new(sequence, &key, selection, score));
        self.accepted.insert(key);
        Ok(Step::Accepted(sequence))
    }

    pub fn into_record(self) -> GenerationRecord {
        GenerationRecord {
            collection_size: self.target,
            pfps: self.pfps,
            trait_usage: self.tracker.into_usage(),
        }
    }
}
