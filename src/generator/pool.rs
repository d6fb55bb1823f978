use crate::collection::Trait;
use crate::error::{ForgeError, ForgeResult};
use rayon::prelude::*;
use tracing::{debug, warn};

/// Per-trait stack of variant indices. The top of the stack is the end of the vector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraitPool {
    entries: Vec<usize>,
}

impl TraitPool {
    pub fn from_entries(entries: Vec<usize>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn pop(&mut self) -> Option<usize> {
        self.entries.pop()
    }

    pub fn push(&mut self, variant: usize) {
        self.entries.push(variant);
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.entries
    }

    pub fn as_mut_slice(&mut self) -> &mut [usize] {
        &mut self.entries
    }

    /// Occurrences of each variant index still in the pool.
    pub fn counts(&self, variant_count: usize) -> Vec<usize> {
        let mut counts = vec![0; variant_count];
        for &v in &self.entries {
            if v < variant_count {
                counts[v] += 1;
            }
        }
        counts
    }
}

/// Outcome of filling one trait's pool.
#[derive(Debug, Clone)]
pub struct PoolBuild {
    pub pool: TraitPool,
    /// Entries the rarity table asked for in total, before capping and padding.
    pub requested: usize,
    /// Set when the rarity table asked for more entries than the collection holds.
    pub overflow: bool,
    /// Number of entries appended to reach the collection size.
    pub padded: usize,
    /// Variant used for padding (highest rarity, first on ties).
    pub pad_variant: Option<usize>,
}

/// `floor(rarity * size / 100)`
pub fn variant_quota(rarity: f64, size: usize) -> usize {
    let raw = rarity * size as f64 / 100.0;
    if raw.is_finite() && raw > 0.0 {
        raw.floor() as usize
    } else {
        0
    }
}

/// Index of the variant with the highest rarity; the first one wins ties.
pub fn dominant_variant(t: &Trait) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, v) in t.variants.iter().enumerate() {
        match best {
            Some((_, r)) if v.rarity <= r => {}
            _ => best = Some((i, v.rarity)),
        }
    }
    best.map(|(i, _)| i)
}

/// Fills a pool of exactly `size` entries from the trait's rarity table.
///
/// Quotas are appended in variant order. Once the pool is full, later quotas
/// are dropped and the build is flagged as overflowing. A short pool is padded
/// with the dominant variant.
pub fn build_pool(t: &Trait, size: usize) -> ForgeResult<PoolBuild> {
    if size == 0 {
        return Ok(PoolBuild {
            pool: TraitPool::default(),
            requested: 0,
            overflow: false,
            padded: 0,
            pad_variant: None,
        });
    }

    if t.variants.is_empty() {
        return Err(ForgeError::EmptyTrait {
            trait_name: t.name.clone(),
        });
    }

    let mut entries = Vec::with_capacity(size);
    let mut requested = 0;
    let mut overflow = false;

    for (index, variant) in t.variants.iter().enumerate() {
        let quota = variant_quota(variant.rarity, size);
        requested += quota;
        if overflow {
            continue;
        }

        let room = size - entries.len();
        if quota > room {
            entries.extend(std::iter::repeat(index).take(room));
            overflow = true;
        } else {
            entries.extend(std::iter::repeat(index).take(quota));
        }
    }

    let mut padded = 0;
    let mut pad_variant = None;
    if entries.len() < size {
        // variants is non-empty here, so a dominant variant always exists
        let pad = dominant_variant(t).unwrap_or(0);
        padded = size - entries.len();
        entries.extend(std::iter::repeat(pad).take(padded));
        pad_variant = Some(pad);
        debug!(
            "Trait '{}': padded {} entries with variant '{}' (rarities sum to {:.2}%)",
            t.name,
            padded,
            t.variants[pad].name,
            t.total_rarity()
        );
    }

    Ok(PoolBuild {
        pool: TraitPool::from_entries(entries),
        requested,
        overflow,
        padded,
        pad_variant,
    })
}

/// Builds every trait's pool in parallel. Overflow is a warning unless `strict` is set.
pub fn build_pools(traits: &[Trait], size: usize, strict: bool) -> ForgeResult<Vec<PoolBuild>> {
    let builds: Vec<PoolBuild> = traits
        .par_iter()
        .map(|t| build_pool(t, size))
        .collect::<ForgeResult<_>>()?;

    for (t, build) in traits.iter().zip(&builds) {
        if !build.overflow {
            continue;
        }
        if strict {
            return Err(ForgeError::PoolOverflow {
                trait_name: t.name.clone(),
                requested: build.requested,
                capacity: size,
            });
        }
        warn!(
            "⚠️  Trait '{}' asks for {} entries but the collection holds {}; later variants were skipped",
            t.name, build.requested, size
        );
    }

    Ok(builds)
}
