use crate::collection::Trait;

/// Running per-trait, per-variant usage counters.
///
/// The weight of a slot is `N / (uses_so_far + 1)`, read before the slot's own
/// use is counted. Early items therefore see coarser counts than later ones.
#[derive(Debug, Clone, PartialEq)]
pub struct RarityTracker {
    collection_size: usize,
    usage: Vec<Vec<usize>>,
}

impl RarityTracker {
    pub fn new(collection_size: usize, variant_counts: &[usize]) -> Self {
        Self {
            collection_size,
            usage: variant_counts.iter().map(|&n| vec![0; n]).collect(),
        }
    }

    pub fn for_traits(collection_size: usize, traits: &[Trait]) -> Self {
        let counts: Vec<usize> = traits.iter().map(|t| t.variants.len()).collect();
        Self::new(collection_size, &counts)
    }

    pub fn weight(&self, trait_index: usize, variant: usize) -> f64 {
        let used = self.usage[trait_index][variant];
        self.collection_size as f64 / (used as f64 + 1.0)
    }

    /// Scores one item's selection and counts its uses. Unused slots add nothing.
    pub fn record(&mut self, selection: &[Option<usize>]) -> f64 {
        let mut score = 0.0;
        for (t, slot) in selection.iter().enumerate() {
            if let Some(v) = *slot {
                score += self.weight(t, v);
                self.usage[t][v] += 1;
            }
        }
        score
    }

    pub fn usage(&self) -> &[Vec<usize>] {
        &self.usage
    }

    pub fn into_usage(self) -> Vec<Vec<usize>> {
        self.usage
    }
}
