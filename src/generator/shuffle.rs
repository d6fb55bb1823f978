use super::pool::TraitPool;
use fastrand::Rng;

/// Fisher-Yates: walk from the back, swapping each slot with a uniform pick from `[0, i]`.
pub fn shuffle<T>(rng: &mut Rng, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = rng.usize(0..=i);
        items.swap(i, j);
    }
}

/// Reshuffles the remaining contents of every pool, in trait order.
pub fn shuffle_all(rng: &mut Rng, pools: &mut [TraitPool]) {
    for pool in pools.iter_mut() {
        shuffle(rng, pool.as_mut_slice());
    }
}
