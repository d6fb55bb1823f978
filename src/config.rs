use clap::Args;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub generation: GenerationParams,
    #[command(flatten)]
    pub paths: OutputPaths,
}

/// What the allocator does with the entries it popped for a draw that collided.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// Popped entries are lost; pools shrink on every collision.
    #[default]
    Discard,
    /// Popped entries go back into their pools before the reshuffle.
    Restore,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationParams {
    /// Overrides the collection size from the definition file
    #[arg(long)]
    pub size: Option<usize>,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,

    #[arg(long, default_value_t = CollisionPolicy::Discard)]
    pub collision_policy: CollisionPolicy,

    /// Consecutive collisions tolerated under the restore policy. Discarding
    /// runs are bounded by pool exhaustion instead.
    #[arg(long, default_value_t = 10_000)]
    pub max_collision_retries: usize,

    /// Reject rarity tables that overflow the collection instead of warning
    #[arg(long, default_value_t = false)]
    pub strict: bool,

    #[arg(long, default_value_t = 100)]
    pub progress_interval: usize,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            size: None,
            seed: None,
            collision_policy: CollisionPolicy::Discard,
            max_collision_retries: 10_000,
            strict: false,
            progress_interval: 100,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputPaths {
    #[arg(long, default_value = "PFP/pfp.json")]
    pub record: String,
    #[arg(long, default_value = "JSON")]
    pub metadata_dir: String,
    #[arg(long, default_value = "NFT")]
    pub render_dir: String,
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self {
            record: "PFP/pfp.json".to_string(),
            metadata_dir: "JSON".to_string(),
            render_dir: "NFT".to_string(),
        }
    }
}
