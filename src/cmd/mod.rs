pub mod auto;
pub mod generate;
pub mod inspect;
pub mod render;

use pfpforge::generator::{ProgressCallback, Stage};
use tracing::info;

/// Logs allocation and render progress; never cancels.
pub struct LogProgress;

impl ProgressCallback for LogProgress {
    fn on_progress(&self, stage: Stage, done: usize, total: usize) -> bool {
        match stage {
            Stage::Allocating | Stage::Rendering => {
                info!("{}: {}/{}", stage, done, total);
            }
            Stage::BuildingPools | Stage::Shuffling if done == total => {
                info!("{}: {} traits done", stage, total);
            }
            _ => {}
        }
        true
    }
}
