pub mod trainer;
pub mod epoch_stats;
pub mod train_config;
pub mod loop_fn;

pub use trainer::train_step;
pub use epoch_stats::{EpochStats, TrainReport};
pub use train_config::{TrainConfig, TrainSettings};
pub use loop_fn::{train_loop, Mode};
