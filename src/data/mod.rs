pub mod dataset;
pub mod blobs;
pub mod split;

pub use dataset::Dataset;
pub use blobs::{make_blobs, BlobConfig};
pub use split::{train_test_split, Split, SplitConfig};
