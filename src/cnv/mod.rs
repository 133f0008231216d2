//! Copy-number signal from expression: per-gene ratios between target and
//! reference cells, ordered along each chromosome and smoothed with a
//! moving window.

mod breakpoint;
mod cluster;
mod error;
mod genome;
mod heatmap;
mod position;
mod ratio;
mod scanner;
mod smooth;
mod transform;

pub use breakpoint::{aligned_positions, locate_breakpoint};
pub use cluster::cluster_order;
pub use error::ScanError;
pub use genome::{scan_genome, GenomeTrack};
pub use heatmap::{build_heatmap_grid, HeatmapGrid, HeatmapParams};
pub use position::{order_by_position, PositionOrderedVector};
pub use ratio::{compute_ratio, group_mean_linear, RatioVector, MIN_LINEAR_EXPRESSION};
pub use scanner::{
    compute_chromosome_ratio, scan_chromosome, ChromosomeTrack, ScanParams, DEFAULT_AUTOSOMES,
};
pub use smooth::{check_window, moving_average, placeholder, PLACEHOLDER_LEN, PLACEHOLDER_VALUE};
pub use transform::{to_linear, to_log2p1};
