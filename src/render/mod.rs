mod color;
mod figures;

pub use color::{Color, ColorScale};
pub use figures::{chromosome_figure, genome_figure, heatmap_figure};
