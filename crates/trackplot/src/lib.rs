/*!
This crate draws the two figure types used to inspect copy-number tracks: line
plots of position-ordered values (one or more series of points, with
separators and tick labels along the genome axis) and heatmaps (one row of
colored cells per sample). Figures are laid out as SVG and can be written as
SVG, PNG, or PDF images depending on the output file extension.
*/

mod common;
mod image;
mod pdf;
mod plot;
mod png;
mod svg;

use common::prepare_svg_tree;
pub use image::generate as generate_image;
pub use plot::{Color, Figure, Heatmap, LinePlot, Marker, Series, Tick, VLine};
