use super::{
    check_window, compute_ratio, scan_chromosome, ChromosomeTrack, ScanError, ScanParams,
};
use crate::input::{ArmBreakpoints, CellGroups, ExpressionMatrix, GenePositions};
use rayon::iter::{IntoParallelIterator, ParallelIterator};

/// Chromosome tracks concatenated in chromosome order. `boundaries` starts at
/// 0 and holds the cumulative length after each chromosome.
#[derive(Debug, Clone)]
pub struct GenomeTrack {
    pub values: Vec<f64>,
    pub boundaries: Vec<usize>,
    pub tracks: Vec<ChromosomeTrack>,
}

impl GenomeTrack {
    pub fn from_tracks(tracks: Vec<ChromosomeTrack>) -> Self {
        let mut values = Vec::new();
        let mut boundaries = Vec::with_capacity(tracks.len() + 1);
        boundaries.push(0);
        for track in &tracks {
            values.extend_from_slice(track.values());
            boundaries.push(values.len());
        }
        Self {
            values,
            boundaries,
            tracks,
        }
    }

    /// Interior chromosome boundaries, shifted by `margin`.
    pub fn separators(&self, margin: f64) -> Vec<f64> {
        let num_boundaries = self.boundaries.len();
        if num_boundaries < 3 {
            return Vec::new();
        }
        self.boundaries[1..num_boundaries - 1]
            .iter()
            .map(|&b| b as f64 + margin)
            .collect()
    }

    /// Midpoint of each chromosome segment, shifted by `margin`.
    pub fn tick_positions(&self, margin: f64) -> Vec<(u32, f64)> {
        self.tracks
            .iter()
            .zip(self.boundaries.windows(2))
            .map(|(track, bounds)| {
                let mid = (bounds[0] + bounds[1]) as f64 / 2.0;
                (track.chrom(), mid + margin)
            })
            .collect()
    }
}

/// Scans chromosomes 1..=num_autosomes and concatenates their tracks.
pub fn scan_genome(
    matrix: &ExpressionMatrix,
    groups: &CellGroups,
    positions: &GenePositions,
    arms: Option<&ArmBreakpoints>,
    params: &ScanParams,
    subject: Option<&str>,
) -> Result<GenomeTrack, ScanError> {
    check_window(params.window)?;
    let ratios = compute_ratio(matrix, groups, subject)?;
    log::info!("{} genes passed the expression filter", ratios.len());

    // Ordered collect keeps chromosome order regardless of scheduling
    let tracks = (1..=params.num_autosomes)
        .into_par_iter()
        .map(|chrom| scan_chromosome(&ratios, positions, chrom, params.window, arms))
        .collect::<Result<Vec<ChromosomeTrack>, ScanError>>()?;

    let num_placeholders = tracks.iter().filter(|t| t.is_placeholder()).count();
    if num_placeholders > 0 {
        log::warn!(
            "{} of {} chromosomes had too few genes and were replaced by placeholders",
            num_placeholders,
            tracks.len()
        );
    }
    Ok(GenomeTrack::from_tracks(tracks))
}
