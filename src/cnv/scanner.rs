use super::{
    aligned_positions, check_window, compute_ratio, locate_breakpoint, moving_average,
    order_by_position, placeholder, RatioVector, ScanError,
};
use crate::input::{ArmBreakpoints, CellGroups, ExpressionMatrix, GenePositions};
use std::ops::Range;

/// Human autosomes
pub const DEFAULT_AUTOSOMES: u32 = 22;

#[derive(Debug, Clone)]
pub struct ScanParams {
    pub window: usize,
    pub num_autosomes: u32,
}

/// Smoothed ratio track of one chromosome.
#[derive(Debug, Clone, PartialEq)]
pub enum ChromosomeTrack {
    Smoothed {
        chrom: u32,
        values: Vec<f64>,
        /// Start of the gene at the center of each window
        positions: Vec<u64>,
        breakpoint: Option<usize>,
    },
    /// Too few genes to fill one window; values is a constant placeholder
    Insufficient {
        chrom: u32,
        genes: usize,
        window: usize,
        values: Vec<f64>,
    },
}

impl ChromosomeTrack {
    pub fn chrom(&self) -> u32 {
        match self {
            ChromosomeTrack::Smoothed { chrom, .. } | ChromosomeTrack::Insufficient { chrom, .. } => {
                *chrom
            }
        }
    }

    pub fn values(&self) -> &[f64] {
        match self {
            ChromosomeTrack::Smoothed { values, .. }
            | ChromosomeTrack::Insufficient { values, .. } => values,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, ChromosomeTrack::Insufficient { .. })
    }

    pub fn message(&self) -> Option<String> {
        match self {
            ChromosomeTrack::Smoothed { .. } => None,
            ChromosomeTrack::Insufficient {
                chrom,
                genes,
                window,
                ..
            } => Some(format!(
                "Chromosome {}: {} expressed genes, not enough for a window of {}",
                chrom, genes, window
            )),
        }
    }

    /// p and q arm index ranges split at the breakpoint. Empty arms are omitted.
    pub fn arms(&self) -> Vec<(&'static str, Range<usize>)> {
        match self {
            ChromosomeTrack::Smoothed {
                values,
                breakpoint: Some(breakpoint),
                ..
            } => [("p", 0..*breakpoint), ("q", *breakpoint..values.len())]
                .into_iter()
                .filter(|(_, range)| !range.is_empty())
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Orders, smooths, and annotates the ratios of one chromosome.
pub fn scan_chromosome(
    ratios: &RatioVector,
    positions: &GenePositions,
    chrom: u32,
    window: usize,
    arms: Option<&ArmBreakpoints>,
) -> Result<ChromosomeTrack, ScanError> {
    check_window(window)?;
    let ordered = order_by_position(ratios, positions, chrom);
    if ordered.len() <= window {
        log::warn!(
            "Chromosome {}: only {} genes for window size {}",
            chrom,
            ordered.len(),
            window
        );
        return Ok(ChromosomeTrack::Insufficient {
            chrom,
            genes: ordered.len(),
            window,
            values: placeholder(),
        });
    }

    let values = moving_average(&ordered.values, window);
    let centers = aligned_positions(&ordered.starts, window).to_vec();
    let breakpoint = arms
        .and_then(|arms| arms.get(chrom))
        .and_then(|target| locate_breakpoint(&centers, target));

    log::debug!(
        "Chromosome {}: {} genes, {} smoothed values, breakpoint index {:?}",
        chrom,
        ordered.len(),
        values.len(),
        breakpoint
    );
    Ok(ChromosomeTrack::Smoothed {
        chrom,
        values,
        positions: centers,
        breakpoint,
    })
}

/// Ratio of target over reference cells (optionally one subject's cells)
/// smoothed along one chromosome.
#[allow(clippy::too_many_arguments)]
pub fn compute_chromosome_ratio(
    matrix: &ExpressionMatrix,
    groups: &CellGroups,
    params: &ScanParams,
    positions: &GenePositions,
    chrom: u32,
    subject: Option<&str>,
    arms: Option<&ArmBreakpoints>,
) -> Result<ChromosomeTrack, ScanError> {
    check_window(params.window)?;
    let ratios = compute_ratio(matrix, groups, subject)?;
    scan_chromosome(&ratios, positions, chrom, params.window, arms)
}
