use super::{check_window, cluster_order, group_mean_linear, moving_average, to_linear, ScanError};
use crate::input::{ExpressionMatrix, GenePositions};
use crate::utils::mean;
use itertools::Itertools;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

#[derive(Debug, Clone)]
pub struct HeatmapParams {
    pub window: usize,
    pub num_autosomes: u32,
    /// Minimum mean linear expression in the reference cells
    pub exp_thresh: f64,
    /// Displayed values are saturated at +/- this value
    pub clip_thresh: f64,
    /// Chromosomes whose raw ratios are used to order the cells
    pub cluster_chroms: Option<Vec<u32>>,
}

/// Smoothed, centered, and clipped per-cell differences to the reference.
#[derive(Debug, Clone)]
pub struct HeatmapGrid {
    /// Gene at the center of each smoothed column
    pub genes: Vec<String>,
    /// Cell ids in display order
    pub cells: Vec<String>,
    /// One row per displayed cell
    pub values: Vec<Vec<f64>>,
    /// First column of each chromosome
    pub chromosome_boundaries: Vec<(u32, usize)>,
}

struct OrderedGene {
    index: usize,
    chrom: u32,
    start: u64,
}

pub fn build_heatmap_grid(
    matrix: &ExpressionMatrix,
    reference: &[usize],
    cells: &[usize],
    positions: &GenePositions,
    params: &HeatmapParams,
) -> Result<HeatmapGrid, ScanError> {
    check_window(params.window)?;
    if reference.is_empty() {
        return Err(ScanError::EmptyGroup("reference"));
    }
    if cells.is_empty() {
        return Err(ScanError::EmptyGroup("display"));
    }

    let ref_expr = group_mean_linear(matrix, reference);
    let ordered = order_expressed_genes(matrix, positions, &ref_expr, params);
    if ordered.len() <= params.window {
        return Err(ScanError::InsufficientGenes {
            genes: ordered.len(),
            window: params.window,
        });
    }
    log::info!(
        "{} genes with known positions pass the reference expression threshold {}",
        ordered.len(),
        params.exp_thresh
    );

    // Differences in linear space; the genome scan uses log ratios instead
    let raw: Vec<Vec<f64>> = cells
        .par_iter()
        .map(|&cell| {
            ordered
                .iter()
                .map(|gene| to_linear(matrix.value(gene.index, cell)) - ref_expr[gene.index])
                .collect()
        })
        .collect();

    let smoothed: Vec<Vec<f64>> = raw
        .par_iter()
        .map(|ratios| moving_average(ratios, params.window))
        .collect();

    let order = match &params.cluster_chroms {
        Some(chroms) => {
            let keep = ordered
                .iter()
                .map(|gene| chroms.contains(&gene.chrom))
                .collect_vec();
            let profiles = raw
                .iter()
                .map(|ratios| {
                    ratios
                        .iter()
                        .zip(&keep)
                        .filter(|(_, &k)| k)
                        .map(|(&r, _)| r)
                        .collect_vec()
                })
                .collect_vec();
            if profiles.first().map_or(true, |p| p.is_empty()) {
                log::warn!("No genes on chromosomes {:?}; cells keep their order", chroms);
                (0..cells.len()).collect()
            } else {
                log::debug!(
                    "Clustering {} cells over {} genes",
                    cells.len(),
                    profiles[0].len()
                );
                cluster_order(&profiles)
            }
        }
        None => (0..cells.len()).collect_vec(),
    };

    let clip = params.clip_thresh;
    let values: Vec<Vec<f64>> = order
        .par_iter()
        .map(|&row| {
            let center = mean(&smoothed[row]).unwrap_or(0.0);
            smoothed[row]
                .iter()
                .map(|value| (value - center).clamp(-clip, clip))
                .collect()
        })
        .collect();

    let half = params.window / 2;
    let genes: Vec<String> = ordered[half..half + ordered.len() - params.window + 1]
        .iter()
        .map(|gene| matrix.genes()[gene.index].clone())
        .collect();
    let chromosome_boundaries: Vec<(u32, usize)> = ordered
        .iter()
        .enumerate()
        .dedup_by(|(_, a), (_, b)| a.chrom == b.chrom)
        .map(|(first, gene)| (gene.chrom, first.saturating_sub(half)))
        .collect();
    let cell_ids: Vec<String> = order
        .iter()
        .map(|&row| matrix.cells()[cells[row]].clone())
        .collect();

    Ok(HeatmapGrid {
        genes,
        cells: cell_ids,
        values,
        chromosome_boundaries,
    })
}

/// Reference-expressed genes on autosomes, sorted by chromosome then start.
fn order_expressed_genes(
    matrix: &ExpressionMatrix,
    positions: &GenePositions,
    ref_expr: &[f64],
    params: &HeatmapParams,
) -> Vec<OrderedGene> {
    matrix
        .genes()
        .iter()
        .enumerate()
        .filter(|(index, _)| ref_expr[*index] > params.exp_thresh)
        .filter_map(|(index, gene)| {
            let position = positions.get(gene)?;
            let chrom = position.autosome()?;
            (chrom <= params.num_autosomes).then_some(OrderedGene {
                index,
                chrom,
                start: position.start,
            })
        })
        .sorted_by(|a, b| {
            (a.chrom, a.start, a.index).cmp(&(b.chrom, b.start, b.index))
        })
        .collect()
}
