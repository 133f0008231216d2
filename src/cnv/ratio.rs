use super::{to_linear, to_log2p1, ScanError};
use crate::input::{CellGroups, ExpressionMatrix};
use crate::utils::median;
use itertools::izip;
use std::collections::HashMap;

/// Genes must exceed this mean linear expression (CPM) in both groups.
pub const MIN_LINEAR_EXPRESSION: f64 = 5.0;

/// Per-gene ratios in insertion order, with lookup by gene id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatioVector {
    genes: Vec<String>,
    values: Vec<f64>,
    lookup: HashMap<String, usize>,
}

impl RatioVector {
    pub(crate) fn from_parts(genes: Vec<String>, values: Vec<f64>) -> Self {
        debug_assert_eq!(genes.len(), values.len());
        let lookup = genes
            .iter()
            .enumerate()
            .map(|(index, gene)| (gene.clone(), index))
            .collect();
        Self {
            genes,
            values,
            lookup,
        }
    }

    pub fn get(&self, gene: &str) -> Option<f64> {
        self.lookup.get(gene).map(|&index| self.values[index])
    }

    pub fn genes(&self) -> &[String] {
        &self.genes
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }
}

/// Mean of the linear-scale expression over `columns`, one value per gene.
pub fn group_mean_linear(matrix: &ExpressionMatrix, columns: &[usize]) -> Vec<f64> {
    if columns.is_empty() {
        return vec![f64::NAN; matrix.num_genes()];
    }
    (0..matrix.num_genes())
        .map(|gene_index| {
            let row = matrix.row(gene_index);
            let sum: f64 = columns.iter().map(|&c| to_linear(row[c])).sum();
            sum / columns.len() as f64
        })
        .collect()
}

/// Log-ratio of target over reference expression for the genes expressed in
/// both groups, centered on its median.
pub fn compute_ratio(
    matrix: &ExpressionMatrix,
    groups: &CellGroups,
    subject: Option<&str>,
) -> Result<RatioVector, ScanError> {
    if groups.reference().is_empty() {
        return Err(ScanError::EmptyGroup("reference"));
    }
    let target = groups.target_for_subject(subject);
    if target.is_empty() {
        return Err(match subject {
            Some(subject) => ScanError::MissingSubjectCells {
                subject: subject.to_string(),
            },
            None => ScanError::EmptyGroup("target"),
        });
    }

    let ref_expr = group_mean_linear(matrix, groups.reference());
    let tgt_expr = group_mean_linear(matrix, &target);

    let mut genes = Vec::new();
    let mut ratios = Vec::new();
    for (gene, &ref_value, &tgt_value) in izip!(matrix.genes(), &ref_expr, &tgt_expr) {
        if ref_value > MIN_LINEAR_EXPRESSION && tgt_value > MIN_LINEAR_EXPRESSION {
            genes.push(gene.clone());
            ratios.push(to_log2p1(tgt_value) - to_log2p1(ref_value));
        }
    }

    if let Some(center) = median(&ratios) {
        ratios.iter_mut().for_each(|ratio| *ratio -= center);
    }

    log::debug!(
        "{} of {} genes expressed in {} reference and {} target cells",
        genes.len(),
        matrix.num_genes(),
        groups.reference().len(),
        target.len()
    );
    Ok(RatioVector::from_parts(genes, ratios))
}
