use super::RatioVector;
use crate::input::GenePositions;

/// Ratios of one chromosome in ascending order of gene start.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionOrderedVector {
    pub chrom: u32,
    pub genes: Vec<String>,
    pub starts: Vec<u64>,
    pub values: Vec<f64>,
}

impl PositionOrderedVector {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Orders the genes of `chrom` by start and keeps those that have a ratio.
pub fn order_by_position(
    ratios: &RatioVector,
    positions: &GenePositions,
    chrom: u32,
) -> PositionOrderedVector {
    let mut ordered = PositionOrderedVector {
        chrom,
        genes: Vec::new(),
        starts: Vec::new(),
        values: Vec::new(),
    };
    for (gene, position) in positions.on_autosome(chrom) {
        if let Some(value) = ratios.get(gene) {
            ordered.genes.push(gene.to_string());
            ordered.starts.push(position.start);
            ordered.values.push(value);
        }
    }
    ordered
}
