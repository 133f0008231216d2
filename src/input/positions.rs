use crate::utils::{autosome_number, open_table_reader, Result};
use std::{collections::HashMap, io::BufRead, path::Path};

#[derive(Debug, Clone, PartialEq)]
pub struct GenePosition {
    pub contig: String,
    pub start: u64,
    pub end: u64,
}

impl GenePosition {
    pub fn autosome(&self) -> Option<u32> {
        autosome_number(&self.contig)
    }
}

/// Gene id to genomic coordinates. At most one record per gene is kept.
#[derive(Debug, Default)]
pub struct GenePositions {
    records: HashMap<String, GenePosition>,
}

impl GenePositions {
    pub fn from_path(path: &Path) -> Result<Self> {
        let reader = open_table_reader(path)?;
        Self::from_reader(reader).map_err(|e| format!("{}: {}", path.display(), e))
    }

    /// Reads `gene chrom start end` lines. Comment lines and a header line
    /// whose coordinates are not numeric are skipped.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut positions = Self::default();
        let mut num_duplicates = 0;
        for (line_number, line) in reader.lines().enumerate() {
            let line =
                line.map_err(|e| format!("Error reading line {}: {}", line_number + 1, e))?;
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = line.split_whitespace().collect();
            let (gene, contig, start, end) = match &fields[..] {
                [gene, contig, start, end, ..] => (*gene, *contig, *start, *end),
                _ => {
                    return Err(format!(
                        "Expected fields 'gene chrom start end' at line {}: {}",
                        line_number + 1,
                        line
                    ))
                }
            };

            let (start, end) = match (start.parse::<u64>(), end.parse::<u64>()) {
                (Ok(start), Ok(end)) => (start, end),
                _ if positions.is_empty() && line_number == 0 => continue,
                _ => {
                    return Err(format!(
                        "Invalid coordinates at line {}: {}",
                        line_number + 1,
                        line
                    ))
                }
            };
            if start > end {
                return Err(format!(
                    "Invalid interval at line {}: start {} > end {}",
                    line_number + 1,
                    start,
                    end
                ));
            }

            if !positions.insert(gene, GenePosition { contig: contig.to_string(), start, end }) {
                num_duplicates += 1;
            }
        }

        if num_duplicates > 0 {
            log::warn!(
                "Ignored {} repeated gene position records (first record kept)",
                num_duplicates
            );
        }
        Ok(positions)
    }

    /// Returns false and leaves the table unchanged if the gene is already present.
    pub fn insert(&mut self, gene: &str, position: GenePosition) -> bool {
        if self.records.contains_key(gene) {
            return false;
        }
        self.records.insert(gene.to_string(), position);
        true
    }

    pub fn get(&self, gene: &str) -> Option<&GenePosition> {
        self.records.get(gene)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Genes on the given autosome sorted by ascending start (ties by gene id).
    pub fn on_autosome(&self, chrom: u32) -> Vec<(&str, &GenePosition)> {
        let mut genes: Vec<(&str, &GenePosition)> = self
            .records
            .iter()
            .filter(|(_, pos)| pos.autosome() == Some(chrom))
            .map(|(gene, pos)| (gene.as_str(), pos))
            .collect();
        genes.sort_by(|a, b| a.1.start.cmp(&b.1.start).then_with(|| a.0.cmp(b.0)));
        genes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn positions_from_reader_with_header() {
        let data = "\
gene\tchrom\tstart\tend\n\
GENE_B\tchr1\t500\t900\n\
# comment\n\
GENE_A\t1\t100\t200\n\
GENE_C\tchr2\t50\t60\n";
        let positions = GenePositions::from_reader(Cursor::new(data)).unwrap();
        assert_eq!(positions.len(), 3);
        assert_eq!(positions.get("GENE_C").unwrap().autosome(), Some(2));

        let chr1: Vec<&str> = positions.on_autosome(1).iter().map(|(g, _)| *g).collect();
        assert_eq!(chr1, vec!["GENE_A", "GENE_B"]);
    }

    #[test]
    fn positions_keep_first_record() {
        let data = "G1 1 100 200\nG1 2 300 400\n";
        let positions = GenePositions::from_reader(Cursor::new(data)).unwrap();
        assert_eq!(positions.len(), 1);
        assert_eq!(positions.get("G1").unwrap().start, 100);
    }

    #[test]
    fn positions_incomplete_line_err() {
        let data = "G1 1 100 200\nG2 1 300\n";
        assert!(GenePositions::from_reader(Cursor::new(data)).is_err());
    }

    #[test]
    fn positions_invalid_coordinates_after_first_line_err() {
        let data = "G1 1 100 200\nG2 1 abc 400\n";
        let result = GenePositions::from_reader(Cursor::new(data));
        assert_eq!(
            result.unwrap_err(),
            "Invalid coordinates at line 2: G2 1 abc 400".to_string()
        );
    }

    #[test]
    fn positions_reversed_interval_err() {
        let data = "G1 1 300 200\n";
        assert!(GenePositions::from_reader(Cursor::new(data)).is_err());
    }
}
