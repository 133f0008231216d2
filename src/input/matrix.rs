use crate::cnv::to_linear;
use crate::utils::{open_table_reader, Result};
use std::{collections::HashMap, io::BufRead, path::Path};

/// Largest accepted log2(CPM/10+1) value. Far above any real library
/// (1e6 CPM is about 16.6) while keeping linear sums finite.
pub const MAX_LOG_EXPRESSION: f64 = 64.0;

/// Genes (rows) by cells (columns), values on the log2(CPM/10+1) scale.
#[derive(Debug)]
pub struct ExpressionMatrix {
    genes: Vec<String>,
    cells: Vec<String>,
    values: Vec<f64>,
    cell_lookup: HashMap<String, usize>,
}

impl ExpressionMatrix {
    pub fn new(genes: Vec<String>, cells: Vec<String>, rows: Vec<Vec<f64>>) -> Result<Self> {
        if genes.len() != rows.len() {
            return Err(format!(
                "Expected {} matrix rows, found {}",
                genes.len(),
                rows.len()
            ));
        }
        build_lookup(&genes, "gene")?;
        let cell_lookup = build_lookup(&cells, "cell")?;

        let mut values = Vec::with_capacity(genes.len() * cells.len());
        for (gene, row) in genes.iter().zip(rows) {
            if row.len() != cells.len() {
                return Err(format!(
                    "Gene {} has {} values, expected {}",
                    gene,
                    row.len(),
                    cells.len()
                ));
            }
            if let Some(value) = row.iter().find(|&&v| !is_expression_value(v)) {
                return Err(format!(
                    "Gene {} has value {} outside the log2(CPM/10+1) range",
                    gene, value
                ));
            }
            values.extend(row);
        }

        Ok(Self {
            genes,
            cells,
            values,
            cell_lookup,
        })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let reader = open_table_reader(path)?;
        Self::from_reader(reader).map_err(|e| format!("{}: {}", path.display(), e))
    }

    /// Parses a tab-separated table. The header lists the cell ids and may or
    /// may not start with a corner field above the gene column.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut lines = reader.lines().enumerate();
        let header = loop {
            match lines.next() {
                Some((line_number, line)) => {
                    let line = line
                        .map_err(|e| format!("Error reading line {}: {}", line_number + 1, e))?;
                    if !line.trim().is_empty() {
                        break line;
                    }
                }
                None => return Err("Expression matrix is empty".to_string()),
            }
        };
        let header_fields: Vec<&str> = header.trim_end().split('\t').collect();

        let mut cells: Option<Vec<String>> = None;
        let mut genes = Vec::new();
        let mut rows = Vec::new();
        for (line_number, line) in lines {
            let line =
                line.map_err(|e| format!("Error reading line {}: {}", line_number + 1, e))?;
            if line.trim().is_empty() {
                continue;
            }
            let mut fields = line.trim_end().split('\t');
            let gene = fields
                .next()
                .ok_or_else(|| format!("Missing gene id at line {}", line_number + 1))?;
            let row = fields
                .map(|field| parse_value(field, line_number + 1))
                .collect::<Result<Vec<f64>>>()?;

            let cells = cells.get_or_insert_with(|| {
                let skip = if header_fields.len() > row.len() { 1 } else { 0 };
                header_fields[skip..].iter().map(|s| s.to_string()).collect()
            });
            if row.len() != cells.len() {
                return Err(format!(
                    "Expected {} values at line {}, found {}",
                    cells.len(),
                    line_number + 1,
                    row.len()
                ));
            }
            genes.push(gene.to_string());
            rows.push(row);
        }

        let cells = cells.unwrap_or_default();
        Self::new(genes, cells, rows)
    }

    pub fn num_genes(&self) -> usize {
        self.genes.len()
    }

    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn genes(&self) -> &[String] {
        &self.genes
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    pub fn cell_index(&self, cell: &str) -> Option<usize> {
        self.cell_lookup.get(cell).copied()
    }

    pub fn row(&self, gene_index: usize) -> &[f64] {
        let num_cells = self.cells.len();
        &self.values[gene_index * num_cells..(gene_index + 1) * num_cells]
    }

    pub fn value(&self, gene_index: usize, cell_index: usize) -> f64 {
        self.values[gene_index * self.cells.len() + cell_index]
    }
}

fn build_lookup(ids: &[String], kind: &str) -> Result<HashMap<String, usize>> {
    let mut lookup = HashMap::with_capacity(ids.len());
    for (index, id) in ids.iter().enumerate() {
        if lookup.insert(id.clone(), index).is_some() {
            return Err(format!("Duplicate {} id: {}", kind, id));
        }
    }
    Ok(lookup)
}

fn parse_value(field: &str, line_number: usize) -> Result<f64> {
    let value = field
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("Invalid value '{}' at line {}", field, line_number))?;
    if !value.is_finite() {
        return Err(format!(
            "Non-finite value '{}' at line {}",
            field, line_number
        ));
    }
    if !is_expression_value(value) {
        return Err(format!(
            "Value '{}' at line {} exceeds the maximum expression {}",
            field, line_number, MAX_LOG_EXPRESSION
        ));
    }
    Ok(value)
}

fn is_expression_value(value: f64) -> bool {
    value.is_finite() && value <= MAX_LOG_EXPRESSION && to_linear(value).is_finite()
}
