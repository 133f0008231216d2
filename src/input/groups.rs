use super::ExpressionMatrix;
use crate::utils::{open_table_reader, Result};
use std::{
    collections::{HashMap, HashSet},
    io::BufRead,
    path::Path,
};

/// Disjoint reference and target column sets plus optional per-cell subject labels.
#[derive(Debug, Clone, Default)]
pub struct CellGroups {
    reference: Vec<usize>,
    target: Vec<usize>,
    subjects: HashMap<usize, String>,
}

impl CellGroups {
    pub fn new(reference: Vec<usize>, target: Vec<usize>) -> Result<Self> {
        let reference_set: HashSet<usize> = reference.iter().copied().collect();
        if let Some(column) = target.iter().find(|c| reference_set.contains(c)) {
            return Err(format!(
                "Column {} is both a reference and a target cell",
                column
            ));
        }
        Ok(Self {
            reference,
            target,
            subjects: HashMap::new(),
        })
    }

    pub fn with_subjects(mut self, subjects: HashMap<usize, String>) -> Self {
        self.subjects = subjects;
        self
    }

    pub fn from_path(path: &Path, matrix: &ExpressionMatrix) -> Result<Self> {
        let reader = open_table_reader(path)?;
        Self::from_reader(reader, matrix).map_err(|e| format!("{}: {}", path.display(), e))
    }

    /// Reads `cell group [subject]` lines where group is `reference` or `target`.
    /// Cells that are not matrix columns are skipped with a warning.
    pub fn from_reader<R: BufRead>(reader: R, matrix: &ExpressionMatrix) -> Result<Self> {
        let mut reference = Vec::new();
        let mut target = Vec::new();
        let mut subjects = HashMap::new();
        let mut seen = HashSet::new();
        let mut num_missing = 0;

        for (line_number, line) in reader.lines().enumerate() {
            let line =
                line.map_err(|e| format!("Error reading line {}: {}", line_number + 1, e))?;
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.split_whitespace();
            let cell = parts
                .next()
                .ok_or_else(|| format!("Missing cell id at line {}", line_number + 1))?;
            let group = parts
                .next()
                .ok_or_else(|| format!("Missing cell group at line {}", line_number + 1))?;
            let subject = parts.next();

            if !seen.insert(cell.to_string()) {
                return Err(format!(
                    "Duplicate cell entry at line {}: {}",
                    line_number + 1,
                    cell
                ));
            }

            let Some(column) = matrix.cell_index(cell) else {
                log::debug!("Annotated cell {} is not in the expression matrix", cell);
                num_missing += 1;
                continue;
            };

            match group {
                "reference" => reference.push(column),
                "target" => target.push(column),
                _ => {
                    return Err(format!(
                        "Invalid group '{}' at line {}, must be reference or target",
                        group,
                        line_number + 1
                    ))
                }
            }
            if let Some(subject) = subject {
                subjects.insert(column, subject.to_string());
            }
        }

        if num_missing > 0 {
            log::warn!(
                "{} annotated cells are missing from the expression matrix",
                num_missing
            );
        }

        Ok(Self::new(reference, target)?.with_subjects(subjects))
    }

    pub fn reference(&self) -> &[usize] {
        &self.reference
    }

    pub fn target(&self) -> &[usize] {
        &self.target
    }

    pub fn subject_of(&self, column: usize) -> Option<&str> {
        self.subjects.get(&column).map(|s| s.as_str())
    }

    /// Target columns, narrowed to one subject when given.
    pub fn target_for_subject(&self, subject: Option<&str>) -> Vec<usize> {
        match subject {
            Some(subject) => self
                .target
                .iter()
                .copied()
                .filter(|&column| self.subject_of(column) == Some(subject))
                .collect(),
            None => self.target.clone(),
        }
    }
}

/// Reads one cell id per line and resolves it to a matrix column.
pub fn read_cell_list<R: BufRead>(reader: R, matrix: &ExpressionMatrix) -> Result<Vec<usize>> {
    let mut columns = Vec::new();
    for (line_number, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| format!("Error reading line {}: {}", line_number + 1, e))?;
        let cell = line.trim();
        if cell.is_empty() {
            continue;
        }
        let column = matrix.cell_index(cell).ok_or_else(|| {
            format!(
                "Cell {} at line {} is not in the expression matrix",
                cell,
                line_number + 1
            )
        })?;
        columns.push(column);
    }
    Ok(columns)
}

pub fn read_cell_list_path(path: &Path, matrix: &ExpressionMatrix) -> Result<Vec<usize>> {
    let reader = open_table_reader(path)?;
    read_cell_list(reader, matrix).map_err(|e| format!("{}: {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn matrix() -> ExpressionMatrix {
        let cells = ["n1", "n2", "t1", "t2", "t3"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        ExpressionMatrix::new(vec!["G1".to_string()], cells, vec![vec![1.0; 5]]).unwrap()
    }

    #[test]
    fn groups_from_reader() {
        let data = "\
n1 reference\n\
n2 reference\n\
t1 target P1\n\
t2 target P2\n\
t3 target P1\n\
x9 target P1\n";
        let groups = CellGroups::from_reader(Cursor::new(data), &matrix()).unwrap();
        assert_eq!(groups.reference(), &[0, 1]);
        assert_eq!(groups.target(), &[2, 3, 4]);
        assert_eq!(groups.target_for_subject(Some("P1")), vec![2, 4]);
        assert_eq!(groups.target_for_subject(Some("P3")), Vec::<usize>::new());
        assert_eq!(groups.target_for_subject(None), vec![2, 3, 4]);
    }

    #[test]
    fn groups_duplicate_cell_err() {
        let data = "n1 reference\nn1 target\n";
        let result = CellGroups::from_reader(Cursor::new(data), &matrix());
        assert_eq!(
            result.unwrap_err(),
            "Duplicate cell entry at line 2: n1".to_string()
        );
    }

    #[test]
    fn groups_invalid_group_err() {
        let data = "n1 normal\n";
        assert!(CellGroups::from_reader(Cursor::new(data), &matrix()).is_err());
    }

    #[test]
    fn groups_overlapping_columns_err() {
        assert!(CellGroups::new(vec![0, 1], vec![1, 2]).is_err());
    }

    #[test]
    fn cell_list_from_reader() {
        let columns = read_cell_list(Cursor::new("t3\n\nn1\n"), &matrix()).unwrap();
        assert_eq!(columns, vec![4, 0]);
        assert!(read_cell_list(Cursor::new("missing\n"), &matrix()).is_err());
    }
}
