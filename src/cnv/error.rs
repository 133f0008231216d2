use std::fmt;

/// Data-sufficiency failures of the analysis. A chromosome with fewer genes
/// than the window is not an error; it yields a placeholder track instead.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanError {
    EmptyGroup(&'static str),
    MissingSubjectCells { subject: String },
    InsufficientGenes { genes: usize, window: usize },
    InvalidWindow(usize),
}

impl fmt::Display for ScanError {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ScanError::EmptyGroup(group) => write!(formatter, "No {} cells selected", group),
            ScanError::MissingSubjectCells { subject } => {
                write!(formatter, "No target cells found for subject {}", subject)
            }
            ScanError::InsufficientGenes { genes, window } => write!(
                formatter,
                "Only {} genes passed filtering, need more than the window size {}",
                genes, window
            ),
            ScanError::InvalidWindow(window) => write!(
                formatter,
                "Window size must be a positive odd number, got {}",
                window
            ),
        }
    }
}

impl From<ScanError> for String {
    fn from(err: ScanError) -> Self {
        err.to_string()
    }
}
