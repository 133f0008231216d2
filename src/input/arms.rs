use crate::utils::{autosome_number, Result};
use std::{collections::HashMap, fs, io::BufRead};

// End of the p arm (start of the centromere) for chromosomes 1-22, GRCh37
const HG19_P_ARM_ENDS: [u64; 22] = [
    125_000_000,
    93_300_000,
    91_000_000,
    50_400_000,
    48_400_000,
    61_000_000,
    59_900_000,
    45_600_000,
    49_000_000,
    40_200_000,
    53_700_000,
    35_800_000,
    17_900_000,
    17_600_000,
    19_000_000,
    36_600_000,
    24_000_000,
    17_200_000,
    26_500_000,
    27_500_000,
    13_200_000,
    14_700_000,
];

/// Known p/q arm boundary coordinate per autosome.
#[derive(Debug, PartialEq, Clone)]
pub struct ArmBreakpoints {
    breakpoints: BreakpointInfo,
}

#[derive(Debug, PartialEq, Clone)]
enum BreakpointInfo {
    PresetHg19,
    Custom(HashMap<u32, u64>),
}

impl ArmBreakpoints {
    /// `hg19` selects the built-in table, anything else is read as a file.
    pub fn new(encoding: &str) -> Result<Self> {
        let breakpoints = match encoding {
            "hg19" => BreakpointInfo::PresetHg19,
            _ => {
                let file =
                    fs::File::open(encoding).map_err(|e| format!("File {}: {}", encoding, e))?;
                let reader = std::io::BufReader::new(file);
                return Self::from_reader(reader);
            }
        };
        Ok(Self { breakpoints })
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut breakpoints = HashMap::new();

        for (line_number, line) in reader.lines().enumerate() {
            let line =
                line.map_err(|e| format!("Error reading line {}: {}", line_number + 1, e))?;
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }

            let mut parts = line.split_whitespace();
            let missing = || format!("Missing chromosome/coordinate at line {}", line_number + 1);
            let chrom = parts.next().ok_or_else(missing)?;
            let coord = parts.next().ok_or_else(missing)?;

            let chrom = autosome_number(chrom).ok_or_else(|| {
                format!("Invalid autosome at line {}: {}", line_number + 1, chrom)
            })?;
            let coord = coord.parse::<u64>().map_err(|e| {
                format!("Invalid coordinate at line {}, {}", line_number + 1, e)
            })?;

            if breakpoints.insert(chrom, coord).is_some() {
                Err(format!(
                    "Duplicate chromosome entry at line {}: {}",
                    line_number + 1,
                    chrom
                ))?
            }
        }

        Ok(Self {
            breakpoints: BreakpointInfo::Custom(breakpoints),
        })
    }

    pub fn get(&self, chrom: u32) -> Option<u64> {
        match &self.breakpoints {
            BreakpointInfo::PresetHg19 => chrom
                .checked_sub(1)
                .and_then(|index| HG19_P_ARM_ENDS.get(index as usize))
                .copied(),
            BreakpointInfo::Custom(breakpoints) => breakpoints.get(&chrom).copied(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn arms_preset_hg19() {
        let arms = ArmBreakpoints::new("hg19").unwrap();
        assert_eq!(arms.get(1), Some(125_000_000));
        assert_eq!(arms.get(22), Some(14_700_000));
        assert_eq!(arms.get(0), None);
        assert_eq!(arms.get(23), None);
    }

    #[test]
    fn arms_from_reader() {
        let data = "\
chr1 1000\n\
2 500\n";
        let arms = ArmBreakpoints::from_reader(Cursor::new(data)).unwrap();
        assert_eq!(arms.get(1), Some(1000));
        assert_eq!(arms.get(2), Some(500));
        assert_eq!(arms.get(3), None);
    }

    #[test]
    fn arms_from_reader_incomplete_line_err() {
        let data = "chr1 1000\nchr2\n";
        assert!(ArmBreakpoints::from_reader(Cursor::new(data)).is_err());
    }

    #[test]
    fn arms_from_reader_duplicate_err() {
        let data = "chr1 1000\n1 2000\n";
        let result = ArmBreakpoints::from_reader(Cursor::new(data));
        assert_eq!(
            result.unwrap_err(),
            "Duplicate chromosome entry at line 2: 1".to_string()
        );
    }

    #[test]
    fn arms_missing_file_err() {
        assert!(ArmBreakpoints::new("/nonexistent/arms.txt").is_err());
    }
}
