use super::ScanError;

/// Length of the constant track reported for chromosomes with too few genes.
pub const PLACEHOLDER_LEN: usize = 13;
pub const PLACEHOLDER_VALUE: f64 = 1.0;

/// Moving average over every full window of `window` consecutive values,
/// giving `values.len() - window + 1` means. Empty if the window does not fit.
pub fn moving_average(values: &[f64], window: usize) -> Vec<f64> {
    if window == 0 || window > values.len() {
        return Vec::new();
    }
    let width = window as f64;
    let mut smoothed = Vec::with_capacity(values.len() - window + 1);
    let mut sum: f64 = values[..window].iter().sum();
    smoothed.push(sum / width);
    for (leaving, entering) in values.iter().zip(&values[window..]) {
        sum += entering - leaving;
        smoothed.push(sum / width);
    }
    smoothed
}

/// Windows are centered on a gene, so the width must be odd.
pub fn check_window(window: usize) -> Result<(), ScanError> {
    if window % 2 == 1 {
        Ok(())
    } else {
        Err(ScanError::InvalidWindow(window))
    }
}

pub fn placeholder() -> Vec<f64> {
    vec![PLACEHOLDER_VALUE; PLACEHOLDER_LEN]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: &[f64], b: &[f64]) {
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b) {
            assert!((x - y).abs() < 1e-12, "{} != {}", x, y);
        }
    }

    #[test]
    fn moving_average_output_length() {
        let values: Vec<f64> = (0..20).map(|x| x as f64).collect();
        for window in [1, 3, 5, 19, 20] {
            assert_eq!(moving_average(&values, window).len(), 20 - window + 1);
        }
        assert!(moving_average(&values, 21).is_empty());
    }

    #[test]
    fn moving_average_values() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 10.0];
        assert_close(&moving_average(&values, 3), &[2.0, 3.0, 4.0, 19.0 / 3.0]);
        assert_close(&moving_average(&values, 1), &values);
    }

    #[test]
    fn moving_average_constant_input() {
        let values = vec![-0.25; 50];
        assert!(moving_average(&values, 11)
            .iter()
            .all(|v| (v + 0.25).abs() < 1e-12));
    }

    #[test]
    fn window_must_be_odd() {
        assert!(check_window(1).is_ok());
        assert!(check_window(101).is_ok());
        assert_eq!(check_window(0), Err(ScanError::InvalidWindow(0)));
        assert_eq!(check_window(4), Err(ScanError::InvalidWindow(4)));
    }

    #[test]
    fn placeholder_is_constant() {
        let values = placeholder();
        assert_eq!(values.len(), PLACEHOLDER_LEN);
        assert!(values.iter().all(|&v| v == PLACEHOLDER_VALUE));
    }
}
