/// Converts a log2(CPM/10+1) value back to linear CPM units.
#[inline]
pub fn to_linear(x: f64) -> f64 {
    (x.exp2() - 1.0) * 10.0
}

#[inline]
pub fn to_log2p1(x: f64) -> f64 {
    (x + 1.0).log2()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_log_scale(cpm: f64) -> f64 {
        (cpm / 10.0 + 1.0).log2()
    }

    #[test]
    fn to_linear_inverts_log_scaling() {
        for cpm in [0.0, 0.5, 5.0, 10.0, 123.4, 1e4, 1e6] {
            let roundtrip = to_linear(to_log_scale(cpm));
            assert!((roundtrip - cpm).abs() <= 1e-9 * cpm.max(1.0), "cpm {}", cpm);
        }
    }

    #[test]
    fn to_linear_known_values() {
        assert_eq!(to_linear(0.0), 0.0);
        assert_eq!(to_linear(1.0), 10.0);
        assert_eq!(to_linear(3.0), 70.0);
        assert!(to_linear(-1.0) < 0.0);
    }

    #[test]
    fn to_log2p1_known_values() {
        assert_eq!(to_log2p1(0.0), 0.0);
        assert_eq!(to_log2p1(7.0), 3.0);
    }
}
