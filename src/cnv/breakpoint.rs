/// Positions of the genes at the center of each smoothing window, so that
/// element `i` is the coordinate of smoothed value `i`.
pub fn aligned_positions(starts: &[u64], window: usize) -> &[u64] {
    if window == 0 || window > starts.len() {
        return &[];
    }
    let half = window / 2;
    &starts[half..half + starts.len() - window + 1]
}

/// Index of the position closest to `target`; the first one wins ties.
pub fn locate_breakpoint(positions: &[u64], target: u64) -> Option<usize> {
    positions
        .iter()
        .enumerate()
        .min_by_key(|(_, &pos)| pos.abs_diff(target))
        .map(|(index, _)| index)
}
