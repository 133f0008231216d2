use std::cmp::Ordering;

#[inline]
fn median_of_three_index(data: &[f64], low: usize, mid: usize, high: usize) -> usize {
    let a = data[low];
    let b = data[mid];
    let c = data[high];
    if (a <= b && b <= c) || (c <= b && b <= a) {
        mid
    } else if (b <= a && a <= c) || (c <= a && a <= b) {
        low
    } else {
        high
    }
}

/// Partition data in-place using Lomuto scheme
fn partition_inplace(data: &mut [f64], low: usize, high: usize) -> usize {
    if low >= high {
        return low;
    }
    let mid = low + (high - low) / 2;
    let pivot_index = median_of_three_index(data, low, mid, high);

    data.swap(pivot_index, high);
    let pivot_value = data[high];

    let mut i = low;
    for j in low..high {
        if data[j].total_cmp(&pivot_value) != Ordering::Greater {
            data.swap(i, j);
            i += 1;
        }
    }
    data.swap(i, high);
    i
}

// Iterative quickselect; leaves data[..k] <= data[k] <= data[k+1..]
fn select_inplace(data: &mut [f64], k: usize) -> Option<f64> {
    if data.is_empty() || k >= data.len() {
        return None;
    }

    let mut low = 0;
    let mut high = data.len() - 1;

    loop {
        if low == high {
            return if low == k { Some(data[low]) } else { None };
        }
        let pivot_index = partition_inplace(data, low, high);
        match pivot_index.cmp(&k) {
            Ordering::Equal => return Some(data[k]),
            Ordering::Greater => {
                if pivot_index == 0 {
                    return None;
                }
                high = pivot_index - 1;
            }
            Ordering::Less => {
                low = pivot_index + 1;
            }
        }
        if low > high {
            return None;
        }
    }
}

pub fn median(data: &[f64]) -> Option<f64> {
    let size = data.len();
    if size == 0 {
        return None;
    }
    let mut data_copy = data.to_vec();
    match size {
        even if even % 2 == 0 => {
            let k1 = (even / 2) - 1;
            let k2 = even / 2;
            let fst = select_inplace(&mut data_copy, k1)?;
            let snd = data_copy[k2..]
                .iter()
                .copied()
                .min_by(|a, b| a.total_cmp(b))?;
            Some((fst + snd) / 2.0)
        }
        odd => select_inplace(&mut data_copy, odd / 2),
    }
}

pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        None
    } else {
        Some(data.iter().sum::<f64>() / data.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rng, seq::SliceRandom};

    fn get_naive_median(data: &[f64]) -> Option<f64> {
        let size = data.len();
        if size == 0 {
            return None;
        }
        let mut sorted_data = data.to_vec();
        sorted_data.sort_by(|a, b| a.total_cmp(b));
        if size % 2 == 0 {
            Some((sorted_data[(size / 2) - 1] + sorted_data[size / 2]) / 2.0)
        } else {
            Some(sorted_data[size / 2])
        }
    }

    fn generate_random_data(size: usize) -> Vec<f64> {
        let mut rng = rng();
        let mut data: Vec<f64> = (0..size).map(|x| x as f64 * 0.5 - 3.0).collect();
        data.shuffle(&mut rng);
        data
    }

    #[test]
    fn median_empty_is_none() {
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn median_odd_and_even() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(&[7.5]), Some(7.5));
    }

    #[test]
    fn median_with_duplicates() {
        assert_eq!(median(&[1.0, 1.0, 1.0, 5.0]), Some(1.0));
        assert_eq!(median(&[2.0, 2.0, 2.0, 2.0, 2.0]), Some(2.0));
    }

    #[test]
    fn median_matches_naive_on_shuffled_input() {
        for size in [1, 2, 5, 10, 101, 1000] {
            let data = generate_random_data(size);
            assert_eq!(median(&data), get_naive_median(&data), "size {}", size);
        }
    }

    #[test]
    fn median_sorted_and_reverse_sorted() {
        let sorted: Vec<f64> = (0..51).map(|x| x as f64).collect();
        let reversed: Vec<f64> = sorted.iter().rev().copied().collect();
        assert_eq!(median(&sorted), Some(25.0));
        assert_eq!(median(&reversed), Some(25.0));
    }

    #[test]
    fn mean_of_values() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[1.0, 2.0, 6.0]), Some(3.0));
    }
}
