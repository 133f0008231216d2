use kodama::{linkage, Dendrogram, Method};
use rayon::iter::{IntoParallelIterator, ParallelIterator};

/// Orders profiles by the leaves of a complete-linkage dendrogram over their
/// Euclidean distances, so that similar profiles end up next to each other.
pub fn cluster_order(profiles: &[Vec<f64>]) -> Vec<usize> {
    let num_profiles = profiles.len();
    if num_profiles < 3 {
        return (0..num_profiles).collect();
    }
    let mut dists = get_dist_matrix(profiles);
    let dendrogram = linkage(&mut dists, num_profiles, Method::Complete);
    leaf_order(&dendrogram, num_profiles)
}

fn leaf_order(dendrogram: &Dendrogram<f64>, num_leaves: usize) -> Vec<usize> {
    let steps = dendrogram.steps();
    let root = num_leaves + steps.len() - 1;
    let mut order = Vec::with_capacity(num_leaves);
    let mut stack = vec![root];
    while let Some(cluster) = stack.pop() {
        if cluster < num_leaves {
            order.push(cluster);
        } else {
            let step = &steps[cluster - num_leaves];
            stack.push(step.cluster2);
            stack.push(step.cluster1);
        }
    }
    order
}

fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Condensed upper-triangle distance matrix: (0,1), (0,2), ..., (1,2), ...
fn get_dist_matrix(profiles: &[Vec<f64>]) -> Vec<f64> {
    let n = profiles.len();
    let rows: Vec<Vec<f64>> = (0..n)
        .into_par_iter()
        .map(|i| {
            ((i + 1)..n)
                .map(|j| euclidean(&profiles[i], &profiles[j]))
                .collect()
        })
        .collect();
    let dists: Vec<f64> = rows.into_iter().flatten().collect();
    assert_eq!(dists.len(), n * (n - 1) / 2);
    dists
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dist_matrix_condensed_layout() {
        let profiles = vec![vec![0.0, 0.0], vec![3.0, 4.0], vec![0.0, 1.0]];
        assert_eq!(get_dist_matrix(&profiles), vec![5.0, 1.0, 18.0f64.sqrt()]);
    }

    #[test]
    fn cluster_order_groups_similar_profiles() {
        // two well-separated groups, interleaved in the input
        let profiles = vec![
            vec![0.0, 0.1],
            vec![5.0, 5.0],
            vec![0.1, 0.0],
            vec![5.1, 4.9],
            vec![0.0, 0.0],
        ];
        let order = cluster_order(&profiles);
        let mut sorted = order.clone();
        sorted.sort();
        assert_eq!(sorted, vec![0, 1, 2, 3, 4]);

        let group = |index: usize| profiles[index][0] > 2.0;
        let switches = order
            .windows(2)
            .filter(|w| group(w[0]) != group(w[1]))
            .count();
        assert_eq!(switches, 1);
    }

    #[test]
    fn cluster_order_small_inputs() {
        assert_eq!(cluster_order(&[]), Vec::<usize>::new());
        assert_eq!(cluster_order(&[vec![1.0]]), vec![0]);
        assert_eq!(cluster_order(&[vec![1.0], vec![2.0]]), vec![0, 1]);
    }
}
