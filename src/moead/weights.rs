//! Weight vectors and neighborhoods.

/// `C(n, k)`, saturating at `usize::MAX`.
fn binomial(n: usize, k: usize) -> usize {
    let k = k.min(n.saturating_sub(k));
    let mut acc: u128 = 1;
    for i in 0..k {
        acc = acc * (n - i) as u128 / (i + 1) as u128;
        if acc > usize::MAX as u128 {
            return usize::MAX;
        }
    }
    acc as usize
}

/// Number of points of the `h`-division lattice for `m` objectives.
pub fn binomial_points(h: usize, m: usize) -> usize {
    binomial(h + m - 1, m - 1)
}

/// Largest number of divisions `H` whose simplex lattice for `m` objectives
/// has at most `n` points, i.e. `C(H + m - 1, m - 1) <= n`.
///
/// Returns 0 when even `H = 1` (which yields `m` points) does not fit.
pub fn divisions_for(n: usize, m: usize) -> usize {
    if m == 0 || n < m {
        return 0;
    }
    let mut h = 1;
    while binomial(h + m, m - 1) <= n {
        h += 1;
    }
    h
}

/// Das-Dennis lattice: every `w` with `w_k = j_k / h`, `Σ j_k = h`.
///
/// # Examples
///
/// ```
/// use u_metaopt::moead::das_dennis;
///
/// let w = das_dennis(2, 3);
/// assert_eq!(w.len(), 6);
/// assert!(w.iter().all(|v| (v.iter().sum::<f64>() - 1.0).abs() < 1e-12));
/// ```
pub fn das_dennis(h: usize, m: usize) -> Vec<Vec<f64>> {
    fn fill(left: usize, slot: usize, h: usize, current: &mut [usize], out: &mut Vec<Vec<f64>>) {
        if slot + 1 == current.len() {
            current[slot] = left;
            out.push(current.iter().map(|&j| j as f64 / h as f64).collect());
            return;
        }
        for j in (0..=left).rev() {
            current[slot] = j;
            fill(left - j, slot + 1, h, current, out);
        }
    }

    if m == 0 || h == 0 {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(binomial_points(h, m));
    fill(h, 0, h, &mut vec![0; m], &mut out);
    out
}

/// Indices of the `t` nearest weight vectors (Euclidean) for each vector,
/// nearest first. Every vector is its own first neighbor.
pub fn neighborhoods(weights: &[Vec<f64>], t: usize) -> Vec<Vec<usize>> {
    let t = t.min(weights.len());
    weights
        .iter()
        .enumerate()
        .map(|(i, wi)| {
            let dist: Vec<f64> = weights
                .iter()
                .map(|wj| wi.iter().zip(wj).map(|(a, b)| (a - b) * (a - b)).sum())
                .collect();
            let mut order: Vec<usize> = (0..weights.len()).collect();
            order.sort_by(|&a, &b| dist[a].total_cmp(&dist[b]).then((a != i).cmp(&(b != i))));
            order.truncate(t);
            order
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binomial() {
        assert_eq!(binomial(5, 2), 10);
        assert_eq!(binomial(14, 2), 91);
        assert_eq!(binomial(7, 0), 1);
    }

    #[test]
    fn test_divisions_for() {
        // Two objectives: H + 1 points.
        assert_eq!(divisions_for(100, 2), 99);
        // Three objectives: C(14, 2) = 91 <= 100 < C(15, 2) = 105.
        assert_eq!(divisions_for(100, 3), 12);
        assert_eq!(divisions_for(2, 3), 0);
        assert_eq!(divisions_for(3, 3), 1);
    }

    #[test]
    fn test_lattice_size_and_simplex() {
        for (h, m) in [(99, 2), (12, 3), (4, 4)] {
            let w = das_dennis(h, m);
            assert_eq!(w.len(), binomial_points(h, m));
            for v in &w {
                assert_eq!(v.len(), m);
                assert!((v.iter().sum::<f64>() - 1.0).abs() < 1e-12);
                assert!(v.iter().all(|&c| (0.0..=1.0).contains(&c)));
            }
        }
    }

    #[test]
    fn test_neighborhoods() {
        let w = das_dennis(4, 2);
        let nb = neighborhoods(&w, 3);
        assert_eq!(nb.len(), 5);
        for (i, hood) in nb.iter().enumerate() {
            assert_eq!(hood.len(), 3);
            assert_eq!(hood[0], i);
        }
        // Interior vector 2 sits between 1 and 3.
        let mut middle = nb[2].clone();
        middle.sort_unstable();
        assert_eq!(middle, vec![1, 2, 3]);
    }
}
