//! Crowding distance, the diversity estimate used to break ties between
//! candidates of the same front.

use crate::score::Scores;

/// Index of a front member in the input slice.
type MemberIndex = usize;

/// Computes crowding distance of each member of a single front.
///
/// For every objective, members are sorted by that objective. The members
/// with the lowest and the highest value get an infinite distance, every
/// other member accumulates `(next - prev) / (max - min)` of its neighbours.
/// An objective with zero range adds nothing. Fronts of one or two members
/// are all boundary, so every distance is infinite.
///
/// Distances are returned in input order. Comparing distances across fronts
/// is meaningless.
///
/// # Examples
/// ```
/// # use induction_moga::crowding::crowding_distance;
/// let front = [[1.0, 5.0], [3.0, 3.0], [5.0, 1.0]];
/// let distances = crowding_distance(&front.iter().collect::<Vec<_>>());
/// assert!(distances[0].is_infinite());
/// assert_eq!(distances[1], 2.0);
/// assert!(distances[2].is_infinite());
/// ```
pub fn crowding_distance<const N: usize>(front: &[&Scores<N>]) -> Vec<f64> {
  let len = front.len();
  if len <= 2 {
    return vec![f64::INFINITY; len];
  }

  let mut distances = vec![0.0; len];
  let mut order: Vec<MemberIndex> = (0..len).collect();
  for o_idx in 0..N {
    // sort members by their scores of objective `o`
    order.sort_by(|&a, &b| front[a][o_idx].total_cmp(&front[b][o_idx]));

    // boundary members are always kept
    let first = order[0];
    let last = order[len - 1];
    distances[first] = f64::INFINITY;
    distances[last] = f64::INFINITY;

    let range = front[last][o_idx] - front[first][o_idx];
    if range <= 0.0 {
      continue;
    }
    for window in order.windows(3) {
      let (prev, idx, next) = (window[0], window[1], window[2]);
      distances[idx] += (front[next][o_idx] - front[prev][o_idx]) / range;
    }
  }

  distances
}
