//! Execution strategies for per-candidate evaluation.

use rayon::prelude::*;

/// How candidates of a generation are evaluated.
///
/// Evaluation of one candidate never depends on another, so every strategy
/// yields the same scores in the same order. Only wall-clock time differs.
///
/// **Parallelization is implemented with [rayon]. For small fleets the
/// overhead usually outweighs the gain. Benchmark if in doubt.**
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Execution {
  /// No parallelization involved.
  #[default]
  Sequential,
  /// Evaluates **each** candidate as a separate parallel task.
  ParallelEach,
  /// Splits candidates into one **batch** per available thread.
  ParallelBatch,
}

impl Execution {
  /// Applies `f` to each item, collecting results in input order.
  pub(crate) fn map<T, R, F>(self, items: &[T], f: F) -> Vec<R>
  where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync + Send,
  {
    match self {
      Execution::Sequential => items.iter().map(f).collect(),
      Execution::ParallelEach => items.par_iter().map(f).collect(),
      Execution::ParallelBatch => {
        let chunk_size = (items.len() / rayon::current_num_threads()).max(1);
        items
          .par_chunks(chunk_size)
          .flat_map_iter(|chunk| chunk.iter().map(&f))
          .collect()
      }
    }
  }
}
