//! Work partitioning across crawl workers
//!
//! Pruning only pays off along a contiguous ascending run of one group, so
//! the default policy hands each worker one contiguous block of the
//! candidate list. Striping deals candidates round-robin instead: it spreads
//! load more evenly when one venue dominates, but each worker then sees every
//! `n`-th sequence number and a not-found result prunes far less.

use serde::Deserialize;

use crate::error::ConfigError;

/// How the candidate list is split across workers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartitionPolicy {
    /// Balanced contiguous blocks; concatenation restores the input order
    #[default]
    Contiguous,
    /// Round-robin: item `i` goes to partition `i % workers`
    Striped,
}

impl PartitionPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Contiguous => "contiguous",
            Self::Striped => "striped",
        }
    }
}

impl std::fmt::Display for PartitionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Split `items` into `workers` disjoint, order-preserving partitions.
///
/// Always returns exactly `workers` partitions; trailing ones are empty when
/// there are fewer items than workers. Contiguous block sizes differ by at
/// most one, larger blocks first.
pub fn partition<T: Clone>(
    items: &[T],
    workers: usize,
    policy: PartitionPolicy,
) -> Result<Vec<Vec<T>>, ConfigError> {
    if workers == 0 {
        return Err(ConfigError::ZeroWorkers);
    }

    let partitions = match policy {
        PartitionPolicy::Contiguous => {
            let base = items.len() / workers;
            let extra = items.len() % workers;
            let mut rest = items;
            (0..workers)
                .map(|i| {
                    let size = base + usize::from(i < extra);
                    let (head, tail) = rest.split_at(size);
                    rest = tail;
                    head.to_vec()
                })
                .collect()
        }
        PartitionPolicy::Striped => {
            let mut parts: Vec<Vec<T>> = (0..workers)
                .map(|_| Vec::with_capacity(items.len() / workers + 1))
                .collect();
            for (i, item) in items.iter().enumerate() {
                parts[i % workers].push(item.clone());
            }
            parts
        }
    };
    Ok(partitions)
}
