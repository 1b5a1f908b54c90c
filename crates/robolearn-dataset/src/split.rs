use crate::dataset::Dataset;
use crate::error::{DatasetError, Result};
use crate::table::Table;

/// Fraction of rows held out for testing when none is given.
pub const DEFAULT_TEST_SIZE: f64 = 0.2;

/// Train/test partition of a [`Table`]. Both sides keep the source schema.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainTestSplit {
    pub train: Table,
    pub test: Table,
}

/// Compute `(train, test)` sizes for `n` rows.
///
/// The test side is `ceil(test_size * n)`, the train side takes the rest.
pub fn partition_sizes(n: usize, test_size: f64) -> Result<(usize, usize)> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(DatasetError::InvalidSplit(format!(
            "test_size must be in (0, 1), got {}",
            test_size
        )));
    }

    let n_test = (test_size * n as f64).ceil() as usize;
    let n_train = n.saturating_sub(n_test);

    if n_train == 0 || n_test == 0 {
        return Err(DatasetError::InvalidSplit(format!(
            "{} rows with test_size {} leaves an empty partition",
            n, test_size
        )));
    }

    Ok((n_train, n_test))
}

impl Dataset {
    /// Randomly partition the tabular projection into train and test rows.
    ///
    /// With a `seed` the partition is reproducible.
    pub fn split_train_test(&self, test_size: f64, seed: Option<u64>) -> Result<TrainTestSplit> {
        if !cfg!(feature = "split") {
            return Err(DatasetError::MissingDependency {
                feature: "split",
                operation: "split_train_test",
            });
        }

        let table = self.to_table()?;
        let (n_train, n_test) = partition_sizes(table.len(), test_size)?;
        let order = shuffled_indices(table.len(), seed);

        let columns = table.columns().to_vec();
        let mut slots: Vec<Option<_>> = table.into_rows().into_iter().map(Some).collect();
        let mut take = |indices: &[usize]| -> Vec<_> {
            indices.iter().filter_map(|&i| slots[i].take()).collect()
        };

        let test = take(&order[..n_test]);
        let train = take(&order[n_test..n_test + n_train]);

        tracing::debug!(train = train.len(), test = test.len(), ?seed, "Split dataset");

        Ok(TrainTestSplit {
            train: Table::with_columns(columns.clone(), train),
            test: Table::with_columns(columns, test),
        })
    }
}

#[cfg(feature = "split")]
fn shuffled_indices(n: usize, seed: Option<u64>) -> Vec<usize> {
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(&mut rng);
    indices
}

#[cfg(not(feature = "split"))]
fn shuffled_indices(n: usize, _seed: Option<u64>) -> Vec<usize> {
    (0..n).collect()
}
