//! Department sampling without replacement.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::catalogue::DepartmentCatalogue;

/// Minimum number of departments assigned to a user.
pub const MIN_DEPARTMENTS: usize = 1;

/// Maximum number of departments assigned to a user.
pub const MAX_DEPARTMENTS: usize = 3;

/// Select between [`MIN_DEPARTMENTS`] and [`MAX_DEPARTMENTS`] distinct labels.
///
/// The size is drawn uniformly from the allowed range (clamped to the
/// catalogue size), then the labels are picked by shuffling the catalogue and
/// keeping the head. Output order carries no meaning.
///
/// # Example
///
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use user_stub_data::{DepartmentCatalogue, sample_departments};
///
/// let catalogue = DepartmentCatalogue::standard();
/// let mut rng = ChaCha8Rng::seed_from_u64(7);
/// let picked = sample_departments(&mut rng, &catalogue);
///
/// assert!((1..=3).contains(&picked.len()));
/// assert!(picked.iter().all(|label| catalogue.contains(label)));
/// ```
pub fn sample_departments<R>(rng: &mut R, catalogue: &DepartmentCatalogue) -> Vec<String>
where
    R: Rng + ?Sized,
{
    let labels = catalogue.labels();
    let upper = MAX_DEPARTMENTS.min(labels.len());
    let lower = MIN_DEPARTMENTS.min(upper);

    let count = if lower == upper {
        lower
    } else {
        rng.random_range(lower..=upper)
    };

    let mut shuffled: Vec<&String> = labels.iter().collect();
    shuffled.shuffle(rng);
    shuffled.truncate(count);
    shuffled.into_iter().cloned().collect()
}
