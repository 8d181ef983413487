//! Synthetic user generation service backing the users port.
//!
//! `SyntheticUsers` owns the department catalogue and decides where
//! randomness comes from. Entropy mode draws from the calling thread's RNG,
//! so concurrent requests never contend. Seeded mode shares one
//! `ChaCha8Rng` behind a mutex, so a fixed seed replays the same sequence
//! of batches.

use std::sync::{Arc, Mutex};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;
use user_stub_data::{DepartmentCatalogue, UserCount, UserRecord, generate_users};

use crate::domain::Error;
use crate::domain::ports::UsersQuery;

/// Where [`SyntheticUsers`] draws random values from.
#[derive(Debug)]
pub enum RngSource {
    /// Fresh entropy from the current thread's RNG.
    Entropy,
    /// Deterministic sequence shared by all requests.
    Seeded(Mutex<ChaCha8Rng>),
}

impl RngSource {
    /// Build a seeded source from a 64-bit seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::Seeded(Mutex::new(ChaCha8Rng::seed_from_u64(seed)))
    }

    /// Select seeded or entropy mode based on an optional seed.
    #[must_use]
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or(Self::Entropy, Self::seeded)
    }
}

/// Generates users from a department catalogue and an [`RngSource`].
///
/// # Examples
/// ```
/// use user_stub_api::domain::ports::UsersQuery;
/// use user_stub_api::domain::{RngSource, SyntheticUsers};
/// use user_stub_data::UserCount;
///
/// let users = SyntheticUsers::standard(RngSource::seeded(7));
/// let count = UserCount::new(2).expect("non-zero count");
/// assert_eq!(users.generate(count).expect("generate").len(), 2);
/// ```
#[derive(Debug)]
pub struct SyntheticUsers {
    catalogue: Arc<DepartmentCatalogue>,
    rng: RngSource,
}

impl SyntheticUsers {
    /// Create a service over a custom catalogue.
    pub fn new(catalogue: Arc<DepartmentCatalogue>, rng: RngSource) -> Self {
        Self { catalogue, rng }
    }

    /// Create a service over the standard department catalogue.
    #[must_use]
    pub fn standard(rng: RngSource) -> Self {
        Self::new(Arc::new(DepartmentCatalogue::standard()), rng)
    }

    /// Whether responses are reproducible.
    #[must_use]
    pub fn is_seeded(&self) -> bool {
        matches!(self.rng, RngSource::Seeded(_))
    }
}

impl UsersQuery for SyntheticUsers {
    fn generate(&self, count: UserCount) -> Result<Vec<UserRecord>, Error> {
        debug!(count = count.get(), seeded = self.is_seeded(), "generating users");
        match &self.rng {
            RngSource::Entropy => Ok(generate_users(&mut rand::rng(), count, &self.catalogue)),
            RngSource::Seeded(rng) => {
                let mut guard = rng
                    .lock()
                    .map_err(|err| Error::internal(format!("seeded rng lock poisoned: {err}")))?;
                Ok(generate_users(&mut *guard, count, &self.catalogue))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::ErrorCode;

    #[fixture]
    fn three() -> UserCount {
        UserCount::new(3).expect("non-zero count")
    }

    #[rstest]
    fn entropy_source_returns_requested_count(three: UserCount) {
        let users = SyntheticUsers::standard(RngSource::Entropy);
        let generated = users.generate(three).expect("generate");
        assert_eq!(generated.len(), 3);
    }

    #[rstest]
    fn same_seed_yields_same_batches(three: UserCount) {
        let first = SyntheticUsers::standard(RngSource::seeded(42));
        let second = SyntheticUsers::standard(RngSource::seeded(42));

        for _ in 0..3 {
            assert_eq!(
                first.generate(three).expect("first"),
                second.generate(three).expect("second")
            );
        }
    }

    #[rstest]
    fn seeded_source_advances_between_calls(three: UserCount) {
        let users = SyntheticUsers::standard(RngSource::seeded(42));
        let first = users.generate(three).expect("first");
        let second = users.generate(three).expect("second");
        assert_ne!(first, second);
    }

    #[rstest]
    fn custom_catalogue_limits_departments(three: UserCount) {
        let catalogue = DepartmentCatalogue::new(["Paint"]).expect("catalogue");
        let users = SyntheticUsers::new(Arc::new(catalogue), RngSource::seeded(1));

        let generated = users.generate(three).expect("generate");
        let departments: HashSet<_> = generated
            .iter()
            .flat_map(|user| user.departments.iter().map(String::as_str))
            .collect();
        assert_eq!(departments, HashSet::from(["Paint"]));
    }

    #[rstest]
    #[case(None, false)]
    #[case(Some(9), true)]
    fn from_seed_selects_mode(#[case] seed: Option<u64>, #[case] seeded: bool) {
        let users = SyntheticUsers::standard(RngSource::from_seed(seed));
        assert_eq!(users.is_seeded(), seeded);
    }

    #[rstest]
    fn poisoned_lock_maps_to_internal_error(three: UserCount) {
        let users = Arc::new(SyntheticUsers::standard(RngSource::seeded(3)));
        let poisoner = Arc::clone(&users);
        let outcome = std::thread::spawn(move || {
            if let RngSource::Seeded(rng) = &poisoner.rng {
                let _guard = rng.lock().expect("lock");
                panic!("poison the rng");
            }
        })
        .join();
        assert!(outcome.is_err());

        let err = users.generate(three).expect_err("poisoned lock");
        assert_eq!(err.code(), ErrorCode::InternalError);
    }
}
