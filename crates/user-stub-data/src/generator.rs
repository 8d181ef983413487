//! User record generation.
//!
//! The generator draws every random value from the RNG it is handed. A
//! seeded RNG therefore produces identical batches, which is what
//! [`generate_users_seeded`] relies on.

use fake::Fake;
use fake::faker::name::raw::{FirstName, LastName};
use fake::locales::EN;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use uuid::{Builder, Uuid};

use crate::catalogue::DepartmentCatalogue;
use crate::count::UserCount;
use crate::record::UserRecord;
use crate::sampler::sample_departments;

/// Prefix shared by every generated avatar URL.
const AVATAR_BASE_URL: &str = "https://avatars.githubusercontent.com/u/";

/// Largest numeric avatar identifier.
const MAX_AVATAR_ID: u32 = 100_000_000;

/// Generates `count` independent users in generation order.
///
/// No upper bound is enforced here; callers decide how many users a single
/// request may ask for.
///
/// # Example
///
/// ```
/// use user_stub_data::{DepartmentCatalogue, UserCount, generate_users};
///
/// let catalogue = DepartmentCatalogue::standard();
/// let count = UserCount::new(4).expect("non-zero");
/// let users = generate_users(&mut rand::rng(), count, &catalogue);
///
/// assert_eq!(users.len(), 4);
/// ```
pub fn generate_users<R>(
    rng: &mut R,
    count: UserCount,
    catalogue: &DepartmentCatalogue,
) -> Vec<UserRecord>
where
    R: Rng + ?Sized,
{
    let mut users = Vec::with_capacity(count.get());
    for _ in 0..count.get() {
        users.push(generate_single_user(rng, catalogue));
    }
    users
}

/// Generates `count` users from a ChaCha RNG seeded with `seed`.
///
/// The same `(seed, count, catalogue)` triple always yields the same users.
///
/// # Example
///
/// ```
/// use user_stub_data::{DepartmentCatalogue, UserCount, generate_users_seeded};
///
/// let catalogue = DepartmentCatalogue::standard();
/// let count = UserCount::new(2).expect("non-zero");
///
/// let first = generate_users_seeded(42, count, &catalogue);
/// let second = generate_users_seeded(42, count, &catalogue);
/// assert_eq!(first, second);
/// ```
#[must_use]
pub fn generate_users_seeded(
    seed: u64,
    count: UserCount,
    catalogue: &DepartmentCatalogue,
) -> Vec<UserRecord> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    generate_users(&mut rng, count, catalogue)
}

/// Generates a single user with the provided RNG.
pub fn generate_single_user<R>(rng: &mut R, catalogue: &DepartmentCatalogue) -> UserRecord
where
    R: Rng + ?Sized,
{
    let name = generate_name(rng);
    let avatar = generate_avatar_url(rng);
    let departments = sample_departments(rng, catalogue);
    let user_id = generate_user_id(rng);

    UserRecord {
        name,
        avatar,
        departments,
        user_id,
    }
}

fn generate_name<R>(rng: &mut R) -> String
where
    R: Rng + ?Sized,
{
    let first: String = FirstName(EN).fake_with_rng(rng);
    let last: String = LastName(EN).fake_with_rng(rng);
    format!("{first} {last}")
}

fn generate_avatar_url<R>(rng: &mut R) -> String
where
    R: Rng + ?Sized,
{
    let avatar_id = rng.random_range(0..=MAX_AVATAR_ID);
    format!("{AVATAR_BASE_URL}{avatar_id}")
}

/// Builds a UUID v4 from RNG bytes so seeded runs stay reproducible.
fn generate_user_id<R>(rng: &mut R) -> Uuid
where
    R: Rng + ?Sized,
{
    Builder::from_random_bytes(rng.random()).into_uuid()
}
