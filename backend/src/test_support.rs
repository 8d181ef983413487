//! Test utilities for the backend crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`).
//! Compiled only for tests or with the `test-support` feature.

use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;
use user_stub_data::{UserCount, UserRecord};

use crate::domain::Error;
use crate::domain::ports::UsersQuery;

/// Clock whose current instant only moves when a test advances it.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    /// Start the clock at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Move the clock by `seconds`, which may be negative.
    pub fn advance_seconds(&self, seconds: i64) {
        *self.lock_clock() += TimeDelta::seconds(seconds);
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Users port that always fails with an internal error.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingUsersQuery;

impl FailingUsersQuery {
    /// Detail carried by the error; never sent to clients.
    pub const DETAIL: &'static str = "generator exploded";
}

impl UsersQuery for FailingUsersQuery {
    fn generate(&self, _count: UserCount) -> Result<Vec<UserRecord>, Error> {
        Err(Error::internal(Self::DETAIL))
    }
}
