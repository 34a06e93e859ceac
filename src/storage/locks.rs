//! Per-user mutual exclusion
//!
//! Hands out one mutex per user id. Work for different users proceeds in
//! parallel while work for the same user is serialized. An entry lives
//! only while some caller holds or waits on it, so the table stays as
//! small as the number of users currently active.
//!
//! A panic inside a locked section poisons nothing for later callers: the
//! guarded data is `()`, so the poison flag carries no information and is
//! ignored.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::FinbotError;
use crate::models::UserId;

#[derive(Default)]
pub struct UserLocks {
    locks: Mutex<HashMap<UserId, Arc<Mutex<()>>>>,
}

impl UserLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` while holding the user's lock
    ///
    /// The lock is released when `f` returns, including on early return
    /// through `?` inside it.
    pub fn with<T, F>(&self, user: UserId, f: F) -> Result<T, FinbotError>
    where
        F: FnOnce() -> Result<T, FinbotError>,
    {
        let lock = self.lock_for(user);
        let result = {
            let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
            f()
        };
        drop(lock);
        self.release(user);
        result
    }

    /// Number of users with a live lock entry
    pub fn len(&self) -> usize {
        self.table().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn table(&self) -> MutexGuard<'_, HashMap<UserId, Arc<Mutex<()>>>> {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_for(&self, user: UserId) -> Arc<Mutex<()>> {
        Arc::clone(self.table().entry(user).or_default())
    }

    // Clones are only made under the table lock, so a count of one means
    // nobody else holds or waits on this entry.
    fn release(&self, user: UserId) {
        let mut locks = self.table();
        if locks.get(&user).is_some_and(|lock| Arc::strong_count(lock) == 1) {
            locks.remove(&user);
        }
    }
}
