//! In-memory adapters for the driven ports.
//!
//! Each store owns its collection behind a single [`std::sync::Mutex`];
//! every read and write takes the lock, scans linearly, and releases it
//! before returning. Stores are shared through `Arc` and hold no global
//! state.
//!
//! Deleting a user or course does not remove its enrollments, and the
//! enrollment store does not reject a second enrollment for the same
//! (user, course) pair. The enrollment service check is the only guard
//! in this mode.

mod course_repository;
mod enrollment_repository;
mod seed;
mod storage_probe;
mod user_repository;

use std::cmp::Ordering;
use std::sync::{Mutex, MutexGuard};

use pagination::PageRequest;

pub use course_repository::MemoryCourseRepository;
pub use enrollment_repository::MemoryEnrollmentRepository;
pub use seed::{DemoSeedError, seed_demo_data};
pub use storage_probe::MemoryStorageProbe;
pub use user_repository::MemoryUserRepository;

/// Lock a collection, turning poisoning into the adapter's query error.
fn lock<'a, T, E>(
    collection: &'a Mutex<Vec<T>>,
    name: &str,
    query_error: impl FnOnce(String) -> E,
) -> Result<MutexGuard<'a, Vec<T>>, E> {
    collection
        .lock()
        .map_err(|_| query_error(format!("{name} store lock poisoned")))
}

/// Sort a snapshot of `items` and cut out the requested page.
fn sorted_page<T, F>(items: &[T], page: PageRequest, compare: F) -> (Vec<T>, u64)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    let mut snapshot = items.to_vec();
    snapshot.sort_by(compare);
    let total = snapshot.len() as u64;
    (page.window(snapshot), total)
}
