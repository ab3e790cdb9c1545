//! Backend-agnostic threading primitives.
//!
//! Parallel kernel paths coordinate through this shim instead of naming a
//! concrete threading facility. Two backends are provided:
//!
//! - [`OsBackend`]: forwards to the host's native facility (`std::thread`
//!   plus `parking_lot` synchronization);
//! - [`SpinBackend`]: self-contained atomics-based synchronization for hosts
//!   whose native facility is unavailable or untrusted.
//!
//! [`DefaultBackend`] selects between them at build time; enabling the
//! `spin-sync` cargo feature switches the default to [`SpinBackend`]. All
//! parallel-region code is written against [`ThreadBackend`] only.
//!
//! Every fallible operation returns the facility's integer status verbatim
//! (zero on success); the shim never translates, retries, or suppresses.
//! None of the primitives supports cancellation or timeouts: a blocked
//! `join`, `mutex_lock`, or `barrier_wait` stays blocked until its
//! counterpart condition arrives, and liveness (e.g. every barrier
//! participant eventually waiting) is the caller's responsibility.

mod os;
mod spin;
mod team;

pub use os::OsBackend;
pub use spin::SpinBackend;
pub use team::{team_run, TeamContext};

/// Facility status code: zero is success, non-zero is the facility's own
/// error code, forwarded unchanged.
pub type ThreadStatus = i32;

/// Success.
pub const THREAD_OK: ThreadStatus = 0;

/// Spawn failed and the facility supplied no code of its own.
pub const THREAD_AGAIN: ThreadStatus = 11;

/// The joined thread terminated abnormally instead of returning.
pub const THREAD_CHILD: ThreadStatus = 10;

/// The minimal concurrency surface parallel kernel code may rely on.
///
/// Handles are opaque: callers create them, share them by reference for the
/// lifetime of a parallel region, and destroy them explicitly. Destruction
/// takes the handle by value, so the type system rules out destroying a
/// primitive that other references still reach; the same move discipline
/// makes a second `join` on one handle unrepresentable.
pub trait ThreadBackend {
    /// Joinable handle to a spawned thread returning `T`.
    type Thread<T: Send + 'static>;
    /// Mutual-exclusion handle.
    type Mutex: Send + Sync + 'static;
    /// Barrier handle; participant count is fixed at initialization.
    type Barrier: Send + Sync + 'static;
    /// One-time-initialization flag.
    type OnceFlag: Send + Sync + 'static;

    /// A fresh, unused once flag, usable in `static` position.
    const ONCE_INIT: Self::OnceFlag;

    /// Start a new thread of control running `entry`.
    ///
    /// On failure the facility's status is returned and no handle is
    /// produced; the failure is never silently dropped.
    fn spawn<T, F>(entry: F) -> (ThreadStatus, Option<Self::Thread<T>>)
    where
        T: Send + 'static,
        F: FnOnce() -> T + Send + 'static;

    /// Block until the target thread completes, returning its status and
    /// return value. A panicked thread yields [`THREAD_CHILD`] and no value.
    fn join<T: Send + 'static>(thread: Self::Thread<T>) -> (ThreadStatus, Option<T>);

    fn mutex_init() -> Self::Mutex;

    /// Destroy a mutex. Must only be called once all lock/unlock activity
    /// has ceased; taking `self` by value enforces exclusive access.
    fn mutex_destroy(mutex: Self::Mutex) -> ThreadStatus;

    /// Block until exclusive ownership is acquired. Re-entrant locking by
    /// the owning thread is undefined.
    fn mutex_lock(mutex: &Self::Mutex) -> ThreadStatus;

    /// Release ownership.
    ///
    /// # Safety
    ///
    /// The calling thread must currently hold the mutex. Unlocking a mutex
    /// that is not held corrupts the facility's state.
    unsafe fn mutex_unlock(mutex: &Self::Mutex) -> ThreadStatus;

    /// A reusable barrier for exactly `participants` waiters per round.
    fn barrier_init(participants: usize) -> Self::Barrier;

    fn barrier_destroy(barrier: Self::Barrier) -> ThreadStatus;

    /// Block until `participants` threads have called `barrier_wait` on this
    /// barrier, then release them all together. The barrier is immediately
    /// reusable for the next round. Calling with fewer eventual waiters than
    /// the participant count deadlocks; with more, behavior is undefined.
    fn barrier_wait(barrier: &Self::Barrier) -> ThreadStatus;

    /// Run `init` exactly once process-wide for this flag, no matter how
    /// many threads race here. Every caller, including those that do not
    /// run `init`, observes its effects as completed before returning.
    fn once(flag: &Self::OnceFlag, init: impl FnOnce());
}

/// The backend selected at build time.
#[cfg(not(feature = "spin-sync"))]
pub type DefaultBackend = OsBackend;

/// The backend selected at build time.
#[cfg(feature = "spin-sync")]
pub type DefaultBackend = SpinBackend;
