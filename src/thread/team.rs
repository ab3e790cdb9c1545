//! Worker teams: a fixed-size parallel region over the primitive shim.
//!
//! `team_run` is the shape parallel kernel drivers use: spawn a team, hand
//! every worker its id and a shared barrier, join them all. The team owns
//! the barrier for the lifetime of the region; workers only synchronize
//! through the context they are given.

use std::sync::Arc;

use super::{ThreadBackend, ThreadStatus, THREAD_OK};

/// What one team worker sees: its id, the team width, and the team barrier.
pub struct TeamContext<B: ThreadBackend> {
    pub thread_id: usize,
    pub nthreads: usize,
    barrier: Arc<B::Barrier>,
}

impl<B: ThreadBackend> TeamContext<B> {
    /// Wait until every worker in the team has arrived here.
    pub fn barrier(&self) -> ThreadStatus {
        B::barrier_wait(&self.barrier)
    }
}

/// Run `work` on a team of `nthreads` workers and join them all.
///
/// Returns the first non-zero status observed, from either a failed spawn
/// or a failed join. A failed spawn aborts the region immediately and the
/// already-started workers are detached; since part of the team is missing,
/// callers must treat that status as fatal to the whole region.
pub fn team_run<B, F>(nthreads: usize, work: F) -> ThreadStatus
where
    B: ThreadBackend + 'static,
    F: Fn(&TeamContext<B>) + Send + Sync + 'static,
{
    let barrier = Arc::new(B::barrier_init(nthreads));
    let work = Arc::new(work);

    let mut handles = Vec::with_capacity(nthreads);
    for thread_id in 0..nthreads {
        let ctx = TeamContext {
            thread_id,
            nthreads,
            barrier: Arc::clone(&barrier),
        };
        let work = Arc::clone(&work);
        let (status, handle) = B::spawn(move || work(&ctx));
        match handle {
            Some(handle) if status == THREAD_OK => handles.push(handle),
            _ => return status,
        }
    }

    let mut first_failure = THREAD_OK;
    for handle in handles {
        let (status, _) = B::join(handle);
        if first_failure == THREAD_OK && status != THREAD_OK {
            first_failure = status;
        }
    }
    first_failure
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::thread::{OsBackend, SpinBackend};

    fn team_sees_full_counter_after_barrier<B: ThreadBackend + 'static>() {
        let before = Arc::new(AtomicUsize::new(0));
        let seen_min = Arc::new(AtomicUsize::new(usize::MAX));
        let b = Arc::clone(&before);
        let s = Arc::clone(&seen_min);

        let status = team_run::<B, _>(4, move |ctx| {
            b.fetch_add(1, Ordering::SeqCst);
            ctx.barrier();
            // Every worker must observe all four increments.
            s.fetch_min(b.load(Ordering::SeqCst), Ordering::SeqCst);
        });

        assert_eq!(status, THREAD_OK);
        assert_eq!(before.load(Ordering::SeqCst), 4);
        assert_eq!(seen_min.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_team_barrier_publishes_all_work_os() {
        team_sees_full_counter_after_barrier::<OsBackend>();
    }

    #[test]
    fn test_team_barrier_publishes_all_work_spin() {
        team_sees_full_counter_after_barrier::<SpinBackend>();
    }

    #[test]
    fn test_team_ids_are_distinct_and_dense() {
        let seen = Arc::new(AtomicUsize::new(0));
        let s = Arc::clone(&seen);
        let status = team_run::<OsBackend, _>(4, move |ctx| {
            assert_eq!(ctx.nthreads, 4);
            // Record each id as a bit; four distinct ids set four bits.
            s.fetch_or(1 << ctx.thread_id, Ordering::SeqCst);
        });
        assert_eq!(status, THREAD_OK);
        assert_eq!(seen.load(Ordering::SeqCst), 0b1111);
    }

    #[test]
    fn test_empty_team_is_a_no_op() {
        let status = team_run::<OsBackend, _>(0, |_| panic!("no workers expected"));
        assert_eq!(status, THREAD_OK);
    }
}
