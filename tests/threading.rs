//! Cross-thread behavior of the primitive shim, exercised on both backends.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::time::Duration;

use gemm_frame::thread::{DefaultBackend, OsBackend, SpinBackend, ThreadBackend, THREAD_OK};

const JOIN_TIMEOUT: Duration = Duration::from_secs(10);

/// N racing threads, one initializer run, and every thread observes the
/// initialized state after `once` returns.
fn once_runs_exactly_once<B: ThreadBackend>() {
    let flag = Arc::new(B::ONCE_INIT);
    let runs = Arc::new(AtomicUsize::new(0));
    let value = Arc::new(AtomicUsize::new(0));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let flag = Arc::clone(&flag);
        let runs = Arc::clone(&runs);
        let value = Arc::clone(&value);
        let (status, handle) = B::spawn(move || {
            B::once(&flag, || {
                runs.fetch_add(1, Ordering::SeqCst);
                value.store(42, Ordering::Relaxed);
            });
            // The happens-before edge from the initializing call makes the
            // store visible to every caller, initializer or not.
            assert_eq!(value.load(Ordering::Relaxed), 42);
        });
        assert_eq!(status, THREAD_OK);
        handles.push(handle.unwrap());
    }
    for handle in handles {
        let (status, _) = B::join(handle);
        assert_eq!(status, THREAD_OK);
    }
    assert_eq!(runs.load(Ordering::SeqCst), 1);
}

#[test]
fn test_once_exactly_once_os() {
    once_runs_exactly_once::<OsBackend>();
}

#[test]
fn test_once_exactly_once_spin() {
    once_runs_exactly_once::<SpinBackend>();
}

/// Every participant increments before waiting, so every participant must
/// read the full count after release, never a partial value.
fn barrier_releases_whole_group<B: ThreadBackend>() {
    const PARTICIPANTS: usize = 4;
    let barrier = Arc::new(B::barrier_init(PARTICIPANTS));
    let counter = Arc::new(AtomicUsize::new(0));

    let mut handles = Vec::new();
    for _ in 0..PARTICIPANTS {
        let barrier = Arc::clone(&barrier);
        let counter = Arc::clone(&counter);
        let (status, handle) = B::spawn(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            assert_eq!(B::barrier_wait(&barrier), THREAD_OK);
            counter.load(Ordering::SeqCst)
        });
        assert_eq!(status, THREAD_OK);
        handles.push(handle.unwrap());
    }
    for handle in handles {
        let (status, seen) = B::join(handle);
        assert_eq!(status, THREAD_OK);
        assert_eq!(seen, Some(PARTICIPANTS));
    }
}

#[test]
fn test_barrier_round_trip_os() {
    barrier_releases_whole_group::<OsBackend>();
}

#[test]
fn test_barrier_round_trip_spin() {
    barrier_releases_whole_group::<SpinBackend>();
}

/// The barrier is reusable: a second round completes with the same handle.
fn barrier_is_reusable<B: ThreadBackend>() {
    const PARTICIPANTS: usize = 3;
    let barrier = Arc::new(B::barrier_init(PARTICIPANTS));

    let mut handles = Vec::new();
    for _ in 0..PARTICIPANTS {
        let barrier = Arc::clone(&barrier);
        let (status, handle) = B::spawn(move || {
            for _ in 0..100 {
                assert_eq!(B::barrier_wait(&barrier), THREAD_OK);
            }
        });
        assert_eq!(status, THREAD_OK);
        handles.push(handle.unwrap());
    }
    for handle in handles {
        assert_eq!(B::join(handle).0, THREAD_OK);
    }
}

#[test]
fn test_barrier_reusable_os() {
    barrier_is_reusable::<OsBackend>();
}

#[test]
fn test_barrier_reusable_spin() {
    barrier_is_reusable::<SpinBackend>();
}

/// Lock/unlock provides mutual exclusion: no two threads are ever inside
/// the critical section at once.
fn mutex_excludes<B: ThreadBackend>() {
    let mutex = Arc::new(B::mutex_init());
    let inside = Arc::new(AtomicBool::new(false));
    let entries = Arc::new(AtomicUsize::new(0));

    let mut handles = Vec::new();
    for _ in 0..4 {
        let mutex = Arc::clone(&mutex);
        let inside = Arc::clone(&inside);
        let entries = Arc::clone(&entries);
        let (status, handle) = B::spawn(move || {
            for _ in 0..200 {
                assert_eq!(B::mutex_lock(&mutex), THREAD_OK);
                assert!(!inside.swap(true, Ordering::SeqCst), "lock is not exclusive");
                entries.fetch_add(1, Ordering::SeqCst);
                inside.store(false, Ordering::SeqCst);
                assert_eq!(unsafe { B::mutex_unlock(&mutex) }, THREAD_OK);
            }
        });
        assert_eq!(status, THREAD_OK);
        handles.push(handle.unwrap());
    }
    for handle in handles {
        assert_eq!(B::join(handle).0, THREAD_OK);
    }
    assert_eq!(entries.load(Ordering::SeqCst), 800);
}

#[test]
fn test_mutex_mutual_exclusion_os() {
    mutex_excludes::<OsBackend>();
}

#[test]
fn test_mutex_mutual_exclusion_spin() {
    mutex_excludes::<SpinBackend>();
}

/// Regression guard: unlock must genuinely release ownership, not attempt a
/// second acquisition. A lock/unlock on one thread followed by a lock on
/// another must complete within a bounded wait; an unlock that re-locks
/// would leave the second thread blocked forever.
fn unlock_releases_ownership<B: ThreadBackend>() {
    let mutex = Arc::new(B::mutex_init());

    B::mutex_lock(&mutex);
    // Safety: held by this thread.
    unsafe { B::mutex_unlock(&mutex) };

    let (tx, rx) = mpsc::channel();
    let m = Arc::clone(&mutex);
    let (status, handle) = B::spawn(move || {
        assert_eq!(B::mutex_lock(&m), THREAD_OK);
        tx.send(()).unwrap();
        unsafe { B::mutex_unlock(&m) };
    });
    assert_eq!(status, THREAD_OK);

    assert!(
        rx.recv_timeout(JOIN_TIMEOUT).is_ok(),
        "unlock did not release the mutex; a second thread could not acquire it"
    );
    assert_eq!(B::join(handle.unwrap()).0, THREAD_OK);
}

#[test]
fn test_unlock_releases_ownership_os() {
    unlock_releases_ownership::<OsBackend>();
}

#[test]
fn test_unlock_releases_ownership_spin() {
    unlock_releases_ownership::<SpinBackend>();
}

/// Whatever backend the build selected satisfies the same contracts.
#[test]
fn test_default_backend_smoke() {
    once_runs_exactly_once::<DefaultBackend>();
    barrier_releases_whole_group::<DefaultBackend>();
    unlock_releases_ownership::<DefaultBackend>();
}
