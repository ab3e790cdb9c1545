//! Self-contained fallback backend built on `std::sync::atomic`.
//!
//! Synchronization never leaves the process: a test-and-set spin mutex, a
//! sense-reversing spin barrier, and an atomic once flag. Thread creation
//! still forwards to the platform (only the synchronization facility is
//! replaced), so `spawn`/`join` are shared with the native backend.

use std::hint::spin_loop;
use std::sync::atomic::{AtomicBool, AtomicU8, AtomicUsize, Ordering};
use std::thread::{self, JoinHandle};

use super::{OsBackend, ThreadBackend, ThreadStatus, THREAD_OK};

/// Threading with library-internal synchronization primitives.
pub struct SpinBackend;

/// Test-and-set spin lock.
pub struct SpinMutex {
    locked: AtomicBool,
}

/// Sense-reversing barrier: waiters spin on the round counter, so the
/// barrier is reusable the moment the counter advances.
pub struct SpinBarrier {
    participants: usize,
    arrived: AtomicUsize,
    generation: AtomicUsize,
}

const ONCE_NEW: u8 = 0;
const ONCE_RUNNING: u8 = 1;
const ONCE_DONE: u8 = 2;

/// Three-state once flag: new, running, done.
pub struct SpinOnce {
    state: AtomicU8,
}

impl ThreadBackend for SpinBackend {
    type Thread<T: Send + 'static> = JoinHandle<T>;
    type Mutex = SpinMutex;
    type Barrier = SpinBarrier;
    type OnceFlag = SpinOnce;

    const ONCE_INIT: SpinOnce = SpinOnce {
        state: AtomicU8::new(ONCE_NEW),
    };

    fn spawn<T, F>(entry: F) -> (ThreadStatus, Option<JoinHandle<T>>)
    where
        T: Send + 'static,
        F: FnOnce() -> T + Send + 'static,
    {
        OsBackend::spawn(entry)
    }

    fn join<T: Send + 'static>(thread: JoinHandle<T>) -> (ThreadStatus, Option<T>) {
        OsBackend::join(thread)
    }

    fn mutex_init() -> SpinMutex {
        SpinMutex {
            locked: AtomicBool::new(false),
        }
    }

    fn mutex_destroy(mutex: SpinMutex) -> ThreadStatus {
        drop(mutex);
        THREAD_OK
    }

    fn mutex_lock(mutex: &SpinMutex) -> ThreadStatus {
        loop {
            if mutex
                .locked
                .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
                .is_ok()
            {
                return THREAD_OK;
            }
            // Spin on a plain load to keep the cache line shared while the
            // holder works; yield so a displaced holder can run.
            while mutex.locked.load(Ordering::Relaxed) {
                spin_loop();
                thread::yield_now();
            }
        }
    }

    unsafe fn mutex_unlock(mutex: &SpinMutex) -> ThreadStatus {
        mutex.locked.store(false, Ordering::Release);
        THREAD_OK
    }

    fn barrier_init(participants: usize) -> SpinBarrier {
        SpinBarrier {
            participants,
            arrived: AtomicUsize::new(0),
            generation: AtomicUsize::new(0),
        }
    }

    fn barrier_destroy(barrier: SpinBarrier) -> ThreadStatus {
        drop(barrier);
        THREAD_OK
    }

    fn barrier_wait(barrier: &SpinBarrier) -> ThreadStatus {
        let generation = barrier.generation.load(Ordering::Acquire);
        let arrived = barrier.arrived.fetch_add(1, Ordering::AcqRel) + 1;
        if arrived == barrier.participants {
            // Reset before advancing the round: releases observe the reset
            // through the generation store below, and nobody re-enters this
            // round until that store lands.
            barrier.arrived.store(0, Ordering::Relaxed);
            barrier.generation.fetch_add(1, Ordering::Release);
        } else {
            while barrier.generation.load(Ordering::Acquire) == generation {
                spin_loop();
                thread::yield_now();
            }
        }
        THREAD_OK
    }

    fn once(flag: &SpinOnce, init: impl FnOnce()) {
        match flag.state.compare_exchange(
            ONCE_NEW,
            ONCE_RUNNING,
            Ordering::Acquire,
            Ordering::Acquire,
        ) {
            Ok(_) => {
                init();
                flag.state.store(ONCE_DONE, Ordering::Release);
            }
            Err(ONCE_DONE) => {}
            Err(_) => {
                while flag.state.load(Ordering::Acquire) != ONCE_DONE {
                    spin_loop();
                    thread::yield_now();
                }
            }
        }
    }
}
