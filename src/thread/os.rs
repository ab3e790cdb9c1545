//! Native backend: `std::thread` plus `parking_lot` synchronization.

use std::thread::{Builder, JoinHandle};

use parking_lot::lock_api::RawMutex as RawMutexApi;
use parking_lot::{Condvar, Mutex, Once, RawMutex};

use super::{ThreadBackend, ThreadStatus, THREAD_AGAIN, THREAD_CHILD, THREAD_OK};

/// Threading backed by the host's native facility.
pub struct OsBackend;

/// A raw mutex with split lock/unlock, no guard object.
pub struct OsMutex {
    raw: RawMutex,
}

struct BarrierState {
    arrived: usize,
    generation: usize,
}

/// Generation-counted reusable barrier.
pub struct OsBarrier {
    participants: usize,
    state: Mutex<BarrierState>,
    cvar: Condvar,
}

impl ThreadBackend for OsBackend {
    type Thread<T: Send + 'static> = JoinHandle<T>;
    type Mutex = OsMutex;
    type Barrier = OsBarrier;
    type OnceFlag = Once;

    const ONCE_INIT: Once = Once::new();

    fn spawn<T, F>(entry: F) -> (ThreadStatus, Option<JoinHandle<T>>)
    where
        T: Send + 'static,
        F: FnOnce() -> T + Send + 'static,
    {
        match Builder::new().spawn(entry) {
            Ok(handle) => (THREAD_OK, Some(handle)),
            Err(e) => (e.raw_os_error().unwrap_or(THREAD_AGAIN), None),
        }
    }

    fn join<T: Send + 'static>(thread: JoinHandle<T>) -> (ThreadStatus, Option<T>) {
        match thread.join() {
            Ok(value) => (THREAD_OK, Some(value)),
            Err(_) => (THREAD_CHILD, None),
        }
    }

    fn mutex_init() -> OsMutex {
        OsMutex {
            raw: RawMutex::INIT,
        }
    }

    fn mutex_destroy(mutex: OsMutex) -> ThreadStatus {
        drop(mutex);
        THREAD_OK
    }

    fn mutex_lock(mutex: &OsMutex) -> ThreadStatus {
        mutex.raw.lock();
        THREAD_OK
    }

    unsafe fn mutex_unlock(mutex: &OsMutex) -> ThreadStatus {
        // Safety: the caller holds the mutex, per the trait contract.
        mutex.raw.unlock();
        THREAD_OK
    }

    fn barrier_init(participants: usize) -> OsBarrier {
        OsBarrier {
            participants,
            state: Mutex::new(BarrierState {
                arrived: 0,
                generation: 0,
            }),
            cvar: Condvar::new(),
        }
    }

    fn barrier_destroy(barrier: OsBarrier) -> ThreadStatus {
        drop(barrier);
        THREAD_OK
    }

    fn barrier_wait(barrier: &OsBarrier) -> ThreadStatus {
        let mut state = barrier.state.lock();
        let generation = state.generation;
        state.arrived += 1;
        if state.arrived == barrier.participants {
            // Last arrival: reset for the next round and release the group.
            state.arrived = 0;
            state.generation += 1;
            barrier.cvar.notify_all();
        } else {
            while state.generation == generation {
                barrier.cvar.wait(&mut state);
            }
        }
        THREAD_OK
    }

    fn once(flag: &Once, init: impl FnOnce()) {
        flag.call_once(init);
    }
}
