// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2022-2023 SUSE LLC
//
// Author: Joerg Roedel <jroedel@suse.de>

use super::common::*;
use core::cell::UnsafeCell;
use core::marker::PhantomData;
use core::ops::{Deref, DerefMut};
use core::sync::atomic::{AtomicU64, Ordering};

/// A lock guard obtained from a [`SpinLock`]. It provides exclusive access
/// to the protected data and releases the lock when it goes out of scope.
///
/// # Examples
///
/// ```
/// use vis::locking::SpinLock;
///
/// let mask_word = SpinLock::new(0u32);
///
/// {
///     let mut guard = mask_word.lock();
///     *guard |= 1 << 2;
/// }; // Lock is automatically released when `guard` goes out of scope.
/// ```
#[derive(Debug)]
#[must_use = "if unused the SpinLock will immediately unlock"]
pub struct RawLockGuard<'a, T, I> {
    holder: &'a AtomicU64,
    data: &'a mut T,
    #[expect(dead_code)]
    irq_state: I,
}

impl<T, I> Drop for RawLockGuard<'_, T, I> {
    fn drop(&mut self) {
        self.holder.fetch_add(1, Ordering::Release);
    }
}

impl<T, I> Deref for RawLockGuard<'_, T, I> {
    type Target = T;
    fn deref(&self) -> &T {
        self.data
    }
}

impl<T, I> DerefMut for RawLockGuard<'_, T, I> {
    fn deref_mut(&mut self) -> &mut T {
        self.data
    }
}

pub type LockGuard<'a, T> = RawLockGuard<'a, T, IrqUnsafeLocking>;
pub type LockGuardIrqSafe<'a, T> = RawLockGuard<'a, T, IrqGuardLocking>;

/// A ticket spinlock protecting concurrently accessed data.
///
/// Two variants are derived from this implementation:
///
///  * [`SpinLock`] for data only touched from task context, such as the
///    allocation state of a device.
///  * [`SpinLockIrqSafe`] for data that irq-chip callbacks touch, such as
///    the mask register of a vector table.
///
/// Tickets are handed out in order, so waiters acquire the lock in the
/// order they arrived.
///
/// # Examples
///
/// ```
/// use vis::locking::SpinLock;
///
/// let spin_lock = SpinLock::new(0u32);
///
/// if let Some(mut guard) = spin_lock.try_lock() {
///     *guard = 0xff;
/// };
/// assert_eq!(*spin_lock.lock(), 0xff);
/// ```
#[derive(Debug, Default)]
pub struct RawSpinLock<T, I> {
    /// Next ticket to hand out.
    current: AtomicU64,
    /// Ticket currently allowed to access the data.
    holder: AtomicU64,
    data: UnsafeCell<T>,
    phantom: PhantomData<fn(I)>,
}

// SAFETY: The lock serializes all access to `data`.
unsafe impl<T: Send, I> Send for RawSpinLock<T, I> {}
// SAFETY: The lock serializes all access to `data`.
unsafe impl<T: Send, I> Sync for RawSpinLock<T, I> {}

impl<T, I: IrqLocking> RawSpinLock<T, I> {
    pub const fn new(data: T) -> Self {
        Self {
            current: AtomicU64::new(0),
            holder: AtomicU64::new(0),
            data: UnsafeCell::new(data),
            phantom: PhantomData,
        }
    }

    /// Acquires the lock, spinning until it is available.
    pub fn lock(&self) -> RawLockGuard<'_, T, I> {
        let irq_state = I::acquire_lock();

        let ticket = self.current.fetch_add(1, Ordering::Relaxed);
        loop {
            let h = self.holder.load(Ordering::Acquire);
            if h == ticket {
                break;
            }
            core::hint::spin_loop();
        }
        RawLockGuard {
            holder: &self.holder,
            // SAFETY: Holding the ticket grants exclusive access.
            data: unsafe { &mut *self.data.get() },
            irq_state,
        }
    }

    /// Execute function F while holding the lock.
    pub fn locked_do<R, F: FnMut(&mut T) -> R>(&self, mut f: F) -> R {
        let mut l = self.lock();
        f(&mut (*l))
    }

    /// Tries to acquire the lock without spinning. Returns `None` if the
    /// lock is currently held.
    pub fn try_lock(&self) -> Option<RawLockGuard<'_, T, I>> {
        let irq_state = I::acquire_lock();

        let current = self.current.load(Ordering::Relaxed);
        let holder = self.holder.load(Ordering::Acquire);

        if current == holder {
            let result = self.current.compare_exchange(
                current,
                current + 1,
                Ordering::Acquire,
                Ordering::Relaxed,
            );
            if result.is_ok() {
                return Some(RawLockGuard {
                    holder: &self.holder,
                    // SAFETY: The ticket was taken above.
                    data: unsafe { &mut *self.data.get() },
                    irq_state,
                });
            }
        }

        None
    }
}

pub type SpinLock<T> = RawSpinLock<T, IrqUnsafeLocking>;
pub type SpinLockIrqSafe<T> = RawSpinLock<T, IrqGuardLocking>;
