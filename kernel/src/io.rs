// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2022-2023 SUSE LLC
//
// Author: Joerg Roedel <jroedel@suse.de>

use core::fmt::Debug;
use core::ptr::NonNull;

/// Access to the 32-bit registers of a device's MMIO window.
///
/// This is the only way the vector core touches hardware state. Offsets
/// are in bytes relative to the start of the window.
pub trait MmioAccess: Send + Sync + Debug {
    fn read32(&self, offset: usize) -> u32;
    fn write32(&self, offset: usize, value: u32);

    /// Size of the window in bytes.
    fn size(&self) -> usize;
}

/// A mapped MMIO window accessed with volatile loads and stores.
#[derive(Debug)]
pub struct MmioRegion {
    base: NonNull<u32>,
    size: usize,
}

// SAFETY: The region only hands out volatile accesses to device memory,
// which may happen from any CPU.
unsafe impl Send for MmioRegion {}
// SAFETY: See above.
unsafe impl Sync for MmioRegion {}

impl MmioRegion {
    /// Creates a new region.
    ///
    /// # Safety
    ///
    /// `base` must point to a mapping of at least `size` bytes of device
    /// memory which stays mapped for the lifetime of the region, and must
    /// be aligned to 4 bytes.
    pub unsafe fn new(base: NonNull<u32>, size: usize) -> Self {
        Self { base, size }
    }

    fn reg(&self, offset: usize) -> *mut u32 {
        assert!(offset % 4 == 0, "unaligned MMIO offset {offset:#x}");
        assert!(
            offset.checked_add(4).is_some_and(|end| end <= self.size),
            "MMIO offset {offset:#x} outside of window"
        );
        // SAFETY: The offset was checked against the size of the mapping.
        unsafe { self.base.as_ptr().add(offset / 4) }
    }
}

impl MmioAccess for MmioRegion {
    fn read32(&self, offset: usize) -> u32 {
        // SAFETY: `reg()` returns a pointer inside the mapping promised to
        // `new()`.
        unsafe { self.reg(offset).read_volatile() }
    }

    fn write32(&self, offset: usize, value: u32) {
        // SAFETY: `reg()` returns a pointer inside the mapping promised to
        // `new()`.
        unsafe { self.reg(offset).write_volatile(value) }
    }

    fn size(&self) -> usize {
        self.size
    }
}
