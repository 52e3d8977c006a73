// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2024 SUSE LLC
//
// Author: Joerg Roedel <jroedel@suse.de>

use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};

/// Hardware identifier of a vector within its IRQ domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HwIrq(u64);

impl HwIrq {
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for HwIrq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hwirq {}", self.0)
    }
}

/// Source of hardware identifiers.
///
/// Identifiers start at 0 and grow by one per call. They are never handed
/// out twice, not even after the vector they were issued for has been torn
/// down. A single generator is shared by all devices of a domain.
#[derive(Debug, Default)]
pub struct HwIrqGenerator {
    next: AtomicU64,
}

impl HwIrqGenerator {
    pub const fn new() -> Self {
        Self {
            next: AtomicU64::new(0),
        }
    }

    pub fn next_hwirq(&self) -> HwIrq {
        // The modification order of `next` is total, so every caller
        // observes strictly increasing values.
        HwIrq(self.next.fetch_add(1, Ordering::Relaxed))
    }

    /// Number of identifiers issued so far.
    pub fn issued(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }
}
