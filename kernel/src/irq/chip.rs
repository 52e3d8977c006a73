// SPDX-License-Identifier: MIT
//
// Copyright (c) Microsoft Corporation
// Copyright (c) SUSE LLC
//
// Author: Jon Lange <jlange@microsoft.com>
// Author: Joerg Roedel <jroedel@suse.de>

use super::table::EntryState;
use super::{DeviceId, MaskRegister, MsiMessage, VectorEntry};
use crate::config::VisConfig;
use crate::io::MmioAccess;
use crate::locking::SpinLockIrqSafe;
use alloc::sync::Arc;
use core::fmt::Debug;

/// Callbacks the generic interrupt code uses to control single vectors.
pub trait IrqChip: Debug + Send + Sync {
    fn name(&self) -> &str;

    fn mask(&self, entry: &VectorEntry);

    fn unmask(&self, entry: &VectorEntry);

    /// Programs the delivery message of `entry`.
    ///
    /// The message registers are written one word at a time. If the vector
    /// is unmasked the device may observe a partially written message, so
    /// callers either mask the vector first or use [`VisChip::reprogram`].
    fn write_msg(&self, entry: &VectorEntry, msg: &MsiMessage);
}

/// Register access for the vectors of one [`VectorTable`](super::VectorTable).
///
/// Lock order is entry state first, then the mask register.
#[derive(Debug)]
pub struct VisChip {
    device: DeviceId,
    generation: u64,
    mmio: Arc<dyn MmioAccess>,
    mask: SpinLockIrqSafe<MaskRegister>,
}

impl VisChip {
    pub fn new(
        device: DeviceId,
        generation: u64,
        mmio: Arc<dyn MmioAccess>,
        config: &VisConfig,
    ) -> Self {
        let mask = MaskRegister::new(&*mmio, config.mask_offset, config.initial_mask);
        Self {
            device,
            generation,
            mmio,
            mask: SpinLockIrqSafe::new(mask),
        }
    }

    /// Current content of the mask register.
    pub fn mask_word(&self) -> u32 {
        self.mask.lock().word()
    }

    /// The mask mirror only covers the vectors of its own table.
    fn check_entry(&self, entry: &VectorEntry) {
        assert!(
            entry.device() == self.device && entry.generation() == self.generation,
            "vector of {} (table {}) handed to chip of {} (table {})",
            entry.device(),
            entry.generation(),
            self.device,
            self.generation
        );
    }

    fn set_mask_bit(&self, entry: &VectorEntry, state: &mut EntryState, masked: bool) {
        let word = self
            .mask
            .lock()
            .set_bit(&*self.mmio, entry.bit(), masked);
        state.masked = masked;
        log::debug!(
            "{}: vector {} {} (mask {:#010x})",
            self.device,
            entry.index(),
            if masked { "masked" } else { "unmasked" },
            word
        );
    }

    fn program(&self, entry: &VectorEntry, state: &mut EntryState, msg: &MsiMessage) {
        for (i, word) in msg.words().into_iter().enumerate() {
            self.mmio.write32(entry.msg_offset() + i * 4, word);
        }
        state.msg = Some(*msg);
        log::debug!(
            "{}: vector {} message {:#x}/{:#x}",
            self.device,
            entry.index(),
            msg.address(),
            msg.data
        );
    }

    /// Programs a new message into a vector that may be delivering
    /// interrupts.
    ///
    /// The vector is masked while its message registers are rewritten and
    /// its previous mask state is restored afterwards, so the device never
    /// delivers with a torn address/data triple.
    pub fn reprogram(&self, entry: &VectorEntry, msg: &MsiMessage) {
        self.check_entry(entry);
        let mut state = entry.state.lock();
        let was_masked = state.masked;

        if !was_masked {
            self.set_mask_bit(entry, &mut state, true);
        }
        self.program(entry, &mut state, msg);
        if !was_masked {
            self.set_mask_bit(entry, &mut state, false);
        }
    }
}

impl IrqChip for VisChip {
    fn name(&self) -> &str {
        "VIS"
    }

    fn mask(&self, entry: &VectorEntry) {
        self.check_entry(entry);
        let mut state = entry.state.lock();
        self.set_mask_bit(entry, &mut state, true);
    }

    fn unmask(&self, entry: &VectorEntry) {
        self.check_entry(entry);
        let mut state = entry.state.lock();
        self.set_mask_bit(entry, &mut state, false);
    }

    fn write_msg(&self, entry: &VectorEntry, msg: &MsiMessage) {
        self.check_entry(entry);
        let mut state = entry.state.lock();
        self.program(entry, &mut state, msg);
    }
}
