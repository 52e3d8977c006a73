// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2024 SUSE LLC
//
// Author: Joerg Roedel <jroedel@suse.de>

use super::{DeviceId, HwIrq, IrqChip, IrqNumber, MsiMessage, VisChip};
use crate::error::VisError;
use crate::locking::SpinLockIrqSafe;
use alloc::vec::Vec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LookupError {
    /// The index is not below the number of allocated vectors.
    OutOfRange { index: u32, len: u32 },
}

impl From<LookupError> for VisError {
    fn from(err: LookupError) -> Self {
        Self::Lookup(err)
    }
}

/// Per-vector state changed by the irq-chip callbacks.
#[derive(Debug, Default)]
pub(super) struct EntryState {
    pub(super) masked: bool,
    pub(super) msg: Option<MsiMessage>,
}

/// One allocated and bound vector of a device.
#[derive(Debug)]
pub struct VectorEntry {
    device: DeviceId,
    generation: u64,
    index: u32,
    hwirq: HwIrq,
    irq: IrqNumber,
    msg_offset: usize,
    pub(super) state: SpinLockIrqSafe<EntryState>,
}

impl VectorEntry {
    pub(super) fn new(
        device: DeviceId,
        generation: u64,
        index: u32,
        binding: (HwIrq, IrqNumber),
        msg_offset: usize,
        masked: bool,
    ) -> Self {
        let (hwirq, irq) = binding;
        Self {
            device,
            generation,
            index,
            hwirq,
            irq,
            msg_offset,
            state: SpinLockIrqSafe::new(EntryState { masked, msg: None }),
        }
    }

    pub fn device(&self) -> DeviceId {
        self.device
    }

    /// Table the vector belongs to, counted per device.
    pub(super) fn generation(&self) -> u64 {
        self.generation
    }

    /// Device-relative index of the vector.
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn hwirq(&self) -> HwIrq {
        self.hwirq
    }

    /// Position of the vector's bit in the mask register.
    pub fn bit(&self) -> u32 {
        self.index
    }

    /// Offset of the vector's three message registers.
    pub fn msg_offset(&self) -> usize {
        self.msg_offset
    }

    pub fn irq(&self) -> IrqNumber {
        self.irq
    }

    pub fn is_masked(&self) -> bool {
        self.state.lock().masked
    }

    /// The last message programmed into the vector, if any.
    pub fn msg(&self) -> Option<MsiMessage> {
        self.state.lock().msg
    }
}

/// The vectors allocated for one device, in allocation order.
///
/// Entries are never removed individually; the whole table is released
/// with [`VisDevice::teardown`](super::VisDevice::teardown).
#[derive(Debug)]
pub struct VectorTable {
    device: DeviceId,
    chip: VisChip,
    entries: Vec<VectorEntry>,
}

impl VectorTable {
    pub(super) fn new(device: DeviceId, chip: VisChip, entries: Vec<VectorEntry>) -> Self {
        Self {
            device,
            chip,
            entries,
        }
    }

    pub fn device(&self) -> DeviceId {
        self.device
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &VectorEntry> {
        self.entries.iter()
    }

    /// The chip masking and programming the vectors of this table. It is
    /// released together with the table.
    pub fn chip(&self) -> &VisChip {
        &self.chip
    }

    pub fn entry(&self, index: u32) -> Result<&VectorEntry, LookupError> {
        self.entries
            .get(index as usize)
            .ok_or(LookupError::OutOfRange {
                index,
                len: self.entries.len() as u32,
            })
    }

    /// Returns the IRQ number of the vector at device-relative `index`.
    pub fn irq_vector(&self, index: u32) -> Result<IrqNumber, LookupError> {
        self.entry(index)
            .map(VectorEntry::irq)
            .inspect_err(|_| log::warn!("{}: no vector {}", self.device, index))
    }

    pub fn mask(&self, index: u32) -> Result<(), LookupError> {
        self.chip.mask(self.entry(index)?);
        Ok(())
    }

    pub fn unmask(&self, index: u32) -> Result<(), LookupError> {
        self.chip.unmask(self.entry(index)?);
        Ok(())
    }

    pub fn write_msg(&self, index: u32, msg: &MsiMessage) -> Result<(), LookupError> {
        self.chip.write_msg(self.entry(index)?, msg);
        Ok(())
    }

    /// Programs a new message into a possibly live vector, see
    /// [`VisChip::reprogram`].
    pub fn reprogram(&self, index: u32, msg: &MsiMessage) -> Result<(), LookupError> {
        self.chip.reprogram(self.entry(index)?, msg);
        Ok(())
    }

    /// Current content of the mask register.
    pub fn mask_word(&self) -> u32 {
        self.chip.mask_word()
    }
}
