// SPDX-License-Identifier: MIT
//
// Copyright (c) Microsoft Corporation
// Copyright (c) SUSE LLC
//
// Author: Jon Lange <jlange@microsoft.com>
// Author: Joerg Roedel <jroedel@suse.de>

use crate::config::MASK_REGISTER_BITS;
use crate::io::MmioAccess;

/// Mirror of a device's mask register.
///
/// The register is only ever written as a whole word, so the mirror is the
/// authoritative record of which vectors are masked. Callers serialize
/// access, see [`VisChip`](super::VisChip).
#[derive(Debug)]
pub struct MaskRegister {
    offset: usize,
    word: u32,
}

impl MaskRegister {
    /// Creates the mirror and writes `initial` to the hardware register so
    /// both start out consistent.
    pub fn new(mmio: &dyn MmioAccess, offset: usize, initial: u32) -> Self {
        mmio.write32(offset, initial);
        Self {
            offset,
            word: initial,
        }
    }

    pub fn word(&self) -> u32 {
        self.word
    }

    pub fn is_set(&self, bit: u32) -> bool {
        assert!(bit < MASK_REGISTER_BITS);
        self.word & (1 << bit) != 0
    }

    /// Updates the mask bit of one vector and returns the written word.
    pub fn set_bit(&mut self, mmio: &dyn MmioAccess, bit: u32, masked: bool) -> u32 {
        assert!(bit < MASK_REGISTER_BITS, "mask bit {bit} out of range");

        let mut word = self.word & !(1 << bit);
        if masked {
            word |= 1 << bit;
        }
        mmio.write32(self.offset, word);
        self.word = word;

        word
    }
}
