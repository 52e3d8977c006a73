// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) Microsoft Corporation
//
// Author: Jon Lange (jlange@microsoft.com)

use crate::error::VisError;

/// Width of the mask register. Every vector of a table owns one bit of it.
pub const MASK_REGISTER_BITS: u32 = u32::BITS;

/// Size of one vector message: address-low, address-high and data.
pub const MSG_SIZE: usize = 12;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The message stride cannot hold a three-word message.
    InvalidStride(usize),
    /// More vectors than the mask register has bits.
    TooManyVectors(u32),
    /// A register offset is not 32-bit aligned.
    Unaligned(usize),
    /// The vector message table overlaps the mask register.
    Overlap,
    /// The layout does not fit into the MMIO window.
    OutOfWindow,
}

impl From<ConfigError> for VisError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

/// Register layout of a VIS device.
///
/// All offsets are relative to the start of the device's MMIO window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisConfig {
    /// Offset of the 32-bit mask register.
    pub mask_offset: usize,
    /// Offset of the first vector message.
    pub table_offset: usize,
    /// Distance between two consecutive vector messages.
    pub msg_stride: usize,
    /// Size of the MMIO window in bytes.
    pub window_size: usize,
    /// Largest number of vectors a single table may hold.
    pub max_vectors: u32,
    /// Mask word written when a new vector table is created.
    pub initial_mask: u32,
}

impl Default for VisConfig {
    fn default() -> Self {
        Self {
            mask_offset: 0x0,
            table_offset: 0x100,
            msg_stride: MSG_SIZE,
            window_size: 0x1000,
            max_vectors: MASK_REGISTER_BITS,
            initial_mask: 0,
        }
    }
}

impl VisConfig {
    /// Checks that the layout can be programmed without two registers
    /// aliasing each other.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.msg_stride < MSG_SIZE || self.msg_stride % 4 != 0 {
            return Err(ConfigError::InvalidStride(self.msg_stride));
        }
        if self.max_vectors > MASK_REGISTER_BITS {
            return Err(ConfigError::TooManyVectors(self.max_vectors));
        }
        for offset in [self.mask_offset, self.table_offset] {
            if offset % 4 != 0 {
                return Err(ConfigError::Unaligned(offset));
            }
        }

        let table_end = (self.max_vectors as usize)
            .checked_mul(self.msg_stride)
            .and_then(|len| len.checked_add(self.table_offset))
            .ok_or(ConfigError::OutOfWindow)?;
        let mask_end = self
            .mask_offset
            .checked_add(4)
            .ok_or(ConfigError::OutOfWindow)?;

        if self.mask_offset < table_end && self.table_offset < mask_end {
            return Err(ConfigError::Overlap);
        }
        if table_end > self.window_size || mask_end > self.window_size {
            return Err(ConfigError::OutOfWindow);
        }

        Ok(())
    }

    /// Returns the offset of the message of the vector at `index`.
    pub fn msg_offset(&self, index: u32) -> usize {
        self.table_offset + index as usize * self.msg_stride
    }
}
