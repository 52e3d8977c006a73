// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2022-2023 SUSE LLC
//
// Author: Joerg Roedel <jroedel@suse.de>

//! Vector tables of VIS devices.
//!
//! A [`VisDevice`] allocates its vectors from an [`IrqDomain`] with
//! [`VisDevice::setup`]. Every vector gets a hardware identifier from a
//! shared [`HwIrqGenerator`], one bit in the device's mask register and a
//! slot for its delivery message. The resulting [`VectorTable`] carries the
//! [`VisChip`] that masks, unmasks and programs the vectors, and is handed
//! back to [`VisDevice::teardown`] once the device is done with it.

pub mod chip;
pub mod domain;
pub mod hwirq;
pub mod mask;
pub mod msg;
pub mod table;
pub mod vis;

pub use chip::{IrqChip, VisChip};
pub use domain::{DomainError, DomainFlags, IrqDomain, VectorDomain};
pub use hwirq::{HwIrq, HwIrqGenerator};
pub use mask::MaskRegister;
pub use msg::MsiMessage;
pub use table::{LookupError, VectorEntry, VectorTable};
pub use vis::{AllocError, TeardownError, TeardownFailure, VisDevice};

use core::fmt;

/// Identifies a device towards its IRQ domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeviceId(pub u32);

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "device {}", self.0)
    }
}

/// IRQ number the interrupt delivery code knows a bound vector by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IrqNumber(u32);

impl IrqNumber {
    pub const fn new(irq: u32) -> Self {
        Self(irq)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<IrqNumber> for u32 {
    fn from(irq: IrqNumber) -> Self {
        irq.0
    }
}

impl From<IrqNumber> for u64 {
    fn from(irq: IrqNumber) -> Self {
        irq.0.into()
    }
}

impl fmt::Display for IrqNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "irq {}", self.0)
    }
}
