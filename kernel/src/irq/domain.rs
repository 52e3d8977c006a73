// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2022-2023 SUSE LLC
//
// Author: Roy Hopkins <rhopkins@suse.de>

use super::{DeviceId, HwIrq, IrqNumber};
use crate::error::VisError;
use crate::locking::SpinLockIrqSafe;
use crate::utils::IdBitmap;
use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use bitflags::bitflags;
use core::fmt::Debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DomainError {
    /// No IRQ number is left to bind a vector to.
    Exhausted,
    /// The IRQ number is not bound to any vector.
    UnknownIrq(IrqNumber),
}

impl From<DomainError> for VisError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct DomainFlags: u32 {
        /// Bindings can be released again through the domain.
        const HIERARCHY    = 1 << 0;
        /// More than one vector may be bound per device.
        const MULTI_VECTOR = 1 << 1;
    }
}

/// The IRQ domain a VIS device allocates its vectors from.
///
/// The domain owns the mapping from hardware identifiers to the IRQ
/// numbers used by the interrupt delivery code, and knows whether an IRQ
/// currently has a handler association.
pub trait IrqDomain: Debug + Send + Sync {
    fn name(&self) -> &str;

    fn flags(&self) -> DomainFlags;

    /// Binds the vectors identified by `hwirqs` to IRQ numbers.
    ///
    /// # Returns
    ///
    /// The IRQ numbers of the bound vectors, in `hwirqs` order. The domain
    /// may bind only a prefix of `hwirqs`; the caller owns whatever was
    /// bound and must release it with [`IrqDomain::unbind`].
    fn bind(&self, device: DeviceId, hwirqs: &[HwIrq]) -> Result<Vec<IrqNumber>, DomainError>;

    /// Releases bindings created by [`IrqDomain::bind`].
    fn unbind(&self, device: DeviceId, irqs: &[IrqNumber]);

    /// Returns `true` while the IRQ has an active handler association.
    fn is_activated(&self, irq: IrqNumber) -> bool;
}

const DOMAIN_BITMAP_WORDS: usize = 4;

/// Largest number of IRQs a [`VectorDomain`] can hand out.
pub const VECTOR_DOMAIN_MAX_IRQS: usize = IdBitmap::<DOMAIN_BITMAP_WORDS>::CAPACITY;

#[derive(Debug, Clone, Copy)]
struct Binding {
    device: DeviceId,
    hwirq: HwIrq,
}

#[derive(Debug, Default)]
struct DomainState {
    allocated: IdBitmap<DOMAIN_BITMAP_WORDS>,
    activated: IdBitmap<DOMAIN_BITMAP_WORDS>,
    bindings: BTreeMap<usize, Binding>,
}

/// An [`IrqDomain`] handing out IRQ numbers from a fixed range.
#[derive(Debug)]
pub struct VectorDomain {
    name: &'static str,
    flags: DomainFlags,
    base: u32,
    nr_irqs: usize,
    state: SpinLockIrqSafe<DomainState>,
}

impl VectorDomain {
    /// Creates a hierarchical domain owning IRQ numbers
    /// `base..base + nr_irqs`.
    pub fn new(name: &'static str, base: u32, nr_irqs: usize) -> Self {
        Self::with_flags(
            name,
            base,
            nr_irqs,
            DomainFlags::HIERARCHY | DomainFlags::MULTI_VECTOR,
        )
    }

    pub fn with_flags(name: &'static str, base: u32, nr_irqs: usize, flags: DomainFlags) -> Self {
        assert!(nr_irqs <= VECTOR_DOMAIN_MAX_IRQS);
        Self {
            name,
            flags,
            base,
            nr_irqs,
            state: SpinLockIrqSafe::new(DomainState::default()),
        }
    }

    fn index(&self, irq: IrqNumber) -> Option<usize> {
        let index = irq.raw().checked_sub(self.base)? as usize;
        (index < self.nr_irqs).then_some(index)
    }

    /// Number of IRQs currently bound.
    pub fn bound(&self) -> usize {
        self.state.lock().allocated.used()
    }

    /// Hardware identifier and owner of a bound IRQ.
    pub fn binding(&self, irq: IrqNumber) -> Option<(DeviceId, HwIrq)> {
        let index = self.index(irq)?;
        self.state
            .lock()
            .bindings
            .get(&index)
            .map(|b| (b.device, b.hwirq))
    }

    /// Marks `irq` as having a handler association.
    pub fn activate(&self, irq: IrqNumber) -> Result<(), DomainError> {
        self.set_activated(irq, true)
    }

    /// Drops the handler association of `irq`.
    pub fn deactivate(&self, irq: IrqNumber) -> Result<(), DomainError> {
        self.set_activated(irq, false)
    }

    fn set_activated(&self, irq: IrqNumber, active: bool) -> Result<(), DomainError> {
        let index = self.index(irq).ok_or(DomainError::UnknownIrq(irq))?;
        let mut state = self.state.lock();
        if !state.allocated.get(index) {
            return Err(DomainError::UnknownIrq(irq));
        }
        state.activated.set(index, active);
        Ok(())
    }
}

impl IrqDomain for VectorDomain {
    fn name(&self) -> &str {
        self.name
    }

    fn flags(&self) -> DomainFlags {
        self.flags
    }

    fn bind(&self, device: DeviceId, hwirqs: &[HwIrq]) -> Result<Vec<IrqNumber>, DomainError> {
        let mut state = self.state.lock();
        let mut irqs = Vec::with_capacity(hwirqs.len());

        for hwirq in hwirqs {
            let Some(index) = state.allocated.alloc(self.nr_irqs) else {
                break;
            };
            state.bindings.insert(
                index,
                Binding {
                    device,
                    hwirq: *hwirq,
                },
            );
            irqs.push(IrqNumber::new(self.base + index as u32));
        }

        if irqs.is_empty() && !hwirqs.is_empty() {
            return Err(DomainError::Exhausted);
        }
        Ok(irqs)
    }

    fn unbind(&self, device: DeviceId, irqs: &[IrqNumber]) {
        let mut state = self.state.lock();
        for irq in irqs {
            let index = self.index(*irq);
            let binding = index.and_then(|i| state.bindings.remove(&i));
            match (index, binding) {
                (Some(index), Some(binding)) if binding.device == device => {
                    state.activated.set(index, false);
                    state.allocated.free(index);
                }
                _ => panic!("{}: {} is not bound to {}", self.name, irq, device),
            }
        }
    }

    fn is_activated(&self, irq: IrqNumber) -> bool {
        self.index(irq)
            .is_some_and(|index| self.state.lock().activated.get(index))
    }
}
