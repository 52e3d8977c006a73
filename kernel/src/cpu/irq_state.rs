// SPDX-License-Identifier: MIT
//
// Copyright (c) 2024 SUSE LLC
//
// Author: Joerg Roedel <jroedel@suse.de>

use core::marker::PhantomData;

/// Interrupt flag in RFLAGS register
pub const EFLAGS_IF: usize = 1 << 9;

#[cfg(all(target_arch = "x86_64", target_os = "none"))]
mod arch {
    use super::EFLAGS_IF;
    use core::arch::asm;

    #[inline(always)]
    pub fn irqs_disable() {
        // SAFETY: Inline assembly to disable IRQs, which does not change any
        // state related to memory safety.
        unsafe {
            asm!("cli", options(att_syntax, preserves_flags, nomem));
        }
    }

    #[inline(always)]
    pub fn irqs_enable() {
        // SAFETY: Inline assembly to enable IRQs, which does not change any
        // state related to memory safety.
        unsafe {
            asm!("sti", options(att_syntax, preserves_flags, nomem));
        }
    }

    #[inline(always)]
    pub fn irqs_enabled() -> bool {
        let state: usize;
        // SAFETY: The inline assembly just reads the processors RFLAGS
        // register and does not change any state.
        unsafe {
            asm!("pushfq",
                 "popq {}",
                 out(reg) state,
                 options(att_syntax, preserves_flags));
        };

        (state & EFLAGS_IF) == EFLAGS_IF
    }
}

// Hosted builds (unit tests, user-space tooling) have no interrupt flag to
// manage.
#[cfg(not(all(target_arch = "x86_64", target_os = "none")))]
mod arch {
    #[inline(always)]
    pub fn irqs_disable() {}

    #[inline(always)]
    pub fn irqs_enable() {}

    #[inline(always)]
    pub fn irqs_enabled() -> bool {
        false
    }
}

/// Unconditionally disable IRQs
///
/// Callers need to take care of re-enabling IRQs.
#[inline(always)]
pub fn raw_irqs_disable() {
    arch::irqs_disable();
}

/// Unconditionally enable IRQs
///
/// Callers need to make sure it is safe to enable IRQs. e.g. that no data
/// structures or locks which are accessed in IRQ handlers are used after IRQs
/// have been enabled.
#[inline(always)]
pub fn raw_irqs_enable() {
    arch::irqs_enable();
}

/// Query IRQ state on current CPU
///
/// # Returns
///
/// `true` when IRQs are enabled, `false` otherwise
#[inline(always)]
#[must_use = "Unused irqs_enabled() result - meant to be irq_enable()?"]
pub fn irqs_enabled() -> bool {
    arch::irqs_enabled()
}

/// Query IRQ state on current CPU
///
/// # Returns
///
/// `false` when IRQs are enabled, `true` otherwise
#[inline(always)]
#[must_use = "Unused irqs_disabled() result - meant to be irq_disable()?"]
pub fn irqs_disabled() -> bool {
    !irqs_enabled()
}

/// An IRQ guard which disables interrupts on the local CPU upon creation.
/// When the guard goes out of scope, the IRQ state found at creation time is
/// restored. Guards nest as long as they are dropped in reverse order.
#[derive(Debug)]
#[must_use = "if unused previous IRQ state will be immediately restored"]
pub struct IrqGuard {
    was_enabled: bool,
    /// Make the type !Send + !Sync
    phantom: PhantomData<*const ()>,
}

impl IrqGuard {
    pub fn new() -> Self {
        let was_enabled = irqs_enabled();
        raw_irqs_disable();

        Self {
            was_enabled,
            phantom: PhantomData,
        }
    }
}

impl Default for IrqGuard {
    fn default() -> Self {
        IrqGuard::new()
    }
}

impl Drop for IrqGuard {
    fn drop(&mut self) {
        if self.was_enabled {
            raw_irqs_enable();
        }
    }
}
