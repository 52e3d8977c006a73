// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023 SUSE LLC
//
// Author: Carlos López <carlos.lopez@suse.com>

use crate::config::ConfigError;
use crate::irq::{AllocError, DomainError, LookupError, TeardownError};

// As a general rule, functions private to a given module may use the
// leaf error types. Public functions should return an VisError
// containing a leaf error type, usually the one corresponding to
// that module. We always provide a way to convert a leaf error into
// a VisError via the From trait at the module level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VisError {
    // Errors related to the register layout of a device
    Config(ConfigError),
    // Errors related to allocating the vectors of a device
    Alloc(AllocError),
    // Device-relative vector lookups
    Lookup(LookupError),
    // Errors surfaced while releasing a vector table
    Teardown(TeardownError),
    // Errors reported by the IRQ domain itself
    Domain(DomainError),
}
