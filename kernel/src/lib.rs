// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2022-2023 SUSE LLC
//
// Author: Nicolai Stange <nstange@suse.de>

//! Vector management for VIS virtualized interrupt controllers.
//!
//! A VIS device exposes a window of 32-bit registers holding one shared
//! mask word and a table of per-vector delivery messages. This crate
//! allocates the vectors of such a device against an external IRQ domain,
//! keeps the mask word consistent across concurrent mask/unmask requests
//! and tears the vector set down again.

#![no_std]

extern crate alloc;

pub mod config;
pub mod cpu;
pub mod error;
pub mod io;
pub mod irq;
pub mod locking;
pub mod utils;

pub use config::VisConfig;
pub use error::VisError;
pub use irq::{VectorTable, VisDevice};

#[test]
fn test_nop() {}

// Utilities for test configurations.
#[cfg(test)]
pub mod testutils;
