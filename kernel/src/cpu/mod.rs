// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2022-2023 SUSE LLC
//
// Author: Joerg Roedel <jroedel@suse.de>

pub mod irq_state;

pub use irq_state::{irqs_disabled, irqs_enabled, IrqGuard};
