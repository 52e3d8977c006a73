// SPDX-License-Identifier: MIT OR Apache-2.0 Copyright (c) Microsoft Corporation
// Author: Jon Lange (jlange@microsoft.com)

use bitfield_struct::bitfield;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// Fixed upper bits of an x86 interrupt message address (0xFEExxxxx).
pub const MSI_ADDRESS_BASE: u32 = 0xfee;

#[bitfield(u32)]
pub struct MsiAddress {
    #[bits(2)]
    rsvd_1_0: u32,
    pub dest_mode_logical: bool,
    pub redirection_hint: bool,
    #[bits(8)]
    rsvd_11_4: u32,
    pub dest_id: u8,
    #[bits(12)]
    pub base: u32,
}

#[bitfield(u32)]
pub struct MsiData {
    pub vector: u8,
    #[bits(3)]
    pub delivery_mode: u8,
    #[bits(3)]
    rsvd_13_11: u8,
    pub level_assert: bool,
    pub trigger_level: bool,
    #[bits(16)]
    rsvd_31_16: u32,
}

/// Delivery message of one vector, in register order.
#[repr(C)]
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout,
)]
pub struct MsiMessage {
    pub address_lo: u32,
    pub address_hi: u32,
    pub data: u32,
}

impl MsiMessage {
    pub const fn new(address_lo: u32, address_hi: u32, data: u32) -> Self {
        Self {
            address_lo,
            address_hi,
            data,
        }
    }

    /// Builds a message for fixed, edge-triggered delivery of `vector` to
    /// the CPU with APIC ID `dest_id`.
    pub fn compose(dest_id: u8, vector: u8) -> Self {
        let address = MsiAddress::new()
            .with_base(MSI_ADDRESS_BASE)
            .with_dest_id(dest_id);
        let data = MsiData::new().with_vector(vector);
        Self::new(address.into(), 0, data.into())
    }

    pub fn address(&self) -> u64 {
        (u64::from(self.address_hi) << 32) | u64::from(self.address_lo)
    }

    /// The message as the three words written to the vector's registers.
    pub fn words(&self) -> [u32; 3] {
        zerocopy::transmute!(*self)
    }
}
