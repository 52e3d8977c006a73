// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2022-2023 SUSE LLC
//
// Author: Joerg Roedel <jroedel@suse.de>

use super::{
    DeviceId, DomainError, DomainFlags, HwIrq, HwIrqGenerator, IrqDomain, IrqNumber, LookupError,
    VectorEntry, VectorTable, VisChip,
};
use crate::config::{ConfigError, VisConfig};
use crate::error::VisError;
use crate::io::MmioAccess;
use crate::locking::SpinLock;
use alloc::sync::Arc;
use alloc::vec::Vec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AllocError {
    /// The device has no IRQ domain to allocate from.
    NoDomain,
    /// Zero vectors were requested.
    InvalidCount,
    /// More vectors were requested than the device or domain supports.
    CapacityExceeded { requested: u32, capacity: u32 },
    /// The device already has vectors allocated.
    Busy,
    /// The domain bound fewer vectors than requested. Everything bound was
    /// released again.
    Partial { requested: u32, granted: u32 },
    /// The domain refused to bind any vector.
    Domain(DomainError),
}

impl From<AllocError> for VisError {
    fn from(err: AllocError) -> Self {
        Self::Alloc(err)
    }
}

impl From<DomainError> for AllocError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TeardownError {
    /// The device's domain cannot release bindings.
    Unsupported,
    /// The table was allocated for a different device.
    ForeignTable,
}

impl From<TeardownError> for VisError {
    fn from(err: TeardownError) -> Self {
        Self::Teardown(err)
    }
}

/// A refused teardown. Nothing was released, the table is handed back to
/// the caller.
#[derive(Debug)]
pub struct TeardownFailure {
    pub table: VectorTable,
    pub error: TeardownError,
}

/// A device whose interrupt vectors are managed by a VIS controller.
#[derive(Debug)]
pub struct VisDevice {
    id: DeviceId,
    config: VisConfig,
    mmio: Arc<dyn MmioAccess>,
    domain: Option<Arc<dyn IrqDomain>>,
    hwirqs: Arc<HwIrqGenerator>,
    /// Held across setup and teardown, which serializes the two.
    vectors: SpinLock<Vectors>,
}

#[derive(Debug, Default)]
struct Vectors {
    /// IRQ numbers of the live vector table.
    live: Option<Vec<IrqNumber>>,
    /// Number of tables handed out so far.
    generation: u64,
}

impl VisDevice {
    pub fn new(
        id: DeviceId,
        mmio: Arc<dyn MmioAccess>,
        config: VisConfig,
        domain: Option<Arc<dyn IrqDomain>>,
        hwirqs: Arc<HwIrqGenerator>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if config.window_size > mmio.size() {
            log::error!(
                "{}: layout needs {:#x} bytes of MMIO, window has {:#x}",
                id,
                config.window_size,
                mmio.size()
            );
            return Err(ConfigError::OutOfWindow);
        }
        Ok(Self {
            id,
            config,
            mmio,
            domain,
            hwirqs,
            vectors: SpinLock::new(Vectors::default()),
        })
    }

    pub fn id(&self) -> DeviceId {
        self.id
    }

    pub fn config(&self) -> &VisConfig {
        &self.config
    }

    /// Number of vectors currently allocated.
    pub fn nr_vectors(&self) -> usize {
        self.vectors.lock().live.as_ref().map_or(0, Vec::len)
    }

    /// Allocates `nvec` vectors from the device's IRQ domain.
    ///
    /// Vector `i` gets bit `i` of the mask register and the `i`-th slot of
    /// the message table. Its initial mask state is taken from the
    /// configured initial mask word.
    ///
    /// # Returns
    ///
    /// The new vector table. On failure no vector stays bound. Hardware
    /// identifiers consumed by a failed attempt are not handed out again.
    pub fn setup(&self, nvec: u32) -> Result<VectorTable, AllocError> {
        let domain = self.domain.as_ref().ok_or(AllocError::NoDomain)?;

        if nvec == 0 {
            return Err(AllocError::InvalidCount);
        }
        let capacity = if domain.flags().contains(DomainFlags::MULTI_VECTOR) {
            self.config.max_vectors
        } else {
            1
        };
        if nvec > capacity {
            return Err(AllocError::CapacityExceeded {
                requested: nvec,
                capacity,
            });
        }

        let mut vectors = self.vectors.lock();
        if vectors.live.is_some() {
            return Err(AllocError::Busy);
        }

        let hwirqs: Vec<HwIrq> = (0..nvec).map(|_| self.hwirqs.next_hwirq()).collect();

        let irqs = domain.bind(self.id, &hwirqs)?;
        if irqs.len() < hwirqs.len() {
            log::warn!(
                "{}: {} bound {} of {} vectors, rolling back",
                self.id,
                domain.name(),
                irqs.len(),
                nvec
            );
            domain.unbind(self.id, &irqs);
            return Err(AllocError::Partial {
                requested: nvec,
                granted: irqs.len() as u32,
            });
        }

        vectors.generation += 1;
        let generation = vectors.generation;
        let entries: Vec<VectorEntry> = (0..nvec)
            .zip(hwirqs.iter().copied().zip(irqs.iter().copied()))
            .map(|(index, binding)| {
                VectorEntry::new(
                    self.id,
                    generation,
                    index,
                    binding,
                    self.config.msg_offset(index),
                    self.config.initial_mask & (1 << index) != 0,
                )
            })
            .collect();
        let chip = VisChip::new(self.id, generation, self.mmio.clone(), &self.config);

        log::info!(
            "{}: allocated {} vectors from {} ({}..={})",
            self.id,
            nvec,
            domain.name(),
            hwirqs[0],
            hwirqs[hwirqs.len() - 1]
        );
        vectors.live = Some(irqs);

        Ok(VectorTable::new(self.id, chip, entries))
    }

    /// Releases a vector table allocated by [`VisDevice::setup`].
    ///
    /// # Panics
    ///
    /// Panics if any vector of the table still has an active handler
    /// association. Releasing such a vector would leave the interrupt
    /// delivery code pointing at a freed slot.
    pub fn teardown(&self, table: VectorTable) -> Result<(), TeardownFailure> {
        if table.device() != self.id {
            return Err(TeardownFailure {
                table,
                error: TeardownError::ForeignTable,
            });
        }

        let Some(domain) = self
            .domain
            .as_ref()
            .filter(|d| d.flags().contains(DomainFlags::HIERARCHY))
        else {
            log::error!(
                "{}: cannot release {} vectors without a hierarchical domain",
                self.id,
                table.len()
            );
            return Err(TeardownFailure {
                table,
                error: TeardownError::Unsupported,
            });
        };

        let mut vectors = self.vectors.lock();

        let mut irqs = Vec::with_capacity(table.len());
        for entry in table.iter() {
            let irq = entry.irq();
            assert!(
                !domain.is_activated(irq),
                "{}: vector {} ({}) still active at teardown",
                self.id,
                entry.index(),
                irq
            );
            irqs.push(irq);
        }

        domain.unbind(self.id, &irqs);
        vectors.live = None;
        drop(table);

        log::info!("{}: released {} vectors", self.id, irqs.len());
        Ok(())
    }

    /// Returns the IRQ number of vector `nr` of the device.
    pub fn irq_vector(&self, nr: u32) -> Result<IrqNumber, LookupError> {
        let vectors = self.vectors.lock();
        let irqs = vectors.live.as_deref().unwrap_or_default();
        irqs.get(nr as usize).copied().ok_or_else(|| {
            log::warn!("{}: no vector {}", self.id, nr);
            LookupError::OutOfRange {
                index: nr,
                len: irqs.len() as u32,
            }
        })
    }
}

impl From<TeardownFailure> for VisError {
    fn from(failure: TeardownFailure) -> Self {
        failure.error.into()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::irq::{IrqChip, MsiMessage, VectorDomain};
    use crate::testutils::TestMmio;
    use std::thread;

    struct Fixture {
        mmio: Arc<TestMmio>,
        domain: Arc<VectorDomain>,
        hwirqs: Arc<HwIrqGenerator>,
        dev: VisDevice,
    }

    fn fixture(nr_irqs: usize) -> Fixture {
        let mmio = Arc::new(TestMmio::new());
        let domain = Arc::new(VectorDomain::new("vis-test", 64, nr_irqs));
        let hwirqs = Arc::new(HwIrqGenerator::new());
        let dev = VisDevice::new(
            DeviceId(1),
            mmio.clone(),
            VisConfig::default(),
            Some(domain.clone()),
            hwirqs.clone(),
        )
        .unwrap();
        Fixture {
            mmio,
            domain,
            hwirqs,
            dev,
        }
    }

    #[test]
    fn setup_then_lookup() {
        let f = fixture(32);
        let table = f.dev.setup(4).unwrap();

        assert_eq!(table.len(), 4);
        assert_eq!(f.dev.nr_vectors(), 4);
        for i in 0..4 {
            let irq = table.irq_vector(i).unwrap();
            assert_eq!(irq, IrqNumber::new(64 + i));
            assert_eq!(u64::from(irq), u64::from(64 + i));
            assert_eq!(f.dev.irq_vector(i), Ok(irq));
        }
        assert_eq!(
            table.irq_vector(4),
            Err(LookupError::OutOfRange { index: 4, len: 4 })
        );
        assert_eq!(
            f.dev.irq_vector(4),
            Err(LookupError::OutOfRange { index: 4, len: 4 })
        );
    }

    #[test]
    fn entries_get_layout_and_identity() {
        let f = fixture(32);
        let table = f.dev.setup(3).unwrap();

        for (i, entry) in table.iter().enumerate() {
            assert_eq!(entry.index(), i as u32);
            assert_eq!(entry.bit(), i as u32);
            assert_eq!(entry.hwirq().raw(), i as u64);
            assert_eq!(entry.msg_offset(), 0x100 + i * 12);
            assert!(!entry.is_masked());
            assert_eq!(entry.msg(), None);
            assert_eq!(
                f.domain.binding(entry.irq()),
                Some((DeviceId(1), entry.hwirq()))
            );
        }
    }

    #[test]
    fn setup_without_domain() {
        let mmio = Arc::new(TestMmio::new());
        let dev = VisDevice::new(
            DeviceId(2),
            mmio.clone(),
            VisConfig::default(),
            None,
            Arc::new(HwIrqGenerator::new()),
        )
        .unwrap();

        assert_eq!(dev.setup(1).unwrap_err(), AllocError::NoDomain);
        assert!(mmio.writes().is_empty());
    }

    #[test]
    fn setup_rejects_bad_counts() {
        let f = fixture(64);
        assert_eq!(f.dev.setup(0).unwrap_err(), AllocError::InvalidCount);
        assert_eq!(
            f.dev.setup(33).unwrap_err(),
            AllocError::CapacityExceeded {
                requested: 33,
                capacity: 32
            }
        );
        assert_eq!(f.hwirqs.issued(), 0);
        assert!(f.dev.setup(32).is_ok());
    }

    #[test]
    fn single_vector_domain_caps_requests() {
        let mmio = Arc::new(TestMmio::new());
        let domain = Arc::new(VectorDomain::with_flags(
            "single",
            0,
            8,
            DomainFlags::HIERARCHY,
        ));
        let dev = VisDevice::new(
            DeviceId(3),
            mmio,
            VisConfig::default(),
            Some(domain),
            Arc::new(HwIrqGenerator::new()),
        )
        .unwrap();

        assert_eq!(
            dev.setup(2).unwrap_err(),
            AllocError::CapacityExceeded {
                requested: 2,
                capacity: 1
            }
        );
        assert_eq!(dev.setup(1).unwrap().len(), 1);
    }

    #[test]
    fn second_setup_is_busy() {
        let f = fixture(32);
        let table = f.dev.setup(2).unwrap();
        assert_eq!(f.dev.setup(1).unwrap_err(), AllocError::Busy);
        f.dev.teardown(table).unwrap();
        assert!(f.dev.setup(1).is_ok());
    }

    #[test]
    fn partial_grant_rolls_back() {
        let f = fixture(2);

        assert_eq!(
            f.dev.setup(4).unwrap_err(),
            AllocError::Partial {
                requested: 4,
                granted: 2
            }
        );
        assert_eq!(f.domain.bound(), 0);
        assert_eq!(f.dev.nr_vectors(), 0);
        assert!(f.dev.irq_vector(0).is_err());
        assert!(f.mmio.writes().is_empty());

        let table = f.dev.setup(2).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(f.domain.bound(), 2);
        // The four identifiers of the failed attempt stay consumed.
        let ids: Vec<u64> = table.iter().map(|e| e.hwirq().raw()).collect();
        assert_eq!(ids, [4, 5]);
    }

    #[test]
    fn exhausted_domain() {
        let f = fixture(1);
        let _table = f.dev.setup(1).unwrap();

        let other = VisDevice::new(
            DeviceId(9),
            f.mmio.clone(),
            VisConfig::default(),
            Some(f.domain.clone()),
            f.hwirqs.clone(),
        )
        .unwrap();
        assert_eq!(
            other.setup(1).unwrap_err(),
            AllocError::Domain(DomainError::Exhausted)
        );
    }

    #[test]
    fn mask_program_unmask_teardown() {
        let f = fixture(32);
        let table = f.dev.setup(4).unwrap();
        assert_eq!(table.mask_word(), 0);

        table.mask(2).unwrap();
        assert_eq!(table.mask_word(), 1 << 2);
        assert_eq!(f.mmio.reg(0), 1 << 2);

        let msg = MsiMessage::new(0x1000, 0, 0x55);
        table.write_msg(2, &msg).unwrap();
        let base = table.entry(2).unwrap().msg_offset();
        assert_eq!(f.mmio.reg(base), 0x1000);
        assert_eq!(f.mmio.reg(base + 4), 0);
        assert_eq!(f.mmio.reg(base + 8), 0x55);
        assert_eq!(table.entry(2).unwrap().msg(), Some(msg));

        table.unmask(2).unwrap();
        assert_eq!(table.mask_word(), 0);
        assert_eq!(f.mmio.reg(0), 0);

        f.dev.teardown(table).unwrap();
        assert_eq!(f.domain.bound(), 0);
        for i in 0..4 {
            assert_eq!(
                f.dev.irq_vector(i),
                Err(LookupError::OutOfRange { index: i, len: 0 })
            );
        }
    }

    #[test]
    fn message_writes_stay_in_their_slot() {
        let f = fixture(32);
        let table = f.dev.setup(3).unwrap();
        table.mask(0).unwrap();
        let first = MsiMessage::compose(0, 0x30);
        table.write_msg(0, &first).unwrap();

        table.write_msg(1, &MsiMessage::compose(1, 0x31)).unwrap();

        let a = table.entry(0).unwrap();
        assert_eq!(a.msg(), Some(first));
        assert!(a.is_masked());
        assert_eq!(f.mmio.reg(a.msg_offset() + 8), 0x30);
        assert_eq!(table.entry(2).unwrap().msg(), None);
        assert_eq!(table.mask_word(), 1);
    }

    #[test]
    fn mask_unmask_preserve_other_vectors() {
        let f = fixture(32);
        let table = f.dev.setup(8).unwrap();
        for i in [1, 3, 7] {
            table.mask(i).unwrap();
        }
        let before = table.mask_word();
        assert_eq!(before, 0b1000_1010);

        table.mask(5).unwrap();
        table.unmask(5).unwrap();
        assert_eq!(table.mask_word(), before);

        table.unmask(3).unwrap();
        assert_eq!(table.mask_word(), 0b1000_0010);
        assert!(table.entry(1).unwrap().is_masked());
        assert!(!table.entry(3).unwrap().is_masked());
    }

    #[test]
    fn initial_mask_is_written_and_mirrored() {
        let mmio = Arc::new(TestMmio::new());
        let config = VisConfig {
            initial_mask: 0b101,
            ..Default::default()
        };
        let dev = VisDevice::new(
            DeviceId(4),
            mmio.clone(),
            config,
            Some(Arc::new(VectorDomain::new("init", 0, 8))),
            Arc::new(HwIrqGenerator::new()),
        )
        .unwrap();

        let table = dev.setup(3).unwrap();
        assert_eq!(mmio.writes(), [(0, 0b101)]);
        assert!(table.entry(0).unwrap().is_masked());
        assert!(!table.entry(1).unwrap().is_masked());
        assert!(table.entry(2).unwrap().is_masked());

        table.unmask(0).unwrap();
        assert_eq!(mmio.reg(0), 0b100);
    }

    #[test]
    fn reprogram_masks_live_vector() {
        let f = fixture(32);
        let table = f.dev.setup(2).unwrap();
        f.mmio.clear_writes();

        let msg = MsiMessage::new(0xfee0_0000, 0, 0x40);
        table.reprogram(1, &msg).unwrap();

        let base = table.entry(1).unwrap().msg_offset();
        assert_eq!(
            f.mmio.writes(),
            [
                (0, 0b10),
                (base, 0xfee0_0000),
                (base + 4, 0),
                (base + 8, 0x40),
                (0, 0),
            ]
        );
        assert!(!table.entry(1).unwrap().is_masked());
        assert_eq!(table.entry(1).unwrap().msg(), Some(msg));
    }

    #[test]
    fn reprogram_keeps_masked_vector_masked() {
        let f = fixture(32);
        let table = f.dev.setup(2).unwrap();
        table.mask(0).unwrap();
        f.mmio.clear_writes();

        table.reprogram(0, &MsiMessage::new(1, 2, 3)).unwrap();
        assert!(f.mmio.writes_to(0).is_empty());
        assert!(table.entry(0).unwrap().is_masked());
    }

    #[test]
    fn chip_callbacks_on_entries() {
        let f = fixture(32);
        let table = f.dev.setup(2).unwrap();
        let chip = table.chip();
        let entry = table.entry(1).unwrap();

        assert_eq!(chip.name(), "VIS");
        chip.mask(entry);
        assert!(entry.is_masked());
        assert_eq!(f.mmio.writes_to(0), [0, 0b10]);
        chip.unmask(entry);
        assert!(!entry.is_masked());
    }

    #[test]
    fn out_of_range_callbacks() {
        let f = fixture(32);
        let table = f.dev.setup(2).unwrap();
        let err = LookupError::OutOfRange { index: 2, len: 2 };
        assert_eq!(table.mask(2), Err(err));
        assert_eq!(table.unmask(2), Err(err));
        assert_eq!(table.write_msg(2, &MsiMessage::default()), Err(err));
        assert_eq!(table.mask_word(), 0);
    }

    #[test]
    #[should_panic(expected = "still active at teardown")]
    fn teardown_of_active_vector_panics() {
        let f = fixture(32);
        let table = f.dev.setup(2).unwrap();
        f.domain.activate(table.irq_vector(1).unwrap()).unwrap();
        let _ = f.dev.teardown(table);
    }

    #[test]
    fn teardown_after_deactivation() {
        let f = fixture(32);
        let table = f.dev.setup(2).unwrap();
        let irq = table.irq_vector(0).unwrap();
        f.domain.activate(irq).unwrap();
        f.domain.deactivate(irq).unwrap();
        assert!(f.dev.teardown(table).is_ok());
    }

    #[test]
    fn teardown_without_hierarchy_is_unsupported() {
        let mmio = Arc::new(TestMmio::new());
        let domain = Arc::new(VectorDomain::with_flags(
            "flat",
            0,
            8,
            DomainFlags::MULTI_VECTOR,
        ));
        let dev = VisDevice::new(
            DeviceId(5),
            mmio,
            VisConfig::default(),
            Some(domain.clone()),
            Arc::new(HwIrqGenerator::new()),
        )
        .unwrap();

        let table = dev.setup(2).unwrap();
        let failure = dev.teardown(table).unwrap_err();
        assert_eq!(failure.error, TeardownError::Unsupported);
        assert_eq!(failure.table.len(), 2);
        // Nothing was released.
        assert_eq!(domain.bound(), 2);
        assert_eq!(dev.nr_vectors(), 2);
        assert_eq!(
            VisError::from(failure),
            VisError::Teardown(TeardownError::Unsupported)
        );
    }

    #[test]
    fn teardown_of_foreign_table() {
        let f = fixture(32);
        let other = VisDevice::new(
            DeviceId(6),
            f.mmio.clone(),
            VisConfig::default(),
            Some(f.domain.clone()),
            f.hwirqs.clone(),
        )
        .unwrap();
        let table = other.setup(1).unwrap();

        let failure = f.dev.teardown(table).unwrap_err();
        assert_eq!(failure.error, TeardownError::ForeignTable);
        assert!(other.teardown(failure.table).is_ok());
    }

    #[test]
    fn hwirqs_are_not_reused_after_teardown() {
        let f = fixture(32);
        let table = f.dev.setup(2).unwrap();
        f.dev.teardown(table).unwrap();

        let table = f.dev.setup(2).unwrap();
        let ids: Vec<u64> = table.iter().map(|e| e.hwirq().raw()).collect();
        assert_eq!(ids, [2, 3]);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = VisConfig {
            max_vectors: 40,
            ..Default::default()
        };
        let err = VisDevice::new(
            DeviceId(7),
            Arc::new(TestMmio::new()),
            config,
            None,
            Arc::new(HwIrqGenerator::new()),
        )
        .unwrap_err();
        assert_eq!(err, ConfigError::TooManyVectors(40));
        assert_eq!(
            VisError::from(err),
            VisError::Config(ConfigError::TooManyVectors(40))
        );
    }

    #[test]
    fn window_smaller_than_layout_is_rejected() {
        let err = VisDevice::new(
            DeviceId(8),
            Arc::new(TestMmio::with_size(0x200)),
            VisConfig::default(),
            None,
            Arc::new(HwIrqGenerator::new()),
        )
        .unwrap_err();
        assert_eq!(err, ConfigError::OutOfWindow);

        // A window covering the configured layout is fine.
        let config = VisConfig {
            window_size: 0x200,
            max_vectors: 16,
            ..Default::default()
        };
        let dev = VisDevice::new(
            DeviceId(8),
            Arc::new(TestMmio::with_size(0x200)),
            config,
            None,
            Arc::new(HwIrqGenerator::new()),
        );
        assert!(dev.is_ok());
    }

    #[test]
    fn new_table_gets_fresh_mask_mirror() {
        let f = fixture(32);
        let table = f.dev.setup(4).unwrap();
        table.mask(0).unwrap();
        let old_generation = table.entry(0).unwrap().generation();
        f.dev.teardown(table).unwrap();

        let table = f.dev.setup(4).unwrap();
        table.mask(1).unwrap();
        table.chip().mask(table.entry(2).unwrap());

        assert!(table.iter().all(|e| e.generation() != old_generation));
        assert_eq!(table.mask_word(), 0b110);
        assert_eq!(f.mmio.reg(0), table.mask_word());
    }

    #[test]
    fn concurrent_setup_and_teardown() {
        let f = fixture(32);
        let dev = Arc::new(f.dev);

        let threads: Vec<_> = (0..4)
            .map(|_| {
                let dev = dev.clone();
                thread::spawn(move || {
                    let mut done = 0;
                    while done < 50 {
                        match dev.setup(8) {
                            Ok(table) => {
                                assert_eq!(dev.nr_vectors(), 8);
                                dev.teardown(table).unwrap();
                                done += 1;
                            }
                            Err(err) => assert_eq!(err, AllocError::Busy),
                        }
                    }
                })
            })
            .collect();
        for t in threads {
            t.join().unwrap();
        }

        assert_eq!(dev.nr_vectors(), 0);
        assert_eq!(f.domain.bound(), 0);
        assert_eq!(f.hwirqs.issued(), 4 * 50 * 8);
    }

    #[test]
    fn concurrent_masking_loses_no_update() {
        let f = fixture(32);
        let table = Arc::new(f.dev.setup(16).unwrap());

        let threads: Vec<_> = (0..4u32)
            .map(|t| {
                let table = table.clone();
                thread::spawn(move || {
                    for round in 0..200 {
                        for i in (t * 4)..(t * 4 + 4) {
                            if round % 2 == 0 {
                                table.mask(i).unwrap();
                            } else {
                                table.unmask(i).unwrap();
                            }
                        }
                    }
                    // Leave the odd vectors of this thread masked.
                    for i in (t * 4)..(t * 4 + 4) {
                        if i % 2 == 1 {
                            table.mask(i).unwrap();
                        }
                    }
                })
            })
            .collect();
        for t in threads {
            t.join().unwrap();
        }

        assert_eq!(table.mask_word(), 0xaaaa);
        assert_eq!(f.mmio.reg(0), 0xaaaa);
        for entry in table.iter() {
            assert_eq!(entry.is_masked(), entry.index() % 2 == 1);
        }
    }
}
