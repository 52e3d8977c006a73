use crate::io::MmioAccess;
use crate::locking::SpinLock;
use alloc::collections::BTreeMap;
use alloc::vec::Vec;

/// Register window backed by memory that records every write.
#[derive(Debug)]
pub struct TestMmio {
    size: usize,
    regs: SpinLock<BTreeMap<usize, u32>>,
    writes: SpinLock<Vec<(usize, u32)>>,
}

impl TestMmio {
    /// A window of the default configured size.
    pub fn new() -> Self {
        Self::with_size(0x1000)
    }

    pub fn with_size(size: usize) -> Self {
        Self {
            size,
            regs: SpinLock::new(BTreeMap::new()),
            writes: SpinLock::new(Vec::new()),
        }
    }

    /// Current content of the register at `offset`.
    pub fn reg(&self, offset: usize) -> u32 {
        self.regs.lock().get(&offset).copied().unwrap_or(0)
    }

    /// All writes issued so far, oldest first.
    pub fn writes(&self) -> Vec<(usize, u32)> {
        self.writes.lock().clone()
    }

    /// Writes that hit the register at `offset`.
    pub fn writes_to(&self, offset: usize) -> Vec<u32> {
        self.writes
            .lock()
            .iter()
            .filter(|(o, _)| *o == offset)
            .map(|(_, v)| *v)
            .collect()
    }

    pub fn clear_writes(&self) {
        self.writes.lock().clear();
    }
}

impl Default for TestMmio {
    fn default() -> Self {
        Self::new()
    }
}

impl MmioAccess for TestMmio {
    fn read32(&self, offset: usize) -> u32 {
        self.reg(offset)
    }

    fn write32(&self, offset: usize, value: u32) {
        assert!(offset + 4 <= self.size, "write to {offset:#x} outside of window");
        self.regs.lock().insert(offset, value);
        self.writes.lock().push((offset, value));
    }

    fn size(&self) -> usize {
        self.size
    }
}
