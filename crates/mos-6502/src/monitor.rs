//! Read-only view of CPU state for another thread.
//!
//! The CPU publishes a [`Snapshot`] at the end of every `step()`. A debugger
//! or UI thread holds a cloned [`Monitor`] and reads the latest one. Nothing
//! on the reading side can reach back into the CPU.

use std::sync::{Arc, PoisonError, RwLock};

use crate::Registers;

/// CPU state captured at an instruction boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    pub registers: Registers,
    pub data_latch: u8,
    pub effective_address: u16,
    pub temp: u16,
    pub cycles: u64,
    /// Opcode byte of the last instruction executed, if any.
    pub opcode: Option<u8>,
    pub halted: bool,
}

/// Shared handle to the most recent [`Snapshot`].
#[derive(Debug, Clone, Default)]
pub struct Monitor {
    shared: Arc<RwLock<Snapshot>>,
}

impl Monitor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently published snapshot.
    #[must_use]
    pub fn latest(&self) -> Snapshot {
        // A writer can only panic between whole-value stores, so the data
        // behind a poisoned lock is still a complete snapshot.
        *self.shared.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn publish(&self, snapshot: Snapshot) {
        *self.shared.write().unwrap_or_else(PoisonError::into_inner) = snapshot;
    }
}
