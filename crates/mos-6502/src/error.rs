//! Errors reported to the host.

/// Errors that stop the CPU or reject shared register storage.
///
/// The CPU never retries or recovers on its own; the host decides whether
/// to reset, skip, or give up.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The fetched byte has no entry in the opcode table.
    #[error("illegal opcode ${opcode:02X} at ${address:04X}")]
    IllegalOpcode { opcode: u8, address: u16 },

    /// A shared register buffer is shorter than the packed register file.
    #[error("register buffer holds {len} bytes, {required} required")]
    BufferTooSmall { len: usize, required: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
