//! CPU clock configuration.

/// Clock that drives a CPU, used by hosts to pace instruction stepping.
///
/// The CPU itself has no notion of wall-clock time. A host that wants
/// real-time speed runs a frame's worth of cycles, then sleeps until the
/// frame deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MasterClock {
    /// CPU clock frequency in Hz (e.g., `1_789_773` for an NTSC NES).
    pub frequency_hz: u64,
}

impl Default for MasterClock {
    fn default() -> Self {
        Self::new(1_000_000)
    }
}

impl MasterClock {
    #[must_use]
    pub const fn new(frequency_hz: u64) -> Self {
        Self { frequency_hz }
    }

    /// Cycles per frame at the given frame rate (integer division).
    ///
    /// A zero frame rate yields zero cycles rather than dividing by zero.
    #[must_use]
    pub const fn cycles_per_frame(&self, frames_per_second: u64) -> u64 {
        match frames_per_second {
            0 => 0,
            fps => self.frequency_hz / fps,
        }
    }
}
