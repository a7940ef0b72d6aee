//! Memory bus interface and the stock bus implementations.

/// Memory and I/O bus interface.
///
/// The CPU reaches RAM and every memory-mapped device through this trait.
/// `read` takes `&mut self` because a device register may change state when
/// it is read (latches clearing, FIFOs advancing). Accesses never fail: every
/// 16-bit address decodes to something, even if that something is open bus.
///
/// Implementations must not block and must not re-enter the CPU.
pub trait Bus {
    /// Read a byte from the given address.
    fn read(&mut self, address: u16) -> u8;

    /// Write a byte to the given address.
    fn write(&mut self, address: u16, value: u8);
}

impl<B: Bus + ?Sized> Bus for Box<B> {
    fn read(&mut self, address: u16) -> u8 {
        (**self).read(address)
    }

    fn write(&mut self, address: u16, value: u8) {
        (**self).write(address, value);
    }
}

/// Size of the internal RAM chip.
const RAM_SIZE: usize = 0x0800;

/// Last address that decodes to internal RAM (four mirrors of 2 KB).
const RAM_END: u16 = 0x1FFF;

/// 2 KB of RAM mirrored across $0000-$1FFF, with an optional device window.
///
/// Addresses $2000-$FFFF belong to whatever collaborator is installed with
/// [`RamBus::map_upper`]. Without one, reads there return the open-bus value
/// and writes are dropped.
pub struct RamBus {
    ram: [u8; RAM_SIZE],
    upper: Option<Box<dyn Bus>>,
    open_bus: u8,
}

impl Default for RamBus {
    fn default() -> Self {
        Self::new()
    }
}

impl RamBus {
    /// Create a bus with zeroed RAM and nothing mapped above $1FFF.
    #[must_use]
    pub fn new() -> Self {
        Self::with_open_bus(0x00)
    }

    /// Create a bus whose unmapped reads return `open_bus`.
    #[must_use]
    pub fn with_open_bus(open_bus: u8) -> Self {
        Self {
            ram: [0; RAM_SIZE],
            upper: None,
            open_bus,
        }
    }

    /// Install a handler for $2000-$FFFF, returning the previous one.
    ///
    /// The handler receives the full, unmodified CPU address.
    pub fn map_upper(&mut self, handler: Box<dyn Bus>) -> Option<Box<dyn Bus>> {
        log::debug!("RamBus: device window $2000-$FFFF mapped");
        self.upper.replace(handler)
    }

    /// Remove the $2000-$FFFF handler, if any.
    pub fn unmap_upper(&mut self) -> Option<Box<dyn Bus>> {
        self.upper.take()
    }

    /// Copy `data` into RAM starting at `address`, following the mirror.
    pub fn load(&mut self, address: u16, data: &[u8]) {
        for (offset, &byte) in data.iter().enumerate() {
            let addr = address.wrapping_add(offset as u16);
            self.ram[usize::from(addr) % RAM_SIZE] = byte;
        }
    }

    /// Peek a byte from RAM without side effects (for observation).
    #[must_use]
    pub fn peek_ram(&self, address: u16) -> u8 {
        self.ram[usize::from(address) % RAM_SIZE]
    }
}

impl Bus for RamBus {
    fn read(&mut self, address: u16) -> u8 {
        if address <= RAM_END {
            return self.ram[usize::from(address & 0x07FF)];
        }
        match self.upper.as_mut() {
            Some(handler) => handler.read(address),
            None => self.open_bus,
        }
    }

    fn write(&mut self, address: u16, value: u8) {
        if address <= RAM_END {
            self.ram[usize::from(address & 0x07FF)] = value;
        } else if let Some(handler) = self.upper.as_mut() {
            handler.write(address, value);
        }
    }
}

/// Flat 64 KB RAM covering the whole address space.
///
/// Used by test harnesses, and handy as a stand-in ROM/RAM collaborator
/// behind [`RamBus::map_upper`].
pub struct SimpleBus {
    memory: Box<[u8]>,
}

impl Default for SimpleBus {
    fn default() -> Self {
        Self::new()
    }
}

impl SimpleBus {
    #[must_use]
    pub fn new() -> Self {
        Self {
            memory: vec![0; 0x1_0000].into_boxed_slice(),
        }
    }

    /// Copy `data` into memory starting at `address`, wrapping at $FFFF.
    pub fn load(&mut self, address: u16, data: &[u8]) {
        for (offset, &byte) in data.iter().enumerate() {
            let addr = address.wrapping_add(offset as u16);
            self.memory[usize::from(addr)] = byte;
        }
    }

    /// Read a byte without going through the bus.
    #[must_use]
    pub fn peek(&self, address: u16) -> u8 {
        self.memory[usize::from(address)]
    }
}

impl Bus for SimpleBus {
    fn read(&mut self, address: u16) -> u8 {
        self.memory[usize::from(address)]
    }

    fn write(&mut self, address: u16, value: u8) {
        self.memory[usize::from(address)] = value;
    }
}
