/// Trait for an object that owns the CPU's address bus
///
/// The core treats the bus as an opaque capability: a byte read and a byte
/// write, each keyed by a 16-bit address. Hosts backed by a real memory map
/// dispatch on the address themselves; the core never inspects it.
pub trait Bus {
    /// Read from the bus at the given address, triggering any possible
    /// side-effects
    fn read(&mut self, addr: u16) -> u8;

    /// Attempt to deterministically read from the bus
    ///
    /// This should return None if such a read is not possible without
    /// side-effects (for instance, ports that mutate on read). Only the
    /// trace formatter depends on it.
    fn peek(&self, addr: u16) -> Option<u8>;

    /// Write to the bus with the given data
    fn write(&mut self, addr: u16, data: u8);

    /// Drive a value onto the databus latch without a read or write cycle.
    ///
    /// A jammed CPU is frozen with $FF on the data bus; hosts that model
    /// the latch override this. The default is a no-op.
    fn force_databus(&mut self, _data: u8) {}
}

#[derive(Debug, Eq, PartialEq)]
pub enum BusPeekResult {
    Unmapped,
    Result(u8),
}

impl BusPeekResult {
    /// Unwrap a BusPeekResult to an u8, substituting the latched bus value
    /// for unmapped reads
    pub fn unwrap(&self, last_bus_value: u8) -> u8 {
        match self {
            BusPeekResult::Result(val) => *val,
            _ => last_bus_value,
        }
    }

    /// Convert a BusPeekResult into an Option<u8>
    pub fn to_optional(&self) -> Option<u8> {
        match self {
            BusPeekResult::Result(val) => Some(*val),
            _ => None,
        }
    }
}

/// Trait for an object that may be mounted to and driven by an address bus
pub trait BusDevice {
    /// Given a local address and the last bus value, return a new bus value
    fn read(&mut self, addr: u16, last_bus_value: u8) -> u8;

    /// Attempt to immutably and deterministically read from the device
    fn peek(&self, addr: u16) -> BusPeekResult;

    /// Write to the device at the local address
    fn write(&mut self, addr: u16, value: u8);
}
