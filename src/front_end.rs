use embedded_hal::blocking::delay::{DelayMs, DelayUs};
use embedded_hal::blocking::spi::{Transfer, Write};
use embedded_hal::digital::v2::{InputPin, OutputPin};

use crate::iso15693::{Uid, BLOCK_LEN};
use crate::rf::VersionField;
use crate::transport::{Pn5180, TransportError};

/// What the command dispatcher needs from the NFC front end.
pub trait NfcFrontEnd {
    /// Reset and bring up the RF field. `Ok(false)` when the chip did not
    /// identify itself.
    fn init(&mut self) -> Result<bool, TransportError>;

    fn read_version(&mut self, field: VersionField) -> Result<[u8; 2], TransportError>;

    fn inventory(&mut self) -> Result<Option<Uid>, TransportError>;

    fn read_block(&mut self, uid: &Uid, block: u8) -> Result<Option<[u8; BLOCK_LEN]>, TransportError>;
}

impl<'clock, Spi, NssPin, BusyPin, ResetPin, Delay, Clock> NfcFrontEnd for Pn5180<'clock, Spi, NssPin, BusyPin, ResetPin, Delay, Clock>
    where
        Spi: Transfer<u8> + Write<u8>,
        NssPin: OutputPin,
        BusyPin: InputPin,
        ResetPin: OutputPin,
        Delay: DelayMs<u32> + DelayUs<u32>,
        Clock: embedded_time::Clock<T = u32> + 'clock
{
    fn init(&mut self) -> Result<bool, TransportError> {
        Pn5180::init(self)
    }

    fn read_version(&mut self, field: VersionField) -> Result<[u8; 2], TransportError> {
        Pn5180::read_version(self, field)
    }

    fn inventory(&mut self) -> Result<Option<Uid>, TransportError> {
        Pn5180::inventory(self)
    }

    fn read_block(&mut self, uid: &Uid, block: u8) -> Result<Option<[u8; BLOCK_LEN]>, TransportError> {
        Pn5180::read_block(self, uid, block)
    }
}
