use embedded_hal::blocking::delay::{DelayMs, DelayUs};
use embedded_hal::blocking::spi::{Transfer, Write};
use embedded_hal::digital::v2::{InputPin, OutputPin};

use crate::registers::{cmd, eeprom};
use crate::transport::{Pn5180, TransportError};

/// Two-byte EEPROM version fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionField {
    Product,
    Firmware,
    Eeprom,
}

impl VersionField {
    pub fn address(self) -> u8 {
        match self {
            VersionField::Product => eeprom::PRODUCT_VERSION,
            VersionField::Firmware => eeprom::FIRMWARE_VERSION,
            VersionField::Eeprom => eeprom::EEPROM_VERSION,
        }
    }
}

/// A product version that means the chip is not answering at all (MISO
/// pulled high) or not clocked/programmed (MISO stuck low).
pub fn is_unresponsive(version: [u8; 2]) -> bool {
    version == [0xFF, 0xFF] || version == [0x00, 0x00]
}

impl<'clock, Spi, NssPin, BusyPin, ResetPin, Delay, Clock> Pn5180<'clock, Spi, NssPin, BusyPin, ResetPin, Delay, Clock>
    where
        Spi: Transfer<u8> + Write<u8>,
        NssPin: OutputPin,
        BusyPin: InputPin,
        ResetPin: OutputPin,
        Delay: DelayMs<u32> + DelayUs<u32>,
        Clock: embedded_time::Clock<T = u32> + 'clock
{
    /// Hardware reset through RST, then wait for the chip to come up.
    pub fn reset(&mut self) -> Result<(), TransportError> {
        self.reset.set_low().map_err(|_| TransportError::Pin)?;
        self.delay.delay_ms(self.timing.reset_pulse_ms);
        self.reset.set_high().map_err(|_| TransportError::Pin)?;
        self.delay.delay_ms(self.timing.reset_settle_ms);
        self.await_ready()
    }

    pub fn read_version(&mut self, field: VersionField) -> Result<[u8; 2], TransportError> {
        let mut version = [0u8; 2];
        self.read_eeprom(field.address(), &mut version)?;
        Ok(version)
    }

    /// Reset, probe the product version and bring up the ISO15693 field.
    ///
    /// `Ok(false)` means the chip did not identify itself; nothing else was
    /// sent to it in that case.
    pub fn init(&mut self) -> Result<bool, TransportError> {
        self.reset()?;

        let version = self.read_version(VersionField::Product)?;
        log::info!("PN5180 product version {}.{}", version[0], version[1]);

        if is_unresponsive(version) {
            log::warn!("PN5180 not responding (read {:02X?})", version);
            return Ok(false);
        }

        let rf = self.rf;
        self.load_rf_config(rf.tx, rf.rx)?;
        self.rf_on()?;
        Ok(true)
    }

    pub fn load_rf_config(&mut self, tx: u8, rx: u8) -> Result<(), TransportError> {
        self.command(&[cmd::LOAD_RF_CONFIG, tx, rx])
    }

    pub fn rf_on(&mut self) -> Result<(), TransportError> {
        self.command(&[cmd::RF_ON, 0x00])
    }

    pub fn rf_off(&mut self) -> Result<(), TransportError> {
        self.command(&[cmd::RF_OFF, 0x00])
    }
}
