use embedded_hal::blocking::delay::{DelayMs, DelayUs};
use embedded_hal::blocking::spi::{Transfer, Write};
use embedded_hal::digital::v2::{InputPin, OutputPin};
use embedded_time::duration::Milliseconds;
use heapless::{consts::*, Vec};

use crate::busy::BusyLine;
use crate::chip_select::ChipSelect;
use crate::config::{BridgeConfig, RfProfile, Timing};
use crate::registers::{self, cmd, reg};

/// Longest frame accepted by [`Pn5180::send_data`], excluding the two
/// command bytes.
pub const MAX_SEND_LEN: usize = 62;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// SPI write failed.
    WriteError,
    /// SPI read failed.
    ReadError,
    /// NSS, RST or BUSY could not be driven or sampled.
    Pin,
    /// BUSY stayed high past the configured timeout.
    BusyTimeout,
    /// No RX_IRQ within the configured timeout.
    RxTimeout,
    /// The timing clock failed.
    Clock,
    /// Outgoing RF frame larger than [`MAX_SEND_LEN`].
    FrameTooLong,
}

/// SPI host interface of a PN5180.
///
/// Every transaction is framed by NSS and gated by BUSY: wait for BUSY low,
/// select, clock the command out, deselect. Read-style commands then wait
/// for BUSY again and clock the answer in under a second NSS frame.
pub struct Pn5180<'clock, Spi, NssPin, BusyPin, ResetPin, Delay, Clock>
    where
        Spi: Transfer<u8> + Write<u8>,
        NssPin: OutputPin,
        BusyPin: InputPin,
        ResetPin: OutputPin,
        Delay: DelayMs<u32> + DelayUs<u32>,
        Clock: embedded_time::Clock<T = u32> + 'clock
{
    spi: Spi,
    nss: ChipSelect<NssPin>,
    busy: BusyLine<BusyPin>,
    pub(crate) reset: ResetPin,
    pub(crate) delay: Delay,
    clock: &'clock Clock,
    pub(crate) timing: Timing,
    pub(crate) rf: RfProfile,
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
    pub fn new(spi: Spi,
               nss: NssPin,
               busy: BusyPin,
               reset: ResetPin,
               delay: Delay,
               clock: &'clock Clock,
               config: &BridgeConfig,
    ) -> Self {
        Self {
            spi,
            nss: ChipSelect::new(nss, config.timing.select_setup_us),
            busy: BusyLine::new(busy),
            reset,
            delay,
            clock,
            timing: config.timing,
            rf: config.rf,
        }
    }

    pub(crate) fn await_ready(&mut self) -> Result<(), TransportError> {
        self.busy.wait_ready(self.clock, Milliseconds(self.timing.busy_timeout_ms))
    }

    fn send_frame(&mut self, frame: &[u8]) -> Result<(), TransportError> {
        self.await_ready()?;
        let _cs = self.nss.select(&mut self.delay)?;
        self.spi.write(frame).map_err(|_| TransportError::WriteError)
    }

    fn receive_frame(&mut self, response: &mut [u8]) -> Result<(), TransportError> {
        self.await_ready()?;
        let _cs = self.nss.select(&mut self.delay)?;
        for b in response.iter_mut() {
            *b = registers::DUMMY;
        }
        self.spi.transfer(response).map_err(|_| TransportError::ReadError)?;
        Ok(())
    }

    /// Single-frame command with no answer.
    pub(crate) fn command(&mut self, frame: &[u8]) -> Result<(), TransportError> {
        self.send_frame(frame)?;
        self.await_ready()
    }

    fn write_register_with(&mut self, command: u8, register: u8, value: u32) -> Result<(), TransportError> {
        let v = value.to_le_bytes();
        self.command(&[command, register, v[0], v[1], v[2], v[3]])
    }

    // ------------------------------------------------------------------------
    // Register and EEPROM access
    // ------------------------------------------------------------------------

    pub fn write_register(&mut self, register: u8, value: u32) -> Result<(), TransportError> {
        self.write_register_with(cmd::WRITE_REGISTER, register, value)
    }

    /// `register |= mask`, performed by the chip.
    pub fn write_register_or_mask(&mut self, register: u8, mask: u32) -> Result<(), TransportError> {
        self.write_register_with(cmd::WRITE_REGISTER_OR_MASK, register, mask)
    }

    /// `register &= mask`, performed by the chip.
    pub fn write_register_and_mask(&mut self, register: u8, mask: u32) -> Result<(), TransportError> {
        self.write_register_with(cmd::WRITE_REGISTER_AND_MASK, register, mask)
    }

    pub fn read_register(&mut self, register: u8) -> Result<u32, TransportError> {
        self.send_frame(&[cmd::READ_REGISTER, register])?;
        let mut value = [0u8; 4];
        self.receive_frame(&mut value)?;
        Ok(u32::from_le_bytes(value))
    }

    /// Fill `buffer` from EEPROM starting at `address`. At most 255 bytes.
    pub fn read_eeprom(&mut self, address: u8, buffer: &mut [u8]) -> Result<(), TransportError> {
        let len = buffer.len().min(u8::MAX as usize);
        self.send_frame(&[cmd::READ_EEPROM, address, len as u8])?;
        self.receive_frame(&mut buffer[..len])
    }

    // ------------------------------------------------------------------------
    // RF data path
    // ------------------------------------------------------------------------

    /// Clear the IRQ flags, arm the transceiver and hand `data` to the RF
    /// encoder. `valid_bits` is the number of valid bits in the last byte,
    /// 0 meaning all eight.
    pub fn send_data(&mut self, data: &[u8], valid_bits: u8) -> Result<(), TransportError> {
        if data.len() > MAX_SEND_LEN {
            return Err(TransportError::FrameTooLong);
        }

        self.write_register(reg::IRQ_CLEAR, registers::IRQ_CLEAR_ALL)?;
        self.write_register_and_mask(reg::SYSTEM_CONFIG, registers::SYSTEM_CONFIG_IDLE_MASK)?;
        self.write_register_or_mask(reg::SYSTEM_CONFIG, registers::SYSTEM_CONFIG_TRANSCEIVE)?;

        let mut frame = Vec::<u8, U64>::new();
        frame.push(cmd::SEND_DATA).map_err(|_| TransportError::FrameTooLong)?;
        frame.push(valid_bits).map_err(|_| TransportError::FrameTooLong)?;
        frame.extend_from_slice(data).map_err(|_| TransportError::FrameTooLong)?;

        self.command(&frame)
    }

    /// Wait for RX_IRQ and copy the received bytes into `buffer`.
    ///
    /// Returns the number of bytes copied. Receptions longer than `buffer`
    /// are truncated.
    pub fn read_data(&mut self, buffer: &mut [u8]) -> Result<usize, TransportError> {
        let clock = self.clock;
        let timer = clock.new_timer(Milliseconds(self.timing.rx_timeout_ms))
            .start()
            .map_err(|_| TransportError::Clock)?;

        loop {
            let irq = self.read_register(reg::IRQ_STATUS)?;
            if irq & registers::IRQ_RX != 0 {
                break;
            }
            if timer.is_expired().map_err(|_| TransportError::Clock)? {
                log::debug!("no RX_IRQ after {} ms", self.timing.rx_timeout_ms);
                return Err(TransportError::RxTimeout);
            }
        }

        let rx_status = self.read_register(reg::RX_STATUS)?;
        let len = ((rx_status & registers::RX_STATUS_LEN_MASK) as usize).min(buffer.len());
        if len == 0 {
            return Ok(0);
        }

        self.send_frame(&[cmd::READ_DATA, 0x00])?;
        self.receive_frame(&mut buffer[..len])?;
        Ok(len)
    }
}
