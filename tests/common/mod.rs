//! Simulated PN5180 wired to the bridge through embedded-hal traits.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::blocking::spi::{Transfer, Write};
use embedded_hal::digital::v2::{InputPin, OutputPin};
use embedded_hal::timer::CountDown;
use embedded_time::clock::Error;
use embedded_time::duration::Microseconds;
use embedded_time::fraction::Fraction;
use embedded_time::Instant;

use pico_nfc_bridge::delay::DelayTimer;
use pico_nfc_bridge::mailbox::Mailbox;
use pico_nfc_bridge::{Bridge, BridgeConfig, I2cSlave, Pn5180};

pub const TAG_UID: [u8; 8] = [0xE0, 0x04, 0x01, 0x50, 0x35, 0x2C, 0x0D, 0x7B];

pub struct SimTag {
    /// Display order.
    pub uid: [u8; 8],
    pub dsfid: u8,
    pub blocks: Vec<[u8; 4]>,
    /// Answer block reads with the ISO15693 error flag.
    pub refuse_reads: bool,
}

impl SimTag {
    pub fn icode() -> Self {
        Self {
            uid: TAG_UID,
            dsfid: 0x00,
            blocks: (0..28u8).map(|i| [i, i + 1, i + 2, i + 3]).collect(),
            refuse_reads: false,
        }
    }

    fn wire_uid(&self) -> Vec<u8> {
        self.uid.iter().rev().copied().collect()
    }
}

pub struct ChipState {
    pub product_version: [u8; 2],
    pub firmware_version: [u8; 2],
    pub eeprom_version: [u8; 2],
    pub tag: Option<SimTag>,
    pub busy_stuck: bool,
    pub rf_config: Option<(u8, u8)>,
    pub rf_on: bool,
    pub resets: usize,
    /// Every frame handed to SEND_DATA, without the command header.
    pub rf_frames: Vec<Vec<u8>>,
    /// SEND_DATA frames issued while the transceiver was not armed.
    pub unarmed_sends: usize,
    pub system_config: u32,
    /// Every delay the driver waited, in µs.
    pub delays_us: Vec<u32>,
    nss_low: bool,
    irq_rx: bool,
    rx: Vec<u8>,
    pending: Vec<u8>,
}

impl ChipState {
    fn new() -> Self {
        Self {
            product_version: [0x03, 0x05],
            firmware_version: [0x04, 0x00],
            eeprom_version: [0x0E, 0x00],
            tag: None,
            busy_stuck: false,
            rf_config: None,
            rf_on: false,
            resets: 0,
            rf_frames: Vec::new(),
            unarmed_sends: 0,
            system_config: 0,
            delays_us: Vec::new(),
            nss_low: false,
            irq_rx: false,
            rx: Vec::new(),
            pending: Vec::new(),
        }
    }

    fn command(&mut self, frame: &[u8]) {
        assert!(self.nss_low, "SPI write outside an NSS frame");
        match frame[0] {
            0x00..=0x02 => {
                let value = u32::from_le_bytes([frame[2], frame[3], frame[4], frame[5]]);
                match (frame[0], frame[1]) {
                    (0x00, 0x03) if value & 0x01 != 0 => self.irq_rx = false,
                    (0x00, 0x00) => self.system_config = value,
                    (0x01, 0x00) => self.system_config |= value,
                    (0x02, 0x00) => self.system_config &= value,
                    _ => {}
                }
            }
            0x04 => {
                let value: u32 = match frame[1] {
                    0x02 => self.irq_rx as u32,
                    0x13 => self.rx.len() as u32,
                    _ => 0,
                };
                self.pending = value.to_le_bytes().to_vec();
            }
            0x07 => {
                let version = match frame[1] {
                    0x10 => self.product_version,
                    0x12 => self.firmware_version,
                    0x14 => self.eeprom_version,
                    other => panic!("unexpected EEPROM address 0x{:02X}", other),
                };
                self.pending = version[..frame[2] as usize].to_vec();
            }
            0x09 => self.rf_exchange(&frame[2..]),
            0x0A => self.pending = self.rx.clone(),
            0x11 => self.rf_config = Some((frame[1], frame[2])),
            0x16 => self.rf_on = self.rf_config.is_some(),
            0x17 => self.rf_on = false,
            other => panic!("unexpected PN5180 command 0x{:02X}", other),
        }
    }

    fn rf_exchange(&mut self, request: &[u8]) {
        self.rf_frames.push(request.to_vec());
        self.rx.clear();
        // Transceive state, entered from Idle
        if self.system_config & 0x07 != 0x03 {
            self.unarmed_sends += 1;
            return;
        }
        self.system_config &= !0x07;
        if !self.rf_on {
            return;
        }
        let tag = match &self.tag {
            Some(tag) => tag,
            None => return,
        };

        match request {
            [0x26, 0x01, 0x00] => {
                self.rx.push(0x00);
                self.rx.push(tag.dsfid);
                self.rx.extend(tag.wire_uid());
            }
            [0x22, 0x20, rest @ ..] if rest.len() == 9 => {
                if rest[..8] != tag.wire_uid()[..] {
                    return;
                }
                match tag.blocks.get(rest[8] as usize) {
                    Some(data) if !tag.refuse_reads => {
                        self.rx.push(0x00);
                        self.rx.extend_from_slice(data);
                    }
                    _ => self.rx.extend_from_slice(&[0x01, 0x10]),
                }
            }
            _ => return,
        }
        self.irq_rx = true;
    }

    fn clock_in(&mut self, words: &mut [u8]) {
        assert!(self.nss_low, "SPI read outside an NSS frame");
        for (i, word) in words.iter_mut().enumerate() {
            *word = self.pending.get(i).copied().unwrap_or(0xFF);
        }
        self.pending.clear();
    }
}

#[derive(Clone)]
pub struct SimChip(pub Rc<RefCell<ChipState>>);

impl SimChip {
    pub fn new() -> Self {
        SimChip(Rc::new(RefCell::new(ChipState::new())))
    }

    pub fn with_tag() -> Self {
        let chip = Self::new();
        chip.state().tag = Some(SimTag::icode());
        chip
    }

    pub fn state(&self) -> std::cell::RefMut<'_, ChipState> {
        self.0.borrow_mut()
    }

    pub fn spi(&self) -> SimSpi {
        SimSpi(self.clone())
    }

    pub fn nss(&self) -> SimNss {
        SimNss(self.clone())
    }

    pub fn busy(&self) -> SimBusy {
        SimBusy(self.clone())
    }

    pub fn reset(&self) -> SimReset {
        SimReset(self.clone())
    }

    pub fn delay(&self) -> DelayTimer<SimTimer> {
        DelayTimer::new(SimTimer(self.clone()))
    }
}

pub struct SimSpi(SimChip);

impl Write<u8> for SimSpi {
    type Error = Infallible;

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        self.0.state().command(words);
        Ok(())
    }
}

impl Transfer<u8> for SimSpi {
    type Error = Infallible;

    fn transfer<'w>(&mut self, words: &'w mut [u8]) -> Result<&'w [u8], Self::Error> {
        self.0.state().clock_in(words);
        Ok(words)
    }
}

pub struct SimNss(SimChip);

impl OutputPin for SimNss {
    type Error = Infallible;

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.state().nss_low = true;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.state().nss_low = false;
        Ok(())
    }
}

pub struct SimBusy(SimChip);

impl InputPin for SimBusy {
    type Error = Infallible;

    fn is_high(&self) -> Result<bool, Self::Error> {
        Ok(self.0.state().busy_stuck)
    }

    fn is_low(&self) -> Result<bool, Self::Error> {
        self.is_high().map(|busy| !busy)
    }
}

pub struct SimReset(SimChip);

impl OutputPin for SimReset {
    type Error = Infallible;

    fn set_low(&mut self) -> Result<(), Self::Error> {
        let mut state = self.0.state();
        state.resets += 1;
        state.rf_on = false;
        state.rf_config = None;
        state.irq_rx = false;
        state.system_config = 0;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Hardware timer that expires immediately and logs what it was started
/// with.
pub struct SimTimer(SimChip);

impl CountDown for SimTimer {
    type Time = Microseconds<u32>;

    fn start<T>(&mut self, count: T)
        where T: Into<Self::Time>
    {
        self.0.state().delays_us.push(count.into().0);
    }

    fn wait(&mut self) -> nb::Result<(), void::Void> {
        Ok(())
    }
}

/// Millisecond clock that advances one tick per read.
#[derive(Default)]
pub struct TickClock {
    now: Cell<u32>,
}

impl embedded_time::Clock for TickClock {
    type T = u32;
    const SCALING_FACTOR: Fraction = Fraction::new(1, 1_000);

    fn try_now(&self) -> Result<Instant<Self>, Error> {
        let now = self.now.get();
        self.now.set(now.wrapping_add(1));
        Ok(Instant::new(now))
    }
}

pub type SimPn5180<'c> = Pn5180<'c, SimSpi, SimNss, SimBusy, SimReset, DelayTimer<SimTimer>, TickClock>;

/// Build the whole bridge around `chip`, boot it and hand both halves to
/// `test`.
pub fn with_bridge<T>(chip: &SimChip, test: impl FnOnce(&mut I2cSlave<'_>, &mut Bridge<'_, SimPn5180<'_>>) -> T) -> T {
    let clock = TickClock::default();
    let config = BridgeConfig::default();
    let pn5180 = Pn5180::new(chip.spi(), chip.nss(), chip.busy(), chip.reset(), chip.delay(), &clock, &config);

    let mut commands = Mailbox::new();
    let mut responses = Mailbox::new();
    let (cmd_tx, cmd_rx) = commands.split();
    let (resp_tx, resp_rx) = responses.split();

    let mut slave = I2cSlave::new(cmd_tx, resp_rx);
    let mut bridge = Bridge::new(pn5180, config, cmd_rx, resp_tx);
    bridge.start();

    test(&mut slave, &mut bridge)
}

/// One host write, one loop pass, one host read.
pub fn exchange(slave: &mut I2cSlave<'_>, bridge: &mut Bridge<'_, SimPn5180<'_>>, command: &[u8]) -> Vec<u8> {
    slave.on_receive(command).expect("command rejected");
    assert!(bridge.poll());
    read(slave)
}

pub fn read(slave: &mut I2cSlave<'_>) -> Vec<u8> {
    let mut buf = [0u8; 32];
    let len = slave.on_request(&mut buf);
    buf[..len].to_vec()
}
