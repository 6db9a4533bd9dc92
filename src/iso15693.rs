//! ISO15693 Inventory and Read Single Block on top of the PN5180 transport.
//!
//! Only the single-slot, single-tag case is handled: one Inventory with an
//! empty mask, then addressed reads against the UID it returned.

use embedded_hal::blocking::delay::{DelayMs, DelayUs};
use embedded_hal::blocking::spi::{Transfer, Write};
use embedded_hal::digital::v2::{InputPin, OutputPin};

use crate::parser;
use crate::transport::{Pn5180, TransportError};

pub const UID_LEN: usize = 8;
pub const BLOCK_LEN: usize = 4;

/// Request flags.
pub mod flags {
    pub const HIGH_DATA_RATE: u8 = 0x02;
    pub const INVENTORY: u8 = 0x04;
    /// With `INVENTORY` set: a single time slot instead of sixteen.
    pub const ONE_SLOT: u8 = 0x20;
    /// Without `INVENTORY` set: the request carries a UID.
    pub const ADDRESSED: u8 = 0x20;
}

pub mod command {
    pub const INVENTORY: u8 = 0x01;
    pub const READ_SINGLE_BLOCK: u8 = 0x20;
}

const INVENTORY_RESPONSE_MAX: usize = 12;
const READ_BLOCK_RESPONSE_MAX: usize = 8;

/// Tag UID in display order (most significant byte first).
///
/// Tags transmit it the other way round.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Uid(pub [u8; UID_LEN]);

impl Uid {
    /// Build from the over-the-air byte order.
    pub fn from_wire(wire: &[u8; UID_LEN]) -> Self {
        let mut uid = *wire;
        uid.reverse();
        Uid(uid)
    }

    pub fn to_wire(&self) -> [u8; UID_LEN] {
        let mut wire = self.0;
        wire.reverse();
        wire
    }

    pub fn as_bytes(&self) -> &[u8; UID_LEN] {
        &self.0
    }
}

pub fn inventory_request() -> [u8; 3] {
    [
        flags::HIGH_DATA_RATE | flags::INVENTORY | flags::ONE_SLOT,
        command::INVENTORY,
        0x00, // mask length
    ]
}

pub fn read_block_request(uid: &Uid, block: u8) -> [u8; 3 + UID_LEN] {
    let mut request = [0u8; 3 + UID_LEN];
    request[0] = flags::HIGH_DATA_RATE | flags::ADDRESSED;
    request[1] = command::READ_SINGLE_BLOCK;
    request[2..2 + UID_LEN].copy_from_slice(&uid.to_wire());
    request[2 + UID_LEN] = block;
    request
}

/// UID from an Inventory answer; `None` for error responses and short
/// frames.
pub fn parse_inventory(response: &[u8]) -> Option<Uid> {
    let (_, inventory) = parser::inventory_response(response).ok()?;
    log::debug!("inventory answer, DSFID 0x{:02X}", inventory.dsfid);
    Some(inventory.uid)
}

pub fn parse_read_block(response: &[u8]) -> Option<[u8; BLOCK_LEN]> {
    parser::read_block_response(response)
        .ok()
        .map(|(_, data)| data)
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
    /// Send a request and collect the answer. A tag that stays silent is
    /// not an error: it comes back as `Ok(0)`.
    fn exchange(&mut self, request: &[u8], response: &mut [u8]) -> Result<usize, TransportError> {
        self.send_data(request, 0)?;
        match self.read_data(response) {
            Err(TransportError::RxTimeout) => Ok(0),
            result => result,
        }
    }

    /// Single-slot Inventory. `Ok(None)` when no tag answered cleanly.
    pub fn inventory(&mut self) -> Result<Option<Uid>, TransportError> {
        let mut response = [0u8; INVENTORY_RESPONSE_MAX];
        let len = self.exchange(&inventory_request(), &mut response)?;
        Ok(parse_inventory(&response[..len]))
    }

    /// Addressed Read Single Block.
    pub fn read_block(&mut self, uid: &Uid, block: u8) -> Result<Option<[u8; BLOCK_LEN]>, TransportError> {
        let mut response = [0u8; READ_BLOCK_RESPONSE_MAX];
        let len = self.exchange(&read_block_request(uid, block), &mut response)?;
        Ok(parse_read_block(&response[..len]))
    }
}
