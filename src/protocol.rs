//! Host-facing command protocol.
//!
//! One I2C write carries a command frame `[opcode, params...]`; the next I2C
//! read returns the response frame `[status, payload...]`.

use core::convert::TryFrom;

use heapless::{consts::*, Vec};

use crate::rf::VersionField;

/// Capacity of a command or response frame.
pub const FRAME_CAPACITY: usize = 64;

pub type Frame = Vec<u8, U64>;

/// Single-byte response to an opcode the bridge does not implement.
pub const UNKNOWN_COMMAND: u8 = 0xFF;

/// Byte served on a bus read when no response is pending.
pub const NO_RESPONSE: u8 = 0xFF;

pub mod opcode {
    pub const GET_STATUS: u8 = 0x00;
    pub const GET_PRODUCT_VERSION: u8 = 0x01;
    pub const GET_FW_VERSION: u8 = 0x02;
    pub const GET_EEPROM_VERSION: u8 = 0x03;
    pub const RESET: u8 = 0x04;
    pub const SCAN_TAG: u8 = 0x10;
    pub const GET_UID: u8 = 0x11;
    pub const READ_BLOCK: u8 = 0x20;
    pub const WRITE_BLOCK: u8 = 0x21;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Status {
    Ok = 0,
    NoTag = 1,
    CommError = 2,
    NotInitialized = 3,
}

impl TryFrom<u8> for Status {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Status::Ok),
            1 => Ok(Status::NoTag),
            2 => Ok(Status::CommError),
            3 => Ok(Status::NotInitialized),
            other => Err(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    GetStatus,
    GetVersion(VersionField),
    Reset,
    ScanTag,
    GetUid,
    /// `None` when the host left out the block number.
    ReadBlock(Option<u8>),
    /// Reserved opcode; answered like an unknown one.
    WriteBlock,
    Unknown(u8),
}

impl Command {
    /// Decode a command frame. `None` for an empty frame.
    pub fn parse(frame: &[u8]) -> Option<Self> {
        let (&op, params) = frame.split_first()?;
        let command = match op {
            opcode::GET_STATUS => Command::GetStatus,
            opcode::GET_PRODUCT_VERSION => Command::GetVersion(VersionField::Product),
            opcode::GET_FW_VERSION => Command::GetVersion(VersionField::Firmware),
            opcode::GET_EEPROM_VERSION => Command::GetVersion(VersionField::Eeprom),
            opcode::RESET => Command::Reset,
            opcode::SCAN_TAG => Command::ScanTag,
            opcode::GET_UID => Command::GetUid,
            opcode::READ_BLOCK => Command::ReadBlock(params.first().copied()),
            opcode::WRITE_BLOCK => Command::WriteBlock,
            other => Command::Unknown(other),
        };
        Some(command)
    }
}

/// `[status, payload...]`, payload truncated to the frame capacity.
pub fn reply(status: Status, payload: &[u8]) -> Frame {
    let mut frame = Frame::new();
    frame.push(status as u8).ok();
    let room = FRAME_CAPACITY - 1;
    frame.extend_from_slice(&payload[..payload.len().min(room)]).ok();
    frame
}

pub fn unknown_command() -> Frame {
    let mut frame = Frame::new();
    frame.push(UNKNOWN_COMMAND).ok();
    frame
}
