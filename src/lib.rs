//! PN5180 to I2C bridge.
//!
//! A microcontroller sits between a host MCU and an NXP PN5180 NFC front
//! end. The host writes one-byte opcodes over I2C, the bridge runs the
//! ISO15693 exchange over SPI and leaves a response for the host's next
//! read.
//!
//! The pieces, leaf first:
//!
//! * [`transport::Pn5180`]: BUSY-gated SPI register/EEPROM/data access,
//!   with the RF bring-up in [`rf`] and tag commands in [`iso15693`].
//! * [`dispatcher::Dispatcher`]: opcode to response mapping over a
//!   [`front_end::NfcFrontEnd`].
//! * [`mailbox::Mailbox`]: single-slot handoff between interrupt and loop.
//! * [`i2c_slave::I2cSlave`] (interrupt side) and [`bridge::Bridge`] (loop
//!   side).
#![cfg_attr(not(test), no_std)]

pub mod bridge;
mod busy;
mod chip_select;
pub mod config;
pub mod delay;
pub mod dispatcher;
pub mod front_end;
pub mod i2c_slave;
pub mod iso15693;
pub mod mailbox;
mod parser;
pub mod protocol;
pub mod registers;
pub mod rf;
pub mod tag;
pub mod transport;

#[cfg(test)]
mod test_clock;

pub use bridge::Bridge;
pub use config::BridgeConfig;
pub use front_end::NfcFrontEnd;
pub use i2c_slave::I2cSlave;
pub use iso15693::Uid;
pub use mailbox::Mailbox;
pub use protocol::Status;
pub use transport::{Pn5180, TransportError};
