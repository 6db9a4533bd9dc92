//! PN5180 host interface constants.

/// SPI command codes (first byte of every NSS-framed write).
pub mod cmd {
    pub const WRITE_REGISTER: u8 = 0x00;
    pub const WRITE_REGISTER_OR_MASK: u8 = 0x01;
    pub const WRITE_REGISTER_AND_MASK: u8 = 0x02;
    pub const READ_REGISTER: u8 = 0x04;
    pub const READ_EEPROM: u8 = 0x07;
    pub const SEND_DATA: u8 = 0x09;
    pub const READ_DATA: u8 = 0x0A;
    pub const LOAD_RF_CONFIG: u8 = 0x11;
    pub const RF_ON: u8 = 0x16;
    pub const RF_OFF: u8 = 0x17;
}

pub mod reg {
    pub const SYSTEM_CONFIG: u8 = 0x00;
    pub const IRQ_STATUS: u8 = 0x02;
    pub const IRQ_CLEAR: u8 = 0x03;
    pub const RX_STATUS: u8 = 0x13;
}

pub mod eeprom {
    pub const PRODUCT_VERSION: u8 = 0x10;
    pub const FIRMWARE_VERSION: u8 = 0x12;
    pub const EEPROM_VERSION: u8 = 0x14;
}

pub const IRQ_RX: u32 = 1 << 0;
pub const IRQ_CLEAR_ALL: u32 = 0xFFFF_FFFF;

/// RX_STATUS[8:0] holds the number of received bytes.
pub const RX_STATUS_LEN_MASK: u32 = 0x1FF;

/// SYSTEM_CONFIG[2:0] selects the transceiver command.
pub const SYSTEM_CONFIG_IDLE_MASK: u32 = 0xFFFF_FFF8;
pub const SYSTEM_CONFIG_TRANSCEIVE: u32 = 0x0000_0003;

/// Filler clocked out while reading.
pub const DUMMY: u8 = 0xFF;
