//! Bridge configuration.
//!
//! Everything that depends on the board rather than on the protocol lives
//! here. `Default` describes the reference build (Raspberry Pi Pico wired to a
//! PN5180 module, answering an ESP32 host on I2C address 0x55).

/// 7-bit I2C slave address of the reference system.
pub const DEFAULT_I2C_ADDRESS: u8 = 0x55;

/// Default SPI clock towards the PN5180 (Hz). Mode 0, MSB first.
pub const DEFAULT_SPI_FREQ_HZ: u32 = 7_000_000;

#[derive(Debug, Clone, Copy)]
pub struct BridgeConfig {
    pub i2c_address: u8,
    pub spi_frequency_hz: u32,
    pub pins: PinAssignment,
    pub timing: Timing,
    pub rf: RfProfile,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            i2c_address: DEFAULT_I2C_ADDRESS,
            spi_frequency_hz: DEFAULT_SPI_FREQ_HZ,
            pins: PinAssignment::default(),
            timing: Timing::default(),
            rf: RfProfile::ISO15693,
        }
    }
}

/// GPIO numbers used by board bring-up.
///
/// The driver itself only ever sees typed embedded-hal pins; these numbers
/// are recorded so the board crate and the startup log agree on the wiring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinAssignment {
    pub spi_mosi: u8,
    pub spi_miso: u8,
    pub spi_sck: u8,
    pub nss: u8,
    pub busy: u8,
    pub reset: u8,
    pub i2c_sda: u8,
    pub i2c_scl: u8,
}

impl Default for PinAssignment {
    fn default() -> Self {
        Self {
            spi_mosi: 19,
            spi_miso: 16,
            spi_sck: 18,
            nss: 17,
            busy: 20,
            reset: 21,
            i2c_sda: 4,
            i2c_scl: 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Upper bound for a single wait on the BUSY line.
    pub busy_timeout_ms: u32,
    /// Upper bound for the RX_IRQ poll after a SEND_DATA.
    pub rx_timeout_ms: u32,
    pub reset_pulse_ms: u32,
    pub reset_settle_ms: u32,
    /// NSS low to first clock edge.
    pub select_setup_us: u32,
    /// Idle delay between two polls of the command mailbox.
    pub poll_interval_ms: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            busy_timeout_ms: 100,
            rx_timeout_ms: 100,
            reset_pulse_ms: 10,
            reset_settle_ms: 50,
            select_setup_us: 2,
            poll_interval_ms: 10,
        }
    }
}

/// TX/RX configuration pair handed to LOAD_RF_CONFIG.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RfProfile {
    pub tx: u8,
    pub rx: u8,
}

impl RfProfile {
    /// ISO15693, 26 kbit/s, ASK 100%.
    pub const ISO15693: Self = Self { tx: 0x0D, rx: 0x8D };
}
