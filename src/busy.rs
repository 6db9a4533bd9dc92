use embedded_hal::digital::v2::InputPin;
use embedded_time::duration::Milliseconds;

use crate::transport::TransportError;

/// The PN5180 BUSY output. High while the chip is still processing the
/// previous frame.
pub(crate) struct BusyLine<Pin>
    where Pin: InputPin
{
    pin: Pin
}

impl<Pin> BusyLine<Pin>
    where Pin: InputPin
{
    pub(crate) fn new(pin: Pin) -> Self {
        Self {
            pin
        }
    }

    pub(crate) fn is_busy(&self) -> Result<bool, TransportError> {
        self.pin.is_high().map_err(|_| TransportError::Pin)
    }

    /// Spin until BUSY drops, giving up after `timeout`.
    pub(crate) fn wait_ready<Clock>(&self, clock: &Clock, timeout: Milliseconds<u32>) -> Result<(), TransportError>
        where Clock: embedded_time::Clock<T = u32>
    {
        if !self.is_busy()? {
            return Ok(());
        }

        let timer = clock.new_timer(timeout)
            .start()
            .map_err(|_| TransportError::Clock)?;

        while self.is_busy()? {
            if timer.is_expired().map_err(|_| TransportError::Clock)? {
                log::warn!("BUSY timeout after {} ms", timeout.0);
                return Err(TransportError::BusyTimeout);
            }
        }
        Ok(())
    }
}
