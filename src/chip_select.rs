use embedded_hal::blocking::delay::DelayUs;
use embedded_hal::digital::v2::OutputPin;

use crate::transport::TransportError;

pub(crate) struct ChipSelect<Pin>
    where Pin: OutputPin
{
    pin: Pin,
    setup_us: u32,
}

impl<Pin> ChipSelect<Pin>
    where Pin: OutputPin
{
    /// Construct a new NSS controller and set it high (unselected)
    pub(crate) fn new(mut pin: Pin, setup_us: u32) -> Self {
        pin.set_high().ok();
        Self {
            pin,
            setup_us,
        }
    }

    /// Pull NSS low for as long as the returned guard lives.
    pub(crate) fn select<Delay>(&mut self, delay: &mut Delay) -> Result<Selected<'_, Pin>, TransportError>
        where Delay: DelayUs<u32>
    {
        self.pin.set_low().map_err(|_| TransportError::Pin)?;
        delay.delay_us(self.setup_us);
        Ok(Selected {
            cs: self
        })
    }

    fn set_high(&mut self) {
        self.pin.set_high().ok();
    }
}

pub(crate) struct Selected<'pin, Pin>
    where Pin: OutputPin
{
    cs: &'pin mut ChipSelect<Pin>,
}

impl<Pin> Drop for Selected<'_, Pin>
    where Pin: OutputPin
{
    fn drop(&mut self) {
        self.cs.set_high();
    }
}
