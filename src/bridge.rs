use embedded_hal::blocking::delay::DelayMs;

use crate::config::BridgeConfig;
use crate::dispatcher::Dispatcher;
use crate::front_end::NfcFrontEnd;
use crate::mailbox::{Consumer, Producer};
use crate::protocol::Status;
use crate::tag::TagState;

/// Main-loop half of the bridge.
///
/// Owns the front end and the tag state, takes commands from the mailbox
/// filled by [`I2cSlave`](crate::i2c_slave::I2cSlave) and leaves responses
/// in the one it drains.
pub struct Bridge<'a, F>
    where F: NfcFrontEnd
{
    front_end: F,
    dispatcher: Dispatcher,
    commands: Consumer<'a>,
    responses: Producer<'a>,
    config: BridgeConfig,
}

impl<'a, F> Bridge<'a, F>
    where F: NfcFrontEnd
{
    pub fn new(front_end: F,
               config: BridgeConfig,
               commands: Consumer<'a>,
               responses: Producer<'a>,
    ) -> Self {
        Self {
            front_end,
            dispatcher: Dispatcher::new(),
            commands,
            responses,
            config,
        }
    }

    /// Bring the front end up. A failure is not fatal: the bridge keeps
    /// serving commands and reports NotInitialized until a Reset succeeds.
    pub fn start(&mut self) -> Status {
        log::info!("NFC bridge starting, I2C address 0x{:02X}", self.config.i2c_address);
        log::debug!("wiring {:?}", self.config.pins);

        let status = self.dispatcher.initialize(&mut self.front_end);
        if status == Status::Ok {
            log::info!("PN5180 initialized");
        } else {
            log::warn!("PN5180 init FAILED");
        }
        status
    }

    /// Dispatch the pending command, if any. Returns whether one was
    /// handled.
    ///
    /// The command slot stays occupied until the response is posted, so the
    /// bus side rejects anything the master sends in the meantime.
    pub fn poll(&mut self) -> bool {
        let response = match self.commands.peek() {
            Some(frame) => self.dispatcher.dispatch(&mut self.front_end, frame),
            None => return false,
        };

        if let Some(response) = response {
            if let Err(e) = self.responses.post(&response) {
                log::warn!("response dropped: {:?}", e);
            }
        }
        self.commands.release();
        true
    }

    /// Poll forever, idling `poll_interval_ms` whenever nothing is pending.
    pub fn run<D>(&mut self, delay: &mut D) -> !
        where D: DelayMs<u32>
    {
        loop {
            if !self.poll() {
                delay.delay_ms(self.config.timing.poll_interval_ms);
            }
        }
    }

    pub fn tag(&self) -> &TagState {
        self.dispatcher.tag()
    }

    pub fn front_end_mut(&mut self) -> &mut F {
        &mut self.front_end
    }
}
