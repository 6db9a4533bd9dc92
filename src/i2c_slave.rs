//! Bus-side half of the bridge.
//!
//! Both callbacks are meant to be called from the I2C peripheral's
//! interrupt handler: `on_receive` once the master finished a write,
//! `on_request` when it starts a read. Neither blocks or logs.

use crate::mailbox::{Consumer, MailboxError, Producer};
use crate::protocol::{FRAME_CAPACITY, NO_RESPONSE};

pub struct I2cSlave<'a> {
    commands: Producer<'a>,
    responses: Consumer<'a>,
}

impl<'a> I2cSlave<'a> {
    pub fn new(commands: Producer<'a>, responses: Consumer<'a>) -> Self {
        Self {
            commands,
            responses,
        }
    }

    /// Queue the bytes of a finished master write as the next command.
    ///
    /// Rejected with [`MailboxError::Full`] while a previous command is
    /// still waiting or being dispatched; its response will still be
    /// delivered. An accepted command drops any response the master never
    /// collected. Empty writes (address probes) are ignored.
    pub fn on_receive(&mut self, bytes: &[u8]) -> Result<(), MailboxError> {
        if bytes.is_empty() {
            return Ok(());
        }
        if self.commands.is_full() {
            return Err(MailboxError::Full);
        }
        if bytes.len() > FRAME_CAPACITY {
            return Err(MailboxError::Overflow);
        }

        self.responses.release();
        self.commands.post(bytes)
    }

    /// Fill `out` for a master read and return how many bytes to send.
    ///
    /// Without a pending response this is a single [`NO_RESPONSE`] byte.
    pub fn on_request(&mut self, out: &mut [u8]) -> usize {
        if let Some(len) = self.responses.take_into(out) {
            return len;
        }
        match out.first_mut() {
            Some(b) => {
                *b = NO_RESPONSE;
                1
            }
            None => 0,
        }
    }
}
