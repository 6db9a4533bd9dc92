//! Single-slot handoff between interrupt and main-loop context.
//!
//! A `Mailbox` is a one-element `heapless::spsc` queue of frames. The
//! consumer can look at the pending frame without taking it, so the slot
//! stays occupied (and the producer locked out) until it is released.

use heapless::{consts::*, spsc};

use crate::protocol::{Frame, FRAME_CAPACITY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailboxError {
    /// The previous frame has not been consumed yet.
    Full,
    /// Frame larger than the slot.
    Overflow,
}

pub struct Mailbox {
    queue: spsc::Queue<Frame, U1>,
}

impl Mailbox {
    pub fn new() -> Self {
        Self {
            queue: spsc::Queue::new(),
        }
    }

    /// Hand out the two ends. Holding `&mut self` makes sure there is only
    /// ever one of each.
    pub fn split(&mut self) -> (Producer<'_>, Consumer<'_>) {
        let (producer, consumer) = self.queue.split();
        (Producer { queue: producer }, Consumer { queue: consumer })
    }
}

impl Default for Mailbox {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Producer<'a> {
    queue: spsc::Producer<'a, Frame, U1>,
}

impl Producer<'_> {
    pub fn is_full(&self) -> bool {
        !self.queue.ready()
    }

    /// Store `bytes` if the slot is free.
    pub fn post(&mut self, bytes: &[u8]) -> Result<(), MailboxError> {
        if self.is_full() {
            return Err(MailboxError::Full);
        }
        if bytes.len() > FRAME_CAPACITY {
            return Err(MailboxError::Overflow);
        }

        let frame = Frame::from_slice(bytes).map_err(|_| MailboxError::Overflow)?;
        self.queue.enqueue(frame).map_err(|_| MailboxError::Full)
    }
}

pub struct Consumer<'a> {
    queue: spsc::Consumer<'a, Frame, U1>,
}

impl Consumer<'_> {
    pub fn is_full(&self) -> bool {
        self.queue.ready()
    }

    /// The pending frame, left in place. The slot stays occupied until
    /// [`release`](Consumer::release), so the producer cannot overwrite it.
    pub fn peek(&self) -> Option<&[u8]> {
        self.queue.peek().map(|frame| &frame[..])
    }

    /// Free the slot for the next frame. No-op when empty.
    pub fn release(&mut self) {
        self.queue.dequeue();
    }

    /// Copy the pending frame into `out` and free the slot.
    ///
    /// Returns the number of bytes copied; bytes that do not fit are
    /// dropped with the frame.
    pub fn take_into(&mut self, out: &mut [u8]) -> Option<usize> {
        let frame = self.queue.dequeue()?;
        let len = frame.len().min(out.len());
        out[..len].copy_from_slice(&frame[..len]);
        Some(len)
    }
}
