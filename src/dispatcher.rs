use crate::front_end::NfcFrontEnd;
use crate::protocol::{self, Command, Frame, Status};
use crate::tag::TagState;

/// Turns command frames into response frames.
///
/// Owns the tag state; the front end is borrowed per call so the same
/// dispatcher can be driven against real hardware or a test double.
pub struct Dispatcher {
    tag: TagState,
    chip_ready: bool,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            tag: TagState::new(),
            chip_ready: false,
        }
    }

    pub fn tag(&self) -> &TagState {
        &self.tag
    }

    pub fn is_chip_ready(&self) -> bool {
        self.chip_ready
    }

    /// Reset and probe the chip. Forgets any tag seen before.
    pub fn initialize<F: NfcFrontEnd>(&mut self, front_end: &mut F) -> Status {
        self.tag.lost(Status::NotInitialized);

        let status = match front_end.init() {
            Ok(true) => Status::Ok,
            Ok(false) => Status::NotInitialized,
            Err(e) => {
                log::warn!("PN5180 init failed: {:?}", e);
                Status::NotInitialized
            }
        };

        self.chip_ready = status == Status::Ok;
        self.tag.set_status(status);
        status
    }

    /// Handle one command frame. `None` for an empty frame, which gets no
    /// response at all.
    pub fn dispatch<F: NfcFrontEnd>(&mut self, front_end: &mut F, frame: &[u8]) -> Option<Frame> {
        let command = Command::parse(frame)?;
        log::debug!("processing command {:?}", command);

        let response = match command {
            Command::GetStatus => {
                protocol::reply(self.tag.last_status(), &[self.tag.is_present() as u8])
            }
            Command::GetVersion(field) => {
                match front_end.read_version(field) {
                    Ok(version) => protocol::reply(Status::Ok, &version),
                    Err(e) => {
                        log::warn!("reading {:?} version failed: {:?}", field, e);
                        protocol::reply(Status::CommError, &[])
                    }
                }
            }
            Command::Reset => {
                let status = self.initialize(front_end);
                protocol::reply(status, &[])
            }
            Command::ScanTag => self.scan(front_end),
            Command::GetUid => {
                match self.tag.uid() {
                    Some(uid) => protocol::reply(Status::Ok, uid.as_bytes()),
                    None => protocol::reply(Status::NoTag, &[]),
                }
            }
            Command::ReadBlock(block) => self.read_block(front_end, block),
            Command::WriteBlock | Command::Unknown(_) => protocol::unknown_command(),
        };

        Some(response)
    }

    fn scan<F: NfcFrontEnd>(&mut self, front_end: &mut F) -> Frame {
        if !self.chip_ready {
            return protocol::reply(Status::NotInitialized, &[]);
        }

        match front_end.inventory() {
            Ok(Some(uid)) => {
                log::info!("tag found: {:02X?}", uid.as_bytes());
                self.tag.found(uid);
                protocol::reply(Status::Ok, uid.as_bytes())
            }
            Ok(None) => {
                self.tag.lost(Status::NoTag);
                protocol::reply(Status::NoTag, &[])
            }
            Err(e) => {
                log::warn!("inventory failed: {:?}", e);
                self.tag.lost(Status::CommError);
                protocol::reply(Status::CommError, &[])
            }
        }
    }

    fn read_block<F: NfcFrontEnd>(&mut self, front_end: &mut F, block: Option<u8>) -> Frame {
        let (uid, block) = match (self.tag.uid(), block) {
            (Some(uid), Some(block)) => (*uid, block),
            _ => return protocol::reply(Status::NoTag, &[]),
        };

        match front_end.read_block(&uid, block) {
            Ok(Some(data)) => {
                self.tag.set_status(Status::Ok);
                protocol::reply(Status::Ok, &data)
            }
            Ok(None) => {
                log::debug!("block {} not answered", block);
                self.tag.set_status(Status::CommError);
                protocol::reply(Status::CommError, &[])
            }
            Err(e) => {
                log::warn!("read of block {} failed: {:?}", block, e);
                self.tag.set_status(Status::CommError);
                protocol::reply(Status::CommError, &[])
            }
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}
