use crate::iso15693::Uid;
use crate::protocol::Status;

/// What the bridge knows about the tag in the field.
///
/// The UID is only meaningful while `present` is set; a failed scan clears
/// the flag and leaves the old bytes behind.
#[derive(Debug, Clone)]
pub struct TagState {
    uid: Uid,
    present: bool,
    last_status: Status,
}

impl TagState {
    pub(crate) fn new() -> Self {
        Self {
            uid: Uid::default(),
            present: false,
            last_status: Status::NotInitialized,
        }
    }

    pub fn is_present(&self) -> bool {
        self.present
    }

    pub fn uid(&self) -> Option<&Uid> {
        if self.present {
            Some(&self.uid)
        } else {
            None
        }
    }

    pub fn last_status(&self) -> Status {
        self.last_status
    }

    pub(crate) fn found(&mut self, uid: Uid) {
        self.uid = uid;
        self.present = true;
        self.last_status = Status::Ok;
    }

    pub(crate) fn lost(&mut self, status: Status) {
        self.present = false;
        self.last_status = status;
    }

    pub(crate) fn set_status(&mut self, status: Status) {
        self.last_status = status;
    }
}

impl Default for TagState {
    fn default() -> Self {
        Self::new()
    }
}
