//! Rejections for board edits.
//!
//! The `Display` text of each variant is the message shown to the user.

use uuid::Uuid;

/// Why an edit was rejected. The board is left untouched in every case.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("group name cannot be empty")]
    EmptyGroupName,
    #[error("Group \"{0}\" already exists")]
    DuplicateGroupName(String),
    #[error("group not found: {0}")]
    GroupNotFound(Uuid),
    #[error("pin not found: {0}")]
    PinNotFound(Uuid),
    #[error("list item cannot be empty")]
    EmptyListItem,
    #[error("list item {index} out of range (pin has {len} items)")]
    ListItemOutOfRange { index: usize, len: usize },
    #[error("cannot apply {edit} edit to a {kind} pin")]
    WrongPinKind { edit: &'static str, kind: &'static str },
    #[error("image source cannot be empty")]
    EmptyImageSource,
}
