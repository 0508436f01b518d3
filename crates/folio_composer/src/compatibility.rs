//! Which attachment kinds can be offered for a given primary kind.
//!
//! | primary | Audio offerable | Pdf offerable |
//! |---------|-----------------|---------------|
//! | Media   | yes             | yes           |
//! | Text    | yes             | yes           |
//! | Audio   | no              | yes           |
//! | Pdf     | yes             | no            |
//!
//! There is one attachment slot: while it is occupied [`attachment_offers`] lists
//! every kind as disabled until the attachment is removed. Unavailable kinds are
//! still listed so the UI can render them inert rather than hiding them.

use folio_core::{AttachmentKind, SelectedKind};
use strum::IntoEnumIterator;

/// Whether `candidate` can be attached to a `primary` post that already carries
/// `existing`.
///
/// This is the pairing rule only. A candidate of the kind already attached is
/// never offered, and a present PDF disables the audio offer. A present audio
/// attachment does not rule PDF out as a pairing; the single slot is what blocks
/// it, see [`attachment_offers`].
pub fn can_offer(
    primary: SelectedKind,
    candidate: AttachmentKind,
    existing: Option<AttachmentKind>,
) -> bool {
    if primary.same_class_attachment() == Some(candidate) || existing == Some(candidate) {
        return false;
    }
    !matches!(
        (candidate, existing),
        (AttachmentKind::Audio, Some(AttachmentKind::Pdf))
    )
}

/// One entry of the attachment picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachmentOffer {
    /// Attachment kind
    pub kind: AttachmentKind,
    /// False when the affordance must render inert
    pub enabled: bool,
}

/// Every attachment kind with its enabled state, in a stable order.
///
/// All entries are disabled while `existing` occupies the slot.
pub fn attachment_offers(
    primary: SelectedKind,
    existing: Option<AttachmentKind>,
) -> Vec<AttachmentOffer> {
    AttachmentKind::iter()
        .map(|kind| AttachmentOffer {
            kind,
            enabled: existing.is_none() && can_offer(primary, kind, existing),
        })
        .collect()
}
