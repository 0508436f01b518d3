//! Tests for the attachment compatibility matrix.

use folio_composer::{AttachmentOffer, attachment_offers, can_offer};
use folio_core::{AttachmentKind, SelectedKind};

#[test]
fn test_matrix_with_empty_slot() {
    let cases = [
        (SelectedKind::Media, true, true),
        (SelectedKind::Text, true, true),
        (SelectedKind::Audio, false, true),
        (SelectedKind::Pdf, true, false),
    ];
    for (primary, audio, pdf) in cases {
        assert_eq!(can_offer(primary, AttachmentKind::Audio, None), audio, "{primary}");
        assert_eq!(can_offer(primary, AttachmentKind::Pdf, None), pdf, "{primary}");
    }
}

#[test]
fn test_audio_never_attaches_to_audio() {
    for existing in [None, Some(AttachmentKind::Audio), Some(AttachmentKind::Pdf)] {
        assert!(!can_offer(SelectedKind::Audio, AttachmentKind::Audio, existing));
    }
}

#[test]
fn test_occupied_slot() {
    assert!(can_offer(
        SelectedKind::Media,
        AttachmentKind::Pdf,
        Some(AttachmentKind::Audio)
    ));
    assert!(!can_offer(
        SelectedKind::Media,
        AttachmentKind::Audio,
        Some(AttachmentKind::Pdf)
    ));
}

#[test]
fn test_offers_list_every_kind() {
    let offers = attachment_offers(SelectedKind::Pdf, None);
    assert_eq!(
        offers,
        vec![
            AttachmentOffer {
                kind: AttachmentKind::Audio,
                enabled: true,
            },
            AttachmentOffer {
                kind: AttachmentKind::Pdf,
                enabled: false,
            },
        ]
    );
}

#[test]
fn test_same_kind_is_never_offered_twice() {
    for primary in [SelectedKind::Media, SelectedKind::Text] {
        for kind in [AttachmentKind::Audio, AttachmentKind::Pdf] {
            assert!(!can_offer(primary, kind, Some(kind)), "{primary} {kind}");
        }
    }
}

#[test]
fn test_offers_all_disabled_while_slot_is_full() {
    for existing in [AttachmentKind::Audio, AttachmentKind::Pdf] {
        let offers = attachment_offers(SelectedKind::Media, Some(existing));
        assert_eq!(offers.len(), 2, "inert entries stay listed");
        assert!(offers.iter().all(|offer| !offer.enabled), "{existing}");
    }
}
