mod common;

use stayhub::uploads::upload_to_slot;
use stayhub_core::draft_store::{DraftKey, DraftStore, DEFAULT_DRAFT_PREFIX};
use stayhub_core::testing::GatewayCall;
use stayhub_core::{Transition, WizardController, WizardSettings};
use stayhub_domain::{
    Address, CategoryDetails, Document, GeoPoint, HotelDetails, ImageSlot, InventoryItem,
    NearbyPlace, PropertyCategory, WizardSession,
};
use stayhub_media::{CompressionSettings, ImageFile};

fn place(name: &str) -> NearbyPlace {
    NearbyPlace {
        name: name.into(),
        location: GeoPoint::new(12.97, 77.59),
        distance_km: Some(1.2),
        travel_minutes: Some(6),
    }
}

fn fill_hotel(session: &mut WizardSession) {
    let draft = &mut session.property_draft;
    draft.base.name = "Hotel Residency".into();
    draft.base.short_description = "Business hotel on MG Road".into();
    draft.details = CategoryDetails::Hotel(HotelDetails {
        star_rating: Some(4),
        total_floors: Some(6),
    });
    draft.base.address = Address {
        line1: "12 MG Road".into(),
        city: "Bengaluru".into(),
        ..Address::default()
    };
    draft.base.location = Some(GeoPoint::new(12.975, 77.606));
    draft.base.nearby_places = vec![place("Metro"), place("Cubbon Park"), place("Mall")];
    draft.base.cover_image = Some("https://cdn.stayhub.test/cover.jpg".into());
    draft.base.gallery = (1..=4)
        .map(|n| format!("https://cdn.stayhub.test/gallery/{n}.jpg"))
        .collect();
    draft.base.amenities.insert("wifi".into());
    draft.base.policies.check_in_time = Some("12:00".into());
    draft.base.policies.check_out_time = Some("10:00".into());
    draft.base.policies.cancellation_policy = Some("flexible".into());
    draft
        .base
        .documents
        .push(Document::new("license", "Trade licence", "https://cdn.stayhub.test/l.pdf"));
}

fn deluxe() -> InventoryItem {
    InventoryItem::new("Deluxe King", 4200.0).with_images([
        "https://cdn.stayhub.test/deluxe/1.jpg",
        "https://cdn.stayhub.test/deluxe/2.jpg",
        "https://cdn.stayhub.test/deluxe/3.jpg",
    ])
}

#[tokio::test]
async fn hotel_draft_survives_reopen_and_submits() {
    let (drafts, gateway) = common::setup_offline();
    let settings = WizardSettings::default();
    let key = DraftKey::new_property(DEFAULT_DRAFT_PREFIX);

    let mut wizard =
        WizardController::open_new(PropertyCategory::Hotel, gateway.clone(), drafts.clone(), &settings);
    wizard.update(fill_hotel);
    assert_eq!(wizard.next().await, Transition::Advanced { from: 1, to: 2 });
    wizard.flush_draft();
    wizard.flush_background().await;
    drop(wizard);

    let raw = drafts
        .read(&key)
        .expect("read draft")
        .expect("draft written to disk");
    let json: serde_json::Value = serde_json::from_str(&raw).expect("draft is json");
    assert_eq!(json["step"], 2);
    assert_eq!(json["propertyForm"]["name"], "Hotel Residency");
    assert!(json["roomTypes"].as_array().is_some_and(|items| items.is_empty()));

    let mut wizard =
        WizardController::open_new(PropertyCategory::Hotel, gateway.clone(), drafts.clone(), &settings);
    assert_eq!(wizard.current_step(), 2);
    assert_eq!(wizard.progress_label(), "Step 2 of 10");
    assert!(wizard.session().persisted_parent_id.is_some());

    wizard.add_room_type(deluxe());
    while !wizard.is_last_step() {
        let transition = wizard.next().await;
        assert!(
            matches!(transition, Transition::Advanced { .. }),
            "unexpected {transition:?}"
        );
    }
    assert_eq!(wizard.current_definition().title, "Review and submit");

    let outcome = match wizard.next().await {
        Transition::Submitted(outcome) => outcome,
        other => panic!("expected submission, got {other:?}"),
    };
    assert!(!outcome.parent_created);
    assert_eq!(outcome.created.len(), 1);
    assert!(drafts.read(&key).expect("read draft").is_none());

    let creates = gateway
        .calls()
        .iter()
        .filter(|call| matches!(call, GatewayCall::CreateProperty { .. }))
        .count();
    assert_eq!(creates, 1);
}

#[tokio::test]
async fn upload_skips_unreadable_files_and_attaches_the_rest() {
    let (drafts, gateway) = common::setup_offline();
    let mut wizard = WizardController::open_new(
        PropertyCategory::Resort,
        gateway.clone(),
        drafts,
        &WizardSettings::default(),
    );
    let settings = CompressionSettings {
        threshold_bytes: 1024,
        ..CompressionSettings::default()
    };
    let files = vec![
        ImageFile::new("lobby.png", "image/png", common::png_bytes(64, 48)),
        ImageFile::new("broken.png", "image/png", vec![0u8; 4096]),
        ImageFile::new("tiny.png", "image/png", vec![1, 2, 3]),
    ];

    let report = upload_to_slot(
        &mut wizard,
        ImageSlot::Gallery,
        files,
        settings,
        gateway.as_ref(),
    )
    .await
    .expect("upload succeeds");

    assert!(!report.is_complete());
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].name, "broken.png");
    assert_eq!(report.attached.len(), 2);
    assert_eq!(wizard.session().property_draft.base.gallery, report.attached);
    assert_eq!(
        gateway.calls(),
        vec![GatewayCall::UploadImages {
            names: vec!["lobby.png".into(), "tiny.png".into()]
        }]
    );
}

#[tokio::test]
async fn failed_upload_leaves_slot_untouched() {
    let (drafts, gateway) = common::setup_offline();
    let mut wizard = WizardController::open_new(
        PropertyCategory::Villa,
        gateway.clone(),
        drafts,
        &WizardSettings::default(),
    );
    gateway.fail_when(|call| matches!(call, GatewayCall::UploadImages { .. }));

    let result = upload_to_slot(
        &mut wizard,
        ImageSlot::Cover,
        vec![ImageFile::new("front.jpg", "image/jpeg", vec![9; 16])],
        CompressionSettings::default(),
        gateway.as_ref(),
    )
    .await;

    let err = result.expect_err("upload fails");
    assert_eq!(err.user_message(), "Simulated backend failure");
    assert_eq!(wizard.session().property_draft.base.cover_image, None);
}

#[test]
fn app_wires_drafts_under_home() {
    let app = common::setup_app();
    assert!(app.drafts().drafts_dir().starts_with(app.base_dir()));
    assert_eq!(app.wizard_settings().draft_prefix, DEFAULT_DRAFT_PREFIX);
    assert_eq!(app.compression_settings(), CompressionSettings::default());
}
