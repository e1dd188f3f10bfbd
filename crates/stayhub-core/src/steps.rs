//! Step tables and per-step validators for the onboarding wizard.
//!
//! Every category walks a fixed sequence of steps. A step is described by a
//! [`StepDefinition`]: its kind, the title shown to the partner, the key of the
//! editor that renders it, and a pure validator over the current draft. The
//! controller only ever looks steps up in these tables.

use stayhub_domain::{CategoryDetails, InventoryItem, PropertyCategory, PropertyDraft};

use crate::validation::{ensure, is_filled, normalize_phone, parse_clock_time, ValidationError};

pub const MIN_NEARBY_PLACES: usize = 3;
pub const MIN_GALLERY_IMAGES: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    Basics,
    ContactDetails,
    OtpVerification,
    Details,
    Location,
    NearbyPlaces,
    Media,
    Amenities,
    Inventory,
    Policies,
    Documents,
    Review,
}

impl StepKind {
    /// OTP steps are excluded from background saves on either side of the transition.
    pub fn is_otp(self) -> bool {
        matches!(self, StepKind::OtpVerification)
    }
}

/// Read-only view handed to validators.
#[derive(Debug, Clone, Copy)]
pub struct StepContext<'a> {
    pub draft: &'a PropertyDraft,
    pub room_types: &'a [InventoryItem],
}

pub type StepValidator = fn(&StepContext<'_>) -> Result<(), ValidationError>;

#[derive(Clone, Copy)]
pub struct StepDefinition {
    pub kind: StepKind,
    pub title: &'static str,
    pub editor: &'static str,
    pub validator: StepValidator,
}

impl StepDefinition {
    pub fn validate(&self, context: &StepContext<'_>) -> Result<(), ValidationError> {
        (self.validator)(context)
    }
}

impl std::fmt::Debug for StepDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepDefinition")
            .field("kind", &self.kind)
            .field("title", &self.title)
            .field("editor", &self.editor)
            .finish()
    }
}

const BASICS: StepDefinition = StepDefinition {
    kind: StepKind::Basics,
    title: "Property basics",
    editor: "basic-info",
    validator: validate_basics,
};

const CONTACT: StepDefinition = StepDefinition {
    kind: StepKind::ContactDetails,
    title: "Owner contact",
    editor: "contact-details",
    validator: validate_contact,
};

const OTP: StepDefinition = StepDefinition {
    kind: StepKind::OtpVerification,
    title: "Verify phone number",
    editor: "otp-verification",
    validator: validate_otp,
};

const DETAILS: StepDefinition = StepDefinition {
    kind: StepKind::Details,
    title: "Property details",
    editor: "category-details",
    validator: validate_details,
};

const LOCATION: StepDefinition = StepDefinition {
    kind: StepKind::Location,
    title: "Location",
    editor: "location",
    validator: validate_location,
};

const NEARBY: StepDefinition = StepDefinition {
    kind: StepKind::NearbyPlaces,
    title: "Nearby places",
    editor: "nearby-places",
    validator: validate_nearby_places,
};

const MEDIA: StepDefinition = StepDefinition {
    kind: StepKind::Media,
    title: "Photos",
    editor: "media",
    validator: validate_media,
};

const AMENITIES: StepDefinition = StepDefinition {
    kind: StepKind::Amenities,
    title: "Amenities",
    editor: "amenities",
    validator: validate_amenities,
};

const INVENTORY: StepDefinition = StepDefinition {
    kind: StepKind::Inventory,
    title: "Rooms and pricing",
    editor: "inventory",
    validator: validate_inventory,
};

const POLICIES: StepDefinition = StepDefinition {
    kind: StepKind::Policies,
    title: "Policies",
    editor: "policies",
    validator: validate_policies,
};

const DOCUMENTS: StepDefinition = StepDefinition {
    kind: StepKind::Documents,
    title: "Documents",
    editor: "documents",
    validator: validate_documents,
};

const REVIEW: StepDefinition = StepDefinition {
    kind: StepKind::Review,
    title: "Review and submit",
    editor: "review",
    validator: validate_review,
};

const STANDARD_STEPS: &[StepDefinition] = &[
    BASICS, DETAILS, LOCATION, NEARBY, MEDIA, AMENITIES, INVENTORY, POLICIES, DOCUMENTS,
];

const REVIEWED_STEPS: &[StepDefinition] = &[
    BASICS, DETAILS, LOCATION, NEARBY, MEDIA, AMENITIES, INVENTORY, POLICIES, DOCUMENTS, REVIEW,
];

const PG_STEPS: &[StepDefinition] = &[
    BASICS, CONTACT, OTP, DETAILS, LOCATION, NEARBY, MEDIA, AMENITIES, INVENTORY, POLICIES,
    DOCUMENTS,
];

/// Ordered steps for `category`; index 0 is step 1.
pub fn steps_for(category: PropertyCategory) -> &'static [StepDefinition] {
    match category {
        PropertyCategory::Resort | PropertyCategory::Villa | PropertyCategory::Homestay => {
            STANDARD_STEPS
        }
        PropertyCategory::Hotel | PropertyCategory::Hostel => REVIEWED_STEPS,
        PropertyCategory::Pg => PG_STEPS,
    }
}

fn validate_basics(ctx: &StepContext<'_>) -> Result<(), ValidationError> {
    let base = &ctx.draft.base;
    ensure(
        is_filled(&base.name) && is_filled(&base.short_description),
        "Please enter the property name and a short description",
    )
}

fn validate_contact(ctx: &StepContext<'_>) -> Result<(), ValidationError> {
    ensure(
        normalize_phone(&ctx.draft.base.contact.phone).is_some(),
        "Please enter a valid 10-digit mobile number",
    )
}

fn validate_otp(ctx: &StepContext<'_>) -> Result<(), ValidationError> {
    ensure(
        ctx.draft.base.contact.otp_verified,
        "Please verify the OTP sent to your mobile number",
    )
}

fn validate_details(ctx: &StepContext<'_>) -> Result<(), ValidationError> {
    match &ctx.draft.details {
        CategoryDetails::Hotel(hotel) => ensure(
            matches!(hotel.star_rating, Some(1..=5)),
            "Please select a star rating",
        ),
        CategoryDetails::Resort(resort) => {
            ensure(is_filled(&resort.resort_type), "Please select a resort type")
        }
        CategoryDetails::Villa(villa) => {
            ensure(villa.bedrooms >= 1, "Please enter the number of bedrooms")?;
            ensure(
                villa.max_guests >= 1,
                "Please enter the maximum number of guests",
            )
        }
        CategoryDetails::Hostel(hostel) => ensure(
            hostel.gender_policy.is_some(),
            "Please select who the hostel is for",
        ),
        CategoryDetails::Pg(pg) => ensure(
            pg.gender_policy.is_some(),
            "Please select who the PG is for",
        ),
        CategoryDetails::Homestay(homestay) => {
            ensure(is_filled(&homestay.host_name), "Please enter the host's name")
        }
    }
}

fn validate_location(ctx: &StepContext<'_>) -> Result<(), ValidationError> {
    let base = &ctx.draft.base;
    ensure(
        is_filled(&base.address.line1)
            && is_filled(&base.address.city)
            && base.location.is_some_and(|point| point.is_valid()),
        "Please enter the address, city and pin the location on the map",
    )
}

fn validate_nearby_places(ctx: &StepContext<'_>) -> Result<(), ValidationError> {
    ensure(
        ctx.draft.base.nearby_places.len() >= MIN_NEARBY_PLACES,
        format!("Please add at least {MIN_NEARBY_PLACES} nearby places"),
    )
}

fn validate_media(ctx: &StepContext<'_>) -> Result<(), ValidationError> {
    let base = &ctx.draft.base;
    ensure(
        base.cover_image.as_deref().is_some_and(is_filled)
            && base.gallery.len() >= MIN_GALLERY_IMAGES,
        format!("Please add a cover image and at least {MIN_GALLERY_IMAGES} gallery images"),
    )
}

fn validate_amenities(ctx: &StepContext<'_>) -> Result<(), ValidationError> {
    ensure(
        !ctx.draft.base.amenities.is_empty(),
        "Please select at least one amenity",
    )
}

fn validate_inventory(ctx: &StepContext<'_>) -> Result<(), ValidationError> {
    let category = ctx.draft.category();
    let noun = category.inventory_noun();
    ensure(
        !ctx.room_types.is_empty(),
        format!("Please add at least one {noun}"),
    )?;
    let min_images = category.min_inventory_images();
    for (index, item) in ctx.room_types.iter().enumerate() {
        let label = if is_filled(&item.name) {
            item.name.trim().to_string()
        } else {
            format!("{} {}", noun, index + 1)
        };
        ensure(
            is_filled(&item.name),
            format!("Please enter a name for {label}"),
        )?;
        ensure(
            item.price.is_finite() && item.price > 0.0,
            format!("Please enter a price for {label}"),
        )?;
        ensure(
            item.total_units >= 1,
            format!("Please enter how many units of {label} are available"),
        )?;
        ensure(
            item.images.len() >= min_images,
            format!("Please add at least {min_images} photos for {label}"),
        )?;
    }
    Ok(())
}

fn validate_policies(ctx: &StepContext<'_>) -> Result<(), ValidationError> {
    let policies = &ctx.draft.base.policies;
    let times_set = policies
        .check_in_time
        .as_deref()
        .and_then(parse_clock_time)
        .is_some()
        && policies
            .check_out_time
            .as_deref()
            .and_then(parse_clock_time)
            .is_some();
    ensure(
        times_set && policies.cancellation_policy.as_deref().is_some_and(is_filled),
        "Please set check-in and check-out times and a cancellation policy",
    )
}

fn validate_documents(ctx: &StepContext<'_>) -> Result<(), ValidationError> {
    ensure(
        ctx.draft
            .base
            .documents
            .iter()
            .any(|doc| is_filled(&doc.file_url)),
        "Please upload at least one document",
    )
}

fn validate_review(_ctx: &StepContext<'_>) -> Result<(), ValidationError> {
    Ok(())
}
