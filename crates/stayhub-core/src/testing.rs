//! Recording gateway double for controller and integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use stayhub_domain::{
    Address, Booking, DistanceInfo, Document, GeoPoint, InventoryItem, PlacePrediction,
    PropertyDraft, PropertyRecord, PropertySummary,
};

use crate::gateway::{BookingGateway, LocationGateway, MediaGateway, PropertyGateway, UploadFile};
use crate::location::{GeolocationError, LocationProvider};
use crate::CoreError;

#[derive(Debug, Clone, PartialEq)]
pub enum GatewayCall {
    CreateProperty { name: String },
    UpdateProperty { id: String },
    GetProperty { id: String },
    ListProperties,
    DeleteProperty { id: String },
    UpsertDocuments { property_id: String, count: usize },
    CreateRoomType { property_id: String, name: String },
    UpdateRoomType { property_id: String, room_type_id: String },
    DeleteRoomType { property_id: String, room_type_id: String },
    ReverseGeocode,
    SearchPlaces { query: String },
    Distance,
    UploadImages { names: Vec<String> },
    MyBookings,
}

type FailurePredicate = Box<dyn Fn(&GatewayCall) -> bool + Send + Sync>;

/// Records every call and answers from canned data.
///
/// Created properties get ids `prop_1`, `prop_2`, ... and created room types
/// get `rt_new_1`, `rt_new_2`, ...
#[derive(Default)]
pub struct RecordingGateway {
    calls: Mutex<Vec<GatewayCall>>,
    failure: Mutex<Option<FailurePredicate>>,
    next_property: AtomicUsize,
    next_room_type: AtomicUsize,
    next_upload: AtomicUsize,
    property: Mutex<Option<PropertyRecord>>,
    summaries: Mutex<Vec<PropertySummary>>,
    bookings: Mutex<Vec<Booking>>,
    places: Mutex<Vec<PlacePrediction>>,
    address: Mutex<Address>,
    distance: Mutex<Option<DistanceInfo>>,
}

fn guard<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_property(self, record: PropertyRecord) -> Self {
        *guard(&self.property) = Some(record);
        self
    }

    pub fn with_summaries(self, summaries: Vec<PropertySummary>) -> Self {
        *guard(&self.summaries) = summaries;
        self
    }

    pub fn with_bookings(self, bookings: Vec<Booking>) -> Self {
        *guard(&self.bookings) = bookings;
        self
    }

    pub fn with_places(self, places: Vec<PlacePrediction>) -> Self {
        *guard(&self.places) = places;
        self
    }

    pub fn with_address(self, address: Address) -> Self {
        *guard(&self.address) = address;
        self
    }

    pub fn with_distance(self, distance: DistanceInfo) -> Self {
        *guard(&self.distance) = Some(distance);
        self
    }

    /// Makes every call matching `predicate` fail with a 500.
    pub fn fail_when<F>(&self, predicate: F)
    where
        F: Fn(&GatewayCall) -> bool + Send + Sync + 'static,
    {
        *guard(&self.failure) = Some(Box::new(predicate));
    }

    pub fn clear_failure(&self) {
        *guard(&self.failure) = None;
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        guard(&self.calls).clone()
    }

    pub fn clear_calls(&self) {
        guard(&self.calls).clear();
    }

    fn record(&self, call: GatewayCall) -> Result<(), CoreError> {
        let failed = guard(&self.failure)
            .as_ref()
            .is_some_and(|predicate| predicate(&call));
        guard(&self.calls).push(call);
        if failed {
            Err(CoreError::remote(Some(500), "Simulated backend failure"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl PropertyGateway for RecordingGateway {
    async fn create_property(&self, draft: &PropertyDraft) -> Result<String, CoreError> {
        self.record(GatewayCall::CreateProperty {
            name: draft.base.name.clone(),
        })?;
        let n = self.next_property.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("prop_{n}"))
    }

    async fn update_property(&self, id: &str, _draft: &PropertyDraft) -> Result<(), CoreError> {
        self.record(GatewayCall::UpdateProperty { id: id.into() })
    }

    async fn get_property(&self, id: &str) -> Result<PropertyRecord, CoreError> {
        self.record(GatewayCall::GetProperty { id: id.into() })?;
        guard(&self.property)
            .clone()
            .filter(|record| record.id == id)
            .ok_or_else(|| CoreError::NotFound(format!("property {id}")))
    }

    async fn list_my_properties(&self) -> Result<Vec<PropertySummary>, CoreError> {
        self.record(GatewayCall::ListProperties)?;
        Ok(guard(&self.summaries).clone())
    }

    async fn delete_property(&self, id: &str) -> Result<(), CoreError> {
        self.record(GatewayCall::DeleteProperty { id: id.into() })?;
        guard(&self.summaries).retain(|summary| summary.id != id);
        Ok(())
    }

    async fn upsert_documents(
        &self,
        property_id: &str,
        documents: &[Document],
    ) -> Result<(), CoreError> {
        self.record(GatewayCall::UpsertDocuments {
            property_id: property_id.into(),
            count: documents.len(),
        })
    }

    async fn create_room_type(
        &self,
        property_id: &str,
        item: &InventoryItem,
    ) -> Result<String, CoreError> {
        self.record(GatewayCall::CreateRoomType {
            property_id: property_id.into(),
            name: item.name.clone(),
        })?;
        let n = self.next_room_type.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("rt_new_{n}"))
    }

    async fn update_room_type(
        &self,
        property_id: &str,
        room_type_id: &str,
        _item: &InventoryItem,
    ) -> Result<(), CoreError> {
        self.record(GatewayCall::UpdateRoomType {
            property_id: property_id.into(),
            room_type_id: room_type_id.into(),
        })
    }

    async fn delete_room_type(
        &self,
        property_id: &str,
        room_type_id: &str,
    ) -> Result<(), CoreError> {
        self.record(GatewayCall::DeleteRoomType {
            property_id: property_id.into(),
            room_type_id: room_type_id.into(),
        })
    }
}

#[async_trait]
impl LocationGateway for RecordingGateway {
    async fn reverse_geocode(&self, _point: GeoPoint) -> Result<Address, CoreError> {
        self.record(GatewayCall::ReverseGeocode)?;
        Ok(guard(&self.address).clone())
    }

    async fn search_places(&self, query: &str) -> Result<Vec<PlacePrediction>, CoreError> {
        self.record(GatewayCall::SearchPlaces {
            query: query.into(),
        })?;
        Ok(guard(&self.places).clone())
    }

    async fn distance(
        &self,
        _origin: GeoPoint,
        _destination: GeoPoint,
    ) -> Result<DistanceInfo, CoreError> {
        self.record(GatewayCall::Distance)?;
        (*guard(&self.distance)).ok_or_else(|| CoreError::remote(Some(404), "No route found"))
    }
}

#[async_trait]
impl MediaGateway for RecordingGateway {
    async fn upload_images(&self, files: Vec<UploadFile>) -> Result<Vec<String>, CoreError> {
        self.record(GatewayCall::UploadImages {
            names: files.iter().map(|file| file.name.clone()).collect(),
        })?;
        Ok(files
            .iter()
            .map(|file| {
                let n = self.next_upload.fetch_add(1, Ordering::SeqCst) + 1;
                format!("https://cdn.stayhub.test/uploads/{n}/{}", file.name)
            })
            .collect())
    }
}

#[async_trait]
impl BookingGateway for RecordingGateway {
    async fn my_bookings(&self) -> Result<Vec<Booking>, CoreError> {
        self.record(GatewayCall::MyBookings)?;
        Ok(guard(&self.bookings).clone())
    }
}

/// Location provider that always answers with the same result.
pub struct FixedLocation(pub Result<GeoPoint, GeolocationError>);

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn current_position(&self) -> Result<GeoPoint, GeolocationError> {
        self.0
    }
}
