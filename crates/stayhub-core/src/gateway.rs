//! Contracts for the marketplace REST backend.
//!
//! Each trait groups the endpoints one screen of the partner app relies on so
//! tests can substitute a recording double for any of them.

use async_trait::async_trait;

use stayhub_domain::{
    Address, Booking, DistanceInfo, Document, GeoPoint, InventoryItem, PlacePrediction,
    PropertyDraft, PropertyRecord, PropertySummary,
};

use crate::CoreError;

/// Property and inventory CRUD.
#[async_trait]
pub trait PropertyGateway: Send + Sync {
    /// Creates the parent record and returns its backend identifier.
    async fn create_property(&self, draft: &PropertyDraft) -> Result<String, CoreError>;
    async fn update_property(&self, id: &str, draft: &PropertyDraft) -> Result<(), CoreError>;
    async fn get_property(&self, id: &str) -> Result<PropertyRecord, CoreError>;
    async fn list_my_properties(&self) -> Result<Vec<PropertySummary>, CoreError>;
    async fn delete_property(&self, id: &str) -> Result<(), CoreError>;
    async fn upsert_documents(
        &self,
        property_id: &str,
        documents: &[Document],
    ) -> Result<(), CoreError>;
    /// Creates an inventory record and returns its backend identifier.
    async fn create_room_type(
        &self,
        property_id: &str,
        item: &InventoryItem,
    ) -> Result<String, CoreError>;
    async fn update_room_type(
        &self,
        property_id: &str,
        room_type_id: &str,
        item: &InventoryItem,
    ) -> Result<(), CoreError>;
    async fn delete_room_type(&self, property_id: &str, room_type_id: &str)
        -> Result<(), CoreError>;
}

/// Geocoding, place search and travel distance.
#[async_trait]
pub trait LocationGateway: Send + Sync {
    async fn reverse_geocode(&self, point: GeoPoint) -> Result<Address, CoreError>;
    async fn search_places(&self, query: &str) -> Result<Vec<PlacePrediction>, CoreError>;
    async fn distance(&self, origin: GeoPoint, destination: GeoPoint)
        -> Result<DistanceInfo, CoreError>;
}

/// A file ready to be sent to the upload endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[async_trait]
pub trait MediaGateway: Send + Sync {
    /// Uploads the files and returns their public URLs in the same order.
    async fn upload_images(&self, files: Vec<UploadFile>) -> Result<Vec<String>, CoreError>;
}

#[async_trait]
pub trait BookingGateway: Send + Sync {
    async fn my_bookings(&self) -> Result<Vec<Booking>, CoreError>;
}
