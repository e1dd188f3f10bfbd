//! Device geolocation and nearby-place helpers for the location steps.

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

use stayhub_domain::{GeoPoint, NearbyPlace, PlacePrediction};

use crate::gateway::LocationGateway;

/// Failures reported by the platform geolocation service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("Location permission denied. Please allow location access and try again.")]
    PermissionDenied,
    #[error("Location information is unavailable. Please enter the address manually.")]
    PositionUnavailable,
    #[error("Location request timed out. Please try again.")]
    Timeout,
    #[error("An unknown error occurred while fetching your location.")]
    Unknown,
}

impl GeolocationError {
    /// Maps the platform's numeric error codes (1, 2, 3).
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => GeolocationError::PermissionDenied,
            2 => GeolocationError::PositionUnavailable,
            3 => GeolocationError::Timeout,
            _ => GeolocationError::Unknown,
        }
    }
}

/// Source of the device's current coordinates.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn current_position(&self) -> Result<GeoPoint, GeolocationError>;
}

/// Converts a search prediction into a nearby place, measuring the distance
/// from `origin` when it is known. A failed distance lookup keeps the place
/// without metrics.
pub async fn nearby_place_from(
    prediction: &PlacePrediction,
    origin: Option<GeoPoint>,
    gateway: &dyn LocationGateway,
) -> NearbyPlace {
    let mut place = NearbyPlace {
        name: prediction.name.clone(),
        location: prediction.location,
        distance_km: None,
        travel_minutes: None,
    };
    if let Some(origin) = origin {
        match gateway.distance(origin, prediction.location).await {
            Ok(info) => {
                place.distance_km = Some(info.distance_km());
                place.travel_minutes = Some(info.travel_minutes());
            }
            Err(err) => {
                warn!(place = %prediction.name, error = %err, "distance lookup failed");
            }
        }
    }
    place
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_codes_map_to_messages() {
        assert_eq!(
            GeolocationError::from_code(1),
            GeolocationError::PermissionDenied
        );
        assert_eq!(
            GeolocationError::from_code(2),
            GeolocationError::PositionUnavailable
        );
        assert_eq!(GeolocationError::from_code(3), GeolocationError::Timeout);
        assert_eq!(GeolocationError::from_code(99), GeolocationError::Unknown);
        insta::assert_snapshot!(
            GeolocationError::Timeout.to_string(),
            @"Location request timed out. Please try again."
        );
    }
}
