//! Request and response records
//!
//! Every inbound record carries a `validate()` that checks its field-level
//! constraints before any provider call is made:
//! - Location: coordinates and geographic helpers
//! - Geocode: forward, reverse and batch geocoding
//! - Places: nearby search and the category catalog
//! - Demographics: ring buffer and boundary lookups
//! - Route: multi-stop routing

pub mod demographics;
pub mod geocode;
pub mod location;
pub mod places;
pub mod route;

pub use demographics::{Boundary, DemographicsRequest, DemographicsResult, StudyArea};
pub use geocode::{
    BatchGeocodeItem, BatchItemError, GeocodeRequest, GeocodeResult, ReverseGeocodeResult,
};
pub use location::Coordinates;
pub use places::{Place, PlaceCategory, PlaceSearchRequest};
pub use route::{RouteRequest, RouteResult, RouteSegment, TravelMode};
