//! # waitrank Core
//!
//! Core types for the waitrank candidate ranking engine.
//!
//! - [`Coordinate`] - validated latitude/longitude with haversine distance
//! - [`Candidate`] - a validated waitlist record
//! - [`RawRecord`] - an unvalidated record as loaded from JSON
//! - [`Field`] - the scored attributes
//! - [`Error`] / [`ValidationError`] / [`LocationError`] - the error taxonomy
//!
//! ## Example
//!
//! ```rust
//! use waitrank_core::{Candidate, Coordinate, RawRecord};
//! use serde_json::json;
//!
//! let raw = RawRecord::from_value(json!({
//!     "id": "p1",
//!     "location": {"latitude": "32.1", "longitude": "34.8"},
//!     "age": 40
//! })).unwrap();
//! let candidate = Candidate::from_raw(&raw).unwrap();
//!
//! let facility = Coordinate::new(32.0, 34.8).unwrap();
//! let km = candidate.location.unwrap().distance_to(&facility);
//! assert!(km > 10.0 && km < 12.0);
//! ```

pub mod candidate;
pub mod coordinate;
pub mod error;
pub mod field;

pub use candidate::{Candidate, CandidateId, RawRecord};
pub use coordinate::{haversine_km, Coordinate, EARTH_RADIUS_KM};
pub use error::{Error, LocationError, Result, ValidationError};
pub use field::Field;
