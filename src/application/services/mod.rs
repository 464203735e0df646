//! Application services

mod facility;

pub use facility::{FacilityService, SharedFacility};
