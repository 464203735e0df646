//! Business logic and presentation-facing snapshot types

pub mod dto;
pub mod services;
