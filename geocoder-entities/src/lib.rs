#![deny(missing_debug_implementations)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(test, deny(warnings))]

//! # geocoder-entities
//!
//! Plain domain values for geocoding lookups.
//!
//! The entities carry no I/O and know nothing about a particular upstream service.

pub mod address;
pub mod geocode;
