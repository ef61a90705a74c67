//! Core library for the `onecall` CLI.
//!
//! This crate defines:
//! - The typed model of the `current` section of an OpenWeatherMap OneCall response
//! - Field tables and generic decoding from JSON into raw records, then normalization
//! - Configuration & credentials handling
//! - A thin HTTP fetcher for the OneCall endpoint
//!
//! It is used by `onecall-cli`, but can also be reused by other binaries or services.

pub mod client;
pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod raw;
pub mod schema;

pub use client::{CurrentWeatherSource, OneCallClient, OneCallRequest};
pub use config::Config;
pub use error::DecodeError;
pub use model::{CurrentWeather, OneCall, Units, Weather};
pub use raw::{RawCurrentWeather, RawOneCall};
pub use schema::{Normalize, decode_current, decode_one_call};
