//! Payload construction and canonical encoding

pub mod canonical;
mod fields;
mod timestamp;

pub use fields::{Payload, FIELD_NAMES};
pub use timestamp::{format_timestamp, timestamp_now, Clock, FixedClock, SystemClock};
