//! Pure track processing: no I/O, no logging.

pub mod convert;
pub mod geo;
pub mod gpx;
pub mod ops;
pub mod process;
pub mod series;
pub mod streams;
