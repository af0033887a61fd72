#![allow(dead_code)]

pub mod mock_media;

pub use mock_media::{MediaCall, MockMediaEngine, RecordingSink};
