#![allow(dead_code, unused_imports)]

pub mod host;
pub mod source;

pub use host::RecordingHost;
pub use source::{GatedSource, RecordingRenderer};
