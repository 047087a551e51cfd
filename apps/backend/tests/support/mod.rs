#![allow(dead_code)]

pub mod client;
pub mod deciders;

pub use client::{test_hub, TestClient};
pub use deciders::{Recorder, RecordingDecider, StallingDecider};
