//! Worker service proxy

pub mod client;

pub use client::WorkerClient;
