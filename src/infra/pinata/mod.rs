pub mod client;

pub use client::{PinataClient, PinningService};
