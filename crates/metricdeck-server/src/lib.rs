//! HTTP surface for the insight-fetch-and-normalize layer.
//!
//! One POST route per platform adapter; each handler runs the same
//! resolve-credential → fetch → normalize sequence and maps every failure
//! onto the shared error envelope.

pub mod api;
pub mod middleware;
