//! Push notifications for the CobraFácil billing app: the server side
//! that stores subscriptions and sends Web Push messages, and the client
//! side flow that turns a received push into a shown notification and
//! routes clicks back into the app.
//!
//! On wasm32 only `core::config` and `worker` are built. Enable the
//! `browser` feature there to get the service worker entry point.

#[cfg(not(target_arch = "wasm32"))]
pub mod api;
#[cfg(not(target_arch = "wasm32"))]
pub mod cli;
pub mod core;
#[cfg(not(target_arch = "wasm32"))]
pub mod notify;
pub mod worker;
