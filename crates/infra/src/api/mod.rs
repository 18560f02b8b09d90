//! Kinvey REST client
//!
//! [`KinveyClient`] resolves endpoint-table rows into HTTP requests;
//! [`Users`], [`Groups`], and [`Collection`] are thin typed handles on it.

mod call;
pub mod client;
pub mod resources;

pub use client::KinveyClient;
pub use resources::{Collection, Groups, Users};
