//! Data models for the Freshservice API.
//!
//! This module contains type definitions for tickets, requesters, agents,
//! groups, assets and catalog entries, plus envelope handling shared by
//! every response.

mod agent;
mod asset;
mod catalog;
mod common;
mod requester;
mod ticket;

pub use agent::*;
pub use asset::*;
pub use catalog::*;
pub use common::*;
pub use requester::*;
pub use ticket::*;
