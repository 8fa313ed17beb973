//! # Freshsync
//!
//! Freshsync is a client for the Freshservice helpdesk REST API (v2) with a
//! couple of batch workflows built on top of it.
//!
//! ## Features
//!
//! - **Verb primitives**: fetch, create, replace and delete with per-verb
//!   accepted status codes
//! - **Pagination**: listings follow the `link` header until it disappears,
//!   with a page cap and an optional pause between pages
//! - **Resources**: tickets, requesters, agents, roles, agent and requester
//!   groups, products, vendors, assets and asset types
//! - **Errors**: every failure is a [`FreshError`](error::FreshError); nothing
//!   in the library exits the process
//! - **Security**: the API key is never logged or included in error messages
//!
//! ## Architecture
//!
//! - [`config`] - Configuration loading from environment variables
//! - [`error`] - Error types with status classification and sanitization
//! - [`api_client`] - HTTP transport, verb primitives and page following
//! - [`pagination`] - `link` header parsing
//! - [`api`] - Resource descriptors and typed operations per resource
//! - [`models`] - Data models for API requests and responses
//! - [`sync`] - Directory-to-requester sync and asset assignment
//!
//! ## Configuration
//!
//! - `FRESHSERVICE_DOMAIN`: Root URL of the instance
//! - `FRESHSERVICE_API_KEY`: API key for basic authentication
//!
//! Optional:
//! - `FRESHSERVICE_TIMEOUT_SECS`, `FRESHSERVICE_MAX_PAGES`,
//!   `FRESHSERVICE_PAGE_DELAY_MS`
//! - `RUST_LOG`: Log level (e.g., `freshsync=debug`)
//!
//! ## Example
//!
//! ```ignore
//! use freshsync::api::Lookup;
//! use freshsync::api_client::{ApiClient, ListParams};
//! use freshsync::config::Config;
//!
//! async fn example() -> Result<(), freshsync::error::FreshError> {
//!     let config = Config::from_env()?;
//!     let client = ApiClient::new(&config)?;
//!
//!     let tickets = client.all_tickets(ListParams::new()).await?;
//!     for ticket in &tickets {
//!         println!("#{}: {}", ticket.id, ticket.display_subject());
//!     }
//!
//!     let matches = client.view_requester(Some("ada@example.org"), None).await?;
//!     println!("{} requester(s)", matches.len());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod api;
pub mod api_client;
pub mod config;
pub mod error;
pub mod models;
pub mod pagination;
pub mod sync;
