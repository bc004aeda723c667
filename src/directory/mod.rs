//! Directory view core: wire types, the HTTP client, snapshot state with pure
//! transitions, and the controller that ties fetches to state.

pub mod api;
pub mod client;
pub mod config;
pub mod controller;
pub mod errors;
pub mod render;
pub mod state;
pub mod types;

pub use client::{DirectoryClient, UserDirectory};
pub use config::{DirectoryConfig, ErrorPolicy};
pub use controller::DirectoryView;
pub use errors::{ApiError, LoadError};
pub use state::{DetailTicket, DirectoryState, ListTicket, Loader, PageState, Selection};
pub use types::{Advisory, UserDetail, UserDetailResponse, UserPage, UserSummary};
