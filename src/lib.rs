//! ProjectLog Client - State Core
//!
//! Client-side state layer backing the project update composer and the
//! update-image gallery. Remote data (option lists, project data, gallery
//! pages) is fetched elsewhere and handed in already resolved; this crate
//! owns everything that happens between the fetch and the render.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                    PROJECTLOG CLIENT CORE                     │
//! │                                                               │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐         │
//! │  │  FormState   │  │  Selection   │  │  Pagination  │         │
//! │  │ (values +    │  │    Model     │  │  (gallery    │         │
//! │  │  rules)      │  │ (id+status)  │  │   paging)    │         │
//! │  └──────┬───────┘  └──────┬───────┘  └──────┬───────┘         │
//! │         │                 │                 │                 │
//! │  ┌──────▼─────────────────▼──────┐  ┌───────▼──────┐          │
//! │  │        UpdateComposer         │  │ GalleryState │          │
//! │  └───────────────────────────────┘  └──────────────┘          │
//! │                                                               │
//! │  ┌──────────────┐  ┌──────────────┐                           │
//! │  │  ErrorStore  │  │ ClientConfig │                           │
//! │  └──────────────┘  └──────────────┘                           │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! All state is single-threaded and synchronous: every operation runs to
//! completion before the next UI event is handled. The one exception is
//! [`ErrorStore`], which independent fetch collaborators share.

#![warn(missing_docs)]
#![allow(dead_code)]

pub mod config;
pub mod form;
pub mod gallery;
pub mod model;
pub mod pagination;
pub mod selection;
pub mod store;
pub mod update;

use thiserror::Error;

pub use config::ClientConfig;
pub use form::{FieldInput, FieldValue, FormState};
pub use gallery::GalleryState;
pub use model::{Element, ElementsAndSquads, SelectOption, Squad, UpdateDraft};
pub use pagination::Pagination;
pub use selection::{SelectedEntity, SelectionModel};
pub use store::ErrorStore;
pub use update::UpdateComposer;

/// Client error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// An upstream fetch collaborator failed; carries the message forwarded
    /// to the error sink. Core state is never altered by a failed fetch.
    #[error("fetch error: {0}")]
    Fetch(String),
    /// Configuration could not be read or written
    #[error("config error: {0}")]
    Config(String),
}
