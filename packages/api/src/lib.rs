//! # API crate — REST client for the Modzart backend
//!
//! Everything the frontends need to talk to the marketplace backend lives
//! here: the configured HTTP client, one service module per backend
//! resource, and the data model the views render.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | [`ApiClient`] — base address, default headers, request deadline, bearer-token attachment |
//! | [`error`] | [`ApiError`] — network / timeout / server-error taxonomy |
//! | [`auth`] | `/auth/token` and `/users` operations, token persistence on login |
//! | [`mods`] | `/mods` operations: listing, CRUD, downloads, versions, icon, gallery, links, review |
//! | [`models`] | Wire records and their domain projections ([`Mod`], [`ModKind`], ...) |
//!
//! Each service function maps one domain operation to exactly one HTTP
//! call; response bodies come back typed but otherwise untransformed, and
//! failures propagate as [`ApiError`] for the call site to render.

pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod mods;

pub use client::ApiClient;
pub use error::{ApiError, Result};
pub use models::{
    ExternalLink, FilePayload, GalleryImage, LinkKind, Mod, ModKind, ModRecord, NewProject,
    NewUser, ProfileUpdate, ProjectUpdate, TokenResponse, User, Version, VersionReceipt,
    Visibility,
};
pub use mods::ModQuery;
