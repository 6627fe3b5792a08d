//! This crate contains all shared UI for the workspace.

pub mod components;

mod session;
pub use session::{
    hydrate, make_client, sign_in, sign_out, sign_up, use_api, use_session, Session,
    SessionProvider,
};

mod query;
pub use query::{use_error_toast, use_error_toast_with, use_query, QueryState, UseQuery};

mod toast;
pub use toast::{use_toasts, Toast, ToastApi, ToastLevel, ToastProvider};

mod mod_card;
pub use mod_card::ModCard;

mod navbar;
pub use navbar::Navbar;
