mod home;
pub use home::Home;

mod discover;
pub use discover::Discover;

mod mod_detail;
pub use mod_detail::ModDetail;

mod login;
pub use login::Login;

mod register;
pub use register::Register;

mod profile;
pub use profile::Profile;

mod project_publish;
pub use project_publish::ProjectPublish;

/// Open a URL in a new browser tab (downloads resolve to signed URLs).
pub(crate) fn open_in_new_tab(url: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.open_with_url_and_target(url, "_blank");
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::info!("download URL: {url}");
    }
}
