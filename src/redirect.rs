//! Role-based landing page after sign-in.
//!
//! The role is read back from persisted storage rather than from the login
//! response, so a redirect only points at a role dashboard once persistence
//! has succeeded.

use crate::{role::Role, session::SessionPort};
use tracing::info;

/// Landing page for roles without a dedicated dashboard.
pub const DEFAULT_DASHBOARD: &str = "/dashboard";

/// Replaces the current location; the form must not be reachable via "back".
pub trait Navigator {
    fn replace(&mut self, path: &str);
}

/// Maps a role name (any case) to its dashboard path.
#[must_use]
pub fn redirect_path(role: &str) -> &'static str {
    role.parse::<Role>()
        .map_or(DEFAULT_DASHBOARD, Role::dashboard_path)
}

/// Navigates to the persisted role's dashboard once the session is authenticated.
///
/// Returns the path navigated to, or `None` when there is no session.
pub fn follow_session<P, N>(port: &P, navigator: &mut N) -> Option<&'static str>
where
    P: SessionPort + ?Sized,
    N: Navigator + ?Sized,
{
    if !port.is_authenticated() {
        return None;
    }

    let role = port.stored_role().unwrap_or_default();
    let path = redirect_path(&role);
    info!(path, "redirecting authenticated session");
    navigator.replace(path);
    Some(path)
}
