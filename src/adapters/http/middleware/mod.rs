//! Request middleware and auth extractors.

mod extractors;
mod session;

pub use extractors::{OptionalAuth, RequireAuth};
pub use session::{
    cookie_value, is_protected_path, session_middleware, SessionContext, SessionCookies,
    PROTECTED_PATH_PREFIXES,
};
