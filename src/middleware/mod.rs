pub mod session;

pub use session::{require_user, session_cookie, session_middleware, CurrentSession};
