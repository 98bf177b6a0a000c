pub mod extract;
pub mod password;
pub mod session;

pub use extract::{CurrentUser, MaybeUser};
pub use session::{SessionStore, SESSION_COOKIE};
