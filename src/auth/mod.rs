/// Authentication: password hashing, bearer-token sessions and the
/// background sweep that expires them

pub mod password;
pub mod session;
pub mod sweeper;

pub use password::{constant_time_eq, hash_password, verify_password};
pub use session::{Session, SessionStore};
pub use sweeper::SessionSweeper;
