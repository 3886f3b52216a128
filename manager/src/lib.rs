//! Manager side of mgrlink
//!
//! Decides how often each client should report statistics and sends it a
//! configure message through whatever messenger the caller provides.

pub mod config;
pub mod session;

pub use config::ManagerConfig;
pub use session::ManagerSession;
