// === PUBLIC CONTRACT ===
pub mod contract;
pub use contract::model;

// === MODULE DEFINITION ===
pub mod module;
pub use module::UsersInfo;
pub use config::UsersInfoConfig;

// === INTERNAL MODULES ===
// Exposed for tests; other crates should stick to `contract` and `UsersInfo`.
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
