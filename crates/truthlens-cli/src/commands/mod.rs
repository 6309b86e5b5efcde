//! Command implementations.

pub mod check;
pub mod profile;
pub mod query;

pub use self::check::execute_check;
pub use self::profile::execute_profile;
pub use self::query::execute_query;
