//! Command implementations.

pub mod departments;
pub mod generate;
pub mod import;
pub mod reports;

pub use self::departments::execute_departments;
pub use self::generate::execute_generate;
pub use self::import::execute_import;
pub use self::reports::execute_reports;
