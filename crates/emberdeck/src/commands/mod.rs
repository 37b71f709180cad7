pub mod completion;
pub mod config;
pub mod password;
pub mod reset;
