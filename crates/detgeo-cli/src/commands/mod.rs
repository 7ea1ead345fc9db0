pub mod build;
pub mod digitize;
