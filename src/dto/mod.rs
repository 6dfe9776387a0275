pub mod auth;
pub mod generation;
pub mod lookups;
pub mod recipes;
pub mod reports;
