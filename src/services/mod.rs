pub mod auth_service;
pub mod generation_service;
pub mod lookup_service;
pub mod recipe_service;
pub mod report_service;
pub mod seed_service;
