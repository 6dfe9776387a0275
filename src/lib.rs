pub mod config;
pub mod db;
pub mod dto;
pub mod entity;
pub mod error;
pub mod llm;
pub mod middleware;
pub mod models;
pub mod response;
pub mod routes;
pub mod seed_data;
pub mod services;
pub mod state;
