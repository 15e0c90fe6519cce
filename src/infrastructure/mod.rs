pub mod config;
pub mod db;
pub mod inbox;
pub mod reddit;
pub mod repositories;
