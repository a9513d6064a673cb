pub mod config;
pub mod icon;
