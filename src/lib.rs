// Library exports for the Battlesnake bot
// The server binary, the replay tools and the integration tests all build on these

pub mod bot;
pub mod config;
pub mod debug_logger;
pub mod engine;
pub mod field;
pub mod geometry;
pub mod handler;
pub mod hazards;
pub mod observer;
pub mod replay;
pub mod safety;
pub mod selector;
pub mod types;
