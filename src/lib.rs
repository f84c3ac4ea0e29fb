pub mod abilities;
pub mod boss;
pub mod character;
pub mod config;
pub mod entities;
pub mod input;
pub mod math;
pub mod obstacles;
pub mod store;
pub mod terrain;
pub mod world;
