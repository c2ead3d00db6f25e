pub mod allergy;
pub mod auth;
pub mod chat;
pub mod game;
pub mod predict;
pub mod reviews;
