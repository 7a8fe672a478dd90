/// API route modules
pub mod auth;
pub mod health;
pub mod migration;
pub mod playlists;
