pub mod club;
pub mod common;
pub mod competition;
pub mod content;
pub mod material;
pub mod player;
pub mod schedule;
pub mod user;
