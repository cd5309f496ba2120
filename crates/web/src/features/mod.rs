pub mod clubs;
pub mod competitions;
pub mod content;
pub mod materials;
pub mod players;
pub mod schedules;
pub mod users;
