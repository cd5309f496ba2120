pub mod credentials;
pub mod fixtures;
pub mod league;
