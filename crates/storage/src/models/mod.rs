pub mod club;
pub mod competition;
pub mod content;
pub mod material;
pub mod player;
pub mod schedule;
pub mod user;

pub use club::{Club, ClubIndicator};
pub use competition::{Competition, CompetitionIndicator};
pub use content::ContentSection;
pub use material::{Comment, Material, MaterialIndicator, MaterialType};
pub use player::{Player, PlayerIndicator};
pub use schedule::{Game, Matchweek, Schedule, ScheduleIndicator, Side};
pub use user::{Role, User, UserIndicator};
