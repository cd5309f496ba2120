use utoipa::OpenApi;

use crate::features;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::clubs::handlers::list_clubs,
        features::clubs::handlers::search_clubs,
        features::clubs::handlers::get_club,
        features::clubs::handlers::create_club,
        features::clubs::handlers::update_club,
        features::clubs::handlers::delete_club,
        features::competitions::handlers::list_competitions,
        features::competitions::handlers::list_all_competitions,
        features::competitions::handlers::get_competition,
        features::competitions::handlers::create_competition,
        features::competitions::handlers::update_competition,
        features::competitions::handlers::delete_competition,
        features::players::handlers::list_players,
        features::players::handlers::search_players,
        features::players::handlers::get_player,
        features::players::handlers::create_player,
        features::players::handlers::update_player,
        features::players::handlers::delete_player,
        features::schedules::handlers::list_schedules,
        features::schedules::handlers::get_league_schedule,
        features::schedules::handlers::get_club_schedule,
        features::schedules::handlers::get_recent_matches,
        features::schedules::handlers::get_schedule,
        features::schedules::handlers::create_schedule,
        features::schedules::handlers::update_schedule,
        features::schedules::handlers::delete_schedule,
        features::materials::handlers::list_materials,
        features::materials::handlers::get_main_material,
        features::materials::handlers::get_recent_materials,
        features::materials::handlers::get_secondary_materials,
        features::materials::handlers::search_materials,
        features::materials::handlers::get_material,
        features::materials::handlers::create_material,
        features::materials::handlers::update_material,
        features::materials::handlers::delete_material,
        features::materials::handlers::toggle_like,
        features::materials::handlers::add_comment,
        features::content::handlers::list_sections,
        features::content::handlers::get_section,
        features::content::handlers::create_section,
        features::content::handlers::update_section,
        features::content::handlers::delete_section,
        features::users::handlers::get_authenticated_user,
        features::users::handlers::list_users,
        features::users::handlers::list_users_by_role,
        features::users::handlers::list_locations,
        features::users::handlers::sign_up,
        features::users::handlers::login,
        features::users::handlers::logout,
        features::users::handlers::create_user,
        features::users::handlers::update_user,
        features::users::handlers::delete_user,
    ),
    components(
        schemas(
            storage::dto::club::ClubRequest,
            storage::dto::club::ClubResponse,
            storage::dto::club::ClubList,
            storage::dto::competition::CompetitionRequest,
            storage::dto::competition::CompetitionResponse,
            storage::dto::competition::CompetitionList,
            storage::dto::player::PlayerRequest,
            storage::dto::player::PlayerResponse,
            storage::dto::player::PlayerList,
            storage::dto::schedule::ScheduleRequest,
            storage::dto::schedule::MatchweekRequest,
            storage::dto::schedule::GameRequest,
            storage::dto::schedule::SideRequest,
            storage::dto::schedule::ScheduleResponse,
            storage::dto::schedule::MatchweekResponse,
            storage::dto::schedule::GameResponse,
            storage::dto::schedule::SideResponse,
            storage::dto::schedule::ScheduleList,
            storage::dto::schedule::ClubSchedule,
            storage::dto::schedule::RecentMatches,
            storage::dto::material::MaterialRequest,
            storage::dto::material::CommentRequest,
            storage::dto::material::NewCommentRequest,
            storage::dto::material::AuthorInfo,
            storage::dto::material::Likes,
            storage::dto::material::MaterialResponse,
            storage::dto::material::MaterialList,
            storage::dto::material::LeagueMaterials,
            storage::dto::material::SecondaryMaterials,
            storage::dto::material::LikeResponse,
            storage::dto::content::ContentSectionRequest,
            storage::dto::content::ContentSectionResponse,
            storage::dto::user::SignUpRequest,
            storage::dto::user::LoginRequest,
            storage::dto::user::UpdateUserRequest,
            storage::dto::user::UserResponse,
            storage::dto::user::UserList,
            storage::models::Comment,
            storage::models::MaterialType,
            storage::models::Role,
        )
    ),
    tags(
        (name = "clubs", description = "Club endpoints"),
        (name = "competitions", description = "Competition endpoints"),
        (name = "players", description = "Player endpoints"),
        (name = "schedules", description = "Schedule and fixture endpoints"),
        (name = "materials", description = "Articles, notes and posts"),
        (name = "content", description = "Homepage content sections"),
        (name = "users", description = "Accounts and session authentication"),
    )
)]
pub struct ApiDoc;
