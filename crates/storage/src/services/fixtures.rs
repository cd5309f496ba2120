use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{Game, Matchweek};

/// The matchweek whose `basic_date` is closest to `now`, either side.
/// Ties go to the earlier matchweek in fixture order.
pub fn nearest_matchweek(fixture: &[Matchweek], now: DateTime<Utc>) -> Option<&Matchweek> {
    // `min_by_key` keeps the first of equal minima.
    fixture
        .iter()
        .min_by_key(|matchweek| (matchweek.basic_date - now).abs())
}

/// Games of `club`, home or away, in fixture order.
pub fn club_games(fixture: &[Matchweek], club: Uuid) -> Vec<Game> {
    fixture
        .iter()
        .flat_map(|matchweek| matchweek.games.iter())
        .filter(|game| game.involves(club))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Side;
    use chrono::Duration;

    fn matchweek(name: &str, basic_date: DateTime<Utc>) -> Matchweek {
        Matchweek {
            id: name.into(),
            matchweek_name: name.into(),
            basic_date,
            games: Vec::new(),
        }
    }

    fn side(club: Uuid) -> Side {
        Side {
            club,
            points: None,
            goals_for: None,
            goals_against: None,
        }
    }

    #[test]
    fn picks_the_closest_matchweek_on_either_side_of_now() {
        let now = Utc::now();
        let fixture = [
            matchweek("1", now - Duration::days(10)),
            matchweek("2", now - Duration::days(3)),
            matchweek("3", now + Duration::days(4)),
        ];

        assert_eq!(nearest_matchweek(&fixture, now).unwrap().id, "2");
    }

    #[test]
    fn ties_resolve_to_the_first_matchweek() {
        let now = Utc::now();
        let fixture = [
            matchweek("before", now - Duration::days(2)),
            matchweek("after", now + Duration::days(2)),
        ];

        assert_eq!(nearest_matchweek(&fixture, now).unwrap().id, "before");
    }

    #[test]
    fn empty_fixture_has_no_nearest_matchweek() {
        assert!(nearest_matchweek(&[], Utc::now()).is_none());
    }

    #[test]
    fn club_games_include_home_and_away() {
        let (arsenal, chelsea, spurs) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let game = |id: &str, home, away| Game {
            id: id.into(),
            home: side(home),
            away: side(away),
            date: None,
            location: None,
            score: None,
        };

        let mut first = matchweek("1", Utc::now());
        first.games = vec![game("a", arsenal, chelsea), game("b", spurs, chelsea)];
        let mut second = matchweek("2", Utc::now());
        second.games = vec![game("c", spurs, arsenal)];

        let ids: Vec<String> = club_games(&[first, second], arsenal)
            .into_iter()
            .map(|g| g.id)
            .collect();
        assert_eq!(ids, vec!["a", "c"]);
    }
}
