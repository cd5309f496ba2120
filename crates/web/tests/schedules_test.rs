mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{TestApp, id_of};
use serde_json::{Value, json};

fn game(home: &str, away: &str) -> Value {
    json!({
        "home": { "club": home, "goalsFor": 2, "goalsAgainst": 1 },
        "away": { "club": away, "goalsFor": 1, "goalsAgainst": 2 },
        "score": "2:1",
    })
}

fn matchweek(name: &str, days_from_now: i64, games: Vec<Value>) -> Value {
    json!({
        "matchweekName": name,
        "basicDate": (Utc::now() + Duration::days(days_from_now)).to_rfc3339(),
        "games": games,
    })
}

struct League {
    app: TestApp,
    competition: String,
    arsenal: String,
    chelsea: String,
    everton: String,
}

async fn league() -> League {
    let app = TestApp::new();
    let arsenal = app.create_club("Arsenal", "England").await;
    let chelsea = app.create_club("Chelsea", "England").await;
    let everton = app.create_club("Everton", "England").await;
    let competition = app
        .create_competition("Premier League", &[&arsenal, &chelsea, &everton])
        .await;

    League {
        app,
        competition,
        arsenal,
        chelsea,
        everton,
    }
}

#[tokio::test]
async fn competition_needs_two_existing_clubs() {
    let app = TestApp::new();
    let arsenal = app.create_club("Arsenal", "England").await;

    let response = app
        .post(
            "/competitions",
            json!({
                "fullName": "Premier League",
                "shortName": "PL",
                "country": "England",
                "type": "league",
                "clubs": [arsenal, "6f1c1a38-43a5-4a5e-9a0e-0f6b4b0a2d11"],
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body["error"],
        "Competition must have at least two clubs"
    );
}

#[tokio::test]
async fn competition_lists_its_clubs() {
    let League {
        app,
        competition,
        arsenal,
        ..
    } = league().await;

    let response = app.get(&format!("/competitions/{}", competition)).await;

    assert_eq!(response.status, StatusCode::OK);
    let clubs = response.body["clubs"].as_array().unwrap();
    assert_eq!(clubs.len(), 3);
    assert_eq!(clubs[0]["_id"], json!(arsenal));
}

#[tokio::test]
async fn deleted_club_drops_out_of_its_competition() {
    let League {
        app,
        competition,
        everton,
        ..
    } = league().await;

    app.delete(&format!("/clubs/{}", everton)).await;

    let response = app.get(&format!("/competitions/{}", competition)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["clubs"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn league_schedule_is_found_by_season_and_competition() {
    let League {
        app,
        competition,
        arsenal,
        chelsea,
        ..
    } = league().await;

    let created = app
        .post(
            "/schedules",
            json!({
                "competition": competition,
                "season": "2024/2025",
                "fixture": [matchweek("Matchweek 1", -7, vec![game(&arsenal, &chelsea)])],
            }),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED, "{}", created.body);

    let response = app
        .get(&format!(
            "/schedules/league?season=2024/2025&leagueId={}",
            competition
        ))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(id_of(&response.body), id_of(&created.body));
    assert_eq!(response.body["competition"]["_id"], json!(competition));
    let home = &response.body["fixture"][0]["games"][0]["home"];
    assert_eq!(home["club"]["commonName"], "Arsenal");
    assert_eq!(home["goalsFor"], 2);

    let other_season = app
        .get(&format!(
            "/schedules/league?season=2023/2024&leagueId={}",
            competition
        ))
        .await;
    assert_eq!(other_season.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn schedule_for_unknown_competition_is_rejected() {
    let app = TestApp::new();

    let response = app
        .post(
            "/schedules",
            json!({
                "competition": "6f1c1a38-43a5-4a5e-9a0e-0f6b4b0a2d11",
                "season": "2024/2025",
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "Competition not found");
}

#[tokio::test]
async fn club_schedule_keeps_only_that_clubs_games() {
    let League {
        app,
        competition,
        arsenal,
        chelsea,
        everton,
    } = league().await;

    app.post(
        "/schedules",
        json!({
            "competition": competition,
            "season": "2024/2025",
            "fixture": [
                matchweek("Matchweek 1", -14, vec![game(&arsenal, &chelsea)]),
                matchweek("Matchweek 2", -7, vec![game(&chelsea, &everton)]),
                matchweek("Matchweek 3", 0, vec![game(&everton, &arsenal)]),
            ],
        }),
    )
    .await;

    let response = app
        .get(&format!(
            "/schedules/club?season=2024/2025&clubId={}",
            arsenal
        ))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let schedules = response.body.as_array().unwrap();
    assert_eq!(schedules.len(), 1);
    assert_eq!(schedules[0]["games"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn recent_matches_pick_the_closest_matchweek() {
    let League {
        app,
        competition,
        arsenal,
        chelsea,
        everton,
    } = league().await;

    app.post(
        "/schedules",
        json!({
            "competition": competition,
            "season": "2024/2025",
            "fixture": [
                matchweek("Matchweek 1", -20, vec![game(&arsenal, &chelsea)]),
                matchweek("Matchweek 2", -2, vec![game(&chelsea, &everton)]),
                matchweek("Matchweek 3", 12, vec![game(&everton, &arsenal)]),
            ],
        }),
    )
    .await;

    let response = app.get("/schedules/recent?season=2024/2025").await;

    assert_eq!(response.status, StatusCode::OK);
    let recent = response.body.as_array().unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0]["matchweek"]["matchweekName"], "Matchweek 2");
    assert_eq!(recent[0]["competition"]["fullName"], "Premier League");
}
