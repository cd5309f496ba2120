use crate::document::Stored;
use crate::dto::material::{LeagueMaterials, MaterialResponse};
use crate::models::Competition;

/// Groups materials by the competition whose full name appears among their
/// labels.
///
/// A material labelled with several competitions is counted for each one.
/// Leagues without any match are left out; the rest are ordered by
/// descending match count, ties keeping competition order.
pub fn league_materials(
    competitions: &[Stored<Competition>],
    materials: &[MaterialResponse],
) -> Vec<LeagueMaterials> {
    let mut leagues: Vec<LeagueMaterials> = competitions
        .iter()
        .filter_map(|competition| {
            let name = &competition.doc.full_name;
            let matched: Vec<MaterialResponse> = materials
                .iter()
                .filter(|m| m.labels.iter().any(|label| label == name))
                .cloned()
                .collect();

            (!matched.is_empty()).then(|| LeagueMaterials {
                league_id: competition.id,
                league: name.clone(),
                materials_count: matched.len() as u64,
                materials: matched,
            })
        })
        .collect();

    // `sort_by` is stable.
    leagues.sort_by(|a, b| b.materials_count.cmp(&a.materials_count));
    leagues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::material::Likes;
    use crate::models::MaterialType;
    use chrono::Utc;
    use uuid::Uuid;

    fn competition(name: &str) -> Stored<Competition> {
        Stored {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            doc: Competition {
                full_name: name.into(),
                short_name: name.into(),
                country: "Europe".into(),
                kind: "league".into(),
                logo_url: None,
                clubs: Vec::new(),
            },
        }
    }

    fn material(labels: &[&str]) -> MaterialResponse {
        MaterialResponse {
            id: Uuid::new_v4(),
            author: None,
            kind: MaterialType::Article,
            title: None,
            content: String::new(),
            preview: None,
            image: None,
            is_main: false,
            status: "published".into(),
            publication_date: Utc::now(),
            views: 0,
            likes: Likes::Count(0),
            comments: Vec::new(),
            labels: labels.iter().map(|l| l.to_string()).collect(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn leagues_are_ordered_by_match_count() {
        let competitions = [competition("La Liga"), competition("Premier League")];
        let materials = [
            material(&["Premier League"]),
            material(&["La Liga", "Premier League"]),
            material(&["Other"]),
            material(&[]),
        ];

        let leagues = league_materials(&competitions, &materials);

        let summary: Vec<(&str, u64)> = leagues
            .iter()
            .map(|l| (l.league.as_str(), l.materials_count))
            .collect();
        assert_eq!(summary, vec![("Premier League", 2), ("La Liga", 1)]);
        assert!(
            leagues
                .iter()
                .flat_map(|l| &l.materials)
                .all(|m| !m.labels.is_empty() && !m.labels.contains(&"Other".to_string()))
        );
    }

    #[test]
    fn ties_keep_competition_order() {
        let competitions = [competition("Serie A"), competition("Bundesliga")];
        let materials = [material(&["Bundesliga"]), material(&["Serie A"])];

        let leagues = league_materials(&competitions, &materials);
        assert_eq!(leagues[0].league, "Serie A");
        assert_eq!(leagues[1].league, "Bundesliga");
    }

    #[test]
    fn labels_must_match_exactly() {
        let competitions = [competition("Premier League")];
        let materials = [material(&["premier league"]), material(&["Premier"])];
        assert!(league_materials(&competitions, &materials).is_empty());
    }
}
