//! Application-side execution of a [`QueryPlan`].

use super::accessor::Lookup;
use super::{QueryPage, QueryPlan};
use crate::document::RawDocument;

/// Filters, counts the *filtered* set, sorts stably, then slices the window.
pub fn execute<'a, I>(documents: I, plan: &QueryPlan, lookup: &dyn Lookup) -> QueryPage
where
    I: IntoIterator<Item = &'a RawDocument>,
{
    let mut matched: Vec<RawDocument> = documents
        .into_iter()
        .filter(|doc| plan.predicate.matches(doc, lookup))
        .cloned()
        .collect();

    let total = matched.len() as u64;
    plan.sort.apply(&mut matched, lookup);

    QueryPage {
        documents: plan.window.slice(matched),
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{
        Accessor, FilterParams, NoRelations, Predicate, PredicateBuilder, Sort, SortOrder, Window,
    };
    use chrono::{Duration, Utc};
    use serde_json::json;
    use uuid::Uuid;

    fn materials() -> Vec<RawDocument> {
        let start = Utc::now();
        [
            ("article", 10),
            ("article", 50),
            ("post", 90),
            ("note", 70),
            ("article", 30),
        ]
        .iter()
        .enumerate()
        .map(|(i, (kind, views))| RawDocument {
            id: Uuid::new_v4(),
            body: json!({ "type": kind, "views": views }),
            created_at: start + Duration::minutes(i as i64),
            updated_at: start,
        })
        .collect()
    }

    #[test]
    fn filtered_sorted_page_with_filtered_count() {
        let docs = materials();
        let filter = FilterParams::new([("type", "article")]);
        let plan = QueryPlan::new(
            PredicateBuilder::new(&filter)
                .equals("type", Accessor::text("type"))
                .build(),
        )
        .with_sort(Sort::new(Accessor::number("views"), SortOrder::Desc))
        .with_window(Window::new(0, 2));

        let page = execute(&docs, &plan, &NoRelations);

        let views: Vec<i64> = page
            .documents
            .iter()
            .map(|d| d.body["views"].as_i64().unwrap())
            .collect();
        assert_eq!(views, vec![50, 30]);
        assert_eq!(page.total, 3);
    }

    #[test]
    fn count_does_not_depend_on_the_window() {
        let docs = materials();
        let predicate = Predicate::equals(Accessor::text("type"), "article");

        for window in [
            Window::everything(),
            Window::new(0, 1),
            Window::new(1, 2),
            Window::new(9, 5),
        ] {
            let plan = QueryPlan::new(predicate.clone()).with_window(window);
            assert_eq!(execute(&docs, &plan, &NoRelations).total, 3);
        }
    }

    #[test]
    fn lone_date_bound_changes_nothing() {
        let docs = materials();
        let filter = FilterParams::new([("dateFrom", "2999-01-01")]);
        let plan = QueryPlan::new(
            PredicateBuilder::new(&filter)
                .date_range(Accessor::CREATED_AT)
                .unwrap()
                .build(),
        );

        let filtered = execute(&docs, &plan, &NoRelations);
        let unfiltered = execute(&docs, &QueryPlan::all(), &NoRelations);
        assert_eq!(filtered, unfiltered);
        assert_eq!(filtered.total, 5);
    }
}
