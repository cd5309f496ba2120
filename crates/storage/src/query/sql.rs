//! Store-side rendering of a [`QueryPlan`] for Postgres document tables.
//!
//! Every collection is a table `(id, doc jsonb, created_at, updated_at)`
//! aliased `d`; related accessors become scalar subqueries aliased `r`.
//! Field and table names come from closed accessor tables and are pushed
//! verbatim, values are always bound.

use sqlx::{Postgres, QueryBuilder};

use super::accessor::{Accessor, Projection, Source, ValueKind, parse_time};
use super::filter::{Condition, Predicate};
use super::QueryPlan;
use crate::document::Collection;

pub const COLUMNS: &str = "d.id, d.doc, d.created_at, d.updated_at";

/// `SELECT ... WHERE ... ORDER BY ... LIMIT ... OFFSET ...`
pub fn select(collection: Collection, plan: &QueryPlan) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new(format!(
        "SELECT {} FROM {} d WHERE ",
        COLUMNS,
        collection.table()
    ));
    push_predicate(&mut query, &plan.predicate);

    query.push(" ORDER BY ");
    query.push(expression(&plan.sort.key));
    if plan.sort.key.kind() == ValueKind::Text {
        query.push(" COLLATE \"C\"");
    }
    query.push(" ");
    query.push(plan.sort.order.as_sql());
    query.push(", d.created_at DESC, d.id DESC");

    if let Some(limit) = plan.window.limit() {
        query.push(" LIMIT ");
        query.push_bind(to_i64(limit));
        query.push(" OFFSET ");
        query.push_bind(to_i64(plan.window.skip()));
    }

    query
}

/// `SELECT COUNT(*) ... WHERE ...` with the same predicate as [`select`].
pub fn count(collection: Collection, predicate: &Predicate) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new(format!(
        "SELECT COUNT(*) FROM {} d WHERE ",
        collection.table()
    ));
    push_predicate(&mut query, predicate);
    query
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

pub fn push_predicate(query: &mut QueryBuilder<'static, Postgres>, predicate: &Predicate) {
    match predicate {
        Predicate::All(parts) if parts.is_empty() => {
            query.push("TRUE");
        }
        Predicate::Any(parts) if parts.is_empty() => {
            query.push("FALSE");
        }
        Predicate::All(parts) => push_joined(query, parts, " AND "),
        Predicate::Any(parts) => push_joined(query, parts, " OR "),
        Predicate::Match(condition) => push_condition(query, condition),
    }
}

fn push_joined(query: &mut QueryBuilder<'static, Postgres>, parts: &[Predicate], separator: &str) {
    query.push("(");
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            query.push(separator);
        }
        push_predicate(query, part);
    }
    query.push(")");
}

fn push_condition(query: &mut QueryBuilder<'static, Postgres>, condition: &Condition) {
    match condition {
        Condition::Equals { accessor, value } => push_equals(query, accessor, value),
        Condition::Between { accessor, range } => {
            query.push(expression(accessor));
            query.push(" BETWEEN ");
            query.push_bind(range.from);
            query.push(" AND ");
            query.push_bind(range.to);
        }
        Condition::Contains { accessor, needle } => {
            query.push(expression(accessor));
            query.push(" ILIKE ");
            query.push_bind(like_pattern(needle));
        }
        Condition::OneOf { accessor, values } => {
            if values.is_empty() {
                query.push("FALSE");
                return;
            }
            query.push("(");
            for (i, value) in values.iter().enumerate() {
                if i > 0 {
                    query.push(" OR ");
                }
                push_equals(query, accessor, value);
            }
            query.push(")");
        }
        Condition::ElementContains { field, needle } => {
            query.push(format!(
                "EXISTS (SELECT 1 FROM jsonb_array_elements_text(COALESCE(d.doc->'{}', '[]'::jsonb)) AS e(v) WHERE e.v ILIKE ",
                field
            ));
            query.push_bind(like_pattern(needle));
            query.push(")");
        }
    }
}

/// Binds the client value by accessor kind; unparsable values match nothing,
/// like the in-memory comparison.
fn push_equals(query: &mut QueryBuilder<'static, Postgres>, accessor: &Accessor, value: &str) {
    match accessor.kind() {
        ValueKind::Text => {
            query.push(expression(accessor));
            query.push(" = ");
            query.push_bind(value.to_string());
        }
        ValueKind::Number => match value.trim().parse::<f64>() {
            Ok(number) => {
                query.push(expression(accessor));
                query.push(" = ");
                query.push_bind(number);
            }
            Err(_) => {
                query.push("FALSE");
            }
        },
        ValueKind::Time => match parse_time(value) {
            Some(time) => {
                query.push(expression(accessor));
                query.push(" = ");
                query.push_bind(time);
            }
            None => {
                query.push("FALSE");
            }
        },
    }
}

pub fn expression(accessor: &Accessor) -> String {
    match accessor.source {
        Source::Own => projection("d", accessor.projection),
        Source::Related { via, collection } => format!(
            "(SELECT {} FROM {} r WHERE r.id::text = d.doc->>'{}')",
            projection("r", accessor.projection),
            collection.table(),
            via
        ),
    }
}

fn projection(alias: &str, projection: Projection) -> String {
    match projection {
        Projection::CreatedAt => format!("{alias}.created_at"),
        Projection::Text(field) => format!("({alias}.doc->>'{field}')"),
        Projection::Number(field) => format!("({alias}.doc->>'{field}')::double precision"),
        Projection::Time(field) => format!("({alias}.doc->>'{field}')::timestamptz"),
        Projection::Length(field) => format!("jsonb_array_length({alias}.doc->'{field}')"),
        // Empty parts are skipped like missing ones.
        Projection::DisplayName => format!(
            "NULLIF(concat_ws(' ', NULLIF({alias}.doc->>'firstName', ''), \
             NULLIF({alias}.doc->>'lastName', '')), '')"
        ),
    }
}

fn like_pattern(needle: &str) -> String {
    let escaped = needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{FilterParams, PredicateBuilder, Sort, SortOrder, Window};

    #[test]
    fn empty_predicate_renders_true() {
        let sql = count(Collection::Clubs, &Predicate::always());
        assert_eq!(sql.sql(), "SELECT COUNT(*) FROM clubs d WHERE TRUE");
    }

    #[test]
    fn page_and_count_share_the_predicate() {
        let filter = FilterParams::new([("type", "article"), ("author", "")]);
        let predicate = PredicateBuilder::new(&filter)
            .equals("author", Accessor::text("author"))
            .equals("type", Accessor::text("type"))
            .build();
        let plan = QueryPlan::new(predicate.clone())
            .with_sort(Sort::new(Accessor::number("views"), SortOrder::Desc))
            .with_window(Window::new(1, 2));

        let page = select(Collection::Materials, &plan);
        let total = count(Collection::Materials, &predicate);

        assert_eq!(
            page.sql(),
            "SELECT d.id, d.doc, d.created_at, d.updated_at FROM materials d \
             WHERE ((d.doc->>'type') = $1) \
             ORDER BY (d.doc->>'views')::double precision DESC NULLS LAST, d.created_at DESC, d.id DESC \
             LIMIT $2 OFFSET $3"
        );
        assert_eq!(
            total.sql(),
            "SELECT COUNT(*) FROM materials d WHERE ((d.doc->>'type') = $1)"
        );
    }

    #[test]
    fn text_sorts_use_byte_collation() {
        let plan = QueryPlan::all().with_sort(Sort::new(Accessor::text("country"), SortOrder::Asc));
        let sql = select(Collection::Clubs, &plan);
        assert!(sql.sql().contains("ORDER BY (d.doc->>'country') COLLATE \"C\" ASC NULLS FIRST"));
        assert!(!sql.sql().contains("LIMIT"));
    }

    #[test]
    fn related_accessors_become_subqueries() {
        let accessor = Accessor::related(
            "competition",
            Collection::Competitions,
            Projection::Length("clubs"),
        );
        assert_eq!(
            expression(&accessor),
            "(SELECT jsonb_array_length(r.doc->'clubs') FROM competitions r WHERE r.id::text = d.doc->>'competition')"
        );
    }

    #[test]
    fn display_names_skip_empty_parts() {
        let author = Accessor::related("author", Collection::Users, Projection::DisplayName);
        assert_eq!(
            expression(&author),
            "(SELECT NULLIF(concat_ws(' ', NULLIF(r.doc->>'firstName', ''), \
             NULLIF(r.doc->>'lastName', '')), '') FROM users r WHERE r.id::text = d.doc->>'author')"
        );
    }

    #[test]
    fn like_patterns_escape_wildcards() {
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
    }
}
