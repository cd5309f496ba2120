use std::collections::BTreeMap;

use super::QueryError;
use super::filter::FilterParams;
use super::page::Window;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortParams {
    pub indicator: Option<String>,
    pub order: Option<String>,
}

/// Paging, filtering and sorting parameters of a list request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    pub window: Window,
    pub filter: FilterParams,
    pub sort: SortParams,
}

impl ListParams {
    /// Reads `page`, `itemsPerPage`, `filterData[<field>]` and
    /// `sortData[indicator|order]` from decoded query-string pairs.
    /// `filterData` and `sortData` may also be sent as JSON objects.
    /// Unrelated keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, QueryError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = Self::default();
        let mut filter = FilterParams::default();

        for (key, value) in pairs {
            match key.as_str() {
                "page" => params.window.page = parse_count("page", &value)?,
                "itemsPerPage" => params.window.items_per_page = parse_count("itemsPerPage", &value)?,
                "filterData" => {
                    for (field, v) in parse_object("filterData", &value)? {
                        filter.insert(field, v);
                    }
                }
                "sortData" => {
                    let mut object = parse_object("sortData", &value)?;
                    if let Some(indicator) = object.remove("indicator") {
                        params.sort.indicator = non_empty(indicator);
                    }
                    if let Some(order) = object.remove("order") {
                        params.sort.order = non_empty(order);
                    }
                }
                _ => {
                    if let Some(field) = bracketed(&key, "filterData") {
                        filter.insert(field, value);
                    } else if let Some(field) = bracketed(&key, "sortData") {
                        match field {
                            "indicator" => params.sort.indicator = non_empty(value),
                            "order" => params.sort.order = non_empty(value),
                            _ => {}
                        }
                    }
                }
            }
        }

        params.filter = filter;
        Ok(params)
    }
}

fn bracketed<'a>(key: &'a str, prefix: &str) -> Option<&'a str> {
    key.strip_prefix(prefix)?
        .strip_prefix('[')?
        .strip_suffix(']')
}

fn non_empty(value: String) -> Option<String> {
    (!value.trim().is_empty()).then_some(value)
}

pub(crate) fn parse_count(name: &str, value: &str) -> Result<u64, QueryError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(0);
    }
    value
        .parse()
        .map_err(|_| QueryError::InvalidNumber(name.to_string()))
}

fn parse_object(name: &str, value: &str) -> Result<BTreeMap<String, String>, QueryError> {
    let malformed = || QueryError::MalformedParameter(name.to_string());
    let object: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(value).map_err(|_| malformed())?;

    object
        .into_iter()
        .map(|(k, v)| match v {
            serde_json::Value::String(s) => Ok((k, s)),
            serde_json::Value::Null => Ok((k, String::new())),
            serde_json::Value::Number(n) => Ok((k, n.to_string())),
            serde_json::Value::Bool(b) => Ok((k, b.to_string())),
            _ => Err(malformed()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn reads_bracketed_parameters() {
        let params = ListParams::from_pairs(pairs(&[
            ("page", "1"),
            ("itemsPerPage", "10"),
            ("filterData[type]", "article"),
            ("filterData[author]", ""),
            ("sortData[indicator]", "views"),
            ("sortData[order]", "asc"),
            ("id", "ignored"),
        ]))
        .unwrap();

        assert_eq!(params.window, Window::new(1, 10));
        assert_eq!(params.filter.get("type"), Some("article"));
        assert_eq!(params.filter.get("author"), None);
        assert_eq!(params.sort.indicator.as_deref(), Some("views"));
        assert_eq!(params.sort.order.as_deref(), Some("asc"));
    }

    #[test]
    fn reads_json_encoded_objects() {
        let params = ListParams::from_pairs(pairs(&[
            ("filterData", r#"{"country":"England","type":""}"#),
            ("sortData", r#"{"indicator":"fullName","order":"desc"}"#),
        ]))
        .unwrap();

        assert_eq!(params.filter.iter().collect::<Vec<_>>(), vec![("country", "England")]);
        assert_eq!(params.sort.indicator.as_deref(), Some("fullName"));
    }

    #[test]
    fn missing_paging_means_everything() {
        let params = ListParams::from_pairs(Vec::new()).unwrap();
        assert_eq!(params.window, Window::everything());
    }

    #[test]
    fn rejects_non_numeric_paging() {
        assert_eq!(
            ListParams::from_pairs(pairs(&[("page", "first")])),
            Err(QueryError::InvalidNumber("page".into()))
        );
        assert_eq!(
            ListParams::from_pairs(pairs(&[("filterData", "[1,2]")])),
            Err(QueryError::MalformedParameter("filterData".into()))
        );
    }
}
