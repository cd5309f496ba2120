use serde::Deserialize;
use utoipa::IntoParams;

/// Query parameters accepted by every list endpoint.
///
/// Handlers read the raw pairs through [`crate::query::ListParams`] so that
/// bracketed keys (`filterData[country]=...`, `sortData[order]=asc`) work;
/// this type only documents them.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Zero-based page number.
    pub page: Option<u64>,
    /// Page size. Absent or 0 returns every match.
    pub items_per_page: Option<u64>,
    /// Filter values, as `filterData[<field>]=<value>` pairs or one JSON object.
    pub filter_data: Option<String>,
    /// `sortData[indicator]` and `sortData[order]` (`asc` or `desc`), or one JSON object.
    pub sort_data: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Case-insensitive substring.
    #[serde(default)]
    pub value: String,
}

/// Request bodies that can be validated beyond field presence only by
/// parsing, e.g. reference ids and dates.
pub trait IntoModel {
    type Model;

    fn into_model(self) -> crate::error::Result<Self::Model>;
}

/// The trimmed value, or a validation error carrying `message` when blank.
pub(crate) fn required(value: &str, message: &str) -> crate::error::Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(crate::error::StorageError::Validation(message.to_string()));
    }
    Ok(value.to_string())
}

/// Trims and drops empty strings.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
