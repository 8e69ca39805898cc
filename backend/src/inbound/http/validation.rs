//! Shared validation helpers for inbound HTTP adapters.
//!
//! Path and query values arrive as strings; these helpers parse them and
//! build `invalid_request` errors whose details name the offending field.

use serde_json::json;
use uuid::Uuid;

use crate::domain::{Error, PageRequest, UserId};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidUuid,
    InvalidFlag,
    InvalidNumber,
    InvalidSlug,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidFlag => "invalid_flag",
            ErrorCode::InvalidNumber => "invalid_number",
            ErrorCode::InvalidSlug => "invalid_slug",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, message: String, code: ErrorCode, value: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": code.as_str(),
    }))
}

pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value).map_err(|_| {
        field_error(
            field,
            format!("{} must be a valid UUID", field.as_str()),
            ErrorCode::InvalidUuid,
            value,
        )
    })
}

pub(crate) fn parse_user_id(value: &str, field: FieldName) -> Result<UserId, Error> {
    parse_uuid(value, field).map(UserId::from_uuid)
}

/// Interpret `1`/`true` and `0`/`false`; anything else is rejected.
pub(crate) fn parse_flag(value: Option<&str>, field: FieldName) -> Result<bool, Error> {
    match value.map(str::trim) {
        None | Some("") | Some("0") | Some("false") => Ok(false),
        Some("1") | Some("true") => Ok(true),
        Some(other) => Err(field_error(
            field,
            format!("{} must be 0 or 1", field.as_str()),
            ErrorCode::InvalidFlag,
            other,
        )),
    }
}

/// Parse an optional non-negative integer query value.
pub(crate) fn parse_u32(value: Option<&str>, field: FieldName) -> Result<Option<u32>, Error> {
    value
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .map(|raw| {
            raw.parse::<u32>().map_err(|_| {
                field_error(
                    field,
                    format!("{} must be a non-negative integer", field.as_str()),
                    ErrorCode::InvalidNumber,
                    raw,
                )
            })
        })
        .transpose()
}

/// Build a page window from raw `limit`/`offset` query values.
pub(crate) fn parse_page(limit: Option<&str>, offset: Option<&str>) -> Result<PageRequest, Error> {
    Ok(PageRequest::new(
        parse_u32(limit, FieldName::new("limit"))?,
        parse_u32(offset, FieldName::new("offset"))?,
    ))
}

/// Split a comma separated slug list, dropping empty segments.
pub(crate) fn parse_slug_list(value: Option<&str>, field: FieldName) -> Result<Vec<String>, Error> {
    let Some(raw) = value else {
        return Ok(Vec::new());
    };
    raw.split(',')
        .map(str::trim)
        .filter(|slug| !slug.is_empty())
        .map(|slug| {
            if crate::domain::slug::is_valid_slug(slug) {
                Ok(slug.to_owned())
            } else {
                Err(field_error(
                    field,
                    format!("{} must contain valid slugs", field.as_str()),
                    ErrorCode::InvalidSlug,
                    slug,
                ))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DEFAULT_PAGE_SIZE, ErrorCode as DomainCode};
    use rstest::rstest;

    const FIELD: FieldName = FieldName::new("isFavorited");

    #[rstest]
    #[case(None, false)]
    #[case(Some("0"), false)]
    #[case(Some("1"), true)]
    #[case(Some("true"), true)]
    #[case(Some(" 1 "), true)]
    fn flags_accept_numeric_and_boolean_forms(#[case] raw: Option<&str>, #[case] expected: bool) {
        assert_eq!(parse_flag(raw, FIELD).expect("valid flag"), expected);
    }

    #[rstest]
    fn unknown_flag_reports_field_and_value() {
        let err = parse_flag(Some("yes"), FIELD).expect_err("invalid flag");
        assert_eq!(err.code(), DomainCode::InvalidRequest);
        let details = err.details().expect("details");
        assert_eq!(details["field"], "isFavorited");
        assert_eq!(details["value"], "yes");
        assert_eq!(details["code"], "invalid_flag");
    }

    #[rstest]
    fn page_defaults_when_absent() {
        let page = parse_page(None, None).expect("page");
        assert_eq!(page.limit(), DEFAULT_PAGE_SIZE);
        assert_eq!(page.offset(), 0);
    }

    #[rstest]
    #[case(Some("-1"), None)]
    #[case(None, Some("ten"))]
    fn malformed_paging_is_rejected(#[case] limit: Option<&str>, #[case] offset: Option<&str>) {
        let err = parse_page(limit, offset).expect_err("bad paging");
        assert_eq!(err.details().expect("details")["code"], "invalid_number");
    }

    #[rstest]
    fn slug_list_is_split_and_trimmed() {
        let slugs =
            parse_slug_list(Some("breakfast, dinner,,"), FieldName::new("tags")).expect("slugs");
        assert_eq!(slugs, vec!["breakfast".to_owned(), "dinner".to_owned()]);
    }

    #[rstest]
    fn slug_list_rejects_punctuation() {
        let err =
            parse_slug_list(Some("dinner,late night"), FieldName::new("tags")).expect_err("slug");
        assert_eq!(err.details().expect("details")["value"], "late night");
    }

    #[rstest]
    fn user_ids_must_be_uuids() {
        assert!(parse_user_id("3fa85f64-5717-4562-b3fc-2c963f66afa6", FIELD).is_ok());
        let err = parse_user_id("me", FieldName::new("id")).expect_err("not a uuid");
        assert_eq!(err.message(), "id must be a valid UUID");
    }
}
