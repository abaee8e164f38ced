use crate::domain::models::{CommunityFilter, MAX_PAGE_LIMIT};
use crate::domain::value_objects::{CommunityId, CommunityName, IdOrName};
use crate::shared::error::{AppError, ErrorName, FieldName};
use crate::shared::validation::validate_field_is_not_missing;

#[derive(Debug, Clone, Copy, Default)]
pub struct CommunityValidator;

impl CommunityValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate_community_name(&self, raw: Option<&str>) -> Result<CommunityName, AppError> {
        let raw = validate_field_is_not_missing(raw, FieldName::CommunityName)?;
        CommunityName::parse(raw)
    }

    /// Digits select by id; anything else must be a well-formed name.
    pub fn validate_id_or_name(&self, raw: &str) -> Result<IdOrName<CommunityId>, AppError> {
        match IdOrName::<CommunityId>::parse(raw)? {
            IdOrName::Name(name) => CommunityName::parse(&name)
                .map(|name| IdOrName::Name(name.into_inner())),
            id => Ok(id),
        }
    }

    pub fn validate_filter(
        &self,
        name: Option<&str>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<CommunityFilter, AppError> {
        let (limit, offset) = validate_pagination(limit, offset)?;
        Ok(CommunityFilter {
            name: name
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string),
            limit,
            offset,
        })
    }
}

/// Defaults and bounds shared by every paginated listing.
pub fn validate_pagination(
    limit: Option<i64>,
    offset: Option<i64>,
) -> Result<(i64, i64), AppError> {
    let limit = limit.unwrap_or(CommunityFilter::default().limit);
    if !(1..=MAX_PAGE_LIMIT).contains(&limit) {
        return Err(AppError::validation(
            ErrorName::PaginationInvalid,
            FieldName::Limit,
            format!("limit must be between 1 and {}", MAX_PAGE_LIMIT),
        ));
    }
    let offset = offset.unwrap_or(0);
    if offset < 0 {
        return Err(AppError::validation(
            ErrorName::PaginationInvalid,
            FieldName::Offset,
            "offset must not be negative",
        ));
    }
    Ok((limit, offset))
}
