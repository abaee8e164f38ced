use super::community::validate_pagination;
use crate::domain::models::{PostFilter, POST_CONTENT_MAX_LENGTH};
use crate::domain::value_objects::{CommunityId, UserId};
use crate::shared::error::{AppError, ErrorName, FieldName};
use crate::shared::validation::{validate_char_length, validate_field_is_not_missing};

#[derive(Debug, Clone, Copy, Default)]
pub struct PostValidator;

impl PostValidator {
    pub fn new() -> Self {
        Self
    }

    /// Trimmed content, 1 to 2000 characters.
    pub fn validate_content(&self, raw: Option<&str>) -> Result<String, AppError> {
        let raw = validate_field_is_not_missing(raw, FieldName::PostContent)?;
        let content = raw.trim();
        validate_char_length(
            content,
            1,
            POST_CONTENT_MAX_LENGTH,
            ErrorName::PostContentInvalidFormat,
            FieldName::PostContent,
        )?;
        Ok(content.to_string())
    }

    pub fn validate_filter(
        &self,
        community_id: Option<CommunityId>,
        author_id: Option<UserId>,
        search: Option<&str>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<PostFilter, AppError> {
        let (limit, offset) = validate_pagination(limit, offset)?;
        Ok(PostFilter {
            community_id,
            author_id,
            search: search
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            limit,
            offset,
        })
    }
}
