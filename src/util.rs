use axum::Json;
use utoipa::ToSchema;
use crate::error::{APIError, APIResult};

#[derive(serde::Serialize, ToSchema, Debug, PartialEq)]
pub struct MessageResponse {
    pub message: String,
}

pub fn message(text: &str) -> Json<MessageResponse> {
    Json(MessageResponse { message: text.to_string() })
}

/// Trims the value and rejects empty/whitespace-only input.
pub fn required_trimmed(value: &str, field: &str) -> APIResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(APIError::validation(format!("{field} is required")));
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::required_trimmed;

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(required_trimmed("  Ada ", "userName").unwrap(), "Ada");
    }

    #[test]
    fn rejects_empty_and_whitespace_only_input() {
        assert!(required_trimmed("", "userName").is_err());
        assert!(required_trimmed("   \t", "userName").is_err());
    }

    #[test]
    fn keeps_case_and_inner_whitespace() {
        assert_eq!(required_trimmed(" Ada Lovelace ", "userName").unwrap(), "Ada Lovelace");
    }
}
