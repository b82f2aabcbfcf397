use crate::server::response::ApiError;

/// Parses a habit id path segment. Only plain positive decimal integers are accepted.
pub fn parse_habit_id(raw: &str) -> Result<i64, ApiError> {
    let invalid = || ApiError::bad_request("Invalid habit ID format");

    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(invalid()),
    }
}
