//! Identifier generation and parsing.

use uuid::{Uuid, Variant, Version};

use crate::error::{ApiError, ApiResult, LookupKey};

/// Length of the canonical hyphenated form.
const HYPHENATED_LEN: usize = 36;

/// Fresh identifier for a user or todo.
pub fn new_id() -> Uuid {
    Uuid::new_v4()
}

/// Whether `raw` is exactly the text ids are rendered as (lowercase, hyphenated).
fn is_canonical(raw: &str, id: &Uuid) -> bool {
    let mut buf = Uuid::encode_buffer();
    *id.hyphenated().encode_lower(&mut buf) == *raw
}

/// Parse a todo id taken from the request path.
///
/// The hyphenated form of an RFC 4122 version-4 UUID, in either case, is
/// well formed; anything else is `InvalidId`. Ids match by their exact text,
/// so a well-formed id in any other spelling names no todo.
pub fn parse_todo_id(raw: &str) -> ApiResult<Uuid> {
    if raw.len() != HYPHENATED_LEN {
        return Err(ApiError::InvalidId);
    }
    let id = Uuid::try_parse(raw).map_err(|_| ApiError::InvalidId)?;
    if id.get_version() != Some(Version::Random) || id.get_variant() != Variant::RFC4122 {
        return Err(ApiError::InvalidId);
    }
    if !is_canonical(raw, &id) {
        return Err(ApiError::TodoNotFound);
    }
    Ok(id)
}

/// Parse a user id taken from the request path.
///
/// Only the exact rendered text of an id can name a user; anything else is
/// reported as not found.
pub fn parse_user_id(raw: &str) -> ApiResult<Uuid> {
    match Uuid::try_parse(raw) {
        Ok(id) if is_canonical(raw, &id) => Ok(id),
        _ => Err(ApiError::UserNotFound(LookupKey::Id)),
    }
}
