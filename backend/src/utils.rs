use uuid::Uuid;

/// Ids arrive as opaque strings; anything that is not a UUID cannot name a row.
pub fn parse_id(id: &str) -> Option<Uuid> {
    Uuid::parse_str(id.trim()).ok()
}
