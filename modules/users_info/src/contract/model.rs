/// Server-assigned identifier; starts at 1 and is never reused.
pub type UserId = u64;

/// Client-defined fields of a user. Opaque to the service.
pub type Attributes = serde_json::Map<String, serde_json::Value>;

/// Pure user model for inter-module communication (no serde derives)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub attributes: Attributes,
}

/// Data for creating or replacing a user; never carries an id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserPayload {
    pub attributes: Attributes,
}

impl UserPayload {
    pub fn new(attributes: Attributes) -> Self {
        Self { attributes }
    }
}
