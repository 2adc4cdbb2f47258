use serde::{Deserialize, Serialize};

use crate::contract::model::{Attributes, User, UserId, UserPayload};

/// REST DTO for user representation: `{"id": 1, ...attributes}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDto {
    pub id: UserId,
    #[serde(flatten)]
    pub attributes: Attributes,
}

/// REST DTO for create/replace bodies.
///
/// A client-sent `id` must still be an integer, but its value is discarded:
/// the server assigns ids on create and takes the path id on update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserReq {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(flatten)]
    pub attributes: Attributes,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            attributes: user.attributes,
        }
    }
}

impl From<UserReq> for UserPayload {
    fn from(req: UserReq) -> Self {
        UserPayload::new(req.attributes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn dto_serializes_id_next_to_attributes() {
        let mut attributes = Attributes::new();
        attributes.insert("name".into(), json!("a"));
        let dto = UserDto::from(User { id: 1, attributes });

        assert_eq!(serde_json::to_string(&dto).unwrap(), r#"{"id":1,"name":"a"}"#);
    }

    #[test]
    fn request_id_is_split_off_the_payload() {
        let req: UserReq =
            serde_json::from_value(json!({ "id": 77, "name": "a", "tags": ["x"] })).unwrap();
        assert_eq!(req.id, Some(77));

        let payload = UserPayload::from(req);
        assert!(!payload.attributes.contains_key("id"));
        assert_eq!(payload.attributes["name"], json!("a"));
        assert_eq!(payload.attributes["tags"], json!(["x"]));
    }

    #[test]
    fn empty_object_is_a_valid_payload() {
        let req: UserReq = serde_json::from_str("{}").unwrap();
        assert!(req.id.is_none());
        assert!(req.attributes.is_empty());
    }

    #[test]
    fn non_object_or_bad_id_is_rejected() {
        assert!(serde_json::from_str::<UserReq>("[1,2]").is_err());
        assert!(serde_json::from_str::<UserReq>("\"name\"").is_err());
        assert!(serde_json::from_str::<UserReq>(r#"{"id":"seven"}"#).is_err());
        assert!(serde_json::from_str::<UserReq>(r#"{"name":"a""#).is_err());
    }
}
