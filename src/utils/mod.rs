pub mod error;

use mongodb::bson::oid::ObjectId;

use error::AppError;

/// Parse a hex document id from a path parameter.
pub fn parse_object_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::InvalidRequest(format!("invalid id: {}", id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_object_id_valid() {
        let id = ObjectId::new();
        assert_eq!(parse_object_id(&id.to_hex()).unwrap(), id);
    }

    #[test]
    fn test_parse_object_id_invalid() {
        let err = parse_object_id("not-a-hex-id").unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest(_)));
    }
}
