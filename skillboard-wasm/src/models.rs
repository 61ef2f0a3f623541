use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    pub description: String,
    #[serde(default)]
    pub color: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Suggestion {
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostPayload {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_without_color_still_decodes() {
        let post: Post = serde_json::from_str(
            r#"{"id":1,"title":"Rust","type":"offer","category":"coding",
                "description":"pairing","createdAt":"2026-01-01T00:00:00Z"}"#,
        )
        .expect("post must decode");

        assert_eq!(post.kind, "offer");
        assert!(post.color.is_none());
    }

    #[test]
    fn payload_uses_type_key() {
        let payload = PostPayload {
            title: "t".to_string(),
            kind: "request".to_string(),
            category: "math".to_string(),
            description: "d".to_string(),
        };

        let json = serde_json::to_value(&payload).expect("payload must encode");
        assert_eq!(json["type"], "request");
        assert!(json.get("color").is_none());
    }
}
