//! Blog posts, authors, tags and comments

use serde::{Deserialize, Serialize};

use super::auth::User;
use crate::schema::{
    Entity, EntitySchema, FieldDef, FieldType, Format, IntWidth, Nullish, Reference, Rule,
    SchemaRegistry, SchemaResult,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: String,
    pub name: String,
    /// Lowercase, URL-safe
    pub slug: String,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub description: Nullish<String>,
    pub post_count: u32,
}

impl Entity for Tag {
    const NAME: &'static str = "Tag";

    fn schema() -> EntitySchema {
        EntitySchema::record(Self::NAME)
            .field(
                FieldDef::required("name", FieldType::String)
                    .rules([Rule::NonEmpty, Rule::MaxLength(100)]),
            )
            .field(FieldDef::required("slug", FieldType::String).rules([
                Rule::NonEmpty,
                Rule::MaxLength(100),
                Rule::Lowercased,
            ]))
            .field(FieldDef::optional("description", FieldType::String).rule(Rule::MaxLength(500)))
            .field(FieldDef::required("postCount", FieldType::int(IntWidth::U32)).rule(Rule::NonNegative))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: String,
    pub user: Reference<User>,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub bio: Nullish<String>,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub avatar_url: Nullish<String>,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub twitter_handle: Nullish<String>,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub github_handle: Nullish<String>,
    pub created_at: String,
}

impl Entity for Author {
    const NAME: &'static str = "Author";

    fn schema() -> EntitySchema {
        EntitySchema::record(Self::NAME)
            .field(FieldDef::required("user", FieldType::reference(User::NAME)))
            .field(FieldDef::optional("bio", FieldType::String).rule(Rule::MaxLength(2000)))
            .field(
                FieldDef::optional("avatarUrl", FieldType::String)
                    .rule(Rule::Url)
                    .format(Format::Url("example.com".into())),
            )
            .field(
                FieldDef::optional("twitterHandle", FieldType::String)
                    .rules([Rule::StartsWith("@".into()), Rule::MaxLength(16)])
                    .message("starts_with", "Twitter handles start with \"@\""),
            )
            .field(FieldDef::optional("githubHandle", FieldType::String).rule(Rule::MaxLength(39)))
            .field(FieldDef::required("createdAt", FieldType::String).format(Format::DateTime))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub excerpt: Nullish<String>,
    pub author: Reference<Author>,
    pub tags: Vec<Reference<Tag>>,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub featured_image: Nullish<String>,
    pub published: bool,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub published_at: Nullish<String>,
    pub view_count: u32,
    pub created_at: String,
    pub updated_at: String,
}

impl Entity for Post {
    const NAME: &'static str = "Post";

    fn schema() -> EntitySchema {
        EntitySchema::record(Self::NAME)
            .field(FieldDef::required("title", FieldType::String).rules([
                Rule::NonEmpty,
                Rule::MinLength(1),
                Rule::MaxLength(200),
            ]))
            .field(FieldDef::required("slug", FieldType::String).rules([
                Rule::NonEmpty,
                Rule::MaxLength(250),
                Rule::Lowercased,
            ]))
            .field(FieldDef::required("content", FieldType::String).rule(Rule::NonEmpty))
            .field(FieldDef::optional("excerpt", FieldType::String).rule(Rule::MaxLength(500)))
            .field(FieldDef::required("author", FieldType::reference(Author::NAME)))
            .field(FieldDef::required(
                "tags",
                FieldType::array(FieldType::reference(Tag::NAME)),
            ))
            .field(
                FieldDef::optional("featuredImage", FieldType::String)
                    .rule(Rule::Url)
                    .format(Format::Url("example.com".into())),
            )
            .field(FieldDef::required("published", FieldType::Bool))
            .field(FieldDef::optional("publishedAt", FieldType::String).format(Format::DateTime))
            .field(FieldDef::required("viewCount", FieldType::int(IntWidth::U32)).rule(Rule::NonNegative))
            .field(FieldDef::required("createdAt", FieldType::String).format(Format::DateTime))
            .field(FieldDef::required("updatedAt", FieldType::String).format(Format::DateTime))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub post: Reference<Post>,
    pub author: Reference<Author>,
    pub content: String,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub parent_comment_id: Nullish<String>,
    pub is_approved: bool,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Nullish::is_absent")]
    pub edited_at: Nullish<String>,
}

impl Entity for Comment {
    const NAME: &'static str = "Comment";

    fn schema() -> EntitySchema {
        EntitySchema::record(Self::NAME)
            .field(FieldDef::required("post", FieldType::reference(Post::NAME)))
            .field(FieldDef::required("author", FieldType::reference(Author::NAME)))
            .field(FieldDef::required("content", FieldType::String).rules([
                Rule::NonEmpty,
                Rule::MinLength(1),
                Rule::MaxLength(5000),
            ]))
            .field(FieldDef::optional("parentCommentId", FieldType::String))
            .field(FieldDef::required("isApproved", FieldType::Bool))
            .field(FieldDef::required("createdAt", FieldType::String).format(Format::DateTime))
            .field(FieldDef::optional("editedAt", FieldType::String).format(Format::DateTime))
    }
}

pub fn register(registry: &mut SchemaRegistry) -> SchemaResult<()> {
    registry.register::<Tag>()?;
    registry.register::<Author>()?;
    registry.register::<Post>()?;
    registry.register::<Comment>()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin;
    use serde_json::json;

    #[test]
    fn test_slug_is_lowercased() {
        let registry = builtin().unwrap();
        let tag = json!({"id": "tag:1", "name": "Rust", "slug": "Rust-Lang", "postCount": 3});

        let decoded: Tag = registry.decode(&tag).unwrap();
        assert_eq!(decoded.slug, "rust-lang");
    }

    #[test]
    fn test_twitter_handle_custom_message() {
        let registry = builtin().unwrap();
        let mut author = registry.default_value(Author::NAME).unwrap();
        author["twitterHandle"] = json!("rustlang");

        let err = registry.validate(Author::NAME, &author).unwrap_err();
        assert_eq!(err.issues()[0].path, "twitterHandle");
        assert!(err.issues()[0].to_string().contains("Twitter handles start with"));

        author["twitterHandle"] = json!("@rustlang");
        assert!(registry.validate(Author::NAME, &author).is_ok());
    }

    #[test]
    fn test_post_tags_mix_ids_and_inline() {
        let registry = builtin().unwrap();
        let mut post = registry.default_value(Post::NAME).unwrap();
        post["tags"] = json!([
            "tag:1",
            {"id": "tag:2", "name": "Rust", "slug": "rust", "postCount": 0}
        ]);

        let decoded: Post = registry.decode(&post).unwrap();
        assert_eq!(decoded.tags.len(), 2);
        assert_eq!(decoded.tags[0].as_id(), Some("tag:1"));
        assert!(matches!(decoded.tags[1], Reference::Inline(_)));
    }

    #[test]
    fn test_comment_nested_post_errors_are_scoped() {
        let registry = builtin().unwrap();
        let mut comment = registry.default_value(Comment::NAME).unwrap();
        let mut post = registry.default_value(Post::NAME).unwrap();
        post["title"] = json!("");
        comment["post"] = post;

        let err = registry.validate(Comment::NAME, &comment).unwrap_err();
        assert_eq!(err.issues().len(), 1);
        assert_eq!(err.issues()[0].path, "post.title");
    }
}
