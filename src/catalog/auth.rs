//! Accounts and sessions

use serde::{Deserialize, Serialize};

use crate::schema::{
    Entity, EntitySchema, FieldDef, FieldType, Format, LiteralEnum, Reference, Rule, SchemaRegistry,
    SchemaResult,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[default]
    Admin,
    Moderator,
    User,
    Guest,
}

impl LiteralEnum for Role {
    const NAME: &'static str = "Role";
    const VARIANTS: &'static [&'static str] = &["Admin", "Moderator", "User", "Guest"];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub roles: Vec<Role>,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl Entity for User {
    const NAME: &'static str = "User";

    fn schema() -> EntitySchema {
        EntitySchema::record(Self::NAME)
            .describe("Application account")
            .field(
                FieldDef::required("email", FieldType::String)
                    .rules([Rule::Email, Rule::MinLength(5), Rule::MaxLength(255)])
                    .format(Format::Email),
            )
            .field(
                FieldDef::required("username", FieldType::String)
                    .rules([Rule::Alphanumeric, Rule::MinLength(3), Rule::MaxLength(50)]),
            )
            .field(FieldDef::required("passwordHash", FieldType::String).rule(Rule::NonEmpty))
            .field(FieldDef::required(
                "roles",
                FieldType::array(FieldType::enumeration(Role::NAME)),
            ))
            .field(FieldDef::required("isActive", FieldType::Bool))
            .field(FieldDef::required("createdAt", FieldType::String).format(Format::DateTime))
            .field(FieldDef::required("updatedAt", FieldType::String).format(Format::DateTime))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub user: Reference<User>,
    /// At least 32 characters
    pub token: String,
    pub expires_at: String,
    pub created_at: String,
}

impl Entity for Session {
    const NAME: &'static str = "Session";

    fn schema() -> EntitySchema {
        EntitySchema::record(Self::NAME)
            .field(FieldDef::required("user", FieldType::reference(User::NAME)))
            .field(
                FieldDef::required("token", FieldType::String)
                    .rules([Rule::NonEmpty, Rule::MinLength(32)]),
            )
            .field(FieldDef::required("expiresAt", FieldType::String).format(Format::DateTime))
            .field(FieldDef::required("createdAt", FieldType::String).format(Format::DateTime))
    }
}

pub fn register(registry: &mut SchemaRegistry) -> SchemaResult<()> {
    registry.register_literal_enum::<Role>()?;
    registry.register::<User>()?;
    registry.register::<Session>()?;
    Ok(())
}
