//! Database models for users.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use stockboard_core::users::{NewUser, User, UserCredentials};

/// Database model for users, including the password hash
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDB {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub color: String,
    pub password_hash: String,
    pub created_at: NaiveDateTime,
}

/// Database model for inserting a user
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUserDB {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub color: String,
    pub password_hash: String,
    pub created_at: NaiveDateTime,
}

impl NewUserDB {
    pub fn from_domain(new_user: NewUser, created_at: NaiveDateTime) -> Self {
        Self {
            id: new_user.id,
            name: new_user.name,
            avatar: new_user.avatar,
            color: new_user.color,
            password_hash: new_user.password_hash,
            created_at,
        }
    }
}

impl From<UserDB> for User {
    fn from(db: UserDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            avatar: db.avatar,
            color: db.color,
            created_at: db.created_at,
        }
    }
}

impl From<UserDB> for UserCredentials {
    fn from(db: UserDB) -> Self {
        let password_hash = db.password_hash.clone();
        Self {
            user: User::from(db),
            password_hash,
        }
    }
}
