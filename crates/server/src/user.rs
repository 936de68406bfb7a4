//! User entity and signup endpoint.

use api_types::{MessageResponse, user::SignUp};
use axum::{Json, extract::State, http::StatusCode};
use sea_orm::{ActiveValue, entity::prelude::*};

use crate::{ServerError, server::ServerState};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub username: String,
    pub password: String,
    pub email: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Creates a builder account. The only route besides the public budget view
/// that skips the auth layer.
pub async fn signup(
    State(state): State<ServerState>,
    Json(payload): Json<SignUp>,
) -> Result<(StatusCode, Json<MessageResponse>), ServerError> {
    let username = payload.username.trim();
    if username.is_empty() || payload.password.is_empty() {
        return Err(ServerError::Generic(
            "username and password are required".to_string(),
        ));
    }
    if payload.password != payload.confirm_password {
        return Err(ServerError::Generic("password didn't match".to_string()));
    }

    let existing = Entity::find_by_id(username)
        .one(&state.db)
        .await
        .map_err(|err| ServerError::Engine(err.into()))?;
    if existing.is_some() {
        return Err(ServerError::Generic("user already exists".to_string()));
    }

    let user = ActiveModel {
        username: ActiveValue::Set(username.to_string()),
        password: ActiveValue::Set(payload.password),
        email: ActiveValue::Set(payload.email),
    };
    user.insert(&state.db)
        .await
        .map_err(|err| ServerError::Engine(err.into()))?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "user created successfully".to_string(),
        }),
    ))
}
