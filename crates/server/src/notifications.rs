//! Notification API endpoints.

use api_types::MessageResponse;
use api_types::notification::{NotificationView, NotificationsResponse};
use axum::{
    Extension, Json,
    extract::{Path, State},
};
use uuid::Uuid;

use crate::{ServerError, server::ServerState, user};

pub(crate) fn notification_view(notification: &engine::Notification) -> NotificationView {
    NotificationView {
        id: notification.id,
        user_id: notification.user_id.clone(),
        message: notification.message.clone(),
        created_at: notification.created_at,
    }
}

pub async fn list(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<NotificationsResponse>, ServerError> {
    let notifications = state.engine.notifications(&user.username).await?;

    Ok(Json(NotificationsResponse {
        notifications: notifications.iter().map(notification_view).collect(),
    }))
}

pub async fn remove(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ServerError> {
    state.engine.delete_notification(id, &user.username).await?;

    Ok(Json(MessageResponse {
        message: "notification deleted".to_string(),
    }))
}
