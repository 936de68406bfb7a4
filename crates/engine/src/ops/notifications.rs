//! Notification read/delete operations.

use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{EngineError, Notification, ResultEngine, notifications};

use super::{Engine, with_tx};

impl Engine {
    /// Lists a user's notifications, newest first.
    pub async fn notifications(&self, user_id: &str) -> ResultEngine<Vec<Notification>> {
        let models = notifications::Entity::find()
            .filter(notifications::Column::UserId.eq(user_id))
            .order_by_desc(notifications::Column::CreatedAt)
            .all(&self.database)
            .await?;

        let mut out = Vec::with_capacity(models.len());
        for model in models {
            out.push(Notification::try_from(model)?);
        }
        Ok(out)
    }

    /// Deletes a notification. Only the owner may delete it; anything else
    /// reads as not-found.
    pub async fn delete_notification(
        &self,
        notification_id: Uuid,
        user_id: &str,
    ) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let model = notifications::Entity::find_by_id(notification_id.to_string())
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("notification not exists".to_string()))?;
            if model.user_id != user_id {
                return Err(EngineError::KeyNotFound(
                    "notification not exists".to_string(),
                ));
            }

            model.delete(&db_tx).await?;
            Ok(())
        })
    }
}
