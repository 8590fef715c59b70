//! In-memory session store. Sessions live as long as the process and are
//! never written anywhere.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::AppError;
use crate::session::SessionState;

/// One session as returned to the client.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub state: SessionState,
}

#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self) -> Session {
        let session = Session {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            state: SessionState::default(),
        };
        self.sessions
            .write()
            .await
            .insert(session.id, session.clone());
        session
    }

    pub async fn get(&self, id: Uuid) -> Result<Session, AppError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found(id))
    }

    /// Applies `reducer` to the session's state under the write lock and
    /// stores the result. The lock is held only for the reducer itself.
    pub async fn update<F, E>(&self, id: Uuid, reducer: F) -> Result<Session, AppError>
    where
        F: FnOnce(&SessionState) -> Result<SessionState, E>,
        AppError: From<E>,
    {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        session.state = reducer(&session.state)?;
        Ok(session.clone())
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found"))
}
