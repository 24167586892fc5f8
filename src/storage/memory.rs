// ABOUTME: In-memory implementation of the session and adjustment stores
// ABOUTME: Backs tests and backend-less embedders with RwLock-guarded maps
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2026 Loadguard Contributors

use super::{AdjustmentStore, SessionStore};
use crate::models::{ExternalActivity, GuardrailAdjustment, Session};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory session and adjustment store.
///
/// Cloning is cheap and shares the underlying maps.
#[derive(Clone, Default)]
pub struct MemoryStore {
    sessions: Arc<RwLock<HashMap<Uuid, Vec<Session>>>>,
    activities: Arc<RwLock<HashMap<Uuid, Vec<ExternalActivity>>>>,
    adjustments: Arc<RwLock<HashMap<Uuid, Vec<GuardrailAdjustment>>>>,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed sessions for a user
    pub async fn insert_sessions(&self, user_id: Uuid, new: impl IntoIterator<Item = Session>) {
        self.sessions
            .write()
            .await
            .entry(user_id)
            .or_default()
            .extend(new);
    }

    /// Seed external activities for a user
    pub async fn insert_activities(
        &self,
        user_id: Uuid,
        new: impl IntoIterator<Item = ExternalActivity>,
    ) {
        self.activities
            .write()
            .await
            .entry(user_id)
            .or_default()
            .extend(new);
    }

    /// All adjustments ever saved for a user, including aged-out ones
    pub async fn all_adjustments(&self, user_id: Uuid) -> Vec<GuardrailAdjustment> {
        self.adjustments
            .read()
            .await
            .get(&user_id)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn user_sessions(&self, user_id: Uuid) -> Result<Vec<Session>> {
        Ok(self
            .sessions
            .read()
            .await
            .get(&user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn upcoming_sessions(
        &self,
        user_id: Uuid,
        from: NaiveDate,
        days: i64,
    ) -> Result<Vec<Session>> {
        let until = from + Duration::days(days);
        let mut upcoming: Vec<Session> = self
            .sessions
            .read()
            .await
            .get(&user_id)
            .map(|all| {
                all.iter()
                    .filter(|s| s.date >= from && s.date <= until)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        upcoming.sort_by_key(|s| s.date);
        Ok(upcoming)
    }

    async fn external_activities(&self, user_id: Uuid) -> Result<Vec<ExternalActivity>> {
        Ok(self
            .activities
            .read()
            .await
            .get(&user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn save_session(&self, user_id: Uuid, session: &Session) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        let user_sessions = sessions.entry(user_id).or_default();
        if let Some(existing) = user_sessions.iter_mut().find(|s| s.id == session.id) {
            *existing = session.clone();
        } else {
            user_sessions.push(session.clone());
        }
        Ok(())
    }
}

#[async_trait]
impl AdjustmentStore for MemoryStore {
    async fn active_adjustments(
        &self,
        user_id: Uuid,
        today: NaiveDate,
    ) -> Result<Vec<GuardrailAdjustment>> {
        Ok(self
            .adjustments
            .read()
            .await
            .get(&user_id)
            .map(|all| {
                all.iter()
                    .filter(|a| a.is_active(today))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn save_adjustment(
        &self,
        user_id: Uuid,
        adjustment: &GuardrailAdjustment,
    ) -> Result<()> {
        self.adjustments
            .write()
            .await
            .entry(user_id)
            .or_default()
            .push(adjustment.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AdjustmentType;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    #[tokio::test]
    async fn test_expired_adjustments_filtered_out() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();

        let active = GuardrailAdjustment::new(
            AdjustmentType::GradualReturn,
            0.3,
            date(10),
            Some(5),
            "active",
        );
        let expired =
            GuardrailAdjustment::new(AdjustmentType::ReduceHiit, 0.2, date(1), Some(2), "expired");
        store.save_adjustment(user, &active).await.unwrap();
        store.save_adjustment(user, &expired).await.unwrap();

        let found = store.active_adjustments(user, date(12)).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].reason, "active");
        assert_eq!(store.all_adjustments(user).await.len(), 2);
    }

    #[tokio::test]
    async fn test_save_session_replaces_by_id() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();
        let mut session = Session::new(user, date(5));
        store.save_session(user, &session).await.unwrap();

        session.rpe = Some(7.0);
        store.save_session(user, &session).await.unwrap();

        let sessions = store.user_sessions(user).await.unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].rpe, Some(7.0));
    }
}
