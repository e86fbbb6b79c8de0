use dashmap::DashMap;
use puredelhi_ai::{AdviceProvider, GeminiProvider};
use puredelhi_core::{
    DashboardConfig, DashboardError, JwtManager, PasswordManager, Report, Result, User, WardData,
};
use puredelhi_wards::generate_wards;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

/// Shared application state. Everything is in-memory; the store lives as
/// long as the process, matching the dashboard's mock-data contract.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub jwt: Arc<JwtManager>,
    pub passwords: Arc<PasswordManager>,
    pub advice: Option<Arc<dyn AdviceProvider>>,
    pub config: Arc<DashboardConfig>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Result<Self> {
        let advice: Option<Arc<dyn AdviceProvider>> = if config.ai.api_key.is_some() {
            let provider = GeminiProvider::new(config.ai.clone())
                .map_err(|e| DashboardError::Advice(e.to_string()))?;
            Some(Arc::new(provider))
        } else {
            info!("No AI API key configured; advice endpoint will answer 500");
            None
        };

        Ok(Self {
            store: Arc::new(Store::new(config.wards.seed)),
            jwt: Arc::new(JwtManager::new(config.auth.clone())),
            passwords: Arc::new(PasswordManager::new()),
            advice,
            config: Arc::new(config),
        })
    }

    /// Swap the advice backend; used by tests to inject stubs.
    pub fn with_advice_provider(mut self, provider: Arc<dyn AdviceProvider>) -> Self {
        self.advice = Some(provider);
        self
    }
}

/// In-memory store for users, reports and the generated ward dataset.
pub struct Store {
    users_by_email: DashMap<String, User>,
    reports: DashMap<Uuid, Report>,
    wards: RwLock<Vec<WardData>>,
}

impl Store {
    pub fn new(seed: u64) -> Self {
        Self {
            users_by_email: DashMap::new(),
            reports: DashMap::new(),
            wards: RwLock::new(generate_wards(seed)),
        }
    }

    /// Insert a new user; rejects duplicate emails.
    pub fn insert_user(&self, user: User) -> Result<User> {
        use dashmap::mapref::entry::Entry;

        match self.users_by_email.entry(user.email.clone()) {
            Entry::Occupied(_) => Err(DashboardError::UserExists(user.email)),
            Entry::Vacant(slot) => {
                slot.insert(user.clone());
                Ok(user)
            }
        }
    }

    pub fn find_user_by_email(&self, email: &str) -> Option<User> {
        self.users_by_email.get(email).map(|u| u.value().clone())
    }

    pub fn insert_report(&self, report: Report) -> Report {
        self.reports.insert(report.id, report.clone());
        report
    }

    /// Reports filed by a user, newest first.
    pub fn reports_for_user(&self, user_id: Uuid) -> Vec<Report> {
        let mut reports: Vec<Report> = self
            .reports
            .iter()
            .filter(|entry| entry.value().user_id == user_id)
            .map(|entry| entry.value().clone())
            .collect();
        reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        reports
    }

    pub async fn all_wards(&self) -> Vec<WardData> {
        self.wards.read().await.clone()
    }

    pub async fn ward_by_id(&self, id: Uuid) -> Option<WardData> {
        self.wards.read().await.iter().find(|w| w.id == id).cloned()
    }

    /// Regenerate the ward dataset from a seed; returns the new count.
    pub async fn reseed_wards(&self, seed: u64) -> usize {
        let fresh = generate_wards(seed);
        let count = fresh.len();
        *self.wards.write().await = fresh;
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(email: &str) -> User {
        User {
            id: Uuid::new_v4(),
            email: email.into(),
            name: "Test".into(),
            password_hash: "hash".into(),
            role: "citizen".into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn duplicate_email_is_rejected() {
        let store = Store::new(1);
        store.insert_user(user("a@delhi.in")).unwrap();
        let err = store.insert_user(user("a@delhi.in")).unwrap_err();
        assert!(matches!(err, DashboardError::UserExists(_)));
    }

    #[test]
    fn reports_come_back_newest_first() {
        let store = Store::new(1);
        let uid = Uuid::new_v4();
        for i in 0..3 {
            store.insert_report(Report {
                id: Uuid::new_v4(),
                user_id: uid,
                category: "Waste Burning".into(),
                description: format!("report {i}"),
                location: "Rohini".into(),
                created_at: Utc::now() + chrono::Duration::seconds(i),
            });
        }
        // Someone else's report must not leak in.
        store.insert_report(Report {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            category: "Dust".into(),
            description: "other".into(),
            location: "Dwarka".into(),
            created_at: Utc::now(),
        });

        let reports = store.reports_for_user(uid);
        assert_eq!(reports.len(), 3);
        assert_eq!(reports[0].description, "report 2");
        assert_eq!(reports[2].description, "report 0");
    }

    #[tokio::test]
    async fn reseed_replaces_the_dataset() {
        let store = Store::new(1);
        let before = store.all_wards().await;
        let count = store.reseed_wards(2).await;
        let after = store.all_wards().await;

        assert_eq!(count, before.len());
        assert!(before
            .iter()
            .zip(&after)
            .any(|(a, b)| a.aqi != b.aqi || a.id != b.id));
    }
}
