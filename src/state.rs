use crate::api::ApiClient;
use crate::config::Config;
use crate::errors::ApiError;
use crate::habits::HabitStore;
use crate::join::CombinedView;
use crate::records::RecordStore;
use crate::storefront::Catalog;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use tokio::sync::Mutex;
use tracing::warn;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub api: ApiClient,
    pub habits: Arc<Mutex<HabitStore>>,
    pub records: Arc<Mutex<RecordStore>>,
    pub table: Arc<Mutex<CombinedView>>,
    pub catalog: Arc<Catalog>,
    refresh: Arc<AtomicU64>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, ApiError> {
        let api = ApiClient::new(&config.api_url, config.request_timeout)?;
        Ok(Self {
            config: Arc::new(config),
            api,
            habits: Arc::new(Mutex::new(HabitStore::default())),
            records: Arc::new(Mutex::new(RecordStore::default())),
            table: Arc::new(Mutex::new(CombinedView::default())),
            catalog: Arc::new(Catalog::seed()),
            refresh: Arc::new(AtomicU64::new(0)),
        })
    }

    pub fn refresh_counter(&self) -> u64 {
        self.refresh.load(Ordering::SeqCst)
    }

    pub fn bump_refresh(&self) -> u64 {
        self.refresh.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Initial fetch of both lists. Failures are logged and leave the
    /// affected list empty.
    pub async fn load_all(&self) {
        if self.habits.lock().await.refresh(&self.api).await.is_err() {
            warn!("habit list unavailable; starting empty");
        }
        if self.records.lock().await.refresh(&self.api).await.is_err() {
            warn!("record list unavailable; starting empty");
        }
    }
}
