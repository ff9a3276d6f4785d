use std::sync::Arc;

use sqlx::PgPool;

use crate::core::config::Settings;
use crate::services::tally::TallyService;

#[derive(Clone)]
pub(crate) struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    settings: Settings,
    db: PgPool,
    tally: TallyService,
}

impl AppState {
    pub(crate) fn new(settings: Settings, db: PgPool, tally: TallyService) -> Self {
        Self { inner: Arc::new(InnerState { settings, db, tally }) }
    }

    pub(crate) fn settings(&self) -> &Settings {
        &self.inner.settings
    }

    pub(crate) fn db(&self) -> &PgPool {
        &self.inner.db
    }

    pub(crate) fn tally(&self) -> &TallyService {
        &self.inner.tally
    }
}
