/// Background purge of expired sessions
///
/// A single tokio-cron-scheduler job that runs `SessionStore::purge_expired`
/// on a fixed schedule.

use crate::auth::session::SessionStore;
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_cron_scheduler::{Job, JobScheduler};
use uuid::Uuid;

/// Every minute, on the minute
pub const SWEEP_SCHEDULE: &str = "0 * * * * *";

pub struct SessionSweeper {
    scheduler: RwLock<JobScheduler>,
    job_id: RwLock<Option<Uuid>>,
    sessions: Arc<SessionStore>,
}

impl std::fmt::Debug for SessionSweeper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionSweeper").finish_non_exhaustive()
    }
}

impl SessionSweeper {
    pub async fn new(sessions: Arc<SessionStore>) -> Result<Self> {
        let scheduler = JobScheduler::new().await?;
        Ok(Self {
            scheduler: RwLock::new(scheduler),
            job_id: RwLock::new(None),
            sessions,
        })
    }

    /// Register the purge job and start the scheduler
    pub async fn start(&self) -> Result<()> {
        let sessions = Arc::clone(&self.sessions);
        let job = Job::new_async(SWEEP_SCHEDULE, move |_uuid, _lock| {
            let sessions = Arc::clone(&sessions);
            Box::pin(async move {
                let purged = sessions.purge_expired().await;
                if purged > 0 {
                    tracing::info!(purged, "purged expired sessions");
                }
            })
        })?;

        let scheduler = self.scheduler.read().await;
        let id = scheduler.add(job).await?;
        *self.job_id.write().await = Some(id);
        scheduler.start().await?;

        tracing::info!(schedule = SWEEP_SCHEDULE, "session sweeper started");
        Ok(())
    }

    pub async fn stop(&self) -> Result<()> {
        if let Some(id) = self.job_id.write().await.take() {
            let scheduler = self.scheduler.read().await;
            if let Err(e) = scheduler.remove(&id).await {
                tracing::warn!("failed to remove session sweep job: {}", e);
            }
        }
        self.scheduler.write().await.shutdown().await?;
        tracing::info!("session sweeper stopped");
        Ok(())
    }
}
