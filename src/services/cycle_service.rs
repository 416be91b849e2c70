//! 循环次数查询服务

use crate::config::Settings;
use crate::errors::AppError;
use crate::models::{classify, CycleStatus, Notice};
use crate::repositories::RowsApi;
use crate::services::{InFlight, Notifier, SessionService};
use crate::utils::non_blank;
use std::sync::Arc;
use std::time::Duration;

pub const ENTER_BATTERY_ID_MESSAGE: &str = "Enter a battery id";
pub const CYCLE_LOOKUP_FAILED_MESSAGE: &str = "Failed to fetch cycles";

/// 按电池编号查询累计充电次数并分级
pub struct CycleService {
    api: Arc<dyn RowsApi>,
    session: Arc<SessionService>,
    notifier: Arc<dyn Notifier>,
    notice_for: Duration,
    gate: InFlight,
}

impl CycleService {
    pub fn new(
        api: Arc<dyn RowsApi>,
        session: Arc<SessionService>,
        notifier: Arc<dyn Notifier>,
        settings: &Settings,
    ) -> Self {
        Self {
            api,
            session,
            notifier,
            notice_for: settings.notice.operator(),
            gate: InFlight::new("cycle_lookup"),
        }
    }

    pub fn is_looking_up(&self) -> bool {
        self.gate.is_busy()
    }

    pub async fn lookup(&self, battery_id: &str) -> Result<CycleStatus, AppError> {
        let _guard = self.gate.try_begin()?;

        let Some(battery_id) = non_blank(battery_id) else {
            self.notifier
                .notify(Notice::info(ENTER_BATTERY_ID_MESSAGE, self.notice_for));
            return Err(AppError::ValidationError(ENTER_BATTERY_ID_MESSAGE.to_string()));
        };

        match self.api.fetch_cycles(battery_id).await {
            Ok(count) => {
                let status = classify(count);
                tracing::info!(battery_id, count, tier = %status.tier, "循环次数查询完成");
                Ok(status)
            }
            Err(e) => {
                tracing::error!(battery_id, error = %e, "循环次数查询失败");
                if !self.session.recover(&e).await {
                    self.notifier
                        .notify(Notice::error(CYCLE_LOOKUP_FAILED_MESSAGE, self.notice_for));
                }
                Err(e)
            }
        }
    }
}
