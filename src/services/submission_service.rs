//! 充电记录提交服务

use crate::config::Settings;
use crate::errors::AppError;
use crate::models::{compose_slot, Notice, SubmissionPayload, SubmissionReceipt};
use crate::repositories::RowsApi;
use crate::services::{InFlight, Notifier, RecordForm, SessionService};
use std::sync::Arc;
use std::time::Duration;

pub const SUBMISSION_FAILED_MESSAGE: &str = "Submission failed";

/// 提交服务
pub struct SubmissionService {
    api: Arc<dyn RowsApi>,
    session: Arc<SessionService>,
    notifier: Arc<dyn Notifier>,
    notice_for: Duration,
    gate: InFlight,
}

impl SubmissionService {
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
            gate: InFlight::new("submit"),
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.gate.is_busy()
    }

    /// 提交单条记录
    ///
    /// 校验失败时只刷新表单的字段错误，不发起请求。
    pub async fn submit(&self, form: &mut RecordForm) -> Result<SubmissionReceipt, AppError> {
        let _guard = self.gate.try_begin()?;

        let record = match compose_slot(form.record(), form.slot()) {
            Ok(record) => record,
            Err(e) => return Err(Self::mark_invalid(form, e)),
        };

        tracing::info!(battery_id = %record.battery_id(), "提交充电记录");
        let payload = SubmissionPayload::Single(record);
        let receipt = self.send(&payload).await?;

        form.reset().await;
        Ok(receipt)
    }

    /// 同时提交两块电池的记录，两条都有效才发起请求
    pub async fn submit_dual(
        &self,
        primary: &mut RecordForm,
        secondary: &mut RecordForm,
    ) -> Result<SubmissionReceipt, AppError> {
        let _guard = self.gate.try_begin()?;

        // 两个表单都刷新错误，便于一次看到全部问题
        let first = compose_slot(primary.record(), primary.slot());
        let second = compose_slot(secondary.record(), secondary.slot());
        let (first, second) = match (first, second) {
            (Ok(first), Ok(second)) => (first, second),
            (first, second) => {
                let mut rejected = None;
                if let Err(e) = second {
                    rejected = Some(Self::mark_invalid(secondary, e));
                }
                if let Err(e) = first {
                    rejected = Some(Self::mark_invalid(primary, e));
                }
                return Err(rejected.unwrap_or_else(|| {
                    AppError::InternalError("双电池记录组装失败".to_string())
                }));
            }
        };

        tracing::info!(
            primary = %first.battery_id(),
            secondary = %second.battery_id(),
            "提交双电池充电记录"
        );
        let payload = SubmissionPayload::Dual {
            primary: first,
            secondary: second,
        };
        let receipt = self.send(&payload).await?;

        primary.reset().await;
        secondary.reset().await;
        Ok(receipt)
    }

    async fn send(&self, payload: &SubmissionPayload) -> Result<SubmissionReceipt, AppError> {
        match self.api.submit(payload).await {
            Ok(receipt) => {
                tracing::info!(
                    battery_ids = ?payload.battery_ids(),
                    charging_cycle = ?receipt.charging_cycle,
                    "充电记录提交成功"
                );
                self.notifier
                    .notify(Notice::success(receipt.success_message(), self.notice_for));
                Ok(receipt)
            }
            Err(e) => {
                tracing::error!(battery_ids = ?payload.battery_ids(), error = %e, "充电记录提交失败");
                if !self.session.recover(&e).await {
                    let message = e.server_message().unwrap_or(SUBMISSION_FAILED_MESSAGE);
                    self.notifier.notify(Notice::error(message, self.notice_for));
                }
                Err(e)
            }
        }
    }

    fn mark_invalid(form: &mut RecordForm, err: AppError) -> AppError {
        if let Some(errors) = err.field_errors() {
            tracing::debug!(slot = %form.slot(), fields = errors.len(), "记录未通过校验");
            form.set_errors(errors.clone());
        }
        err
    }
}
