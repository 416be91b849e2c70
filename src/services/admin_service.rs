//! 管理端查询与导出服务

use crate::config::Settings;
use crate::errors::AppError;
use crate::models::{AdminQuery, ExportArtifact, Notice, ResultTable};
use crate::repositories::AdminRowsApi;
use crate::services::{InFlight, Notifier, SessionService};
use crate::utils::{is_blank, to_csv};
use std::sync::Arc;
use std::time::Duration;

pub const EXPORT_SUCCESS_MESSAGE: &str = "CSV downloaded successfully";

/// 导出时电池编号为空的提示
const EXPORT_BATTERY_REQUIRED: &str = "Enter a Battery ID before downloading";
/// 导出时日期不完整的提示
const EXPORT_DATES_REQUIRED: &str = "Please select both From and To dates to download CSV";

/// 按查询范围区分的提示文本
struct ScopeMessages {
    empty: &'static str,
    search_failed: &'static str,
    export_failed: &'static str,
}

static BY_BATTERY: ScopeMessages = ScopeMessages {
    empty: "No data found for that Battery ID",
    search_failed: "Error fetching data",
    export_failed: "Error downloading CSV",
};

static BY_DATE_RANGE: ScopeMessages = ScopeMessages {
    empty: "No data found for that date range",
    search_failed: "Error fetching rows by date",
    export_failed: "Error downloading CSV for date range",
};

fn messages_for(query: &AdminQuery) -> &'static ScopeMessages {
    if query.is_by_battery() {
        &BY_BATTERY
    } else {
        &BY_DATE_RANGE
    }
}

/// 管理端服务
///
/// 每个操作先确认管理员会话；四个操作各自独立防重入。
pub struct AdminService {
    api: Arc<dyn AdminRowsApi>,
    session: Arc<SessionService>,
    notifier: Arc<dyn Notifier>,
    notice_for: Duration,
    search_by_battery_gate: InFlight,
    search_by_date_gate: InFlight,
    export_by_battery_gate: InFlight,
    export_by_date_gate: InFlight,
}

impl AdminService {
    pub fn new(
        api: Arc<dyn AdminRowsApi>,
        session: Arc<SessionService>,
        notifier: Arc<dyn Notifier>,
        settings: &Settings,
    ) -> Self {
        Self {
            api,
            session,
            notifier,
            notice_for: settings.notice.admin(),
            search_by_battery_gate: InFlight::new("admin_search_by_battery"),
            search_by_date_gate: InFlight::new("admin_search_by_date"),
            export_by_battery_gate: InFlight::new("admin_export_by_battery"),
            export_by_date_gate: InFlight::new("admin_export_by_date"),
        }
    }

    fn search_gate(&self, query: &AdminQuery) -> &InFlight {
        if query.is_by_battery() {
            &self.search_by_battery_gate
        } else {
            &self.search_by_date_gate
        }
    }

    fn export_gate(&self, query: &AdminQuery) -> &InFlight {
        if query.is_by_battery() {
            &self.export_by_battery_gate
        } else {
            &self.export_by_date_gate
        }
    }

    /// 该范围的查询是否正在进行
    pub fn is_searching(&self, query: &AdminQuery) -> bool {
        self.search_gate(query).is_busy()
    }

    /// 该范围的导出是否正在进行
    pub fn is_exporting(&self, query: &AdminQuery) -> bool {
        self.export_gate(query).is_busy()
    }

    /// 查询记录，无数据时返回空表并提示
    pub async fn search(&self, query: &AdminQuery) -> Result<ResultTable, AppError> {
        self.session.require_admin().await?;
        let _guard = self.search_gate(query).try_begin()?;
        let messages = messages_for(query);

        match self.api.search(query).await {
            Ok(rows) => {
                tracing::info!(query = %query, rows = rows.len(), "管理端查询完成");
                if rows.is_empty() {
                    self.notifier.notify(Notice::info(messages.empty, self.notice_for));
                }
                Ok(ResultTable::from_rows(rows))
            }
            Err(e) => Err(self.fail(query, e, messages.search_failed).await),
        }
    }

    /// 服务端导出 CSV，响应为空时返回 `None`
    pub async fn export(&self, query: &AdminQuery) -> Result<Option<ExportArtifact>, AppError> {
        self.session.require_admin().await?;
        let _guard = self.export_gate(query).try_begin()?;
        let messages = messages_for(query);

        match self.api.export(query).await {
            Ok(bytes) if bytes.is_empty() => {
                tracing::info!(query = %query, "导出结果为空");
                self.notifier.notify(Notice::info(messages.empty, self.notice_for));
                Ok(None)
            }
            Ok(bytes) => {
                let artifact = ExportArtifact::csv(query.export_filename(), bytes);
                tracing::info!(query = %query, filename = %artifact.filename, bytes = artifact.len(), "CSV 导出完成");
                self.notifier
                    .notify(Notice::success(EXPORT_SUCCESS_MESSAGE, self.notice_for));
                Ok(Some(artifact))
            }
            Err(e) => Err(self.fail(query, e, messages.export_failed).await),
        }
    }

    /// 将当前显示的结果在本地导出为 CSV
    pub async fn export_table(
        &self,
        query: &AdminQuery,
        table: &ResultTable,
    ) -> Result<Option<ExportArtifact>, AppError> {
        self.session.require_admin().await?;
        let _guard = self.export_gate(query).try_begin()?;
        let messages = messages_for(query);

        match to_csv(table.rows(), &query.export_filename()) {
            Ok(None) => {
                self.notifier.notify(Notice::info(messages.empty, self.notice_for));
                Ok(None)
            }
            Ok(Some(artifact)) => {
                tracing::info!(query = %query, rows = table.len(), "本地 CSV 导出完成");
                self.notifier
                    .notify(Notice::success(EXPORT_SUCCESS_MESSAGE, self.notice_for));
                Ok(Some(artifact))
            }
            Err(e) => Err(self.fail(query, e, messages.export_failed).await),
        }
    }

    /// 按输入框中的电池编号查询
    pub async fn search_by_battery(&self, battery_id: &str) -> Result<ResultTable, AppError> {
        let query = self.build(AdminQuery::by_battery(battery_id))?;
        self.search(&query).await
    }

    /// 按输入框中的日期范围查询
    pub async fn search_by_date_range(
        &self,
        date_from: &str,
        date_to: &str,
    ) -> Result<ResultTable, AppError> {
        let query = self.build(AdminQuery::by_date_range(date_from, date_to))?;
        self.search(&query).await
    }

    pub async fn export_by_battery(
        &self,
        battery_id: &str,
    ) -> Result<Option<ExportArtifact>, AppError> {
        if is_blank(battery_id) {
            return Err(self.reject(EXPORT_BATTERY_REQUIRED));
        }
        let query = self.build(AdminQuery::by_battery(battery_id))?;
        self.export(&query).await
    }

    pub async fn export_by_date_range(
        &self,
        date_from: &str,
        date_to: &str,
    ) -> Result<Option<ExportArtifact>, AppError> {
        if is_blank(date_from) || is_blank(date_to) {
            return Err(self.reject(EXPORT_DATES_REQUIRED));
        }
        let query = self.build(AdminQuery::by_date_range(date_from, date_to))?;
        self.export(&query).await
    }

    /// 查询参数无效时提示，不发起请求
    fn build(&self, query: Result<AdminQuery, AppError>) -> Result<AdminQuery, AppError> {
        query.map_err(|e| {
            self.notifier.notify(Notice::error(e.user_message(), self.notice_for));
            e
        })
    }

    fn reject(&self, message: &str) -> AppError {
        self.notifier.notify(Notice::error(message, self.notice_for));
        AppError::ValidationError(message.to_string())
    }

    /// 认证错误交给会话服务，其余错误提示固定文本
    async fn fail(&self, query: &AdminQuery, err: AppError, message: &'static str) -> AppError {
        tracing::error!(query = %query, error = %err, "管理端操作失败");
        if !self.session.recover(&err).await {
            self.notifier.notify(Notice::error(message, self.notice_for));
        }
        err
    }
}
