//! Chargelog - 电池充电日志核心
//!
//! 充电记录的录入、校验与提交，以及管理端查询导出，支持：
//! - 充电时长计算（跨夜）
//! - 字段校验与提交载荷组装（单电池 / 双电池）
//! - 循环次数分级
//! - 按电池编号 / 日期范围查询与 CSV 导出
//! - 草稿缓存与会话失效处理

pub mod config;
pub mod errors;
pub mod models;
pub mod repositories;
pub mod services;
pub mod telemetry;
pub mod utils;

pub use errors::AppError;
