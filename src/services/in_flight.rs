//! 进行中标记：同一操作未结束前拒绝再次触发

use crate::errors::AppError;
use std::sync::atomic::{AtomicBool, Ordering};

/// 单个操作的进行中标记
#[derive(Debug)]
pub struct InFlight {
    operation: &'static str,
    busy: AtomicBool,
}

impl InFlight {
    pub const fn new(operation: &'static str) -> Self {
        Self {
            operation,
            busy: AtomicBool::new(false),
        }
    }

    /// 占用标记，已被占用时返回 OperationInProgress
    pub fn try_begin(&self) -> Result<InFlightGuard<'_>, AppError> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| InFlightGuard { gate: self })
            .map_err(|_| {
                tracing::debug!(operation = self.operation, "操作进行中，忽略重复触发");
                AppError::OperationInProgress(self.operation)
            })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }
}

/// 释放时清除标记（包括出错返回）
#[derive(Debug)]
pub struct InFlightGuard<'a> {
    gate: &'a InFlight,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.gate.busy.store(false, Ordering::Release);
    }
}
