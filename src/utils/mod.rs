//! 工具函数模块

mod export;
mod time;
mod validators;

pub use export::*;
pub use time::*;
pub use validators::*;
