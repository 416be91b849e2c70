//! 数据模型模块

mod common;
mod cycle;
mod query;
mod record;
mod submission;
mod table;
mod user;
mod validation;

pub use common::*;
pub use cycle::*;
pub use query::*;
pub use record::*;
pub use submission::*;
pub use table::*;
pub use user::*;
pub use validation::*;
