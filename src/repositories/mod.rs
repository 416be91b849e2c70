//! 外部协作方接入层（后端接口、草稿缓存、会话）

mod draft_repo;
mod rows_api;
mod session_repo;

pub use draft_repo::{DraftStore, MemoryDraftStore, RedisDraftStore};
pub use rows_api::{AdminRowsApi, HttpRowsClient, RowsApi};
pub use session_repo::{InMemorySessionProvider, SessionProvider};
