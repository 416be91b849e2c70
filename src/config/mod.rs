//! 配置管理模块

mod settings;

pub use settings::{
	Settings,
	ApiSettings,
	DraftSettings,
	SessionSettings,
	NoticeSettings,
	LoggingSettings,
};
