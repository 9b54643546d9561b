pub mod catalog;
pub mod shared;
pub mod tier;
pub mod usage_store;

pub use crate::domain::model::{Answer, Question, UsageMap};
pub use crate::domain::ports::{ConfigProvider, Storage};
pub use crate::utils::error::Result;
