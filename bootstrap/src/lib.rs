//! mande-bootstrap - 服务启动基础设施
//!
//! 统一的配置加载、运行时初始化、基础设施装配与可观测性

mod health;
mod infrastructure;
mod metrics;
mod runtime;

pub use health::*;
pub use infrastructure::*;
pub use metrics::*;
pub use runtime::*;
