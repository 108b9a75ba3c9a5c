//! Floor Server - 餐厅楼面运营后端
//!
//! # 架构概述
//!
//! 本模块是楼面服务的主入口，提供以下核心功能：
//!
//! - **桌台注册表** (`floor::tables`): 桌台状态机
//! - **订单账本** (`floor::ledger`): 订单、行项目与合计
//! - **跨实体协调** (`floor::sync`): 订单生命周期 -> 桌台占用
//! - **事件网关** (`gateway`): 支持 TCP/Memory 传输的实时事件扇出
//! - **认证** (`auth`): JWT + Argon2 认证体系
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! floor-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 认证
//! ├── floor/         # 领域核心 (桌台/订单/协调/菜单)
//! ├── gateway/       # 实时事件网关
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 错误、日志等工具
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod floor;
pub mod gateway;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use floor::{FloorCoordinator, MenuCatalog, OrderLedger, TableRegistry};
pub use gateway::EventHub;
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置进程环境 (dotenv + 日志)
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(None, log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    ______
   / ____/___  ____  _____
  / /_  / __ \/ __ \/ ___/
 / __/ / /_/ / /_/ / /
/_/    \____/\____/_/
   _____
  / ___/___  ______   _____  _____
  \__ \/ _ \/ ___/ | / / _ \/ ___/
 ___/ /  __/ /   | |/ /  __/ /
/____/\___/_/    |___/\___/_/
    "#
    );
}
