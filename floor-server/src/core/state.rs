use std::sync::Arc;

use shared::models::StaffAccount;

use crate::auth::JwtService;
use crate::core::Config;
use crate::floor::{FloorCoordinator, MenuCatalog, OrderLedger, TableRegistry, seed};
use crate::gateway::EventHub;

/// 服务器状态 - 持有所有服务的单例引用
///
/// ServerState 是进程的核心数据结构，持有所有服务的共享引用。
/// 使用 Arc 实现浅拷贝，克隆成本极低。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | catalog | Arc<MenuCatalog> | 菜单目录 (只读) |
/// | tables | Arc<TableRegistry> | 桌台注册表 |
/// | orders | Arc<OrderLedger> | 订单账本 |
/// | floor | FloorCoordinator | 跨实体协调器 |
/// | hub | EventHub | 事件中心 |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
/// | staff | Arc<Vec<StaffAccount>> | 员工账户 (只读) |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub catalog: Arc<MenuCatalog>,
    pub tables: Arc<TableRegistry>,
    pub orders: Arc<OrderLedger>,
    pub floor: FloorCoordinator,
    pub hub: EventHub,
    pub jwt_service: Arc<JwtService>,
    pub staff: Arc<Vec<StaffAccount>>,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 种子数据 (桌台、菜单、员工)
    /// 2. 领域存储 (注册表、账本)
    /// 3. 协调器与事件中心
    /// 4. JWT 服务
    pub fn initialize(config: &Config) -> Self {
        let catalog = Arc::new(MenuCatalog::new(seed::menu_categories(), seed::menu_items()));
        let tables = Arc::new(TableRegistry::new(seed::tables()));
        let orders = Arc::new(OrderLedger::new());
        let floor = FloorCoordinator::new(catalog.clone(), tables.clone(), orders.clone());
        let hub = EventHub::new();
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let staff = Arc::new(seed::staff_accounts());

        tracing::info!(
            tables = tables.list().len(),
            staff = staff.len(),
            "server state initialized"
        );

        Self {
            config: config.clone(),
            catalog,
            tables,
            orders,
            floor,
            hub,
            jwt_service,
            staff,
        }
    }

    /// 按用户名查找员工账户
    pub fn find_staff(&self, username: &str) -> Option<&StaffAccount> {
        self.staff.iter().find(|s| s.username == username)
    }
}
