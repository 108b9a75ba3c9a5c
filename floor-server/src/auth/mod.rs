//! 认证模块 - JWT 令牌签发与校验
//!
//! 授权止步于角色标记：令牌携带调用者身份与角色，服务端不做
//! 细粒度权限控制。

pub mod extractor;
pub mod jwt;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
