//! `wechat_auth_guard` - 微信网页授权路由守卫
//!
//! 为前端应用路由提供微信（公众号 / 企业微信）网页授权能力：
//! 识别当前是否运行在微信内置浏览器中，对标记了 `requires_auth` 的路由调用宿主提供的
//! `check_auth` 回调，未授权时交由外部授权工具发起跳转授权。
//!
//! ## 核心特性
//!
//! - **轻量**: 只负责把路由守卫与授权工具组合起来，不实现 OAuth 协议本身，也不管理 token。
//! - **可替换**: 路由、宿主应用、授权工具均以 trait 形式注入，方便集成和测试。
//! - **可配置**: 授权参数支持代码构建、JSON 和环境变量三种方式加载。
//!
//! ## 模块
//!
//! - [`plugin`]: 插件安装与导航守卫
//! - [`params`]: 授权参数与授权请求
//! - [`environment`]: 运行环境识别
//! - [`route`] / [`router`]: 路由位置、放行回调与宿主路由接口
//! - [`tool`]: 外部授权工具与全局方法集合
//! - [`error`]: 错误类型

pub mod constants;
pub mod environment;
pub mod error;
pub mod params;
pub mod plugin;
pub mod route;
pub mod router;
pub mod tool;

pub type Result<T> = std::result::Result<T, error::Error>;
pub use environment::Environment;
pub use error::Error;
pub use params::{AuthRequest, Credentials, Scope, WxAuthParams};
pub use plugin::{CheckAuth, RedirectMode, WxAuthOptions, WxAuthOptionsBuilder, WxAuthPlugin};
pub use route::{Next, NextAction, Route, RouteMeta};
pub use router::{NavigationGuard, Router};
pub use tool::{App, WxBindings, WxTool};
