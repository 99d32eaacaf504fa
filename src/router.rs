//! 宿主路由接口
//!
//! 插件只依赖路由的“全局前置守卫”注册能力，路由本身由宿主实现。

use crate::{
    Result,
    route::{Next, Route},
};
use futures::future::BoxFuture;
use std::sync::Arc;

/// 全局前置守卫
///
/// 参数依次为目标路由、来源路由和放行回调。返回的错误交由路由自身的错误处理。
pub type NavigationGuard = Arc<dyn Fn(Route, Route, Next) -> BoxFuture<'static, Result<()>> + Send + Sync>;

/// 宿主路由
pub trait Router: Send + Sync {
    /// 注册全局前置守卫，对应 `router.beforeEach`
    fn before_each(&self, guard: NavigationGuard);
}
