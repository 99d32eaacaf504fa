//! 路由位置与导航控制
//!
//! - [`Route`]: 守卫收到的目标路由 / 来源路由
//! - [`RouteMeta`]: 路由元信息，`requires_auth` 标记该路由是否需要授权
//! - [`Next`]: 守卫必须调用一次的放行回调，对应 `next()` / `next(false)` / `next(target)`

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{fmt, sync::Arc};

/// 路由元信息
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteMeta {
    /// 是否需要微信授权
    #[serde(default)]
    pub requires_auth: bool,
    /// 宿主应用的其他元信息，守卫只读不写
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// 已解析的路由位置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    /// 包含查询参数和 hash 的完整路径
    pub full_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub meta: RouteMeta,
}

impl Route {
    pub fn new(full_path: impl Into<String>) -> Self {
        Route {
            full_path: full_path.into(),
            ..Default::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// 标记该路由需要授权
    pub fn with_requires_auth(mut self) -> Self {
        self.meta.requires_auth = true;
        self
    }

    pub fn requires_auth(&self) -> bool {
        self.meta.requires_auth
    }
}

/// 守卫对本次导航作出的决定
#[derive(Debug, Clone, PartialEq)]
pub enum NextAction {
    /// 放行，对应 `next()`
    Proceed,
    /// 中止，对应 `next(false)`
    Abort,
    /// 重定向到新的路径，对应 `next(target)`
    Redirect(String),
}

/// 导航放行回调
///
/// 由路由在每次导航时创建，克隆后的句柄指向同一个回调。
#[derive(Clone)]
pub struct Next {
    inner: Arc<dyn Fn(NextAction) + Send + Sync>,
}

impl fmt::Debug for Next {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Next").finish_non_exhaustive()
    }
}

impl Next {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(NextAction) + Send + Sync + 'static,
    {
        Next { inner: Arc::new(f) }
    }

    pub fn call(&self, action: NextAction) {
        (self.inner)(action)
    }

    pub fn proceed(&self) {
        self.call(NextAction::Proceed)
    }

    pub fn abort(&self) {
        self.call(NextAction::Abort)
    }

    pub fn redirect(&self, target: impl Into<String>) {
        self.call(NextAction::Redirect(target.into()))
    }
}
