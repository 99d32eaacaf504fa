//! 微信授权工具与宿主应用接口
//!
//! - [`WxTool`]: 外部授权工具，负责环境检测、菜单控制和发起授权跳转
//! - [`WxBindings`]: 挂载到宿主应用全局属性 `$wx` 上的方法集合
//! - [`App`]: 宿主应用的全局属性挂载点

use crate::{Result, params::AuthRequest};
use async_trait::async_trait;
use std::{fmt, sync::Arc};

/// 外部微信授权工具
///
/// 插件不关心授权地址如何拼接、code 如何换取 token，只依赖以下函数。
#[async_trait]
pub trait WxTool: Send + Sync {
    /// 发起微信网页授权跳转
    ///
    /// 失败时返回错误，守卫会记录日志并中止导航。
    async fn auth(&self, request: AuthRequest) -> Result<()>;

    /// 是否处于微信内置浏览器（企业微信同样返回 `true`）
    fn is_weixin(&self) -> bool;

    /// 是否处于企业微信内置浏览器
    fn is_qy_weixin(&self) -> bool;

    /// 隐藏右上角菜单
    fn hide_menu(&self);

    /// 显示右上角菜单
    fn show_menu(&self);
}

/// 全局方法集合
///
/// 每个方法都直接转发给同一个 [`WxTool`]，不做任何包装。
#[derive(Clone)]
pub struct WxBindings {
    tool: Arc<dyn WxTool>,
}

impl fmt::Debug for WxBindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WxBindings").finish_non_exhaustive()
    }
}

impl WxBindings {
    pub fn new(tool: Arc<dyn WxTool>) -> Self {
        WxBindings { tool }
    }

    /// 底层授权工具
    pub fn tool(&self) -> &Arc<dyn WxTool> {
        &self.tool
    }

    pub async fn auth(&self, request: AuthRequest) -> Result<()> {
        self.tool.auth(request).await
    }

    pub fn is_weixin(&self) -> bool {
        self.tool.is_weixin()
    }

    pub fn is_qy_weixin(&self) -> bool {
        self.tool.is_qy_weixin()
    }

    pub fn hide_menu(&self) {
        self.tool.hide_menu()
    }

    pub fn show_menu(&self) {
        self.tool.show_menu()
    }
}

/// 宿主应用
pub trait App {
    /// 挂载全局属性，对应 `app.config.globalProperties[key] = bindings`
    fn set_global_property(&mut self, key: &str, bindings: WxBindings);
}
