//! 微信授权守卫错误处理模块
//!
//! 该模块定义了安装插件和执行路由守卫过程中可能遇到的所有错误类型。
//!
//! # 错误分类
//!
//! ## 配置错误
//!
//! 在 [`WxAuthPlugin::install`](crate::WxAuthPlugin::install) 时同步返回，出现时不会注册任何守卫：
//!
//! - `MissingRouter`: 未提供路由实例
//! - `MissingCheckAuth`: 未提供授权检查回调
//! - `MissingAppId`: `app_id` 与 `corp_id` 均未提供
//! - `MissingRedirectUri`: `redirect_uri` 与 `qy_redirect_uri` 均未提供
//!
//! ## 导航错误
//!
//! - `AuthRedirect`: 微信授权跳转失败，守卫会记录日志并中止本次导航
//! - `CheckAuth`: 宿主授权检查失败，原样传递给路由自身的错误处理
//!
//! # 错误转换
//!
//! - `serde_json::Error` → `Error::SerdeJson`
//! - `std::env::VarError` → `Error::Env`

use serde_json::Error as SerdeJsonError;
use std::env::VarError;

/// 微信授权守卫错误枚举
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// 未提供路由实例
    #[error("wechat-auth-guard: missing required option: router")]
    MissingRouter,

    /// 未提供授权检查回调
    #[error("wechat-auth-guard: missing required option: check_auth")]
    MissingCheckAuth,

    /// `app_id` 与 `corp_id` 至少需要提供一个
    #[error("wechat-auth-guard: missing required option: app_id or corp_id")]
    MissingAppId,

    /// `redirect_uri` 与 `qy_redirect_uri` 至少需要提供一个
    #[error("wechat-auth-guard: missing required option: redirect_uri or qy_redirect_uri")]
    MissingRedirectUri,

    /// 微信授权跳转失败
    #[error("auth redirect failed: {0}")]
    AuthRedirect(String),

    /// 宿主授权检查失败
    #[error("check auth failed: {0}")]
    CheckAuth(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// 请求参数错误
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// JSON 序列化/反序列化错误
    #[error("json error: {0}")]
    SerdeJson(#[from] SerdeJsonError),

    /// 环境变量读取错误
    #[error("env error: {0}")]
    Env(#[from] VarError),
}

impl Error {
    /// 包装宿主授权检查中产生的错误
    pub fn check_auth<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Error::CheckAuth(error.into())
    }

    /// 是否为安装阶段的配置错误
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::MissingRouter
                | Error::MissingCheckAuth
                | Error::MissingAppId
                | Error::MissingRedirectUri
        )
    }
}
