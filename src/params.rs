//! 微信授权参数
//!
//! [`WxAuthParams`] 描述发起微信网页授权所需的 AppID、企业微信 CorpID、回调地址等信息，
//! 可以直接构造，也可以从 JSON 或环境变量加载：
//!
//! ```
//! use wechat_auth_guard::WxAuthParams;
//!
//! let params = WxAuthParams::from_json(
//!     r#"{ "appId": "wx1", "redirectUri": "https://a/r" }"#,
//! )
//! .unwrap();
//!
//! assert_eq!(params.app_id.as_deref(), Some("wx1"));
//! assert!(params.validate().is_ok());
//! ```
//!
//! 守卫在需要跳转授权时，会基于这些参数生成 [`AuthRequest`] 交给授权工具。

use crate::{
    Result, constants,
    environment::Environment,
    error::Error,
    route::Route,
};
use serde::{Deserialize, Serialize};
use std::env::{self, VarError};
use strum::{Display, EnumString};

/// 网页授权作用域
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// 静默授权，只能获取 openid
    SnsapiBase,
    /// 弹出授权页，可获取昵称、头像
    SnsapiUserinfo,
    /// 企业微信手动授权，可获取成员敏感信息
    SnsapiPrivateinfo,
}

/// 微信网页授权参数
///
/// `app_id` 与 `corp_id` 至少提供一个，`redirect_uri` 与 `qy_redirect_uri` 至少提供一个，
/// 空字符串视为未提供。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WxAuthParams {
    /// 公众号 AppID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    /// 企业微信 CorpID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corp_id: Option<String>,
    /// 公众号授权回调地址
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_uri: Option<String>,
    /// 企业微信授权回调地址
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qy_redirect_uri: Option<String>,
    /// 回传参数，未提供时使用目标路由的完整路径
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<Scope>,
    /// 企业微信应用 AgentID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
}

/// 按运行环境选出的一组授权凭据
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Credentials<'a> {
    /// AppID 或 CorpID
    pub id: &'a str,
    pub redirect_uri: &'a str,
    /// 是否为企业微信凭据
    pub enterprise: bool,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn optional_var(key: &str) -> Result<Option<String>> {
    match env::var(key) {
        Ok(value) if value.is_empty() => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

impl WxAuthParams {
    /// 从 JSON 字符串加载，字段名使用 camelCase（`appId`、`qyRedirectUri` 等）
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// 从环境变量加载
    ///
    /// 读取 `WECHAT_APP_ID`、`WECHAT_CORP_ID`、`WECHAT_REDIRECT_URI`、
    /// `WECHAT_QY_REDIRECT_URI`、`WECHAT_AUTH_STATE`、`WECHAT_AUTH_SCOPE`、`WECHAT_AGENT_ID`，
    /// 未设置的变量对应字段为 `None`。
    pub fn from_env() -> Result<Self> {
        let scope = optional_var(constants::ENV_SCOPE)?
            .map(|v| {
                v.parse::<Scope>()
                    .map_err(|_| Error::InvalidParameter(format!("未知的授权作用域: {v}")))
            })
            .transpose()?;

        Ok(WxAuthParams {
            app_id: optional_var(constants::ENV_APP_ID)?,
            corp_id: optional_var(constants::ENV_CORP_ID)?,
            redirect_uri: optional_var(constants::ENV_REDIRECT_URI)?,
            qy_redirect_uri: optional_var(constants::ENV_QY_REDIRECT_URI)?,
            state: optional_var(constants::ENV_STATE)?,
            scope,
            agent_id: optional_var(constants::ENV_AGENT_ID)?,
        })
    }

    /// 校验必填参数
    ///
    /// # 错误
    ///
    /// - `app_id` 与 `corp_id` 均为空时返回 [`Error::MissingAppId`]
    /// - `redirect_uri` 与 `qy_redirect_uri` 均为空时返回 [`Error::MissingRedirectUri`]
    pub fn validate(&self) -> Result<()> {
        if present(&self.app_id).is_none() && present(&self.corp_id).is_none() {
            return Err(Error::MissingAppId);
        }

        if present(&self.redirect_uri).is_none() && present(&self.qy_redirect_uri).is_none() {
            return Err(Error::MissingRedirectUri);
        }

        Ok(())
    }

    /// 选出当前环境适用的凭据
    ///
    /// 企业微信优先使用 `corp_id` + `qy_redirect_uri`，其余环境优先使用
    /// `app_id` + `redirect_uri`；首选组合不完整时退回另一组，两组都不完整时返回 `None`。
    pub fn credentials(&self, environment: Environment) -> Option<Credentials<'_>> {
        let personal = present(&self.app_id)
            .zip(present(&self.redirect_uri))
            .map(|(id, redirect_uri)| Credentials {
                id,
                redirect_uri,
                enterprise: false,
            });
        let enterprise = present(&self.corp_id)
            .zip(present(&self.qy_redirect_uri))
            .map(|(id, redirect_uri)| Credentials {
                id,
                redirect_uri,
                enterprise: true,
            });

        match environment {
            Environment::Enterprise => enterprise.or(personal),
            Environment::Personal | Environment::None => personal.or(enterprise),
        }
    }
}

/// 交给授权工具的一次授权跳转请求
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthRequest {
    #[serde(flatten)]
    params: WxAuthParams,
    environment: Environment,
}

impl AuthRequest {
    /// 以配置的 `state` 为准，未配置时使用目标路由的完整路径
    pub fn new(params: &WxAuthParams, to: &Route, environment: Environment) -> Self {
        let state = present(&params.state).unwrap_or(&to.full_path).to_string();

        AuthRequest {
            params: WxAuthParams {
                state: Some(state),
                ..params.clone()
            },
            environment,
        }
    }

    pub fn params(&self) -> &WxAuthParams {
        &self.params
    }

    pub fn state(&self) -> &str {
        self.params.state.as_deref().unwrap_or_default()
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn credentials(&self) -> Option<Credentials<'_>> {
        self.params.credentials(self.environment)
    }
}
