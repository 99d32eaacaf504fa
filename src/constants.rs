//! 常量模块
//!
//! - [`GLOBAL_PROPERTY_KEY`] - 注入宿主应用的全局属性名
//! - [`MICRO_MESSENGER_UA`] / [`WX_WORK_UA`] - 微信与企业微信内置浏览器的 User-Agent 标识
//! - `ENV_*` - [`WxAuthParams::from_env`](crate::WxAuthParams::from_env) 读取的环境变量名

/// 挂载到宿主应用全局属性上的键名
pub const GLOBAL_PROPERTY_KEY: &str = "$wx";

/// 微信内置浏览器 User-Agent 标识（不区分大小写）
pub const MICRO_MESSENGER_UA: &str = "micromessenger";

/// 企业微信内置浏览器 User-Agent 标识（不区分大小写）
pub const WX_WORK_UA: &str = "wxwork";

/// 公众号 AppID 的环境变量名
pub const ENV_APP_ID: &str = "WECHAT_APP_ID";

/// 企业微信 CorpID 的环境变量名
pub const ENV_CORP_ID: &str = "WECHAT_CORP_ID";

/// 公众号授权回调地址的环境变量名
pub const ENV_REDIRECT_URI: &str = "WECHAT_REDIRECT_URI";

/// 企业微信授权回调地址的环境变量名
pub const ENV_QY_REDIRECT_URI: &str = "WECHAT_QY_REDIRECT_URI";

/// 授权回传参数 `state` 的环境变量名
pub const ENV_STATE: &str = "WECHAT_AUTH_STATE";

/// 授权作用域的环境变量名，取值见 [`Scope`](crate::Scope)
pub const ENV_SCOPE: &str = "WECHAT_AUTH_SCOPE";

/// 企业微信应用 AgentID 的环境变量名
pub const ENV_AGENT_ID: &str = "WECHAT_AGENT_ID";
