//! 运行环境识别
//!
//! 将“是否在微信中”“是否在企业微信中”两个布尔判断合并为一个枚举，
//! 便于按环境选择对应的 AppID / 回调地址。

use crate::{
    constants::{MICRO_MESSENGER_UA, WX_WORK_UA},
    tool::WxTool,
};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// 客户端运行环境
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    /// 非微信环境
    None,
    /// 微信内置浏览器
    Personal,
    /// 企业微信内置浏览器
    Enterprise,
}

impl Environment {
    /// 通过授权工具的环境检测函数识别当前环境
    ///
    /// 以 `is_weixin` 判断是否在微信中，`is_qy_weixin` 只用于区分企业微信。
    pub fn detect(tool: &dyn WxTool) -> Self {
        if !tool.is_weixin() {
            Environment::None
        } else if tool.is_qy_weixin() {
            Environment::Enterprise
        } else {
            Environment::Personal
        }
    }

    /// 根据 User-Agent 识别当前环境
    ///
    /// 供 [`WxTool`] 的实现者使用。
    ///
    /// ```
    /// use wechat_auth_guard::Environment;
    ///
    /// let ua = "Mozilla/5.0 (iPhone) AppleWebKit/605.1.15 MicroMessenger/8.0.47";
    /// assert_eq!(Environment::from_user_agent(ua), Environment::Personal);
    /// ```
    pub fn from_user_agent(user_agent: &str) -> Self {
        let ua = user_agent.to_ascii_lowercase();

        if !ua.contains(MICRO_MESSENGER_UA) {
            return Environment::None;
        }

        if ua.contains(WX_WORK_UA) {
            Environment::Enterprise
        } else {
            Environment::Personal
        }
    }

    /// 是否处于微信或企业微信中
    pub fn is_wechat(&self) -> bool {
        !matches!(self, Environment::None)
    }

    pub fn is_enterprise(&self) -> bool {
        matches!(self, Environment::Enterprise)
    }
}
