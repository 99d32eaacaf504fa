//! 路由守卫安装
//!
//! [`WxAuthPlugin::install`] 校验配置、向宿主应用挂载 `$wx` 全局方法，并在路由上注册一个全局前置守卫。
//!
//! # 快速开始
//!
//! ```no_run
//! use std::sync::Arc;
//! use wechat_auth_guard::{App, Router, WxAuthOptions, WxAuthPlugin, WxTool};
//!
//! # fn example(
//! #     tool: Arc<dyn WxTool>,
//! #     router: Arc<dyn Router>,
//! #     app: &mut dyn App,
//! # ) -> wechat_auth_guard::Result<()> {
//! let options = WxAuthOptions::builder()
//!     .router(router)
//!     .app_id("wx1234567890")
//!     .redirect_uri("https://example.com/auth/callback")
//!     .check_auth(|_to, _from, _next| async move {
//!         // 查询本地登录态
//!         Ok(false)
//!     })
//!     .build();
//!
//! WxAuthPlugin::new(tool).install(app, options)?;
//! # Ok(())
//! # }
//! ```
//!
//! # 守卫流程
//!
//! 每次导航先调用宿主的 `check_auth`，然后：
//!
//! - 目标路由未标记 `requires_auth`：放行
//! - 未授权且处于微信中：发起授权跳转，跳转失败时记录日志并中止导航
//! - 不在微信中：记录警告并放行
//! - 已授权：放行
//!
//! 授权跳转成功时守卫不会调用 `next`，由页面跳转接管本次导航。

use crate::{
    Result,
    constants::GLOBAL_PROPERTY_KEY,
    environment::Environment,
    error::Error,
    params::{AuthRequest, Scope, WxAuthParams},
    route::{Next, Route},
    router::{NavigationGuard, Router},
    tool::{App, WxBindings, WxTool},
};
use futures::future::{BoxFuture, FutureExt};
use std::{fmt, future::Future, sync::Arc};
use tracing::{Instrument, Span, debug, error, instrument, warn};

/// 宿主授权检查回调
///
/// 返回用户当前是否已授权，错误会直接交给路由处理。
pub type CheckAuth = Arc<dyn Fn(Route, Route, Next) -> BoxFuture<'static, Result<bool>> + Send + Sync>;

/// 授权跳转的调度方式
///
/// 两种方式在跳转成功时都不会调用 `next`。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RedirectMode {
    /// 后台发起跳转，守卫不等待结果立即返回
    #[default]
    Detached,
    /// 守卫等待跳转结果，成功时保持导航挂起
    Awaited,
}

/// 插件配置
#[derive(Default)]
pub struct WxAuthOptions {
    /// 路由实例，必填
    pub router: Option<Arc<dyn Router>>,
    /// 授权检查回调，必填
    pub check_auth: Option<CheckAuth>,
    pub params: WxAuthParams,
    pub redirect_mode: RedirectMode,
}

impl fmt::Debug for WxAuthOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WxAuthOptions")
            .field("router", &self.router.is_some())
            .field("check_auth", &self.check_auth.is_some())
            .field("params", &self.params)
            .field("redirect_mode", &self.redirect_mode)
            .finish()
    }
}

impl WxAuthOptions {
    pub fn builder() -> WxAuthOptionsBuilder {
        WxAuthOptionsBuilder::new()
    }
}

/// 插件配置构建器
///
/// `build` 不做校验，必填项在安装时检查。
#[derive(Debug, Default)]
pub struct WxAuthOptionsBuilder {
    options: WxAuthOptions,
}

impl WxAuthOptionsBuilder {
    pub fn new() -> Self {
        WxAuthOptionsBuilder {
            options: WxAuthOptions::default(),
        }
    }

    pub fn router(mut self, router: Arc<dyn Router>) -> Self {
        self.options.router = Some(router);
        self
    }

    pub fn check_auth<F, Fut>(mut self, check_auth: F) -> Self
    where
        F: Fn(Route, Route, Next) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<bool>> + Send + 'static,
    {
        self.options.check_auth = Some(Arc::new(move |to: Route, from: Route, next: Next| {
            check_auth(to, from, next).boxed()
        }));
        self
    }

    /// 整体替换授权参数，例如使用 [`WxAuthParams::from_env`] 的结果
    pub fn params(mut self, params: WxAuthParams) -> Self {
        self.options.params = params;
        self
    }

    pub fn app_id(mut self, app_id: impl Into<String>) -> Self {
        self.options.params.app_id = Some(app_id.into());
        self
    }

    pub fn corp_id(mut self, corp_id: impl Into<String>) -> Self {
        self.options.params.corp_id = Some(corp_id.into());
        self
    }

    pub fn redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.options.params.redirect_uri = Some(redirect_uri.into());
        self
    }

    pub fn qy_redirect_uri(mut self, qy_redirect_uri: impl Into<String>) -> Self {
        self.options.params.qy_redirect_uri = Some(qy_redirect_uri.into());
        self
    }

    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.options.params.state = Some(state.into());
        self
    }

    pub fn scope(mut self, scope: Scope) -> Self {
        self.options.params.scope = Some(scope);
        self
    }

    pub fn agent_id(mut self, agent_id: impl Into<String>) -> Self {
        self.options.params.agent_id = Some(agent_id.into());
        self
    }

    pub fn redirect_mode(mut self, mode: RedirectMode) -> Self {
        self.options.redirect_mode = mode;
        self
    }

    pub fn build(self) -> WxAuthOptions {
        self.options
    }
}

/// 微信授权插件
#[derive(Clone)]
pub struct WxAuthPlugin {
    tool: Arc<dyn WxTool>,
}

impl fmt::Debug for WxAuthPlugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WxAuthPlugin").finish_non_exhaustive()
    }
}

impl WxAuthPlugin {
    pub fn new(tool: Arc<dyn WxTool>) -> Self {
        WxAuthPlugin { tool }
    }

    /// 安装插件
    ///
    /// # 错误
    ///
    /// 配置不完整时返回配置错误（[`Error::is_configuration`]），此时不会挂载全局方法，也不会注册守卫：
    ///
    /// - [`Error::MissingRouter`]
    /// - [`Error::MissingAppId`]
    /// - [`Error::MissingRedirectUri`]
    /// - [`Error::MissingCheckAuth`]
    #[instrument(skip_all)]
    pub fn install(&self, app: &mut dyn App, options: WxAuthOptions) -> Result<()> {
        let WxAuthOptions {
            router,
            check_auth,
            params,
            redirect_mode,
        } = options;

        let router = router.ok_or(Error::MissingRouter)?;
        params.validate()?;
        let check_auth = check_auth.ok_or(Error::MissingCheckAuth)?;

        app.set_global_property(GLOBAL_PROPERTY_KEY, WxBindings::new(self.tool.clone()));

        let guard = AuthGuard {
            tool: self.tool.clone(),
            check_auth,
            params: Arc::new(params),
            redirect_mode,
        };
        router.before_each(guard.into_navigation_guard());

        debug!("wechat auth guard installed, redirect mode: {:?}", redirect_mode);

        Ok(())
    }
}

#[derive(Clone)]
struct AuthGuard {
    tool: Arc<dyn WxTool>,
    check_auth: CheckAuth,
    params: Arc<WxAuthParams>,
    redirect_mode: RedirectMode,
}

impl AuthGuard {
    fn into_navigation_guard(self) -> NavigationGuard {
        Arc::new(move |to: Route, from: Route, next: Next| {
            let guard = self.clone();
            async move { guard.run(to, from, next).await }.boxed()
        })
    }

    #[instrument(skip_all, fields(to = %to.full_path, from = %from.full_path))]
    async fn run(&self, to: Route, from: Route, next: Next) -> Result<()> {
        let authorized = (self.check_auth)(to.clone(), from, next.clone()).await?;

        if !to.requires_auth() {
            next.proceed();
            return Ok(());
        }

        let environment = Environment::detect(self.tool.as_ref());
        debug!("authorized: {}, environment: {}", authorized, environment);

        if !authorized && environment.is_wechat() {
            let request = AuthRequest::new(&self.params, &to, environment);
            self.dispatch_redirect(request, next).await;
        } else if !environment.is_wechat() {
            warn!("非微信环境，跳过授权检查");
            next.proceed();
        } else {
            next.proceed();
        }

        Ok(())
    }

    async fn dispatch_redirect(&self, request: AuthRequest, next: Next) {
        let tool = self.tool.clone();
        let redirect = redirect(tool, request, next);

        match (self.redirect_mode, tokio::runtime::Handle::try_current()) {
            (RedirectMode::Detached, Ok(handle)) => {
                handle.spawn(redirect.instrument(Span::current()));
            }
            (RedirectMode::Detached, Err(_)) => {
                debug!("no tokio runtime, awaiting auth redirect inline");
                redirect.await;
            }
            (RedirectMode::Awaited, _) => redirect.await,
        }
    }
}

async fn redirect(tool: Arc<dyn WxTool>, request: AuthRequest, next: Next) {
    debug!("wechat auth redirect, state: {}", request.state());

    if let Err(err) = tool.auth(request).await {
        error!("微信授权失败: {}", err);
        next.abort();
    }
}
