#![allow(dead_code)]

use async_trait::async_trait;
use std::{
    collections::HashMap,
    io,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};
use tracing::subscriber::DefaultGuard;
use wechat_auth_guard::{
    App, AuthRequest, Environment, Error, NavigationGuard, Next, NextAction, Result, Route,
    Router, WxAuthOptions, WxAuthOptionsBuilder, WxBindings, WxTool,
};

/// 记录守卫注册和导航结果的路由
#[derive(Default)]
pub struct MockRouter {
    guards: Mutex<Vec<NavigationGuard>>,
}

impl Router for MockRouter {
    fn before_each(&self, guard: NavigationGuard) {
        self.guards.lock().unwrap().push(guard);
    }
}

impl MockRouter {
    pub fn guard_count(&self) -> usize {
        self.guards.lock().unwrap().len()
    }

    /// 依次执行所有守卫，返回守卫结果和 `next` 的调用记录
    pub async fn navigate(&self, to: Route, from: Route) -> (Result<()>, Arc<Mutex<Vec<NextAction>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = calls.clone();
        let next = Next::new(move |action| sink.lock().unwrap().push(action));

        let guards = self.guards.lock().unwrap().clone();
        let mut result = Ok(());
        for guard in guards {
            result = guard(to.clone(), from.clone(), next.clone()).await;
            if result.is_err() {
                break;
            }
        }

        (result, calls)
    }
}

#[derive(Default)]
pub struct MockApp {
    pub globals: HashMap<String, WxBindings>,
}

impl App for MockApp {
    fn set_global_property(&mut self, key: &str, bindings: WxBindings) {
        self.globals.insert(key.to_string(), bindings);
    }
}

pub struct MockTool {
    pub weixin: bool,
    pub qy_weixin: bool,
    pub fail: bool,
    pub requests: Mutex<Vec<AuthRequest>>,
    pub hidden: AtomicUsize,
    pub shown: AtomicUsize,
}

impl MockTool {
    pub fn new(environment: Environment) -> Arc<Self> {
        Self::build(environment.is_wechat(), environment.is_enterprise(), false)
    }

    /// 授权跳转总是失败的工具
    pub fn failing(environment: Environment) -> Arc<Self> {
        Self::build(environment.is_wechat(), environment.is_enterprise(), true)
    }

    /// 分别指定 `is_weixin` 与 `is_qy_weixin` 的返回值
    pub fn with_detection(weixin: bool, qy_weixin: bool) -> Arc<Self> {
        Self::build(weixin, qy_weixin, false)
    }

    fn build(weixin: bool, qy_weixin: bool, fail: bool) -> Arc<Self> {
        Arc::new(MockTool {
            weixin,
            qy_weixin,
            fail,
            requests: Mutex::new(Vec::new()),
            hidden: AtomicUsize::new(0),
            shown: AtomicUsize::new(0),
        })
    }

    pub fn requests(&self) -> Vec<AuthRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn hidden(&self) -> usize {
        self.hidden.load(Ordering::SeqCst)
    }

    pub fn shown(&self) -> usize {
        self.shown.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WxTool for MockTool {
    async fn auth(&self, request: AuthRequest) -> Result<()> {
        self.requests.lock().unwrap().push(request);

        if self.fail {
            return Err(Error::AuthRedirect("用户拒绝授权".to_string()));
        }

        Ok(())
    }

    fn is_weixin(&self) -> bool {
        self.weixin
    }

    fn is_qy_weixin(&self) -> bool {
        self.qy_weixin
    }

    fn hide_menu(&self) {
        self.hidden.fetch_add(1, Ordering::SeqCst);
    }

    fn show_menu(&self) {
        self.shown.fetch_add(1, Ordering::SeqCst);
    }
}

/// 带固定授权结果的配置
pub fn options(router: Arc<MockRouter>, authorized: bool) -> WxAuthOptionsBuilder {
    WxAuthOptions::builder()
        .router(router)
        .app_id("wx1")
        .redirect_uri("https://a/r")
        .check_auth(move |_to, _from, _next| async move { Ok(authorized) })
}

/// 让后台发起的授权跳转执行完
pub async fn settle() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}

#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// 在当前线程捕获日志输出
pub fn capture_logs() -> (LogBuffer, DefaultGuard) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();

    (buffer, tracing::subscriber::set_default(subscriber))
}
