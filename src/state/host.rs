//! Host environment seen at startup.

use serde::{Deserialize, Serialize};

use super::config::IntroConfig;

/// Query parameter that opens dev tools on web hosts.
pub const DEVTOOLS_QUERY_PARAM: &str = "devtools";

/// Default viewport height used until the host reports one.
pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 800.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Web,
    Ios,
    Android,
}

/// What the host can do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostCapabilities {
    pub platform: Platform,
    /// Blocking OS confirmation dialogs are available
    pub native_dialogs: bool,
}

impl HostCapabilities {
    pub fn for_platform(platform: Platform) -> Self {
        Self {
            platform,
            native_dialogs: platform != Platform::Web,
        }
    }

    pub fn is_web(&self) -> bool {
        self.platform == Platform::Web
    }
}

/// Everything the session controller reads once at process start.
#[derive(Debug, Clone)]
pub struct StartupOptions {
    pub host: HostCapabilities,
    /// Page query string (web only), with or without the leading `?`
    pub query: Option<String>,
    pub viewport_height: f32,
    /// Non-production build: dev tools control is available
    pub debug_build: bool,
    pub intro: IntroConfig,
}

impl StartupOptions {
    pub fn new(host: HostCapabilities) -> Self {
        Self {
            host,
            query: None,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            debug_build: cfg!(debug_assertions),
            intro: IntroConfig::default(),
        }
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_viewport_height(mut self, height: f32) -> Self {
        self.viewport_height = height;
        self
    }

    pub fn with_debug_build(mut self, debug_build: bool) -> Self {
        self.debug_build = debug_build;
        self
    }

    pub fn with_intro(mut self, intro: IntroConfig) -> Self {
        self.intro = intro;
        self
    }

    /// `?devtools=true` on a web host.
    pub fn devtools_requested(&self) -> bool {
        if !self.host.is_web() {
            return false;
        }
        self.query
            .as_deref()
            .and_then(|q| query_param(q, DEVTOOLS_QUERY_PARAM))
            == Some("true")
    }
}

/// First value of `name` in a URL query string.
pub fn query_param<'a>(query: &'a str, name: &str) -> Option<&'a str> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .find_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (key == name).then_some(value)
        })
}
