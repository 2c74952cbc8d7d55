//! Page Context
//!
//! Values the server renders into the page: CSRF token, chart datasets and
//! insight cards. Read once at mount and shared through context.

use aitherapist::config::{ChatConfig, DashboardConfig, ServerConfig};
use aitherapist::dashboard::DashboardData;
use leptos::*;
use serde::Deserialize;
use wasm_bindgen::{JsCast, JsValue};

const CSRF_INPUT: &str = "[name=csrfmiddlewaretoken]";
const CSRF_COOKIE: &str = "csrftoken";

/// Page-wide configuration provided to all components
#[derive(Clone)]
pub struct PageContext {
    pub server: ServerConfig,
    pub chat: ChatConfig,
    pub dashboard: DashboardConfig,
}

/// Insight card rendered by the server into `window.insights`
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Insight {
    pub title: String,
    pub message: String,
    #[serde(default = "default_insight_icon")]
    pub icon: String,
}

/// Recent conversation entry from `window.recentChats`
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct RecentChat {
    pub message: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub sentiment: Option<String>,
}

fn default_insight_icon() -> String {
    "bi-lightbulb".to_string()
}

/// Provide the page context to the component tree
pub fn provide_page_context() {
    let csrf = csrf_token();
    if csrf.is_none() {
        web_sys::console::warn_1(&"No CSRF token found on the page".into());
    }

    provide_context(PageContext {
        server: ServerConfig::same_origin(csrf),
        chat: ChatConfig::default(),
        dashboard: DashboardConfig::default(),
    });
}

/// CSRF token from the form field, falling back to the cookie
pub fn csrf_token() -> Option<String> {
    let from_input = document()
        .query_selector(CSRF_INPUT)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web_sys::HtmlInputElement>().ok())
        .map(|input| input.value())
        .filter(|v| !v.is_empty());

    from_input.or_else(|| {
        let cookies = document()
            .dyn_into::<web_sys::HtmlDocument>()
            .ok()?
            .cookie()
            .ok()?;
        cookie_value(&cookies, CSRF_COOKIE)
    })
}

fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
        .filter(|v| !v.is_empty())
}

/// JSON text of a global the server set on `window`
fn window_global(name: &str) -> Option<String> {
    let target: &JsValue = window().as_ref();
    let value = js_sys::Reflect::get(target, &JsValue::from_str(name)).ok()?;
    if value.is_undefined() || value.is_null() {
        return None;
    }
    js_sys::JSON::stringify(&value).ok().map(String::from)
}

/// Mood datasets from `window.chartData` and `window.totalStats`
pub fn dashboard_data() -> DashboardData {
    DashboardData::from_page_json(
        window_global("chartData").as_deref(),
        window_global("totalStats").as_deref(),
    )
}

pub fn insights() -> Vec<Insight> {
    list_global("insights")
}

pub fn recent_chats() -> Vec<RecentChat> {
    list_global("recentChats")
}

fn list_global<T: serde::de::DeserializeOwned>(name: &str) -> Vec<T> {
    let Some(raw) = window_global(name) else {
        return Vec::new();
    };
    serde_json::from_str(&raw).unwrap_or_else(|e| {
        web_sys::console::warn_1(&format!("Ignoring malformed {}: {}", name, e).into());
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_value() {
        let cookies = "sessionid=abc; csrftoken=tok123; theme=dark";
        assert_eq!(cookie_value(cookies, "csrftoken"), Some("tok123".to_string()));
        assert_eq!(cookie_value(cookies, "missing"), None);
        assert_eq!(cookie_value("csrftoken=", "csrftoken"), None);
    }
}
