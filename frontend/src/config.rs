use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:4000/graphql";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub api_base_url: Option<String>,
    pub time_zone: Option<String>,
}

static API_BASE_URL: OnceLock<String> = OnceLock::new();
static TIME_ZONE: OnceLock<Tz> = OnceLock::new();

#[cfg(target_arch = "wasm32")]
mod globals {
    fn read_key(object_name: &str, keys: &[&str]) -> Option<String> {
        let w = web_sys::window()?;
        let any = js_sys::Reflect::get(&w, &object_name.into()).ok()?;
        if any.is_undefined() || any.is_null() {
            return None;
        }
        let obj = js_sys::Object::from(any);
        keys.iter()
            .filter_map(|key| js_sys::Reflect::get(&obj, &(*key).into()).ok())
            .find(|v| !v.is_undefined() && !v.is_null())
            .and_then(|v| v.as_string())
    }

    // window.__OVERTIME_ENV = { API_BASE_URL: "..." } (env.js) wins over
    // window.__OVERTIME_CONFIG = { api_base_url: "..." }.
    pub fn api_base_url() -> Option<String> {
        read_key("__OVERTIME_ENV", &["API_BASE_URL", "api_base_url"])
            .or_else(|| read_key("__OVERTIME_CONFIG", &["api_base_url", "API_BASE_URL"]))
    }

    pub fn config_url() -> anyhow::Result<reqwest::Url> {
        let href = web_sys::window()
            .ok_or_else(|| anyhow::anyhow!("no global `window` exists"))?
            .location()
            .href()
            .map_err(|_| anyhow::anyhow!("window.location is unavailable"))?;
        Ok(reqwest::Url::parse(&href)?.join("config.json")?)
    }
}

fn snapshot_from_globals() -> Option<String> {
    #[cfg(target_arch = "wasm32")]
    {
        globals::api_base_url()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}

async fn fetch_runtime_config() -> anyhow::Result<RuntimeConfig> {
    #[cfg(target_arch = "wasm32")]
    {
        let resp = reqwest::get(globals::config_url()?).await?;
        if !resp.status().is_success() {
            anyhow::bail!("config.json responded with {}", resp.status());
        }
        Ok(resp.json::<RuntimeConfig>().await?)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        anyhow::bail!("config.json is only served to browser builds")
    }
}

fn pick_base_url(from_globals: Option<String>, from_file: Option<&RuntimeConfig>) -> String {
    from_globals
        .or_else(|| from_file.and_then(|cfg| cfg.api_base_url.clone()))
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
}

pub fn parse_time_zone(name: Option<&str>) -> Tz {
    match name.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => name.parse::<Tz>().unwrap_or_else(|_| {
            log::warn!("unknown time zone {:?}; falling back to UTC", name);
            Tz::UTC
        }),
        None => Tz::UTC,
    }
}

pub fn current_time_zone() -> Tz {
    TIME_ZONE.get().copied().unwrap_or(Tz::UTC)
}

pub async fn await_api_base_url() -> String {
    if let Some(cached) = API_BASE_URL.get() {
        return cached.clone();
    }
    let from_globals = snapshot_from_globals();
    // config.json still supplies the time zone when the endpoint comes from globals.
    let from_file = match fetch_runtime_config().await {
        Ok(cfg) => Some(cfg),
        Err(err) => {
            log::warn!("runtime config unavailable: {}", err);
            None
        }
    };
    if let Some(cfg) = &from_file {
        let _ = TIME_ZONE.set(parse_time_zone(cfg.time_zone.as_deref()));
    }
    let url = pick_base_url(from_globals, from_file.as_ref());
    log::info!("resolved API endpoint {}", url);
    let _ = API_BASE_URL.set(url.clone());
    url
}

pub async fn init() {
    let _ = await_api_base_url().await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn globals_take_precedence_over_config_file() {
        let file = RuntimeConfig {
            api_base_url: Some("https://file.example/graphql".into()),
            time_zone: None,
        };
        assert_eq!(
            pick_base_url(Some("https://env.example/graphql".into()), Some(&file)),
            "https://env.example/graphql"
        );
        assert_eq!(pick_base_url(None, Some(&file)), "https://file.example/graphql");
    }

    #[test]
    fn blank_or_missing_urls_fall_back_to_default() {
        let blank = RuntimeConfig {
            api_base_url: Some("   ".into()),
            time_zone: None,
        };
        assert_eq!(pick_base_url(None, Some(&blank)), DEFAULT_API_BASE_URL);
        assert_eq!(pick_base_url(None, None), DEFAULT_API_BASE_URL);
    }

    #[test]
    fn time_zone_parsing_falls_back_to_utc() {
        assert_eq!(parse_time_zone(Some("Asia/Manila")), chrono_tz::Asia::Manila);
        assert_eq!(parse_time_zone(Some("Mars/Olympus")), Tz::UTC);
        assert_eq!(parse_time_zone(None), Tz::UTC);
    }

    #[test]
    fn runtime_config_reads_partial_json() {
        let cfg: RuntimeConfig =
            serde_json::from_str(r#"{ "api_base_url": "https://api.example/graphql" }"#).unwrap();
        assert_eq!(cfg.api_base_url.as_deref(), Some("https://api.example/graphql"));
        assert!(cfg.time_zone.is_none());
    }
}
