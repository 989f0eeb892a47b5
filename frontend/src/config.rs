use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_TIME_ZONE: Tz = chrono_tz::Asia::Ho_Chi_Minh;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub api_base_url: Option<String>,
    pub time_zone: Option<String>,
}

impl RuntimeConfig {
    /// Field-wise merge; values already set on `self` win.
    pub fn or(self, fallback: RuntimeConfig) -> RuntimeConfig {
        RuntimeConfig {
            api_base_url: self.api_base_url.or(fallback.api_base_url),
            time_zone: self.time_zone.or(fallback.time_zone),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub api_base_url: String,
    pub time_zone: Tz,
}

static API_BASE_URL: OnceLock<String> = OnceLock::new();
static TIME_ZONE: OnceLock<Tz> = OnceLock::new();

pub fn parse_time_zone(name: &str) -> Option<Tz> {
    name.trim().parse::<Tz>().ok()
}

pub fn resolve(cfg: RuntimeConfig) -> ResolvedConfig {
    let api_base_url = cfg
        .api_base_url
        .map(|url| url.trim().trim_end_matches('/').to_string())
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
    let time_zone = match cfg.time_zone.as_deref() {
        Some(name) => parse_time_zone(name).unwrap_or_else(|| {
            log::warn!(
                "Unknown time zone `{}`; falling back to {}",
                name,
                DEFAULT_TIME_ZONE
            );
            DEFAULT_TIME_ZONE
        }),
        None => DEFAULT_TIME_ZONE,
    };
    ResolvedConfig {
        api_base_url,
        time_zone,
    }
}

fn cache(resolved: &ResolvedConfig) -> String {
    let _ = TIME_ZONE.set(resolved.time_zone);
    API_BASE_URL.get_or_init(|| resolved.api_base_url.clone()).clone()
}

#[cfg(target_arch = "wasm32")]
mod globals {
    use super::RuntimeConfig;
    use wasm_bindgen::JsValue;

    fn string_field(obj: &JsValue, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|key| {
            js_sys::Reflect::get(obj, &JsValue::from_str(key))
                .ok()
                .and_then(|v| v.as_string())
        })
    }

    fn read_global(name: &str) -> Option<RuntimeConfig> {
        let w = web_sys::window()?;
        let any = js_sys::Reflect::get(&w, &JsValue::from_str(name)).ok()?;
        if any.is_undefined() || any.is_null() {
            return None;
        }
        Some(RuntimeConfig {
            api_base_url: string_field(&any, &["API_BASE_URL", "api_base_url"]),
            time_zone: string_field(&any, &["TIME_ZONE", "time_zone"]),
        })
    }

    // window.__FACTORY_ENV (env.js) takes precedence over window.__FACTORY_CONFIG.
    pub fn snapshot() -> RuntimeConfig {
        read_global("__FACTORY_ENV")
            .unwrap_or_default()
            .or(read_global("__FACTORY_CONFIG").unwrap_or_default())
    }

    pub fn write_window_config(cfg: &RuntimeConfig) {
        let Some(w) = web_sys::window() else {
            return;
        };
        let obj = js_sys::Object::new();
        if let Some(url) = &cfg.api_base_url {
            let _ = js_sys::Reflect::set(&obj, &"api_base_url".into(), &JsValue::from_str(url));
        }
        if let Some(tz) = &cfg.time_zone {
            let _ = js_sys::Reflect::set(&obj, &"time_zone".into(), &JsValue::from_str(tz));
        }
        let _ = js_sys::Reflect::set(&w, &"__FACTORY_CONFIG".into(), &obj);
    }

    pub async fn fetch_runtime_config() -> Option<RuntimeConfig> {
        let origin = web_sys::window()?.location().origin().ok()?;
        let resp = reqwest::get(format!("{}/config.json", origin)).await.ok()?;
        if !resp.status().is_success() {
            return None;
        }
        resp.json::<RuntimeConfig>().await.ok()
    }
}

#[cfg(target_arch = "wasm32")]
async fn load_runtime_config() -> RuntimeConfig {
    let snapshot = globals::snapshot();
    if snapshot.api_base_url.is_some() && snapshot.time_zone.is_some() {
        return snapshot;
    }
    match globals::fetch_runtime_config().await {
        Some(fetched) => {
            let merged = snapshot.or(fetched);
            globals::write_window_config(&merged);
            merged
        }
        None => snapshot,
    }
}

#[cfg(not(target_arch = "wasm32"))]
async fn load_runtime_config() -> RuntimeConfig {
    RuntimeConfig::default()
}

pub async fn await_api_base_url() -> String {
    if let Some(cached) = API_BASE_URL.get() {
        return cached.clone();
    }
    let resolved = resolve(load_runtime_config().await);
    cache(&resolved)
}

pub fn current_time_zone() -> Tz {
    TIME_ZONE.get().copied().unwrap_or(DEFAULT_TIME_ZONE)
}

pub async fn init() {
    let base = await_api_base_url().await;
    log::info!(
        "Runtime config initialized (api: {}, tz: {})",
        base,
        current_time_zone()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_uses_defaults_for_empty_config() {
        let resolved = resolve(RuntimeConfig::default());
        assert_eq!(resolved.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(resolved.time_zone, DEFAULT_TIME_ZONE);
    }

    #[test]
    fn resolve_trims_trailing_slash_and_parses_zone() {
        let resolved = resolve(RuntimeConfig {
            api_base_url: Some("https://erp.example.com/api/".into()),
            time_zone: Some("Asia/Tokyo".into()),
        });
        assert_eq!(resolved.api_base_url, "https://erp.example.com/api");
        assert_eq!(resolved.time_zone, chrono_tz::Asia::Tokyo);
    }

    #[test]
    fn resolve_falls_back_on_unknown_zone_and_blank_url() {
        let resolved = resolve(RuntimeConfig {
            api_base_url: Some("  ".into()),
            time_zone: Some("Mars/Olympus".into()),
        });
        assert_eq!(resolved.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(resolved.time_zone, DEFAULT_TIME_ZONE);
    }

    #[test]
    fn merge_prefers_left_hand_values() {
        let env = RuntimeConfig {
            api_base_url: Some("https://env/api".into()),
            time_zone: None,
        };
        let file = RuntimeConfig {
            api_base_url: Some("https://file/api".into()),
            time_zone: Some("UTC".into()),
        };
        let merged = env.or(file);
        assert_eq!(merged.api_base_url.as_deref(), Some("https://env/api"));
        assert_eq!(merged.time_zone.as_deref(), Some("UTC"));
    }

    #[test]
    fn runtime_config_deserializes_partial_json() {
        let cfg: RuntimeConfig =
            serde_json::from_str(r#"{ "api_base_url": "http://x/api" }"#).unwrap();
        assert_eq!(cfg.api_base_url.as_deref(), Some("http://x/api"));
        assert!(cfg.time_zone.is_none());
    }
}
