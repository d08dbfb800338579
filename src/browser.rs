//! 默认浏览器发现与打开（空查询兜底动作的执行端）

use anyhow::{anyhow, Result};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// 浏览器信息缓存的刷新间隔
const REFRESH_INTERVAL: Duration = Duration::from_secs(300);

/// 探测不到默认浏览器时展示的名称
pub const FALLBACK_BROWSER_NAME: &str = "Microsoft Edge";

/// 默认浏览器信息的惰性缓存
///
/// 只缓存展示名；实际打开动作交给各平台的系统入口
/// （xdg-open / open / cmd start），除非配置里给了覆盖命令。
#[derive(Debug, Clone)]
pub struct BrowserCache {
    /// 配置中的覆盖命令，空串表示走系统默认入口
    override_command: String,
    name: String,
    refreshed_at: Option<Instant>,
}

impl BrowserCache {
    pub fn new(override_command: &str) -> Self {
        BrowserCache {
            override_command: override_command.to_string(),
            name: String::new(),
            refreshed_at: None,
        }
    }

    /// 距上次刷新超过间隔时重新探测默认浏览器
    pub fn update_if_time_passed(&mut self) {
        let due = match self.refreshed_at {
            Some(at) => at.elapsed() >= REFRESH_INTERVAL,
            None => true,
        };
        if due {
            self.name = detect_browser_name(&self.override_command);
            self.refreshed_at = Some(Instant::now());
        }
    }

    /// 展示名，探测失败时退回固定名称
    pub fn name(&self) -> &str {
        if self.name.is_empty() {
            FALLBACK_BROWSER_NAME
        } else {
            &self.name
        }
    }

    /// 在默认浏览器中打开 url
    ///
    /// 这是唯一显式上报失败的路径：启动失败以 Err 返回给调用方。
    pub fn open(&self, url: &str) -> Result<()> {
        let mut cmd = if !self.override_command.is_empty() {
            let mut c = Command::new(&self.override_command);
            c.arg(url);
            c
        } else if cfg!(target_os = "macos") {
            let mut c = Command::new("open");
            c.arg(url);
            c
        } else if cfg!(windows) {
            let mut c = Command::new("cmd");
            c.args(["/C", "start", "", url]);
            c
        } else {
            let mut c = Command::new("xdg-open");
            c.arg(url);
            c
        };
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        cmd.spawn()
            .map_err(|e| anyhow!("打开浏览器失败: {}", e))?;
        Ok(())
    }
}

/// 探测默认浏览器的展示名
///
/// Linux 下问 xdg-settings，去掉 .desktop 后缀；
/// 其它平台（或探测失败）返回空串，由调用方退回固定名称。
fn detect_browser_name(override_command: &str) -> String {
    if !override_command.is_empty() {
        return override_command.to_string();
    }
    if cfg!(target_os = "linux") {
        let output = Command::new("xdg-settings")
            .args(["get", "default-web-browser"])
            .output();
        if let Ok(o) = output {
            if o.status.success() {
                let desktop = String::from_utf8_lossy(&o.stdout).trim().to_string();
                return desktop.trim_end_matches(".desktop").to_string();
            }
        }
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_falls_back_when_unknown() {
        let cache = BrowserCache::new("");
        assert_eq!(cache.name(), FALLBACK_BROWSER_NAME);
    }

    #[test]
    fn override_command_becomes_display_name() {
        let mut cache = BrowserCache::new("firefox");
        cache.update_if_time_passed();
        assert_eq!(cache.name(), "firefox");
    }

    #[test]
    fn refresh_is_rate_limited() {
        let mut cache = BrowserCache::new("firefox");
        cache.update_if_time_passed();
        let first = cache.refreshed_at;
        cache.update_if_time_passed();
        assert_eq!(first, cache.refreshed_at);
    }

    #[test]
    fn open_with_missing_override_reports_error() {
        let cache = BrowserCache::new("lian-winget-no-such-browser");
        assert!(cache.open("https://winget.run/").is_err());
    }
}
