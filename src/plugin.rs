//! 宿主适配层 — 把查询文本变成可选条目
//!
//! 原实现散落在全局字段里的状态（图标路径、浏览器缓存、设置）
//! 集中到 Plugin 上下文对象里；输出到条目的变换保持纯函数，
//! 不依赖宿主状态即可单独测试。

use crate::browser::BrowserCache;
use crate::config::Config;
use crate::winget::{parser, EntryAction, ResultEntry, Winget};
use anyhow::Result;

/// 空查询兜底动作打开的 winget 包索引页
pub const WINGET_WEB_URL: &str = "https://winget.run/";

/// 宿主主题
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
    HighContrastWhite,
    HighContrastBlack,
}

fn icon_path_for(theme: Theme) -> &'static str {
    match theme {
        Theme::Light | Theme::HighContrastWhite => "Images/winget.light.png",
        Theme::Dark | Theme::HighContrastBlack => "Images/winget.dark.png",
    }
}

/// 宿主下发的插件设置
#[derive(Debug, Clone, Default)]
pub struct PluginSettings {
    /// 输入看起来像 URI 时不在全局结果中展示
    pub not_global_if_uri: bool,
}

/// 插件上下文
///
/// 每次查询是独立的同步调用：阻塞到 winget 退出并解析完为止，
/// 期间不触碰任何共享可变状态；跨查询只保留图标路径和浏览器缓存。
pub struct Plugin {
    winget: Winget,
    settings: PluginSettings,
    icon_path: String,
    browser: BrowserCache,
}

impl Plugin {
    /// 宿主初始化钩子
    pub fn init(winget: Winget, config: &Config) -> Self {
        let mut browser = BrowserCache::new(&config.browser_command);
        browser.update_if_time_passed();
        Plugin {
            winget,
            settings: PluginSettings {
                not_global_if_uri: config.not_global_if_uri,
            },
            icon_path: icon_path_for(Theme::Dark).to_string(),
            browser,
        }
    }

    /// 查询入口
    ///
    /// 空白查询不调用 winget，只返回一条打开浏览器的兜底条目；
    /// 否则同步执行搜索并把输出解析成条目列表，顺序与 winget
    /// 自身排序一致。
    pub fn query(&mut self, search: &str) -> Vec<ResultEntry> {
        if search.trim().is_empty() {
            return vec![self.fallback_entry()];
        }
        let raw = self.winget.search_raw(search);
        entries_from_output(&raw, &self.icon_path)
    }

    /// 执行条目动作
    ///
    /// 安装是即发即忘；打开浏览器是唯一显式上报失败的路径，
    /// 失败会记进日志并以 Err 交给宿主弹提示。
    pub fn run_action(&mut self, action: &EntryAction) -> Result<()> {
        match action {
            EntryAction::Install { id } => {
                self.winget.install(id);
                Ok(())
            }
            EntryAction::OpenBrowser { url } => self.browser.open(url).map_err(|e| {
                log::error!("无法在 {} 中打开 {}: {}", self.browser.name(), url, e);
                e
            }),
        }
    }

    /// 宿主重载钩子：按需刷新浏览器缓存
    pub fn reload_data(&mut self) {
        self.browser.update_if_time_passed();
    }

    /// 设置更新钩子
    pub fn update_settings(&mut self, not_global_if_uri: bool) {
        self.settings.not_global_if_uri = not_global_if_uri;
    }

    pub fn not_global_if_uri(&self) -> bool {
        self.settings.not_global_if_uri
    }

    /// 主题切换钩子
    pub fn on_theme_changed(&mut self, theme: Theme) {
        self.icon_path = icon_path_for(theme).to_string();
    }

    /// 宿主卸载钩子；上下文对象没有外部订阅要解除
    pub fn dispose(&mut self) {}

    fn fallback_entry(&self) -> ResultEntry {
        ResultEntry {
            title: "搜索 winget 软件包".to_string(),
            subtitle: format!("在 {} 中打开", self.browser.name()),
            icon_path: self.icon_path.clone(),
            action: EntryAction::OpenBrowser {
                url: WINGET_WEB_URL.to_string(),
            },
        }
    }
}

/// 原始输出到条目列表的纯变换
///
/// 标题沿用 `name (id)` 格式；动作只携带 id 数据，
/// 实际安装调用由宿主在选中时构造。
pub fn entries_from_output(raw: &str, icon_path: &str) -> Vec<ResultEntry> {
    parser::parse_search_output(raw)
        .into_iter()
        .map(|record| ResultEntry {
            title: format!("{} ({})", record.name, record.id),
            subtitle: String::new(),
            icon_path: icon_path.to_string(),
            action: EntryAction::Install { id: record.id },
        })
        .collect()
}
