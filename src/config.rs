use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 包搜索命令，默认 winget
    pub tool_command: String,
    /// 控制台输出编码标签（gbk / windows-1252 等），空串表示自动探测
    pub output_encoding: String,
    /// 浏览器命令覆盖，空串表示使用系统默认浏览器
    pub browser_command: String,
    /// 输入看起来像 URI 时不在全局结果中展示
    pub not_global_if_uri: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tool_command: "winget".to_string(),
            output_encoding: String::new(),
            browser_command: String::new(),
            not_global_if_uri: false,
        }
    }
}

impl Config {
    pub fn load_or_default() -> Result<Self> {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        let config_path = PathBuf::from(home).join(".config/lian-winget/config.toml");

        if config_path.exists() {
            let content = fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_winget() {
        let config = Config::default();
        assert_eq!(config.tool_command, "winget");
        assert!(config.output_encoding.is_empty());
        assert!(!config.not_global_if_uri);
    }

    #[test]
    fn partial_toml_fills_missing_fields() {
        let config: Config = toml::from_str("tool_command = \"winget-alt\"").unwrap();
        assert_eq!(config.tool_command, "winget-alt");
        assert!(config.browser_command.is_empty());
    }
}
