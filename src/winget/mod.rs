//! winget 命令封装 — 搜索调用与安装动作

pub mod encoding;
pub mod parser;
pub mod types;

pub use types::{ColumnLayout, EntryAction, PackageRecord, ResultEntry};

use anyhow::{anyhow, Result};
use std::process::{Command, Stdio};

/// winget 命令封装
///
/// command 可在配置中覆盖（比如指向兼容的替代工具），
/// output_encoding 是控制台输出的代码页标签，空串表示自动探测。
#[derive(Debug, Clone)]
pub struct Winget {
    pub command: String,
    pub output_encoding: String,
}

impl Winget {
    pub fn new(command: impl Into<String>, output_encoding: impl Into<String>) -> Self {
        Winget {
            command: command.into(),
            output_encoding: output_encoding.into(),
        }
    }

    /// 确认命令在 PATH 上可用
    pub fn detect(command: &str, output_encoding: &str) -> Result<Self> {
        let probe = if cfg!(windows) { "where" } else { "which" };
        let found = Command::new(probe)
            .arg(command)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false);
        if found {
            Ok(Winget::new(command, output_encoding))
        } else {
            Err(anyhow!("未找到包搜索命令 {}", command))
        }
    }

    /// 同步执行 `<command> search <term>` 并返回归一化后的完整 stdout 文本
    ///
    /// 阻塞到子进程退出，不设超时。stderr 不捕获，也不检查退出码：
    /// 工具启动失败或无输出一律表现为空文本，由解析器自然走
    /// "无结果" 路径，不单独报错。搜索词作为单个参数原样传入，
    /// 不做 shell 转义（已知限制）。
    pub fn search_raw(&self, term: &str) -> String {
        let mut cmd = Command::new(&self.command);
        cmd.arg("search")
            .arg(term)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null());
        hide_console_window(&mut cmd);

        match cmd.output() {
            Ok(output) => {
                encoding::decode_console_output(&output.stdout, &self.output_encoding)
            }
            Err(e) => {
                log::warn!("启动 {} search 失败: {}", self.command, e);
                String::new()
            }
        }
    }

    /// 发起安装：`<command> install <id>`
    ///
    /// 即发即忘：不等待退出，也不观察成败。
    pub fn install(&self, id: &str) {
        let mut cmd = Command::new(&self.command);
        cmd.arg("install")
            .arg(id)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        hide_console_window(&mut cmd);

        if let Err(e) = cmd.spawn() {
            log::warn!("启动 {} install {} 失败: {}", self.command, id, e);
        }
    }
}

/// 不弹出控制台窗口（CREATE_NO_WINDOW）
#[cfg(windows)]
fn hide_console_window(cmd: &mut Command) {
    use std::os::windows::process::CommandExt;
    cmd.creation_flags(0x0800_0000);
}

#[cfg(not(windows))]
fn hide_console_window(_cmd: &mut Command) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_tool_yields_empty_output() {
        let winget = Winget::new("lian-winget-no-such-tool", "");
        assert_eq!(winget.search_raw("anything"), "");
    }

    #[test]
    fn detect_rejects_missing_tool() {
        assert!(Winget::detect("lian-winget-no-such-tool", "").is_err());
    }
}
