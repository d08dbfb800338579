use anyhow::Result;
use lian_winget::{config, plugin, winget};
use std::io::{IsTerminal, Write};

/// 解析用户输入的编号为条目下标，非数字或越界返回 None
fn select_index(line: &str, len: usize) -> Option<usize> {
    let n: usize = line.trim().parse().ok()?;
    if n >= 1 && n <= len {
        Some(n - 1)
    } else {
        None
    }
}

fn main() -> Result<()> {
    env_logger::init();

    // 加载配置
    let config = config::Config::load_or_default()?;

    // 探测不到命令时照常继续：查询会得到空结果而不是报错
    let tool = match winget::Winget::detect(&config.tool_command, &config.output_encoding) {
        Ok(tool) => tool,
        Err(e) => {
            log::warn!("{}", e);
            winget::Winget::new(&config.tool_command, &config.output_encoding)
        }
    };

    let mut plugin = plugin::Plugin::init(tool, &config);

    // 查询文本来自命令行参数，留空进入兜底路径
    let args: Vec<String> = std::env::args().skip(1).collect();
    let search = args.join(" ");

    let entries = plugin.query(&search);
    if entries.is_empty() {
        println!("没有匹配的软件包");
    } else {
        for (i, entry) in entries.iter().enumerate() {
            if entry.subtitle.is_empty() {
                println!("{:>3}. {}", i + 1, entry.title);
            } else {
                println!("{:>3}. {}  ({})", i + 1, entry.title, entry.subtitle);
            }
        }

        // 管道/脚本调用时只打印结果；交互终端才进入选择
        if std::io::stdin().is_terminal() {
            print!("选择编号执行 (回车跳过): ");
            std::io::stdout().flush()?;
            let mut line = String::new();
            std::io::stdin().read_line(&mut line)?;
            if let Some(i) = select_index(&line, entries.len()) {
                if let Err(e) = plugin.run_action(&entries[i].action) {
                    eprintln!("{}", e);
                }
            }
        }
    }

    plugin.dispose();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_accepts_in_range_numbers() {
        assert_eq!(select_index("1\n", 3), Some(0));
        assert_eq!(select_index(" 3 ", 3), Some(2));
    }

    #[test]
    fn selection_rejects_empty_junk_and_out_of_range() {
        assert_eq!(select_index("\n", 3), None);
        assert_eq!(select_index("abc", 3), None);
        assert_eq!(select_index("0", 3), None);
        assert_eq!(select_index("4", 3), None);
        assert_eq!(select_index("1", 0), None);
    }
}
