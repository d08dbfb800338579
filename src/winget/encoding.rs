//! 控制台输出编码归一化
//!
//! winget 按系统的传统代码页输出控制台文本（中文环境是 GBK，
//! 西欧环境是 Windows-1252），必须先统一转成 UTF-8，
//! 下游按字符数切分列才可靠。

use encoding_rs::{Encoding, GBK, WINDOWS_1252};

/// 将捕获的原始字节解码为 UTF-8 字符串
///
/// label 指定代码页标签（如 "gbk"、"windows-1252"），空串表示自动：
/// 先尝试严格 UTF-8，失败再退回按 locale 推断的传统代码页。
/// 解码永不失败：无法映射的字节替换为 U+FFFD，
/// 随后会被解析器的可打印 ASCII 过滤去掉。
pub fn decode_console_output(bytes: &[u8], label: &str) -> String {
    let bytes = strip_utf8_bom(bytes);

    if !label.is_empty() {
        if let Some(encoding) = Encoding::for_label(label.as_bytes()) {
            let (text, _, _) = encoding.decode(bytes);
            return text.into_owned();
        }
        log::warn!("未知的编码标签 {:?}，按自动探测处理", label);
    }

    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            let (text, _, _) = locale_fallback().decode(bytes);
            text.into_owned()
        }
    }
}

fn strip_utf8_bom(bytes: &[u8]) -> &[u8] {
    if bytes.len() >= 3 && bytes[..3] == [0xEF, 0xBB, 0xBF] {
        &bytes[3..]
    } else {
        bytes
    }
}

/// 按 locale 环境变量推断传统代码页，探测不到时退回 Windows-1252
fn locale_fallback() -> &'static Encoding {
    let locale = std::env::var("LC_ALL")
        .or_else(|_| std::env::var("LANG"))
        .unwrap_or_default()
        .to_ascii_lowercase();
    if locale.starts_with("zh") {
        GBK
    } else {
        WINDOWS_1252
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_utf8_passes_through() {
        assert_eq!(decode_console_output("PowerToys 微软".as_bytes(), ""), "PowerToys 微软");
    }

    #[test]
    fn explicit_gbk_label_decodes_legacy_bytes() {
        // "微软" 的 GBK 编码
        let bytes = [0xCE, 0xA2, 0xC8, 0xED];
        assert_eq!(decode_console_output(&bytes, "gbk"), "微软");
    }

    #[test]
    fn explicit_windows_1252_label() {
        assert_eq!(decode_console_output(&[0xE9], "windows-1252"), "é");
    }

    #[test]
    fn unknown_label_falls_back_to_auto() {
        assert_eq!(decode_console_output(b"plain ascii", "no-such-codepage"), "plain ascii");
    }

    #[test]
    fn bom_is_stripped() {
        let bytes = [0xEF, 0xBB, 0xBF, b'N', b'a', b'm', b'e'];
        assert_eq!(decode_console_output(&bytes, ""), "Name");
    }

    #[test]
    fn invalid_bytes_never_panic() {
        let bytes = [0xFF, 0xFE, 0x00, 0x80];
        let text = decode_console_output(&bytes, "");
        assert!(!text.is_empty());
    }
}
