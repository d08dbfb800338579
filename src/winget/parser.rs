//! winget search 表格输出解析
//!
//! winget 的搜索结果是一张没有分隔符、靠空格对齐的文本表，
//! 列宽和表头文字都随语言环境变化。解析分两步：
//! 先从表头行推导列宽布局，再按字符偏移切分每一行数据。
//! 所有函数都是无状态的纯函数，解析失败一律就地降级，不向外抛错。

use super::types::{ColumnLayout, PackageRecord};
use regex::Regex;
use std::sync::OnceLock;

/// 字段初值，切分中途失败时未覆盖的字段保留该值
pub const FIELD_DEFAULT: &str = "_";

/// 行切分失败时写入 name 字段的诊断占位符
///
/// 失败行照常发出而不是丢弃，保证结果列表与 winget 自身输出逐行对应。
pub const PARSE_PLACEHOLDER: &str = "<解析失败>";

fn token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\S+").expect("字面量正则必然合法"))
}

/// 从表头行推导列宽布局
///
/// 按 `\S+` 分词并记录每个词的起始字符偏移：
/// - 5 词表头（Name / Id / Version / Match / Source）：
///   name、id、version 宽度依次取相邻词起点之差，match 宽度为 0；
/// - 6 词表头（某个列名被本地化成两个词）：同上并额外得到 match 宽度；
/// - 其它词数视为未知表头，返回全零布局，后续每行都会切出空字段
///   （软失败，不报错）。
///
/// 偏移必须按字符数计：本地化表头可能含非 ASCII 文字，
/// 字节偏移会和数据行的字符偏移错位。
pub fn header_layout(header: &str) -> ColumnLayout {
    let starts: Vec<usize> = token_regex()
        .find_iter(header)
        .map(|m| header[..m.start()].chars().count())
        .collect();

    let mut layout = ColumnLayout::default();
    match starts.len() {
        5 => {
            layout.name_width = starts[1] - starts[0];
            layout.id_width = starts[2] - starts[1];
            layout.version_width = starts[3] - starts[2];
        }
        6 => {
            layout.name_width = starts[1] - starts[0];
            layout.id_width = starts[2] - starts[1];
            layout.version_width = starts[3] - starts[2];
            layout.match_width = starts[4] - starts[3];
            layout.six_columns = true;
        }
        _ => {}
    }
    layout
}

/// 去掉可打印 ASCII（0x20-0x7E）之外的全部字符
///
/// winget 在部分语言环境下会混入制表绘线符号、省略号和带
/// 变音符号的字符，这些都会破坏按字符偏移的切分。
pub fn strip_to_printable(line: &str) -> String {
    line.chars()
        .filter(|c| ('\x20'..='\x7e').contains(c))
        .collect()
}

/// 按偏移取子串：起点越过行尾视为切分失败，终点越过行尾则截断。
/// 行已经过 strip_to_printable 过滤只含 ASCII，字节偏移即字符偏移。
fn slice(line: &str, start: usize, end: usize) -> Option<&str> {
    if start > line.len() {
        return None;
    }
    Some(&line[start..end.min(line.len())])
}

/// 依次切出各字段；任何一段起点越界即返回 None
fn fill_fields(line: &str, layout: &ColumnLayout, record: &mut PackageRecord) -> Option<()> {
    let name_end = layout.name_width;
    let id_end = name_end + layout.id_width;
    let version_end = id_end + layout.version_width;
    let match_end = version_end + layout.match_width;

    record.name = slice(line, 0, name_end)?.trim().to_string();
    record.id = slice(line, name_end, id_end)?.trim().to_string();
    record.version = slice(line, id_end, version_end)?.trim().to_string();
    if layout.six_columns {
        record.match_field = slice(line, version_end, match_end)?.trim().to_string();
        record.source = slice(line, match_end, line.len())?.trim().to_string();
    } else {
        record.match_field = String::new();
    }
    Some(())
}

/// 将一行数据按布局切分为 PackageRecord
///
/// 切分失败时 name 替换为诊断占位符，其余字段保留已切出的内容
/// 或初值，记录仍然发出。id 始终有值（最差是占位初值），
/// 因为它是后续安装动作的键。
pub fn slice_record(line: &str, layout: &ColumnLayout) -> PackageRecord {
    let mut record = PackageRecord {
        name: FIELD_DEFAULT.to_string(),
        id: FIELD_DEFAULT.to_string(),
        version: FIELD_DEFAULT.to_string(),
        match_field: FIELD_DEFAULT.to_string(),
        source: FIELD_DEFAULT.to_string(),
    };

    if fill_fields(line, layout, &mut record).is_none() {
        record.name = PARSE_PLACEHOLDER.to_string();
    }
    record
}

/// 解析 winget search 的完整输出为记录列表
///
/// 第 0 行是表头，第 1 行是表头下的分隔线，二者总是跳过。
/// 其余每个过滤后非空的行产出一条记录，顺序与 winget 自身排序一致。
/// 空输入或只有表头的输出自然得到空列表。
pub fn parse_search_output(output: &str) -> Vec<PackageRecord> {
    let lines: Vec<&str> = output.lines().collect();
    if lines.is_empty() {
        return Vec::new();
    }

    let layout = header_layout(lines[0]);

    let mut records = Vec::new();
    for line in lines.iter().skip(2) {
        let cleaned = strip_to_printable(line);
        if cleaned.is_empty() {
            continue;
        }
        records.push(slice_record(&cleaned, &layout));
    }

    records
}
