//! Winget 相关数据类型定义

/// 一次查询从表头行推导出的列宽布局（以字符数计，不是字节数）
///
/// 宽度取相邻表头词起点之差，对该次查询的所有数据行生效。
/// 查询结束即丢弃，不跨查询复用。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnLayout {
    pub name_width: usize,
    pub id_width: usize,
    pub version_width: usize,
    pub match_width: usize,
    /// 表头是否为 6 词变体（额外切出 match / source 两列）
    pub six_columns: bool,
}

/// 一条解析出的候选包记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRecord {
    pub name: String,
    /// 安装用的唯一包 ID，原样传给 winget install
    pub id: String,
    pub version: String,
    /// 仅在 6 词表头变体下有内容
    pub match_field: String,
    pub source: String,
}

/// 展示给宿主的可选条目
///
/// 动作以数据形式携带而不是闭包，由宿主在选中时再构造实际调用。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultEntry {
    pub title: String,
    pub subtitle: String,
    pub icon_path: String,
    pub action: EntryAction,
}

/// 条目绑定的动作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryAction {
    /// 调用 winget install <id>
    Install { id: String },
    /// 在默认浏览器中打开页面（空查询的兜底动作）
    OpenBrowser { url: String },
}
