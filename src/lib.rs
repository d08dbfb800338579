//! lian-winget — winget 查询适配器
//!
//! 给定一段查询文本，同步调用 `winget search`，把它无分隔符、
//! 按空格对齐的表格输出解析成结构化记录，再交给宿主作为可选条目
//! 展示；空查询返回一条打开浏览器的兜底条目。
//! 宿主（启动器）通过 [`plugin::Plugin`] 接入。

pub mod browser;
pub mod config;
pub mod plugin;
pub mod winget;
