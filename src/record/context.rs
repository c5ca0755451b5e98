//! 上下文字段解析
//!
//! 应用日志行尾的 `[...]` 中是空格分隔的 `key=value` 片段，例如
//! `path=/upload user=alice size=1024`。这里的规则独立于外层行格式：
//!
//! - 以空白切分片段，每个片段在第一个 `=` 处拆成键和值；
//! - 不含 `=` 的片段忽略；
//! - 同名键以第一次出现为准。

/// 解析后的上下文字段，保持出现顺序
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ContextFields<'a> {
    fields: Vec<(&'a str, &'a str)>,
}

impl<'a> ContextFields<'a> {
    /// 解析上下文文本
    pub fn parse(context: &'a str) -> Self {
        let fields = context
            .split_whitespace()
            .filter_map(|token| token.split_once('='))
            .collect();
        Self { fields }
    }

    /// 获取键对应的值，值为空时视为不存在
    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.fields
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
            .filter(|v| !v.is_empty())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a str)> + '_ {
        self.fields.iter().copied()
    }
}
