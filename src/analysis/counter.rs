//! 保持首次出现顺序的计数器
//!
//! 排行使用稳定排序，计数相同的键按首次出现的先后排列。
//! 相等比较只看键和计数，与出现顺序无关。
//! [`SampleMap`] 按同样的规则保存分组的数值序列。

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

#[derive(Debug, Clone)]
pub struct Counter<K> {
    entries: Vec<(K, u64)>,
    index: HashMap<K, usize>,
}

impl<K> Default for Counter<K> {
    fn default() -> Self {
        Self { entries: Vec::new(), index: HashMap::new() }
    }
}

impl<K: Eq + Hash + Clone> Counter<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 计数加一
    pub fn increment(&mut self, key: K) {
        self.add(key, 1);
    }

    /// 计数增加 `n`
    pub fn add(&mut self, key: K, n: u64) {
        if let Some(&pos) = self.index.get(&key) {
            self.entries[pos].1 += n;
        } else {
            self.index.insert(key.clone(), self.entries.len());
            self.entries.push((key, n));
        }
    }

    /// 查询计数，不存在时为 0
    pub fn get<Q>(&self, key: &Q) -> u64
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(key).map_or(0, |&pos| self.entries[pos].1)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 所有计数之和
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, n)| n).sum()
    }

    /// 按首次出现顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = (&K, u64)> {
        self.entries.iter().map(|(k, n)| (k, *n))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// 按计数降序排列，计数相同保持首次出现顺序
    pub fn ranked(&self) -> Vec<(&K, u64)> {
        let mut ranked: Vec<(&K, u64)> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    /// 取计数最高的前 `n` 项
    pub fn top(&self, n: usize) -> Vec<(&K, u64)> {
        let mut ranked = self.ranked();
        ranked.truncate(n);
        ranked
    }
}

impl<K: Eq + Hash + Clone> PartialEq for Counter<K> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.iter().all(|(k, n)| other.get(k) == n)
    }
}

impl<K: Eq + Hash + Clone> Eq for Counter<K> {}

impl<K: Eq + Hash + Clone> FromIterator<K> for Counter<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut counter = Self::new();
        for key in iter {
            counter.increment(key);
        }
        counter
    }
}

impl<K: Serialize> Serialize for Counter<K> {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, n) in &self.entries {
            map.serialize_entry(k, n)?;
        }
        map.end()
    }
}

/// 保持首次出现顺序的分组序列：键 → 按到达顺序排列的数值
///
/// 与 [`Counter`] 一样，相等比较与键的出现顺序无关。
#[derive(Debug, Clone)]
pub struct SampleMap<K> {
    entries: Vec<(K, Vec<f64>)>,
    index: HashMap<K, usize>,
}

impl<K> Default for SampleMap<K> {
    fn default() -> Self {
        Self { entries: Vec::new(), index: HashMap::new() }
    }
}

impl<K: Eq + Hash + Clone> SampleMap<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 在键对应的序列末尾追加一个值
    pub fn push(&mut self, key: K, value: f64) {
        if let Some(&pos) = self.index.get(&key) {
            self.entries[pos].1.push(value);
        } else {
            self.index.insert(key.clone(), self.entries.len());
            self.entries.push((key, vec![value]));
        }
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&[f64]>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(key).map(|&pos| self.entries[pos].1.as_slice())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 按首次出现顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = (&K, &[f64])> {
        self.entries.iter().map(|(k, v)| (k, v.as_slice()))
    }
}

impl<K: Eq + Hash + Clone> PartialEq for SampleMap<K> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K: Serialize> Serialize for SampleMap<K> {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
