use std::ops::RangeBounds;

pub mod btree_map;

/// 書き込み操作の塊
#[derive(Debug, Clone, Default)]
pub struct Batch<K, V> {
    pub puts: Vec<(K, V)>,
    pub deletes: Vec<K>,
}

impl<K, V> Batch<K, V> {
    pub fn new() -> Self {
        Self {
            puts: Vec::new(),
            deletes: Vec::new(),
        }
    }
    pub fn put(&mut self, key: K, value: V) {
        self.puts.push((key, value));
    }
    pub fn delete(&mut self, key: K) {
        self.deletes.push(key);
    }
    pub fn is_empty(&self) -> bool {
        self.puts.is_empty() && self.deletes.is_empty()
    }
}

pub trait KeyValueStore<K, V> {
    fn get(&self, key: &K) -> Option<&V>;

    fn batch_get(&self, keys: &[K]) -> Vec<Option<&V>> {
        keys.iter().map(|key| self.get(key)).collect()
    }

    /// 既存の値があれば上書きし、古い値を返す
    fn insert(&mut self, key: K, value: V) -> Option<V>;
    fn remove(&mut self, key: &K) -> Option<V>;

    /// 削除を先に、追加を後に適用する
    fn apply_batch(&mut self, batch: Batch<K, V>);
    fn iter<'a>(&'a self) -> Box<dyn Iterator<Item = (&'a K, &'a V)> + 'a>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// キーの順序で走査できるストア
///
/// 走査はO(log n)で開始位置を特定できることを前提とする。
pub trait OrderedKeyValueStore<K, V>: KeyValueStore<K, V> {
    fn scan<'a, R>(&'a self, range: R) -> Box<dyn DoubleEndedIterator<Item = (&'a K, &'a V)> + 'a>
    where
        R: RangeBounds<K>;

    fn first(&self) -> Option<(&K, &V)>;

    fn last(&self) -> Option<(&K, &V)>;
}
