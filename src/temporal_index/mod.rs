//! 時刻をキーとする順序付き連想配列
//!
//! 指定時刻に最も近いキーを、方向（以前・より前・以後・より後）を指定してO(log n)で引く。
//! キーはすべての入口で [`IntoInstant`] により正規化されるので、
//! 文字列で与えたキーと型付きの時刻で与えたキーは挿入後に区別できない。

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Bound;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    Error, Instant,
    instant::IntoInstant,
    storage::{Batch, OrderedKeyValueStore},
};

/// 最近傍検索の方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// `key <= t` のうち最大のキー
    AtOrBefore,
    /// `key < t` のうち最大のキー
    StrictlyBefore,
    /// `key >= t` のうち最小のキー
    AtOrAfter,
    /// `key > t` のうち最小のキー
    StrictlyAfter,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::AtOrBefore => "at or before",
            Direction::StrictlyBefore => "strictly before",
            Direction::AtOrAfter => "at or after",
            Direction::StrictlyAfter => "strictly after",
        };
        f.write_str(s)
    }
}

/// 時刻をキーとする順序付き連想配列
///
/// 反復順は常にキーの昇順。同じキーに再挿入すると値を上書きする。
#[derive(Debug, Clone)]
pub struct TemporalIndex<V, S = BTreeMap<Instant, V>>
where
    S: OrderedKeyValueStore<Instant, V>,
{
    store: S,
    _value: std::marker::PhantomData<V>,
}

impl<V> TemporalIndex<V> {
    pub fn new() -> Self {
        Self::open(BTreeMap::new())
    }
}

impl<V> Default for TemporalIndex<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, S> TemporalIndex<V, S>
where
    S: OrderedKeyValueStore<Instant, V>,
{
    ///OrderedKeyValueStoreが実装された型を開いて、操作可能な状態にする
    pub fn open(store: S) -> Self {
        Self {
            store,
            _value: std::marker::PhantomData,
        }
    }

    ///ストアを外に出す
    pub fn close(self) -> S {
        self.store
    }

    /// キーを正規化しながら (キー, 値) の列から作成する
    pub fn from_entries<K, I>(entries: I) -> Result<Self, Error>
    where
        K: IntoInstant,
        I: IntoIterator<Item = (K, V)>,
        S: Default,
    {
        let mut index = Self::open(S::default());
        for (key, value) in entries {
            index.insert(key, value)?;
        }
        Ok(index)
    }

    /// 値を挿入する。既存のキーなら上書きして古い値を返す
    pub fn insert<K: IntoInstant>(&mut self, key: K, value: V) -> Result<Option<V>, Error> {
        Ok(self.store.insert(key.into_instant()?, value))
    }

    pub fn get<K: IntoInstant>(&self, key: K) -> Result<Option<&V>, Error> {
        Ok(self.store.get(&key.into_instant()?))
    }

    pub fn remove<K: IntoInstant>(&mut self, key: K) -> Result<Option<V>, Error> {
        Ok(self.store.remove(&key.into_instant()?))
    }

    /// 複数の書き込みをまとめて適用する
    pub fn apply_batch(&mut self, batch: Batch<Instant, V>) {
        debug!(
            puts = batch.puts.len(),
            deletes = batch.deletes.len(),
            "applying batch to temporal index"
        );
        self.store.apply_batch(batch);
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// キーの昇順で反復する
    pub fn iter(&self) -> impl Iterator<Item = (Instant, &V)> {
        self.store.iter().map(|(k, v)| (*k, v))
    }

    pub fn first(&self) -> Option<(Instant, &V)> {
        self.store.first().map(|(k, v)| (*k, v))
    }

    pub fn last(&self) -> Option<(Instant, &V)> {
        self.store.last().map(|(k, v)| (*k, v))
    }

    /// 指定した方向で `t` に最も近いエントリを返す
    ///
    /// 条件を満たすキーがなければ [`Error::OutOfRange`] を返す。
    pub fn lookup<K: IntoInstant>(&self, direction: Direction, t: K) -> Result<(Instant, &V), Error> {
        let at = t.into_instant()?;
        let found = match direction {
            Direction::AtOrBefore => self.store.scan(..=at).next_back(),
            Direction::StrictlyBefore => self.store.scan(..at).next_back(),
            Direction::AtOrAfter => self.store.scan(at..).next(),
            Direction::StrictlyAfter => self
                .store
                .scan((Bound::Excluded(at), Bound::Unbounded))
                .next(),
        };
        found
            .map(|(k, v)| (*k, v))
            .ok_or(Error::OutOfRange { direction, at })
    }

    /// `t` 以前で最も新しいエントリ（「時刻 t 時点の値」）
    pub fn lookup_at_or_before<K: IntoInstant>(&self, t: K) -> Result<(Instant, &V), Error> {
        self.lookup(Direction::AtOrBefore, t)
    }

    /// `t` より前で最も新しいエントリ
    pub fn lookup_strictly_before<K: IntoInstant>(&self, t: K) -> Result<(Instant, &V), Error> {
        self.lookup(Direction::StrictlyBefore, t)
    }

    /// `t` 以後で最も古いエントリ
    pub fn lookup_at_or_after<K: IntoInstant>(&self, t: K) -> Result<(Instant, &V), Error> {
        self.lookup(Direction::AtOrAfter, t)
    }

    /// `t` より後で最も古いエントリ（「t の次の値」）
    pub fn lookup_strictly_after<K: IntoInstant>(&self, t: K) -> Result<(Instant, &V), Error> {
        self.lookup(Direction::StrictlyAfter, t)
    }

    /// キーが `[start, stop)` に入るエントリを借用したまま反復する
    ///
    /// `None` はそれぞれ先頭から・末尾まで。`start >= stop` なら何も返さない。
    pub fn range(
        &self,
        start: Option<Instant>,
        stop: Option<Instant>,
    ) -> impl Iterator<Item = (Instant, &V)> {
        let lower = start.map_or(Bound::Unbounded, Bound::Included);
        let upper = stop.map_or(Bound::Unbounded, Bound::Excluded);
        // BTreeMap::range は逆転した範囲でパニックするので先に弾く
        let inverted = matches!((start, stop), (Some(s), Some(e)) if s >= e);
        let entries = if inverted {
            None
        } else {
            Some(self.store.scan((lower, upper)))
        };
        entries.into_iter().flatten().map(|(k, v)| (*k, v))
    }

    /// キーが `[start, stop)` に入るエントリだけからなる新しいインデックスを返す
    pub fn slice<A: IntoInstant, B: IntoInstant>(&self, start: A, stop: B) -> Result<Self, Error>
    where
        V: Clone,
        S: Default,
    {
        Ok(self.slice_bounds(Some(start.into_instant()?), Some(stop.into_instant()?)))
    }

    /// `start` 以降のエントリ
    pub fn slice_from<A: IntoInstant>(&self, start: A) -> Result<Self, Error>
    where
        V: Clone,
        S: Default,
    {
        Ok(self.slice_bounds(Some(start.into_instant()?), None))
    }

    /// `stop` より前のエントリ
    pub fn slice_until<B: IntoInstant>(&self, stop: B) -> Result<Self, Error>
    where
        V: Clone,
        S: Default,
    {
        Ok(self.slice_bounds(None, Some(stop.into_instant()?)))
    }

    /// 正規化済みの境界でスライスする。`None` は端まで
    pub fn slice_bounds(&self, start: Option<Instant>, stop: Option<Instant>) -> Self
    where
        V: Clone,
        S: Default,
    {
        let mut store = S::default();
        for (k, v) in self.range(start, stop) {
            store.insert(k, v.clone());
        }
        Self::open(store)
    }
}

impl<V> FromIterator<(Instant, V)> for TemporalIndex<V> {
    fn from_iter<I: IntoIterator<Item = (Instant, V)>>(iter: I) -> Self {
        Self::open(iter.into_iter().collect())
    }
}
