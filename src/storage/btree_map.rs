use std::collections::BTreeMap;
use std::ops::RangeBounds;

use super::{Batch, KeyValueStore, OrderedKeyValueStore};

impl<K, V> KeyValueStore<K, V> for BTreeMap<K, V>
where
    K: Ord,
{
    fn get(&self, key: &K) -> Option<&V> {
        self.get(key)
    }

    fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.insert(key, value)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        self.remove(key)
    }

    fn apply_batch(&mut self, batch: Batch<K, V>) {
        for key in batch.deletes {
            self.remove(&key);
        }
        for (key, value) in batch.puts {
            self.insert(key, value);
        }
    }

    fn iter<'a>(&'a self) -> Box<dyn Iterator<Item = (&'a K, &'a V)> + 'a> {
        Box::new(self.iter())
    }

    fn len(&self) -> usize {
        self.len()
    }
}

impl<K, V> OrderedKeyValueStore<K, V> for BTreeMap<K, V>
where
    K: Ord,
{
    fn scan<'a, R>(&'a self, range: R) -> Box<dyn DoubleEndedIterator<Item = (&'a K, &'a V)> + 'a>
    where
        R: RangeBounds<K>,
    {
        Box::new(self.range(range))
    }

    fn first(&self) -> Option<(&K, &V)> {
        self.first_key_value()
    }

    fn last(&self) -> Option<(&K, &V)> {
        self.last_key_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_batch_deletes_before_puts() {
        let mut store: BTreeMap<u32, &str> = BTreeMap::new();
        KeyValueStore::insert(&mut store, 1, "a");
        KeyValueStore::insert(&mut store, 2, "b");

        let mut batch = Batch::new();
        batch.delete(1);
        batch.put(1, "c");
        batch.delete(2);
        store.apply_batch(batch);

        assert_eq!(KeyValueStore::len(&store), 1);
        assert_eq!(KeyValueStore::get(&store, &1), Some(&"c"));
        assert_eq!(store.batch_get(&[1, 2]), vec![Some(&"c"), None]);
    }

    #[test]
    fn test_scan_both_directions() {
        let store: BTreeMap<u32, u32> = (0..10).map(|k| (k, k * 10)).collect();

        let forward: Vec<_> = store.scan(3..6).map(|(k, _)| *k).collect();
        assert_eq!(forward, vec![3, 4, 5]);

        assert_eq!(store.scan(..=4).next_back(), Some((&4, &40)));
        assert_eq!(OrderedKeyValueStore::first(&store), Some((&0, &0)));
        assert_eq!(OrderedKeyValueStore::last(&store), Some((&9, &90)));
    }
}
