//! 現在時刻の供給源
//!
//! 現在時刻を必要とする処理はすべて [`Clock`] を引数に取り、グローバルな時計を参照しない。

use std::cell::Cell;

use chrono::{Local, TimeDelta};

use crate::Instant;

/// 現在時刻を返すトレイト
pub trait Clock {
    fn now(&self) -> Instant;
}

/// OSの壁時計（ローカル時刻）
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Local::now().naive_local()
    }
}

/// 手動で進める時計
///
/// テストで時刻を固定するために使う。
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Cell<Instant>,
}

impl ManualClock {
    pub fn new(start: Instant) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn set(&self, t: Instant) {
        self.now.set(t);
    }

    /// 時刻を `delta` だけ進める。表現範囲を超える場合は動かさない
    pub fn advance(&self, delta: TimeDelta) {
        if let Some(next) = self.now.get().checked_add_signed(delta) {
            self.now.set(next);
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }
}
