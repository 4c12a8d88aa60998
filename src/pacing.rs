//! 待機と呼び出し間隔の制御
//!
//! 状態は呼び出し側が所有する [`Pacer`] に持たせ、モジュール内にグローバルな状態を置かない。

use std::time::Duration;

use chrono::TimeDelta;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tokio::time::{Instant as TokioInstant, sleep, sleep_until};
use tracing::debug;

use crate::{Instant, clock::Clock};

/// 指定時間だけ待機する。0以下なら即座に戻る
pub async fn wait(delta: TimeDelta) {
    // 負の値は to_std が失敗する
    let Ok(duration) = delta.to_std() else {
        return;
    };
    if duration.is_zero() {
        return;
    }
    debug!(?duration, "waiting");
    sleep(duration).await;
}

/// `clock` の時刻で `target` になるまで待機する。すでに過ぎていれば即座に戻る
pub async fn wait_until<C: Clock>(clock: &C, target: Instant) {
    wait(target - clock.now()).await;
}

/// [`Pacer`] の設定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PacerConfig {
    /// 連続する呼び出しの最小間隔
    pub min_interval: Duration,
}

impl Default for PacerConfig {
    fn default() -> Self {
        Self {
            min_interval: Duration::from_secs(1),
        }
    }
}

/// 呼び出しが速すぎる場合に待機して間隔を空ける
///
/// 前回の [`Pacer::pace`] から `min_interval` が経っていなければ残りを待つ。
/// 初回は待たない。
#[derive(Debug, Clone)]
pub struct Pacer {
    config: PacerConfig,
    last_call: Option<TokioInstant>,
}

impl Pacer {
    pub fn new(config: PacerConfig) -> Self {
        Self {
            config,
            last_call: None,
        }
    }

    pub fn config(&self) -> &PacerConfig {
        &self.config
    }

    pub async fn pace(&mut self) {
        if let Some(last) = self.last_call {
            let deadline = last + self.config.min_interval;
            if deadline > TokioInstant::now() {
                debug!(
                    remaining = ?(deadline - TokioInstant::now()),
                    "pace too fast, waiting"
                );
                sleep_until(deadline).await;
            }
        }
        self.last_call = Some(TokioInstant::now());
    }
}

impl Default for Pacer {
    fn default() -> Self {
        Self::new(PacerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{clock::ManualClock, instant::IntoInstant};

    #[tokio::test(start_paused = true)]
    async fn test_wait_non_positive_returns_immediately() {
        let start = TokioInstant::now();
        wait(TimeDelta::zero()).await;
        wait(TimeDelta::seconds(-5)).await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_sleeps_for_duration() {
        let start = TokioInstant::now();
        wait(TimeDelta::milliseconds(1500)).await;
        assert!(start.elapsed() >= Duration::from_millis(1500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_until_uses_clock() {
        let clock = ManualClock::new("2024-01-01T09:00:00".into_instant().unwrap());
        let start = TokioInstant::now();

        wait_until(&clock, "2024-01-01T09:00:05".into_instant().unwrap()).await;
        assert!(start.elapsed() >= Duration::from_secs(5));

        let before = TokioInstant::now();
        wait_until(&clock, "2024-01-01T08:00:00".into_instant().unwrap()).await;
        assert_eq!(before.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pacer_spaces_calls() {
        let mut pacer = Pacer::new(PacerConfig {
            min_interval: Duration::from_secs(2),
        });
        let start = TokioInstant::now();

        pacer.pace().await;
        assert_eq!(start.elapsed(), Duration::ZERO);

        pacer.pace().await;
        assert!(start.elapsed() >= Duration::from_secs(2));

        // 十分に間が空いていれば待たない
        tokio::time::advance(Duration::from_secs(10)).await;
        let before = TokioInstant::now();
        pacer.pace().await;
        assert_eq!(before.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_default_config() {
        assert_eq!(PacerConfig::default().min_interval, Duration::from_secs(1));
        assert_eq!(Pacer::default().config().min_interval, Duration::from_secs(1));
    }
}
