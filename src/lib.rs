/// 発生し得るすべてのエラーを`enum` 型として定義・集約。
mod error;

/// 時刻の内部表現と正規化、ナノ秒キーへの変換。
pub mod instant;

/// 負の無限大・正の無限大を含む時刻。
mod extended_time;

/// 半開区間 `[start, end)` とその演算。
mod interval;

/// 正規形で保持される区間の集合。
mod interval_set;

/// このライブライがサポートするストレージのTrait定義と実装
mod storage;

/// 時刻をキーとする順序付き連想配列。
mod temporal_index;

/// 現在時刻の供給源。
pub mod clock;

/// 待機と呼び出し間隔の制御。
#[cfg(not(target_arch = "wasm32"))]
pub mod pacing;

/// 営業日カレンダー。
pub mod calendar;

/// 立会時間の判定。
pub mod session;

pub use error::Error;
pub use extended_time::ExtendedTime;
pub use instant::{Instant, IntoInstant};
pub use interval::{Interval, IntervalRelation, IntoUnit, TimeSpan, Unit};
pub use interval_set::{IntervalSet, Intervals};
pub use temporal_index::{Direction, TemporalIndex};

pub use storage::Batch;
pub use storage::{KeyValueStore, OrderedKeyValueStore};

pub use calendar::{BusinessCalendar, HolidayCalendar, HolidayList, NoHolidays};
pub use clock::{Clock, ManualClock, SystemClock};
#[cfg(not(target_arch = "wasm32"))]
pub use pacing::{Pacer, PacerConfig};
pub use session::{SessionBook, SessionSchedule, TradingDay};
