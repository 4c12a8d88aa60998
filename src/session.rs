//! 東証の立会時間
//!
//! 日付ごとに前場・後場の境界を求め、ある時刻が立会時間中か、昼休みかなどを判定する。
//! 2024-11-05の取引時間延長（大引け15:30、15:25からクロージング・オークション）の前後で
//! スケジュールが異なる。

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime, TimeDelta};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{
    ExtendedTime, Instant, Interval, IntervalSet,
    calendar::{BusinessCalendar, HolidayCalendar, NoHolidays},
};

const fn hm(hour: u32, minute: u32) -> NaiveTime {
    match NaiveTime::from_hms_opt(hour, minute, 0) {
        Some(t) => t,
        None => NaiveTime::MIN,
    }
}

/// 取引時間が延長された日
const EXTENDED_HOURS_FROM: NaiveDate = match NaiveDate::from_ymd_opt(2024, 11, 5) {
    Some(d) => d,
    None => NaiveDate::MIN,
};

/// 1日の立会時間の区切り
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SessionSchedule {
    /// 前場寄り
    pub morning_open: NaiveTime,
    /// 前場引け
    pub morning_close: NaiveTime,
    /// 後場寄り
    pub afternoon_open: NaiveTime,
    /// 大引け
    pub afternoon_close: NaiveTime,
    /// クロージング・オークションの開始。ない場合は `None`
    pub closing_auction: Option<NaiveTime>,
}

impl SessionSchedule {
    /// 2024-11-05より前のスケジュール（大引け15:00、オークションなし）
    pub fn legacy() -> Self {
        Self {
            afternoon_close: hm(15, 0),
            closing_auction: None,
            ..Self::default()
        }
    }

    /// 引け前の最後の区間の開始時刻
    ///
    /// クロージング・オークションがあればその開始、なければ大引けの5分前。
    pub fn final_phase_start(&self) -> NaiveTime {
        self.closing_auction
            .unwrap_or(self.afternoon_close - TimeDelta::minutes(5))
    }
}

impl Default for SessionSchedule {
    fn default() -> Self {
        Self {
            morning_open: hm(9, 0),
            morning_close: hm(11, 30),
            afternoon_open: hm(12, 30),
            afternoon_close: hm(15, 30),
            closing_auction: Some(hm(15, 25)),
        }
    }
}

/// 特定の日付の立会時間
///
/// 判定はすべて休業日ならfalseを返す。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradingDay {
    date: NaiveDate,
    is_business_day: bool,
    has_closing_auction: bool,
    morning_open: Instant,
    morning_close: Instant,
    afternoon_open: Instant,
    afternoon_close: Instant,
    final_phase_start: Instant,
}

impl TradingDay {
    pub fn new(date: NaiveDate, schedule: &SessionSchedule, is_business_day: bool) -> Self {
        Self {
            date,
            is_business_day,
            has_closing_auction: schedule.closing_auction.is_some(),
            morning_open: date.and_time(schedule.morning_open),
            morning_close: date.and_time(schedule.morning_close),
            afternoon_open: date.and_time(schedule.afternoon_open),
            afternoon_close: date.and_time(schedule.afternoon_close),
            final_phase_start: date.and_time(schedule.final_phase_start()),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn is_business_day(&self) -> bool {
        self.is_business_day
    }

    pub fn morning_open(&self) -> Instant {
        self.morning_open
    }

    pub fn morning_close(&self) -> Instant {
        self.morning_close
    }

    pub fn afternoon_open(&self) -> Instant {
        self.afternoon_open
    }

    pub fn afternoon_close(&self) -> Instant {
        self.afternoon_close
    }

    /// 前場寄りより前か（通常は境界を含まない）
    pub fn is_before_start(&self, t: Instant, inclusive: bool) -> bool {
        self.is_business_day && below(t, self.morning_open, inclusive)
    }

    /// 昼休み中か（通常は境界を含まない）
    pub fn is_lunch_break(&self, t: Instant, inclusive: bool) -> bool {
        self.is_business_day && between(self.morning_close, t, self.afternoon_open, inclusive)
    }

    /// 大引けより後か（通常は境界を含まない）
    pub fn is_after_end(&self, t: Instant, inclusive: bool) -> bool {
        self.is_business_day && below(self.afternoon_close, t, inclusive)
    }

    /// 前場または後場の立会時間中か（通常は境界を含む）
    pub fn is_trading_hours(&self, t: Instant, inclusive: bool) -> bool {
        self.is_business_day
            && (between(self.morning_open, t, self.morning_close, inclusive)
                || between(self.afternoon_open, t, self.afternoon_close, inclusive))
    }

    /// 引け前の最後の5分間か（通常は境界を含む）
    pub fn is_last_five_minutes(&self, t: Instant, inclusive: bool) -> bool {
        self.is_business_day
            && between(self.final_phase_start, t, self.afternoon_close, inclusive)
    }

    /// クロージング・オークション中か。オークションのない日は常にfalse
    pub fn is_closing_auction(&self, t: Instant, inclusive: bool) -> bool {
        self.has_closing_auction && self.is_last_five_minutes(t, inclusive)
    }

    /// 前場と後場を半開区間の集合として返す。休業日は空集合
    pub fn sessions(&self) -> IntervalSet {
        if !self.is_business_day {
            return IntervalSet::empty();
        }
        let session = |open: Instant, close: Instant| {
            Interval::new_unchecked(ExtendedTime::Finite(open), ExtendedTime::Finite(close))
        };
        IntervalSet::new([
            session(self.morning_open, self.morning_close),
            session(self.afternoon_open, self.afternoon_close),
        ])
    }
}

fn below(a: Instant, b: Instant, inclusive: bool) -> bool {
    if inclusive { a <= b } else { a < b }
}

fn between(low: Instant, t: Instant, high: Instant, inclusive: bool) -> bool {
    below(low, t, inclusive) && below(t, high, inclusive)
}

/// 日付ごとの [`TradingDay`] を作成して保持する
///
/// 2024-11-05より前の日付には [`SessionSchedule::legacy`] を使う。
#[derive(Debug, Clone)]
pub struct SessionBook<H = NoHolidays> {
    calendar: BusinessCalendar<H>,
    schedule: SessionSchedule,
    legacy: SessionSchedule,
    days: HashMap<NaiveDate, TradingDay>,
}

impl<H: HolidayCalendar> SessionBook<H> {
    pub fn new(calendar: BusinessCalendar<H>) -> Self {
        Self::with_schedules(calendar, SessionSchedule::default(), SessionSchedule::legacy())
    }

    pub fn with_schedules(
        calendar: BusinessCalendar<H>,
        schedule: SessionSchedule,
        legacy: SessionSchedule,
    ) -> Self {
        Self {
            calendar,
            schedule,
            legacy,
            days: HashMap::new(),
        }
    }

    pub fn calendar(&self) -> &BusinessCalendar<H> {
        &self.calendar
    }

    /// 日付に適用されるスケジュール
    pub fn schedule_for(&self, date: NaiveDate) -> &SessionSchedule {
        if date >= EXTENDED_HOURS_FROM {
            &self.schedule
        } else {
            &self.legacy
        }
    }

    /// 指定日の立会時間。初回だけ計算し、以降は保持したものを返す
    pub fn day(&mut self, date: NaiveDate) -> &TradingDay {
        if !self.days.contains_key(&date) {
            trace!(%date, "building trading day");
            let day = TradingDay::new(
                date,
                self.schedule_for(date),
                self.calendar.is_business_day(date),
            );
            self.days.insert(date, day);
        }
        &self.days[&date]
    }

    /// 時刻が属する日の立会時間
    pub fn day_of(&mut self, t: Instant) -> &TradingDay {
        self.day(t.date())
    }
}

impl Default for SessionBook<NoHolidays> {
    fn default() -> Self {
        Self::new(BusinessCalendar::default())
    }
}
