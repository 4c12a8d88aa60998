//! 営業日カレンダー
//!
//! 土日・年末年始（12/31〜1/3）・祝日を休業日とする銀行カレンダー。
//! 祝日の判定は [`HolidayCalendar`] として外から与える。

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, TimeDelta, Weekday};

use crate::{Error, ExtendedTime, IntervalSet};

/// 営業日を探すときに遡る・進む日数の上限
const MAX_SEARCH_DAYS: u32 = 366;

/// 受渡日の計算がT+3からT+2に切り替わった日
const T_PLUS_TWO_FROM: NaiveDate = match NaiveDate::from_ymd_opt(2019, 7, 16) {
    Some(d) => d,
    None => NaiveDate::MIN,
};

/// 祝日かどうかを判定するトレイト
pub trait HolidayCalendar {
    fn is_holiday(&self, date: NaiveDate) -> bool;
}

/// 祝日なし
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHolidays;

impl HolidayCalendar for NoHolidays {
    fn is_holiday(&self, _date: NaiveDate) -> bool {
        false
    }
}

/// 日付の一覧で与える祝日
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidayList {
    dates: BTreeSet<NaiveDate>,
}

impl HolidayList {
    pub fn new<I: IntoIterator<Item = NaiveDate>>(dates: I) -> Self {
        Self {
            dates: dates.into_iter().collect(),
        }
    }
}

impl FromIterator<NaiveDate> for HolidayList {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl HolidayCalendar for HolidayList {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }
}

impl<F> HolidayCalendar for F
where
    F: Fn(NaiveDate) -> bool,
{
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self(date)
    }
}

/// 営業日の判定と営業日単位の日付計算
#[derive(Debug, Clone)]
pub struct BusinessCalendar<H = NoHolidays> {
    holidays: H,
}

impl Default for BusinessCalendar<NoHolidays> {
    fn default() -> Self {
        Self::new(NoHolidays)
    }
}

impl<H: HolidayCalendar> BusinessCalendar<H> {
    pub fn new(holidays: H) -> Self {
        Self { holidays }
    }

    pub fn holidays(&self) -> &H {
        &self.holidays
    }

    /// 土日祝または12/31〜1/3ならfalse
    pub fn is_business_day(&self, date: NaiveDate) -> bool {
        if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            return false;
        }
        if (date.month() == 12 && date.day() == 31) || (date.month() == 1 && date.day() <= 3) {
            return false;
        }
        !self.holidays.is_holiday(date)
    }

    /// `date` より後（`include_today` なら当日を含む）で最も近い営業日
    ///
    /// 1年以上営業日が見つからなければ `None`。
    pub fn next_business_day(&self, date: NaiveDate, include_today: bool) -> Option<NaiveDate> {
        let first = if include_today { date } else { date.succ_opt()? };
        self.search(first, |d| d.succ_opt())
    }

    /// `date` より前（`include_today` なら当日を含む）で最も近い営業日
    pub fn previous_business_day(&self, date: NaiveDate, include_today: bool) -> Option<NaiveDate> {
        let first = if include_today { date } else { date.pred_opt()? };
        self.search(first, |d| d.pred_opt())
    }

    fn search(
        &self,
        mut date: NaiveDate,
        step: impl Fn(NaiveDate) -> Option<NaiveDate>,
    ) -> Option<NaiveDate> {
        for _ in 0..MAX_SEARCH_DAYS {
            if self.is_business_day(date) {
                return Some(date);
            }
            date = step(date)?;
        }
        None
    }

    /// 約定日から受渡日を求める
    ///
    /// 2019-07-16より前の約定はT+3、以降はT+2。
    pub fn settlement_date(&self, trade_date: NaiveDate) -> Option<NaiveDate> {
        let days = if trade_date < T_PLUS_TWO_FROM { 3 } else { 2 };
        (0..days).try_fold(trade_date, |d, _| self.next_business_day(d, false))
    }

    /// 集合と1日でも重なる日のうち、営業日を昇順に返す
    pub fn business_days(&self, set: &IntervalSet) -> Result<Vec<NaiveDate>, Error> {
        if set.is_unbounded() {
            return Err(Error::UnboundedRange);
        }

        let mut days = BTreeSet::new();
        for interval in set {
            let (ExtendedTime::Finite(start), ExtendedTime::Finite(end)) =
                (interval.start(), interval.end())
            else {
                return Err(Error::UnboundedRange);
            };
            // 終点は含まないので、最後の日は end の直前が属する日
            let last = (end - TimeDelta::nanoseconds(1)).date();
            let mut date = start.date();
            while date <= last {
                if self.is_business_day(date) {
                    days.insert(date);
                }
                let Some(next) = date.succ_opt() else { break };
                date = next;
            }
        }
        Ok(days.into_iter().collect())
    }
}
