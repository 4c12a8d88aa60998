use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate, NaiveTime, TimeDelta, Timelike};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Error, Instant};

/// 区間を列挙するときの刻み幅
///
/// トークンは `Y`, `M`, `W`, `D`, `h`, `m`, `s`, `ms`, `us`, `ns`, `ps`, `fs`, `as`。
/// `ps` 以下は認識するが、時刻がナノ秒分解能のため列挙には使えない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Unit {
    Year,
    Month,
    Week,
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
    Microsecond,
    Nanosecond,
    Picosecond,
    Femtosecond,
    Attosecond,
}

/// 刻み幅として解釈できる値を [`Unit`] に正規化するトレイト
pub trait IntoUnit {
    fn into_unit(self) -> Result<Unit, Error>;
}

impl IntoUnit for Unit {
    fn into_unit(self) -> Result<Unit, Error> {
        Ok(self)
    }
}

impl IntoUnit for &str {
    fn into_unit(self) -> Result<Unit, Error> {
        self.parse()
    }
}

impl Unit {
    pub fn token(&self) -> &'static str {
        match self {
            Unit::Year => "Y",
            Unit::Month => "M",
            Unit::Week => "W",
            Unit::Day => "D",
            Unit::Hour => "h",
            Unit::Minute => "m",
            Unit::Second => "s",
            Unit::Millisecond => "ms",
            Unit::Microsecond => "us",
            Unit::Nanosecond => "ns",
            Unit::Picosecond => "ps",
            Unit::Femtosecond => "fs",
            Unit::Attosecond => "as",
        }
    }

    /// 1日未満の刻み幅のナノ秒数
    fn sub_day_nanos(&self) -> Option<i64> {
        match self {
            Unit::Hour => Some(3_600_000_000_000),
            Unit::Minute => Some(60_000_000_000),
            Unit::Second => Some(1_000_000_000),
            Unit::Millisecond => Some(1_000_000),
            Unit::Microsecond => Some(1_000),
            Unit::Nanosecond => Some(1),
            _ => None,
        }
    }

    fn check_resolution(&self) -> Result<(), Error> {
        match self {
            Unit::Picosecond | Unit::Femtosecond | Unit::Attosecond => {
                Err(Error::UnsupportedResolution {
                    unit: self.token().to_string(),
                })
            }
            _ => Ok(()),
        }
    }

    /// 時刻をこの単位の境界に切り捨てる
    ///
    /// 週はUnixエポック(1970-01-01)から数えた7日ごとの境界に揃える。
    pub fn truncate(&self, t: Instant) -> Result<Instant, Error> {
        self.check_resolution()?;
        let date = t.date();
        let truncated_date = match self {
            Unit::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1),
            Unit::Month => date.with_day(1),
            Unit::Week => {
                let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).ok_or(Error::TimestampOverflow)?;
                let weeks = (date - epoch).num_days().div_euclid(7);
                epoch.checked_add_signed(TimeDelta::days(weeks * 7))
            }
            Unit::Day => Some(date),
            _ => {
                let step = self.sub_day_nanos().ok_or(Error::TimestampOverflow)?;
                // うるう秒のナノ秒(>= 1e9)は直前の秒に丸める
                let nanos_of_day = t.num_seconds_from_midnight() as i64 * 1_000_000_000
                    + (t.nanosecond() % 1_000_000_000) as i64;
                let floor = nanos_of_day - nanos_of_day % step;
                return date
                    .and_time(NaiveTime::MIN)
                    .checked_add_signed(TimeDelta::nanoseconds(floor))
                    .ok_or(Error::TimestampOverflow);
            }
        };
        truncated_date
            .map(|d| d.and_time(NaiveTime::MIN))
            .ok_or(Error::TimestampOverflow)
    }

    /// 時刻をこの単位だけ進める
    pub fn step(&self, t: Instant) -> Result<Instant, Error> {
        self.check_resolution()?;
        let next = match self {
            Unit::Year => t.checked_add_months(Months::new(12)),
            Unit::Month => t.checked_add_months(Months::new(1)),
            Unit::Week => t.checked_add_signed(TimeDelta::weeks(1)),
            Unit::Day => t.checked_add_signed(TimeDelta::days(1)),
            _ => self
                .sub_day_nanos()
                .and_then(|n| t.checked_add_signed(TimeDelta::nanoseconds(n))),
        };
        next.ok_or(Error::TimestampOverflow)
    }

    /// `[start, end)` を単位の境界に切り捨てたうえで、1単位ずつ列挙する
    pub(crate) fn range(&self, start: Instant, end: Instant) -> Result<Vec<Instant>, Error> {
        let stop = self.truncate(end)?;
        let mut current = self.truncate(start)?;
        let mut out = Vec::new();
        while current < stop {
            out.push(current);
            current = self.step(current)?;
        }
        Ok(out)
    }
}

impl FromStr for Unit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unit = match s {
            "Y" => Unit::Year,
            "M" => Unit::Month,
            "W" => Unit::Week,
            "D" => Unit::Day,
            "h" => Unit::Hour,
            "m" => Unit::Minute,
            "s" => Unit::Second,
            "ms" => Unit::Millisecond,
            "us" => Unit::Microsecond,
            "ns" => Unit::Nanosecond,
            "ps" => Unit::Picosecond,
            "fs" => Unit::Femtosecond,
            "as" => Unit::Attosecond,
            other => {
                return Err(Error::InvalidUnit {
                    unit: other.to_string(),
                });
            }
        };
        Ok(unit)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
