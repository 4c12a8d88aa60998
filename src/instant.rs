//! 時刻の内部表現と、外部から与えられる時刻の正規化。
//!
//! ライブラリの入口（区間の構築、インデックスへの挿入・検索・スライス）では必ず
//! [`IntoInstant`] を通して [`Instant`] に変換し、内部で文字列かどうかを分岐しない。

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

use crate::Error;

/// タイムゾーンを持たない時刻（ナノ秒分解能）
pub type Instant = NaiveDateTime;

/// 時刻として解釈できる値を [`Instant`] に正規化するトレイト
pub trait IntoInstant {
    fn into_instant(self) -> Result<Instant, Error>;
}

impl IntoInstant for NaiveDateTime {
    fn into_instant(self) -> Result<Instant, Error> {
        Ok(self)
    }
}

impl IntoInstant for &NaiveDateTime {
    fn into_instant(self) -> Result<Instant, Error> {
        Ok(*self)
    }
}

impl IntoInstant for NaiveDate {
    fn into_instant(self) -> Result<Instant, Error> {
        Ok(self.and_time(NaiveTime::MIN))
    }
}

/// タイムゾーン付きの時刻は、その地域の壁時計の値として扱う
impl<Tz: TimeZone> IntoInstant for DateTime<Tz> {
    fn into_instant(self) -> Result<Instant, Error> {
        Ok(self.naive_local())
    }
}

impl IntoInstant for &str {
    fn into_instant(self) -> Result<Instant, Error> {
        parse_instant(self)
    }
}

impl IntoInstant for &String {
    fn into_instant(self) -> Result<Instant, Error> {
        parse_instant(self)
    }
}

impl IntoInstant for String {
    fn into_instant(self) -> Result<Instant, Error> {
        parse_instant(&self)
    }
}

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// 文字列の時刻を [`Instant`] に変換する
///
/// 受け付ける形式は `2024`, `2024-01`, `2024-01-01`, `2024-01-01T09`,
/// `2024-01-01T09:30`, `2024-01-01T09:30:00.123456` など。
/// 日付と時刻の区切りは `T` と空白のどちらでもよい。
/// 省略された部分は期間の先頭（1月、1日、00:00:00）として補われる。
pub fn parse_instant(text: &str) -> Result<Instant, Error> {
    let text = text.trim();
    let mismatch = || Error::TypeMismatch {
        input: text.to_string(),
    };

    // chrono の %Y は4桁未満の年も受け付けるので、年は4桁の数字に限る
    let bytes = text.as_bytes();
    let four_digit_year = bytes.len() >= 4
        && bytes[..4].iter().all(u8::is_ascii_digit)
        && bytes.get(4).is_none_or(|b| *b == b'-');
    if !four_digit_year {
        return Err(mismatch());
    }

    for format in DATETIME_FORMATS {
        if let Ok(t) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(t);
        }
    }

    // 時だけが指定されている場合 (2024-01-01T09)
    if let Some((date, hour)) = text.split_once(['T', ' ']) {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| mismatch())?;
        let hour: u32 = hour.parse().map_err(|_| mismatch())?;
        let time = NaiveTime::from_hms_opt(hour, 0, 0).ok_or_else(mismatch)?;
        return Ok(date.and_time(time));
    }

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return date.into_instant();
    }

    // 年月のみ、または年のみ
    let mut parts = text.splitn(2, '-');
    let year = parts
        .next()
        .and_then(|y| y.parse::<i32>().ok())
        .ok_or_else(mismatch)?;
    let month = match parts.next() {
        Some(m) => m.parse::<u32>().map_err(|_| mismatch())?,
        None => 1,
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(mismatch)?
        .into_instant()
}

/// Unixエポックからのナノ秒に変換する
pub fn to_nanos(t: Instant) -> Result<i64, Error> {
    t.and_utc()
        .timestamp_nanos_opt()
        .ok_or(Error::TimestampOverflow)
}

/// Unixエポックからのナノ秒を [`Instant`] に戻す
pub fn from_nanos(nanos: i64) -> Instant {
    DateTime::from_timestamp_nanos(nanos).naive_utc()
}

/// 時刻を8バイトのキーにエンコードする
///
/// 符号ビットを反転したビッグエンディアンなので、バイト列の辞書順が時刻順と一致する。
pub fn to_key_bytes(t: Instant) -> Result<[u8; 8], Error> {
    let nanos = to_nanos(t)?;
    Ok(((nanos as u64) ^ (1 << 63)).to_be_bytes())
}

/// [`to_key_bytes`] でエンコードしたキーを時刻に戻す
pub fn from_key_bytes(bytes: [u8; 8]) -> Instant {
    from_nanos((u64::from_be_bytes(bytes) ^ (1 << 63)) as i64)
}
