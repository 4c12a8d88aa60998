use tracing::trace;

use crate::Interval;

/// 任意の区間の列を正規形に変換する
///
/// 1. 空区間を取り除く
/// 2. `(start, end)` の辞書順でソート
/// 3. 直前の区間と重なるか接していれば結合する
///
/// 結果はソート済みで、互いに重ならず接してもいない区間の列になる。
pub(crate) fn consolidate(mut intervals: Vec<Interval>) -> Vec<Interval> {
    let input_len = intervals.len();
    intervals.retain(|r| !r.is_empty());
    intervals.sort_unstable();

    let mut merged: Vec<Interval> = Vec::with_capacity(intervals.len());
    for r in intervals {
        match merged.last_mut() {
            Some(last) if last.overlaps(&r) || last.continuous(&r) => *last = last.hull(&r),
            _ => merged.push(r),
        }
    }

    trace!(input = input_len, output = merged.len(), "consolidated intervals");
    merged
}
