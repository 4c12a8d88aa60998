use super::Interval;

/// 2つの区間の関係を表す列挙型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalRelation {
    /// self と other が完全に一致する
    Equal,

    /// other が self を完全に包含する（self ⊂ other）
    Within,

    /// self が other を完全に包含する（other ⊂ self）
    Contains,

    /// self と other は部分的に重なる（完全包含ではない）
    Overlap,

    /// 重ならずに境界を1つ共有する
    Adjacent,

    /// self と other は完全に無関係（重ならず、接してもいない）
    Disjoint,
}

impl Interval {
    /// self と other の関係を返す
    ///
    /// 空区間はどの区間とも重ならないため、一致しない限り `Adjacent` か `Disjoint` になる。
    pub fn relation(&self, other: &Self) -> IntervalRelation {
        if self == other {
            return IntervalRelation::Equal;
        }

        if !self.overlaps(other) {
            return if !self.is_empty() && !other.is_empty() && self.continuous(other) {
                IntervalRelation::Adjacent
            } else {
                IntervalRelation::Disjoint
            };
        }

        if other.start() <= self.start() && self.end() <= other.end() {
            return IntervalRelation::Within;
        }

        if self.start() <= other.start() && other.end() <= self.end() {
            return IntervalRelation::Contains;
        }

        IntervalRelation::Overlap
    }
}
