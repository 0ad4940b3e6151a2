/// A rewrite performed by the simplifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Step {
    /// `a+0 = a`
    /// `a-0 = a`
    /// `a*1 = a`
    /// `a/1 = a`
    /// `a^1 = a`
    RemoveNeutral,

    /// An operator with a single operand is replaced by that operand, and an operator with no
    /// operands by its neutral element.
    SpliceUp,

    /// `a^0 = 1`
    PowerZero,

    /// `0^a = 0`
    ZeroPower,

    /// `0/a = 0`
    DivideZero,

    /// `0*a = 0`
    /// `a*0 = 0`
    MultiplyZero,

    /// A subtree without variables is replaced by its value.
    Evaluate,

    /// `a+(b+c) = a+b+c`
    /// `a*(b*c) = a*b*c`
    /// `a-(b+c) = a-b-c`
    /// `(a^b)^c = a^b^c`
    Flatten,

    /// `2+a+3 = 5+a`
    /// `a-2-3 = a-5`
    /// `a^2^3 = a^6`
    FoldConstants,

    /// `a+a = a*2`
    /// `2a-a = a`
    CombineLikeTerms,

    /// `a*a = a^2`
    CombineLikeFactors,
}
