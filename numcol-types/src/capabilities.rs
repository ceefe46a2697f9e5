use bitflags::bitflags;

bitflags! {
    /// Operation families an element type's strategy implements.
    ///
    /// Every entry point checks the flag it needs before visiting a single
    /// element, so an unsupported request fails without partial work.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u16 {
        /// `+ - * / %`, `Abs`, `Sum`/`Product` and their cumulative forms.
        const ARITHMETIC = 1 << 0;
        /// `& | ^` and `Not`.
        const BITWISE = 1 << 1;
        /// `<<` and `>>` by an integer count.
        const SHIFT = 1 << 2;
        /// `==` and `!=`.
        const EQUALITY = 1 << 3;
        /// `< <= > >=`, `Min`/`Max` and their cumulative forms.
        const ORDERING = 1 << 4;
        /// `All` and `Any`.
        const LOGICAL = 1 << 5;
        /// Unary `Negate`.
        const NEGATE = 1 << 6;
        /// Unary `Round`.
        const ROUNDING = 1 << 7;

        const SIGNED_INTEGER = Self::ARITHMETIC.bits()
            | Self::BITWISE.bits()
            | Self::SHIFT.bits()
            | Self::EQUALITY.bits()
            | Self::ORDERING.bits()
            | Self::NEGATE.bits();
        const UNSIGNED_INTEGER = Self::ARITHMETIC.bits()
            | Self::BITWISE.bits()
            | Self::SHIFT.bits()
            | Self::EQUALITY.bits()
            | Self::ORDERING.bits();
        const FLOAT = Self::ARITHMETIC.bits()
            | Self::EQUALITY.bits()
            | Self::ORDERING.bits()
            | Self::NEGATE.bits()
            | Self::ROUNDING.bits();
        const BOOLEAN = Self::BITWISE.bits() | Self::EQUALITY.bits() | Self::LOGICAL.bits();
        const TEMPORAL = Self::EQUALITY.bits() | Self::ORDERING.bits();
    }
}
