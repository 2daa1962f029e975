//! The builtin word table.
//!
//! Every primitive operation a nib program can name is listed here with
//! its surface word and its arity (how many operand-stack values it
//! consumes). The compiler resolves identifiers and operator tokens
//! against this table; the VM dispatches on the variant. Builtins never
//! take instruction operands, only stack values.

/// A builtin word.
///
/// Variant order matches [`ALL_BUILTINS`]; the surface word for each
/// variant comes from [`Builtin::name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    // Arithmetic
    /// Pop two numbers, push their sum.
    Add,
    /// Pop two numbers, push `a - b` (b on top).
    Sub,
    /// Pop two numbers, push their product.
    Mul,
    /// Pop two numbers, push `a / b`. Zero divisor is an error.
    Div,
    /// Pop two numbers, push `a % b`. Zero divisor is an error.
    Mod,
    // Comparison
    /// Pop two numbers, push `a < b`.
    Lt,
    /// Pop two numbers, push `a > b`.
    Gt,
    /// Pop two numbers, push `a <= b`.
    Le,
    /// Pop two numbers, push `a >= b`.
    Ge,
    /// Pop two values, push whether they are equal.
    Eq,
    /// Pop two values, push whether they differ.
    Ne,
    // Stack manipulation
    /// Discard the top value.
    Pop,
    /// Push a copy of the top value.
    Dup,
    /// Swap the top two values.
    Exch,
    /// Pop n, push a copy of the value n slots below the top.
    Index,
    // Output
    /// Pop a value, send its text to the host print sink.
    Puts,
    // Drawing
    /// Pop b, g, r; set the host fill colour.
    SetFillStyle,
    /// Pop b, g, r; set the host stroke colour.
    SetStrokeStyle,
    /// Pop y1, x1, y0, x0; draw a rectangle.
    Rectangle,
    /// Start a new host path.
    BeginPath,
    /// Pop y, x; move the path cursor.
    MoveTo,
    /// Pop y, x; extend the path with a line.
    LineTo,
    /// Stroke the current path.
    Stroke,
    /// Pop an angle, rotate the host transform.
    Rotate,
    /// Pop y, x; translate the host transform.
    Translate,
    /// Save the host drawing state.
    Save,
    /// Restore the host drawing state.
    Restore,
}

/// All builtins, for table-driven tests and tooling.
pub const ALL_BUILTINS: [Builtin; 27] = [
    Builtin::Add,
    Builtin::Sub,
    Builtin::Mul,
    Builtin::Div,
    Builtin::Mod,
    Builtin::Lt,
    Builtin::Gt,
    Builtin::Le,
    Builtin::Ge,
    Builtin::Eq,
    Builtin::Ne,
    Builtin::Pop,
    Builtin::Dup,
    Builtin::Exch,
    Builtin::Index,
    Builtin::Puts,
    Builtin::SetFillStyle,
    Builtin::SetStrokeStyle,
    Builtin::Rectangle,
    Builtin::BeginPath,
    Builtin::MoveTo,
    Builtin::LineTo,
    Builtin::Stroke,
    Builtin::Rotate,
    Builtin::Translate,
    Builtin::Save,
    Builtin::Restore,
];

impl Builtin {
    /// The surface word for this builtin.
    pub fn name(&self) -> &'static str {
        match self {
            Builtin::Add => "+",
            Builtin::Sub => "-",
            Builtin::Mul => "*",
            Builtin::Div => "/",
            Builtin::Mod => "%",
            Builtin::Lt => "<",
            Builtin::Gt => ">",
            Builtin::Le => "<=",
            Builtin::Ge => ">=",
            Builtin::Eq => "==",
            Builtin::Ne => "!=",
            Builtin::Pop => "pop",
            Builtin::Dup => "dup",
            Builtin::Exch => "exch",
            Builtin::Index => "index",
            Builtin::Puts => "puts",
            Builtin::SetFillStyle => "set_fill_style",
            Builtin::SetStrokeStyle => "set_stroke_style",
            Builtin::Rectangle => "rectangle",
            Builtin::BeginPath => "begin_path",
            Builtin::MoveTo => "move_to",
            Builtin::LineTo => "line_to",
            Builtin::Stroke => "stroke",
            Builtin::Rotate => "rotate",
            Builtin::Translate => "translate",
            Builtin::Save => "save",
            Builtin::Restore => "restore",
        }
    }

    /// How many operand-stack values this builtin consumes.
    ///
    /// `dup` reads the top without net consumption but still requires
    /// one value present; `index` requires its count operand plus that
    /// many values below, checked at execution time.
    pub fn arity(&self) -> usize {
        match self {
            Builtin::Add
            | Builtin::Sub
            | Builtin::Mul
            | Builtin::Div
            | Builtin::Mod
            | Builtin::Lt
            | Builtin::Gt
            | Builtin::Le
            | Builtin::Ge
            | Builtin::Eq
            | Builtin::Ne
            | Builtin::Exch => 2,
            Builtin::Pop | Builtin::Dup | Builtin::Index | Builtin::Puts | Builtin::Rotate => 1,
            Builtin::MoveTo | Builtin::LineTo | Builtin::Translate => 2,
            Builtin::SetFillStyle | Builtin::SetStrokeStyle => 3,
            Builtin::Rectangle => 4,
            Builtin::BeginPath | Builtin::Stroke | Builtin::Save | Builtin::Restore => 0,
        }
    }

    /// Resolve a surface word to its builtin, if it is one.
    pub fn lookup(word: &str) -> Option<Builtin> {
        ALL_BUILTINS.iter().copied().find(|b| b.name() == word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_resolves_every_name() {
        for &b in &ALL_BUILTINS {
            assert_eq!(Builtin::lookup(b.name()), Some(b), "lookup failed for {b:?}");
        }
    }

    #[test]
    fn lookup_rejects_unknown_words() {
        assert_eq!(Builtin::lookup("frobnicate"), None);
        assert_eq!(Builtin::lookup(""), None);
        assert_eq!(Builtin::lookup("PUTS"), None);
    }

    #[test]
    fn names_are_distinct() {
        for (i, a) in ALL_BUILTINS.iter().enumerate() {
            for b in &ALL_BUILTINS[i + 1..] {
                assert_ne!(a.name(), b.name(), "{a:?} and {b:?} share a name");
            }
        }
    }

    #[test]
    fn arithmetic_and_comparison_consume_two() {
        for b in [
            Builtin::Add,
            Builtin::Sub,
            Builtin::Mul,
            Builtin::Div,
            Builtin::Mod,
            Builtin::Lt,
            Builtin::Gt,
            Builtin::Le,
            Builtin::Ge,
            Builtin::Eq,
            Builtin::Ne,
        ] {
            assert_eq!(b.arity(), 2, "{b:?}");
        }
    }

    #[test]
    fn drawing_arities_match_host_signatures() {
        assert_eq!(Builtin::SetFillStyle.arity(), 3);
        assert_eq!(Builtin::SetStrokeStyle.arity(), 3);
        assert_eq!(Builtin::Rectangle.arity(), 4);
        assert_eq!(Builtin::BeginPath.arity(), 0);
        assert_eq!(Builtin::MoveTo.arity(), 2);
        assert_eq!(Builtin::LineTo.arity(), 2);
        assert_eq!(Builtin::Stroke.arity(), 0);
        assert_eq!(Builtin::Rotate.arity(), 1);
        assert_eq!(Builtin::Translate.arity(), 2);
        assert_eq!(Builtin::Save.arity(), 0);
        assert_eq!(Builtin::Restore.arity(), 0);
    }
}
