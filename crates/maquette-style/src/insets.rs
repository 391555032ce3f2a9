#![forbid(unsafe_code)]

//! Edge-inset expression parsing.
//!
//! Padding/margin properties carry textual expressions in three grammars:
//!
//! - uniform: `12` or `all(12)`
//! - per-side: `only(left: 8, top: 4)`
//! - symmetric: `symmetric(horizontal: 16, vertical: 8)`
//!
//! An optional `EdgeInsets.` prefix is tolerated. Malformed expressions
//! parse to `None` (field absent), never an error.

/// A four-sided box of inset values, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Insets {
    /// Top inset.
    pub top: f64,
    /// Right inset.
    pub right: f64,
    /// Bottom inset.
    pub bottom: f64,
    /// Left inset.
    pub left: f64,
}

impl Insets {
    /// Equal insets on all four sides.
    #[must_use]
    pub const fn all(value: f64) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Symmetric insets.
    #[must_use]
    pub const fn symmetric(horizontal: f64, vertical: f64) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    /// Explicit per-side insets.
    #[must_use]
    pub const fn only(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Parse an edge-inset expression. See the module docs for the
    /// accepted grammars.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let expr = input.trim();
        let expr = expr.strip_prefix("EdgeInsets.").unwrap_or(expr);

        // Uniform bare number.
        if let Ok(v) = expr.parse::<f64>() {
            return (v.is_finite() && v >= 0.0).then(|| Self::all(v));
        }

        let (func, args) = split_call(expr)?;
        match func {
            "all" => {
                let v = args.trim().parse::<f64>().ok()?;
                (v.is_finite() && v >= 0.0).then(|| Self::all(v))
            }
            "only" => {
                let mut insets = Self::default();
                for (key, value) in parse_named_args(args)? {
                    match key {
                        "left" => insets.left = value,
                        "top" => insets.top = value,
                        "right" => insets.right = value,
                        "bottom" => insets.bottom = value,
                        _ => return None,
                    }
                }
                Some(insets)
            }
            "symmetric" => {
                let mut horizontal = 0.0;
                let mut vertical = 0.0;
                for (key, value) in parse_named_args(args)? {
                    match key {
                        "horizontal" => horizontal = value,
                        "vertical" => vertical = value,
                        _ => return None,
                    }
                }
                Some(Self::symmetric(horizontal, vertical))
            }
            _ => None,
        }
    }
}

/// Split `name(args)` into `("name", "args")`.
fn split_call(expr: &str) -> Option<(&str, &str)> {
    let open = expr.find('(')?;
    let close = expr.rfind(')')?;
    if close != expr.len() - 1 || close <= open {
        return None;
    }
    Some((expr[..open].trim(), &expr[open + 1..close]))
}

/// Parse `key: value, key: value` pairs with non-negative finite values.
fn parse_named_args(args: &str) -> Option<Vec<(&str, f64)>> {
    let mut out = Vec::new();
    for pair in args.split(',') {
        let pair = pair.trim();
        if pair.is_empty() {
            continue;
        }
        let (key, value) = pair.split_once(':')?;
        let value = value.trim().parse::<f64>().ok()?;
        if !value.is_finite() || value < 0.0 {
            return None;
        }
        out.push((key.trim(), value));
    }
    if out.is_empty() { None } else { Some(out) }
}

#[cfg(test)]
mod tests {
    use super::Insets;

    #[test]
    fn uniform_bare_number() {
        assert_eq!(Insets::parse("12"), Some(Insets::all(12.0)));
        assert_eq!(Insets::parse(" 8.5 "), Some(Insets::all(8.5)));
    }

    #[test]
    fn uniform_all_call() {
        assert_eq!(Insets::parse("all(16)"), Some(Insets::all(16.0)));
        assert_eq!(Insets::parse("EdgeInsets.all(16)"), Some(Insets::all(16.0)));
    }

    #[test]
    fn only_grammar() {
        let insets = Insets::parse("only(left: 8, top: 4)").unwrap();
        assert_eq!(insets, Insets::only(8.0, 4.0, 0.0, 0.0));
    }

    #[test]
    fn only_grammar_all_sides() {
        let insets = Insets::parse("only(left:1, top:2, right:3, bottom:4)").unwrap();
        assert_eq!(
            insets,
            Insets {
                top: 2.0,
                right: 3.0,
                bottom: 4.0,
                left: 1.0
            }
        );
    }

    #[test]
    fn symmetric_grammar() {
        let insets = Insets::parse("symmetric(horizontal: 16, vertical: 8)").unwrap();
        assert_eq!(insets, Insets::symmetric(16.0, 8.0));
    }

    #[test]
    fn symmetric_single_axis() {
        let insets = Insets::parse("symmetric(vertical: 8)").unwrap();
        assert_eq!(insets, Insets::symmetric(0.0, 8.0));
    }

    #[test]
    fn malformed_parses_to_none() {
        assert_eq!(Insets::parse(""), None);
        assert_eq!(Insets::parse("padding"), None);
        assert_eq!(Insets::parse("only(diagonal: 3)"), None);
        assert_eq!(Insets::parse("only()"), None);
        assert_eq!(Insets::parse("symmetric(horizontal: x)"), None);
        assert_eq!(Insets::parse("all(-4)"), None);
        assert_eq!(Insets::parse("-2"), None);
        assert_eq!(Insets::parse("all(4"), None);
    }
}
