//! Diagnostic format-string mini-language.
//!
//! Supported directives, matched greedily against the characters right
//! after `%`:
//!
//! - `%0`..`%9` — positional substitution of `args[N]`.
//! - `%q0` — substitution of `args[N]`, quoted (for names/types).
//! - `%s0` — an "s" suffix if `args[N]` (an integer) is not 1.
//! - `%ordinal0` — `args[N]` (an integer) rendered as an ordinal ("1st").
//! - `%select{a|b|c}0` — the alternative at index `args[N]`.
//! - `%plural{one|other}0` — `one` if `args[N] == 1`, else `other`.
//! - `%%` — a literal percent.
//!
//! Unknown or malformed directives are copied through verbatim so a typo
//! in a diagnostic template degrades to visible garbage instead of a panic.

/// One positional argument to a diagnostic template.
#[derive(Debug, Clone, PartialEq)]
pub enum DiagArg {
    Int(i64),
    Str(String),
}

impl DiagArg {
    fn as_int(&self) -> Option<i64> {
        match self {
            DiagArg::Int(n) => Some(*n),
            DiagArg::Str(_) => None,
        }
    }

    fn as_str(&self) -> String {
        match self {
            DiagArg::Int(n) => n.to_string(),
            DiagArg::Str(s) => s.clone(),
        }
    }
}

impl From<i64> for DiagArg {
    fn from(n: i64) -> Self {
        DiagArg::Int(n)
    }
}

impl From<&str> for DiagArg {
    fn from(s: &str) -> Self {
        DiagArg::Str(s.to_string())
    }
}

impl From<String> for DiagArg {
    fn from(s: String) -> Self {
        DiagArg::Str(s)
    }
}

fn ordinal(n: i64) -> String {
    let suffix = match (n % 100, n % 10) {
        (11..=13, _) => "th",
        (_, 1) => "st",
        (_, 2) => "nd",
        (_, 3) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// Expand `template` against `args`, producing the final diagnostic text.
pub fn expand(template: &str, args: &[DiagArg]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();
    let bytes = template.as_bytes();

    while let Some((i, c)) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.peek().copied() {
            Some((_, '%')) => {
                out.push('%');
                chars.next();
            }
            Some((_, d)) if d.is_ascii_digit() => {
                chars.next();
                let n = d.to_digit(10).unwrap() as usize;
                if let Some(arg) = args.get(n) {
                    out.push_str(&arg.as_str());
                }
            }
            Some((qi, 'q')) if bytes.get(qi + 1).is_some_and(u8::is_ascii_digit) => {
                chars.next();
                let (_, d) = chars.next().unwrap();
                let n = d.to_digit(10).unwrap() as usize;
                if let Some(arg) = args.get(n) {
                    out.push('\'');
                    out.push_str(&arg.as_str());
                    out.push('\'');
                }
            }
            Some((si, 's')) if bytes.get(si + 1).is_some_and(u8::is_ascii_digit) => {
                chars.next();
                let (_, d) = chars.next().unwrap();
                let n = d.to_digit(10).unwrap() as usize;
                if args.get(n).and_then(DiagArg::as_int) != Some(1) {
                    out.push('s');
                }
            }
            _ if template[i + 1..].starts_with("ordinal") => {
                for _ in 0.."ordinal".len() {
                    chars.next();
                }
                if let Some((_, d)) = chars.next()
                    && let Some(n) = d.to_digit(10)
                    && let Some(arg) = args.get(n as usize)
                    && let Some(v) = arg.as_int()
                {
                    out.push_str(&ordinal(v));
                }
            }
            _ if template[i + 1..].starts_with("select{") => {
                for _ in 0.."select".len() {
                    chars.next();
                }
                let (alts, rest) = parse_braced(&template[i + 1 + "select".len()..]);
                for _ in 0..rest {
                    chars.next();
                }
                if let Some((_, d)) = chars.next()
                    && let Some(n) = d.to_digit(10)
                    && let Some(idx) = args.get(n as usize).and_then(DiagArg::as_int)
                    && let Some(alt) = alts.get(idx as usize)
                {
                    out.push_str(alt);
                }
            }
            _ if template[i + 1..].starts_with("plural{") => {
                for _ in 0.."plural".len() {
                    chars.next();
                }
                let (alts, rest) = parse_braced(&template[i + 1 + "plural".len()..]);
                for _ in 0..rest {
                    chars.next();
                }
                if let Some((_, d)) = chars.next()
                    && let Some(n) = d.to_digit(10)
                    && let Some(count) = args.get(n as usize).and_then(DiagArg::as_int)
                {
                    let alt_idx = if count == 1 { 0 } else { 1 };
                    if let Some(alt) = alts.get(alt_idx) {
                        out.push_str(alt);
                    }
                }
            }
            _ => out.push('%'),
        }
    }

    out
}

/// Parses a leading `{a|b|c}` group, returning the alternatives and the
/// number of chars consumed (in `char` units, matching the `Peekable`
/// iterator above).
fn parse_braced(rest: &str) -> (Vec<&str>, usize) {
    if !rest.starts_with('{') {
        return (Vec::new(), 0);
    }
    match rest.find('}') {
        Some(end) => {
            let inner = &rest[1..end];
            let alts: Vec<&str> = inner.split('|').collect();
            (alts, rest[..=end].chars().count())
        }
        None => (Vec::new(), 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_substitution() {
        let out = expand("expected %0, found %1", &["int".into(), "real".into()]);
        assert_eq!(out, "expected int, found real");
    }

    #[test]
    fn quoted_substitution() {
        let out = expand("redeclaration of %q0", &["i".into()]);
        assert_eq!(out, "redeclaration of 'i'");
    }

    #[test]
    fn plural_s_suffix() {
        assert_eq!(expand("%0 error%s0", &[1i64.into()]), "1 error");
        assert_eq!(expand("%0 error%s0", &[2i64.into()]), "2 errors");
    }

    #[test]
    fn ordinal_rendering() {
        assert_eq!(expand("the %ordinal0 argument", &[1i64.into()]), "the 1st argument");
        assert_eq!(expand("the %ordinal0 argument", &[2i64.into()]), "the 2nd argument");
        assert_eq!(expand("the %ordinal0 argument", &[3i64.into()]), "the 3rd argument");
        assert_eq!(expand("the %ordinal0 argument", &[11i64.into()]), "the 11th argument");
        assert_eq!(expand("the %ordinal0 argument", &[21i64.into()]), "the 21st argument");
    }

    #[test]
    fn select_alternative() {
        let out = expand("this is a %select{function|subroutine}0", &[1i64.into()]);
        assert_eq!(out, "this is a subroutine");
    }

    #[test]
    fn plural_directive() {
        let out = expand("%0 %plural{argument|arguments}0", &[1i64.into()]);
        assert_eq!(out, "1 argument");
        let out = expand("%0 %plural{argument|arguments}0", &[3i64.into()]);
        assert_eq!(out, "3 arguments");
    }

    #[test]
    fn literal_percent() {
        assert_eq!(expand("100%%", &[]), "100%");
    }
}
