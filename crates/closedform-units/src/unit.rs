//! Unit symbols and unit expression parsing.
//!
//! A unit expression such as `kg*m^2/s^2`, `kJ/(mol K)` or `µm` is reduced
//! to a decimal scale factor and a [`Dimension`]. Scale factors are exact
//! decimals, so `1 km` parses to exactly `1000 m`.

use dashu::integer::IBig;

use crate::dimension::Dimension;
use crate::error::{Error, Result};
use crate::precision::Precision;
use crate::real::Real;

/// A known unit symbol.
#[derive(Clone, Copy, Debug)]
pub struct UnitDef {
    /// Symbol as written.
    pub symbol: &'static str,
    /// Dimension in SI base quantities.
    pub dimension: Dimension,
    /// Scale relative to the coherent SI unit, as `significand * 10^exponent`.
    pub scale: (i64, isize),
    /// Whether SI prefixes may be attached.
    pub prefixable: bool,
}

const fn def(symbol: &'static str, dim: [i32; 7], scale: (i64, isize), prefixable: bool) -> UnitDef {
    UnitDef {
        symbol,
        dimension: Dimension::new(dim),
        scale,
        prefixable,
    }
}

// L, M, T, I, Θ, N, J
const UNITS: &[UnitDef] = &[
    // Base units. Mass is declared in grams so that `kg` is `k` + `g`.
    def("m", [1, 0, 0, 0, 0, 0, 0], (1, 0), true),
    def("g", [0, 1, 0, 0, 0, 0, 0], (1, -3), true),
    def("s", [0, 0, 1, 0, 0, 0, 0], (1, 0), true),
    def("A", [0, 0, 0, 1, 0, 0, 0], (1, 0), true),
    def("K", [0, 0, 0, 0, 1, 0, 0], (1, 0), true),
    def("mol", [0, 0, 0, 0, 0, 1, 0], (1, 0), true),
    def("cd", [0, 0, 0, 0, 0, 0, 1], (1, 0), true),
    // Derived units
    def("Hz", [0, 0, -1, 0, 0, 0, 0], (1, 0), true),
    def("N", [1, 1, -2, 0, 0, 0, 0], (1, 0), true),
    def("Pa", [-1, 1, -2, 0, 0, 0, 0], (1, 0), true),
    def("J", [2, 1, -2, 0, 0, 0, 0], (1, 0), true),
    def("W", [2, 1, -3, 0, 0, 0, 0], (1, 0), true),
    def("C", [0, 0, 1, 1, 0, 0, 0], (1, 0), true),
    def("V", [2, 1, -3, -1, 0, 0, 0], (1, 0), true),
    def("F", [-2, -1, 4, 2, 0, 0, 0], (1, 0), true),
    def("Ohm", [2, 1, -3, -2, 0, 0, 0], (1, 0), true),
    def("Ω", [2, 1, -3, -2, 0, 0, 0], (1, 0), true),
    def("S", [-2, -1, 3, 2, 0, 0, 0], (1, 0), true),
    def("Wb", [2, 1, -2, -1, 0, 0, 0], (1, 0), true),
    def("T", [0, 1, -2, -1, 0, 0, 0], (1, 0), true),
    def("H", [2, 1, -2, -2, 0, 0, 0], (1, 0), true),
    def("Bq", [0, 0, -1, 0, 0, 0, 0], (1, 0), true),
    def("Gy", [2, 0, -2, 0, 0, 0, 0], (1, 0), true),
    def("Sv", [2, 0, -2, 0, 0, 0, 0], (1, 0), true),
    def("kat", [0, 0, -1, 0, 0, 1, 0], (1, 0), true),
    def("lm", [0, 0, 0, 0, 0, 0, 1], (1, 0), true),
    def("lx", [-2, 0, 0, 0, 0, 0, 1], (1, 0), true),
    def("rad", [0, 0, 0, 0, 0, 0, 0], (1, 0), true),
    def("sr", [0, 0, 0, 0, 0, 0, 0], (1, 0), true),
    // Accepted non-SI units
    def("L", [3, 0, 0, 0, 0, 0, 0], (1, -3), true),
    def("eV", [2, 1, -2, 0, 0, 0, 0], (1_602_176_634, -28), true),
    def("Da", [0, 1, 0, 0, 0, 0, 0], (166_053_906_660, -38), true),
    def("u", [0, 1, 0, 0, 0, 0, 0], (166_053_906_660, -38), false),
    def("min", [0, 0, 1, 0, 0, 0, 0], (60, 0), false),
    def("h", [0, 0, 1, 0, 0, 0, 0], (3600, 0), false),
    def("d", [0, 0, 1, 0, 0, 0, 0], (86400, 0), false),
];

/// SI prefixes with their decimal exponents. `da` precedes `d`.
const PREFIXES: &[(&str, isize)] = &[
    ("da", 1),
    ("Y", 24),
    ("Z", 21),
    ("E", 18),
    ("P", 15),
    ("T", 12),
    ("G", 9),
    ("M", 6),
    ("k", 3),
    ("h", 2),
    ("d", -1),
    ("c", -2),
    ("m", -3),
    ("u", -6),
    ("µ", -6),
    ("μ", -6),
    ("n", -9),
    ("p", -12),
    ("f", -15),
    ("a", -18),
    ("z", -21),
    ("y", -24),
];

/// Resolves a symbol to a unit and a prefix exponent.
///
/// An exact match wins over a prefixed reading, so `cd` is the candela
/// and `Pa` the pascal.
#[must_use]
pub fn lookup_symbol(symbol: &str) -> Option<(&'static UnitDef, isize)> {
    if let Some(unit) = UNITS.iter().find(|u| u.symbol == symbol) {
        return Some((unit, 0));
    }
    PREFIXES.iter().find_map(|&(prefix, exp)| {
        let rest = symbol.strip_prefix(prefix)?;
        UNITS
            .iter()
            .find(|u| u.prefixable && u.symbol == rest)
            .map(|u| (u, exp))
    })
}

/// A unit reduced to a scale factor and a dimension.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScaledUnit {
    /// Factor converting a magnitude in this unit to coherent SI.
    pub scale: Real,
    /// The unit's dimension.
    pub dimension: Dimension,
}

impl ScaledUnit {
    fn one(precision: Precision) -> Self {
        Self {
            scale: Real::from_i64(1, precision),
            dimension: Dimension::DIMENSIONLESS,
        }
    }

    fn from_def(unit: &UnitDef, prefix: isize, precision: Precision) -> Self {
        let (significand, exponent) = unit.scale;
        Self {
            scale: Real::from_parts(IBig::from(significand), exponent + prefix, precision),
            dimension: unit.dimension,
        }
    }

    fn combine(self, rhs: Self, divide: bool) -> Result<Self> {
        let combined = if divide {
            self.dimension
                .checked_div(&rhs.dimension)
                .map(|dimension| Self {
                    scale: self.scale / rhs.scale,
                    dimension,
                })
        } else {
            self.dimension
                .checked_mul(&rhs.dimension)
                .map(|dimension| Self {
                    scale: self.scale * rhs.scale,
                    dimension,
                })
        };
        combined.ok_or(Error::ExponentOutOfRange)
    }

    fn powi(self, n: i32) -> Result<Self> {
        let dimension = self
            .dimension
            .powi(i64::from(n))
            .ok_or(Error::ExponentOutOfRange)?;
        Ok(Self {
            scale: self.scale.powi(&IBig::from(n)),
            dimension,
        })
    }
}

/// Parses a unit expression.
///
/// # Errors
///
/// Returns [`Error::UnknownUnit`] for unknown symbols and [`Error::Syntax`]
/// for malformed expressions.
pub fn parse_unit(text: &str, precision: Precision) -> Result<ScaledUnit> {
    parse_unit_at(text, 0, precision)
}

/// Parses the unit expression starting at byte `start` of `text`.
///
/// Syntax error positions are byte offsets into `text`.
pub(crate) fn parse_unit_at(text: &str, start: usize, precision: Precision) -> Result<ScaledUnit> {
    let tokens = tokenize(text, start)?;
    let mut parser = Parser {
        tokens,
        cursor: 0,
        end: text.len(),
        precision,
    };
    let unit = parser.parse_product()?;
    match parser.peek() {
        None => Ok(unit),
        Some(token) => Err(Error::Syntax {
            pos: token.pos,
            message: "unmatched ')'",
        }),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum TokenKind {
    Symbol(String),
    Exponent(i32),
    Mul,
    Div,
    LParen,
    RParen,
}

#[derive(Clone, Debug)]
struct Token {
    kind: TokenKind,
    pos: usize,
}

fn tokenize(text: &str, start: usize) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = text[start..]
        .char_indices()
        .map(|(i, c)| (i + start, c))
        .peekable();

    while let Some((pos, c)) = chars.next() {
        let kind = match c {
            c if c.is_whitespace() => continue,
            '*' | '.' | '·' => TokenKind::Mul,
            '/' => TokenKind::Div,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '^' => {
                let mut literal = String::new();
                if let Some(&(_, sign @ ('-' | '+'))) = chars.peek() {
                    literal.push(sign);
                    chars.next();
                }
                while let Some(&(_, d)) = chars.peek() {
                    if !d.is_ascii_digit() {
                        break;
                    }
                    literal.push(d);
                    chars.next();
                }
                if !literal.bytes().any(|b| b.is_ascii_digit()) {
                    return Err(Error::Syntax {
                        pos,
                        message: "expected integer exponent after '^'",
                    });
                }
                TokenKind::Exponent(literal.parse().map_err(|_| Error::ExponentOutOfRange)?)
            }
            c if c.is_alphabetic() => {
                let mut symbol = String::from(c);
                while let Some(&(_, next)) = chars.peek() {
                    if !next.is_alphabetic() {
                        break;
                    }
                    symbol.push(next);
                    chars.next();
                }
                TokenKind::Symbol(symbol)
            }
            _ => {
                return Err(Error::Syntax {
                    pos,
                    message: "unexpected character",
                })
            }
        };
        tokens.push(Token { kind, pos });
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    cursor: usize,
    end: usize,
    precision: Precision,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.cursor)
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.cursor).cloned();
        self.cursor += 1;
        token
    }

    fn pos(&self) -> usize {
        self.peek().map_or(self.end, |t| t.pos)
    }

    // Factors combine left to right: `kg/s*m` is `kg*m/s`.
    fn parse_product(&mut self) -> Result<ScaledUnit> {
        let mut acc = ScaledUnit::one(self.precision);
        let mut first = true;
        loop {
            let divide = match self.peek().map(|t| &t.kind) {
                None | Some(TokenKind::RParen) => {
                    if first {
                        return Err(Error::Syntax {
                            pos: self.pos(),
                            message: "expected unit",
                        });
                    }
                    break;
                }
                Some(TokenKind::Div) => {
                    self.bump();
                    true
                }
                Some(TokenKind::Mul) if !first => {
                    self.bump();
                    false
                }
                Some(TokenKind::Symbol(_) | TokenKind::LParen) => false,
                Some(_) => {
                    return Err(Error::Syntax {
                        pos: self.pos(),
                        message: "unexpected token",
                    })
                }
            };
            let factor = self.parse_factor()?;
            acc = acc.combine(factor, divide)?;
            first = false;
        }
        Ok(acc)
    }

    fn parse_factor(&mut self) -> Result<ScaledUnit> {
        let pos = self.pos();
        let base = match self.bump().map(|t| t.kind) {
            Some(TokenKind::Symbol(symbol)) => {
                let (unit, prefix) =
                    lookup_symbol(&symbol).ok_or_else(|| Error::UnknownUnit(symbol.clone()))?;
                ScaledUnit::from_def(unit, prefix, self.precision)
            }
            Some(TokenKind::LParen) => {
                let inner = self.parse_product()?;
                match self.bump().map(|t| t.kind) {
                    Some(TokenKind::RParen) => inner,
                    _ => {
                        return Err(Error::Syntax {
                            pos,
                            message: "unclosed '('",
                        })
                    }
                }
            }
            _ => {
                return Err(Error::Syntax {
                    pos,
                    message: "expected unit",
                })
            }
        };

        if let Some(TokenKind::Exponent(n)) = self.peek().map(|t| t.kind.clone()) {
            self.bump();
            return base.powi(n);
        }
        Ok(base)
    }
}
