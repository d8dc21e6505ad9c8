// src/noyau/expr.rs
//
// AST exact (sans flottants).
// - Rat : rationnel exact
// - Var : variable symbolique (ex: x)
// - Pow : exposant général (Box) ; l’exposant 1/2 sert de racine carrée
//
// IMPORTANT (SAFE):
// - simplify() ne doit jamais “inventer” une valeur pour Var.
// - la division par un rationnel nul reste symbolique ici ;
//   c’est le pipeline (eval) qui la refuse en sortie.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    Rat(BigRational),
    Var(String),

    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn rat_i64(n: i64) -> Expr {
        Expr::Rat(BigRational::from_integer(BigInt::from(n)))
    }

    /// Simplification locale (SAFE), sans heuristiques.
    /// Objectif: réduire ce qui est strictement démontrable sans exploser l’arbre.
    pub fn simplify(self) -> Expr {
        use Expr::*;

        match self {
            // Feuilles: rien à faire
            Rat(_) | Var(_) => self,

            Add(a, b) => {
                let a = a.simplify();
                let b = b.simplify();
                match (&a, &b) {
                    (Rat(x), Rat(y)) => Rat(x + y),
                    (Rat(x), _) if x.is_zero() => b,
                    (_, Rat(y)) if y.is_zero() => a,
                    _ => Add(Box::new(a), Box::new(b)),
                }
            }

            Sub(a, b) => {
                let a = a.simplify();
                let b = b.simplify();

                // x - x => 0 (renforce la normalisation)
                if a == b {
                    return Rat(BigRational::zero());
                }

                match (&a, &b) {
                    (Rat(x), Rat(y)) => Rat(x - y),
                    (_, Rat(y)) if y.is_zero() => a,
                    _ => Sub(Box::new(a), Box::new(b)),
                }
            }

            Mul(a, b) => {
                let a = a.simplify();
                let b = b.simplify();

                match (&a, &b) {
                    (Rat(x), Rat(y)) => Rat(x * y),
                    (Rat(x), _) if x.is_zero() => Rat(BigRational::zero()),
                    (_, Rat(y)) if y.is_zero() => Rat(BigRational::zero()),
                    (Rat(x), _) if x.is_one() => b,
                    (_, Rat(y)) if y.is_one() => a,
                    _ => Mul(Box::new(a), Box::new(b)),
                }
            }

            Div(a, b) => {
                let a = a.simplify();
                let b = b.simplify();

                // division par zéro : on garde symbolique ici (eval gérera l’erreur)
                if let Rat(y) = &b {
                    if y.is_zero() {
                        return Div(Box::new(a), Box::new(b));
                    }
                }

                match (&a, &b) {
                    (Rat(x), Rat(y)) => Rat(x / y),
                    (_, Rat(y)) if y.is_one() => a,
                    (Rat(x), _) if x.is_zero() => Rat(BigRational::zero()),
                    _ => Div(Box::new(a), Box::new(b)),
                }
            }

            Pow(base, exp) => {
                let base = base.simplify();
                let exp = exp.simplify();

                if let Rat(e) = &exp {
                    // exposant entier : pliage direct
                    if e.denom().is_one() {
                        if e.is_zero() {
                            return Rat(BigRational::one());
                        }
                        if e.is_one() {
                            return base;
                        }
                        if let (Rat(r), Some(n)) = (&base, big_to_i64(e.numer())) {
                            // 0^(-n) : reste symbolique (pas de division par zéro ici)
                            if !(r.is_zero() && n < 0) {
                                return Rat(rational_pow_int(r.clone(), n));
                            }
                        }
                    }

                    // exposant 1/2 : racine exacte si le rationnel est un carré parfait
                    if is_un_demi(e) {
                        if let Rat(r) = &base {
                            if let Some(s) = rational_sqrt_exact(r) {
                                return Rat(s);
                            }
                        }
                    }
                }

                Pow(Box::new(base), Box::new(exp))
            }
        }
    }
}

/// Teste si un rationnel vaut exactement 1/2.
pub(crate) fn is_un_demi(r: &BigRational) -> bool {
    r.numer().is_one() && *r.denom() == BigInt::from(2)
}

/// Conversion SAFE vers i64.
/// (MVP: l’exposant doit rentrer dans i64, sinon on refuse le pliage)
/// i64::MIN est refusé aussi : son opposé déborde (rational_pow_int nie).
pub(crate) fn big_to_i64(x: &BigInt) -> Option<i64> {
    x.to_string().parse::<i64>().ok().filter(|n| *n != i64::MIN)
}

/* ------------------------ Affichage debug (pas “joli” final) ------------------------ */

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Expr::*;
        match self {
            Rat(r) => {
                let n = r.numer();
                let d = r.denom();
                if d.is_one() {
                    write!(f, "{n}")
                } else {
                    write!(f, "{n}/{d}")
                }
            }
            Var(s) => write!(f, "{s}"),
            Add(a, b) => write!(f, "({a}+{b})"),
            Sub(a, b) => write!(f, "({a}-{b})"),
            Mul(a, b) => write!(f, "({a}*{b})"),
            Div(a, b) => write!(f, "({a}/{b})"),
            Pow(a, b) => write!(f, "({a}^{b})"),
        }
    }
}

/* ------------------------ Outils rationnels (utilisés par simplify) ------------------------ */

pub(crate) fn rational_pow_int(base: BigRational, exp: i64) -> BigRational {
    if exp == 0 {
        return BigRational::one();
    }
    if exp < 0 {
        let pos = rational_pow_int(base.clone(), -exp);
        return BigRational::one() / pos;
    }

    let mut e = exp as u64;
    let mut acc = BigRational::one();
    let mut b = base;

    while e > 0 {
        if (e & 1) == 1 {
            acc *= b.clone();
        }
        e >>= 1;
        if e > 0 {
            b *= b.clone();
        }
    }
    acc
}

fn rational_sqrt_exact(r: &BigRational) -> Option<BigRational> {
    if r.is_negative() {
        return None;
    }
    let n = r.numer();
    let d = r.denom();
    let sn = int_sqrt_exact(n)?;
    let sd = int_sqrt_exact(d)?;
    Some(BigRational::new(sn, sd))
}

fn int_sqrt_exact(x: &BigInt) -> Option<BigInt> {
    if x.is_negative() {
        return None;
    }
    let s = int_sqrt_floor(x);
    if &s * &s == *x {
        Some(s)
    } else {
        None
    }
}

fn int_sqrt_floor(x: &BigInt) -> BigInt {
    if x.is_zero() {
        return BigInt::zero();
    }
    if x.is_negative() {
        return BigInt::zero();
    }

    let mut y = approx_sqrt_start(x);
    loop {
        let y_next = (&y + (x / &y)) >> 1;
        if y_next >= y {
            let mut z = y_next;
            while (&z + 1u32) * (&z + 1u32) <= *x {
                z += 1u32;
            }
            while &z * &z > *x {
                z -= 1u32;
            }
            return z;
        }
        y = y_next;
    }
}

fn approx_sqrt_start(x: &BigInt) -> BigInt {
    let bits = x.bits();
    let half = bits.div_ceil(2);
    BigInt::one() << half
}
