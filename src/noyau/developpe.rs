// src/noyau/developpe.rs
//
// Développement + regroupement des termes (forme canonique polynomiale) :
// - distribution de Mul sur Add/Sub (récursive, jusqu’au point fixe)
// - (somme)^n développé en produit répété pour n entier petit
// - division par un rationnel => multiplication par l’inverse
// - aplatissement de la somme, découpage coeff rationnel × monôme
// - fusion des termes de même monôme, suppression des termes nuls
// - tri déterministe (degré décroissant, constante en dernier)
// - reconstruction “jolie” : Sub quand le terme suivant est négatif
//
// Note : on reste volontairement “local” (pas de factorisation ici).

use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::expr::{big_to_i64, Expr};

/// Au-delà, (somme)^n n’est pas développé (l’arbre exploserait).
const MAX_EXPOSANT_DEVELOPPE: i64 = 8;

/* ------------------------ Développement ------------------------ */

/// Distribue les produits sur les sommes, partout dans l’arbre.
pub fn developpe(e: Expr) -> Expr {
    use Expr::*;

    match e {
        Rat(_) | Var(_) => e,

        Add(a, b) => Add(Box::new(developpe(*a)), Box::new(developpe(*b))),
        Sub(a, b) => Sub(Box::new(developpe(*a)), Box::new(developpe(*b))),

        Mul(a, b) => distribue(developpe(*a), developpe(*b)),

        Div(a, b) => {
            let a = developpe(*a);
            let b = developpe(*b);

            // division par un rationnel non nul : × l’inverse (ça distribue sur les sommes)
            if let Rat(r) = &b {
                if !r.is_zero() {
                    let inverse = Rat(BigRational::one() / r.clone());
                    return distribue(a, inverse);
                }
            }
            Div(Box::new(a), Box::new(b))
        }

        Pow(base, exp) => {
            let base = developpe(*base);
            let exp = developpe(*exp);

            // (somme)^n, n entier dans [2, MAX] : produit répété puis distribution
            if let Rat(r) = &exp {
                if r.denom().is_one() && matches!(&base, Add(_, _) | Sub(_, _)) {
                    if let Some(n) = big_to_i64(r.numer()) {
                        if (2..=MAX_EXPOSANT_DEVELOPPE).contains(&n) {
                            let mut acc = base.clone();
                            for _ in 1..n {
                                acc = distribue(acc, base.clone());
                            }
                            return acc;
                        }
                    }
                }
            }

            Pow(Box::new(base), Box::new(exp))
        }
    }
}

/// Produit de deux sous-arbres déjà développés, en distribuant sur Add/Sub.
fn distribue(a: Expr, b: Expr) -> Expr {
    use Expr::*;

    match (a, b) {
        (Add(x, y), b) => Add(
            Box::new(distribue(*x, b.clone())),
            Box::new(distribue(*y, b)),
        ),
        (Sub(x, y), b) => Sub(
            Box::new(distribue(*x, b.clone())),
            Box::new(distribue(*y, b)),
        ),
        (a, Add(x, y)) => Add(
            Box::new(distribue(a.clone(), *x)),
            Box::new(distribue(a, *y)),
        ),
        (a, Sub(x, y)) => Sub(
            Box::new(distribue(a.clone(), *x)),
            Box::new(distribue(a, *y)),
        ),
        (a, b) => Mul(Box::new(a), Box::new(b)),
    }
}

/* ------------------------ Termes collectés ------------------------ */

/// Un terme d’une somme développée : coeff rationnel × monôme × facteurs opaques.
/// Les facteurs “opaques” (Div symbolique, Pow non entier, …) sont gardés tels quels.
#[derive(Clone, Debug)]
pub(crate) struct Terme {
    pub coeff: BigRational,
    pub vars: BTreeMap<String, i64>,
    pub opaques: Vec<Expr>,
}

impl Terme {
    fn cle(&self) -> String {
        let mut s = String::new();
        for (v, d) in &self.vars {
            s.push_str(&format!("V({v})^{d};"));
        }
        for o in &self.opaques {
            s.push_str(&format!("O({o});"));
        }
        s
    }

    pub(crate) fn degre(&self) -> i64 {
        self.vars.values().sum()
    }

    pub(crate) fn contient(&self, var: &str) -> bool {
        self.vars.contains_key(var) || self.opaques.iter().any(|o| mention_var(o, var))
    }
}

/// Présence textuelle d’une variable dans un sous-arbre (itératif, sans récursion).
pub(crate) fn mention_var(e: &Expr, var: &str) -> bool {
    use Expr::*;

    let mut pile: Vec<&Expr> = vec![e];
    while let Some(x) = pile.pop() {
        match x {
            Var(s) => {
                if s == var {
                    return true;
                }
            }
            Rat(_) => {}
            Add(a, b) | Sub(a, b) | Mul(a, b) | Div(a, b) | Pow(a, b) => {
                pile.push(a.as_ref());
                pile.push(b.as_ref());
            }
        }
    }
    false
}

fn collect_addsub(e: Expr, signe: bool, out: &mut Vec<(bool, Expr)>) {
    use Expr::*;
    match e {
        Add(a, b) => {
            collect_addsub(*a, signe, out);
            collect_addsub(*b, signe, out);
        }
        Sub(a, b) => {
            collect_addsub(*a, signe, out);
            collect_addsub(*b, !signe, out);
        }
        other => out.push((signe, other)),
    }
}

fn collect_mul(e: Expr, out: &mut Vec<Expr>) {
    use Expr::*;
    match e {
        Mul(a, b) => {
            collect_mul(*a, out);
            collect_mul(*b, out);
        }
        other => out.push(other),
    }
}

/// Découpe un terme brut (produit) en (coeff, monôme, opaques).
fn decoupe_terme(brut: Expr, negatif: bool) -> Terme {
    use Expr::*;

    let mut facteurs: Vec<Expr> = Vec::new();
    collect_mul(brut, &mut facteurs);

    let mut coeff = if negatif {
        -BigRational::one()
    } else {
        BigRational::one()
    };
    let mut vars: BTreeMap<String, i64> = BTreeMap::new();
    let mut opaques: Vec<Expr> = Vec::new();

    for f in facteurs {
        match f {
            Rat(r) => coeff *= r,
            Var(s) => *vars.entry(s).or_insert(0) += 1,

            // x^n (n entier >= 1, raisonnable) entre dans le monôme
            Pow(base, exp) => {
                let mut place = false;
                if let (Var(s), Rat(r)) = (base.as_ref(), exp.as_ref()) {
                    if r.denom().is_one() {
                        if let Some(n) = big_to_i64(r.numer()) {
                            if n >= 1 {
                                *vars.entry(s.clone()).or_insert(0) += n;
                                place = true;
                            }
                        }
                    }
                }
                if !place {
                    opaques.push(Pow(base, exp));
                }
            }

            other => opaques.push(other),
        }
    }

    // ordre déterministe des facteurs opaques (clef d’affichage)
    opaques.sort_by_key(|o| o.to_string());

    Terme {
        coeff,
        vars,
        opaques,
    }
}

/// Aplatis une expression développée en termes collectés (fusion des monômes égaux).
pub(crate) fn termes_collectes(e: Expr) -> Vec<Terme> {
    let mut bruts: Vec<(bool, Expr)> = Vec::new();
    collect_addsub(e, false, &mut bruts);

    let mut fusion: BTreeMap<String, Terme> = BTreeMap::new();
    for (negatif, brut) in bruts {
        let t = decoupe_terme(brut, negatif);
        let cle = t.cle();
        match fusion.get_mut(&cle) {
            Some(existant) => existant.coeff += t.coeff,
            None => {
                fusion.insert(cle, t);
            }
        }
    }

    let mut termes: Vec<Terme> = fusion.into_values().collect();
    termes.retain(|t| !t.coeff.is_zero());

    // degré décroissant, puis ordre lexicographique des monômes
    // (x² avant x·y avant y² ; la constante — degré 0 — finit en dernier)
    termes.sort_by(cmp_termes);

    termes
}

fn cmp_termes(a: &Terme, b: &Terme) -> Ordering {
    b.degre().cmp(&a.degre()).then_with(|| {
        let mut ita = a.vars.iter();
        let mut itb = b.vars.iter();
        loop {
            match (ita.next(), itb.next()) {
                (Some((va, da)), Some((vb, db))) => match va.cmp(vb) {
                    // la variable la plus petite (x avant y) passe d’abord
                    Ordering::Less => return Ordering::Less,
                    Ordering::Greater => return Ordering::Greater,
                    // même variable : exposant le plus grand d’abord
                    Ordering::Equal => match db.cmp(da) {
                        Ordering::Equal => continue,
                        autre => return autre,
                    },
                },
                (Some(_), None) => return Ordering::Less,
                (None, Some(_)) => return Ordering::Greater,
                (None, None) => break,
            }
        }
        a.cle().cmp(&b.cle())
    })
}

/* ------------------------ Reconstruction “jolie” ------------------------ */

/// Reconstruit l’expression d’un terme, SANS son signe (coeff pris en valeur absolue).
fn terme_vers_expr(t: &Terme) -> Expr {
    use Expr::*;

    let abs = t.coeff.abs();
    let mut facteurs: Vec<Expr> = Vec::new();

    if !abs.is_one() || (t.vars.is_empty() && t.opaques.is_empty()) {
        facteurs.push(Rat(abs));
    }

    for (v, d) in &t.vars {
        if *d == 1 {
            facteurs.push(Var(v.clone()));
        } else {
            facteurs.push(Pow(Box::new(Var(v.clone())), Box::new(Expr::rat_i64(*d))));
        }
    }

    facteurs.extend(t.opaques.iter().cloned());

    let mut it = facteurs.into_iter();
    let mut acc = it.next().expect("au moins un facteur");
    for f in it {
        acc = Mul(Box::new(acc), Box::new(f));
    }
    acc
}

/// Recompose une somme triée à partir des termes collectés.
/// Terme négatif => Sub ; premier terme négatif => Sub(0, ·) (rendu “-x” par format).
pub(crate) fn recompose(termes: &[Terme]) -> Expr {
    use Expr::*;

    if termes.is_empty() {
        return Rat(BigRational::zero());
    }

    let premier = &termes[0];
    let mut acc = if premier.coeff.is_negative() {
        Sub(
            Box::new(Rat(BigRational::zero())),
            Box::new(terme_vers_expr(premier)),
        )
    } else {
        terme_vers_expr(premier)
    };

    for t in &termes[1..] {
        let abs = terme_vers_expr(t);
        acc = if t.coeff.is_negative() {
            Sub(Box::new(acc), Box::new(abs))
        } else {
            Add(Box::new(acc), Box::new(abs))
        };
    }
    acc
}

/// Développe, collecte, recompose : la forme canonique d’affichage du moteur.
pub fn collecte(e: Expr) -> Expr {
    recompose(&termes_collectes(developpe(e)))
}
