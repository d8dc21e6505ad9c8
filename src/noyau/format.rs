// src/noyau/format.rs
//
// Sortie texte du moteur (ce que consomme ensuite en_latex) :
// - Rat        : "3", "-1/2"
// - sommes     : "(x + 1)", "(x - 3)", moins unaire en tête : "(-x + 3)"
// - produits   : "(2 * x)", "(a * b * c)"  (les chaînes sont aplaties)
// - quotients  : "(a/b)"   — SANS espaces, pour que a/b se plie en fraction
// - puissances : "(x ^ 2)", "((x + 1) ^ 1/2)" — exposant nu, base déjà parenthésée

use num_traits::{One, Zero};

use super::expr::Expr;

/* ------------------------ Helpers rationnels ------------------------ */

fn format_rat(r: &num_rational::BigRational) -> String {
    let n = r.numer();
    let d = r.denom();
    if d.is_one() {
        format!("{n}")
    } else {
        format!("{n}/{d}")
    }
}

fn est_zero(e: &Expr) -> bool {
    matches!(e, Expr::Rat(r) if r.is_zero())
}

/* ------------------------ Rendu ------------------------ */

/// Formate l’expression dans la forme texte du moteur.
/// Les nœuds composés portent leurs parenthèses ; la paire externe éventuelle
/// est retirée plus tard par le nettoyage du formateur LaTeX.
pub fn format_expr(e: &Expr) -> String {
    use Expr::*;

    match e {
        Rat(r) => format_rat(r),
        Var(s) => s.clone(),

        Add(_, _) | Sub(_, _) => format_somme(e),
        Mul(_, _) => format_produit(e),

        Div(a, b) => format!("({}/{})", format_expr(a), format_expr(b)),
        Pow(a, b) => format!("({} ^ {})", format_expr(a), format_expr(b)),
    }
}

/* ------------------------ Sommes (aplaties) ------------------------ */

fn collecte_somme<'a>(e: &'a Expr, negatif: bool, out: &mut Vec<(bool, &'a Expr)>) {
    use Expr::*;
    match e {
        Add(a, b) => {
            collecte_somme(a, negatif, out);
            collecte_somme(b, negatif, out);
        }
        Sub(a, b) => {
            collecte_somme(a, negatif, out);
            collecte_somme(b, !negatif, out);
        }
        other => out.push((negatif, other)),
    }
}

/// Un terme dans une somme : un produit se rend SANS sa paire de parenthèses
/// ('*' lie plus fort que '+'), les autres nœuds gardent la leur.
fn format_terme(e: &Expr) -> String {
    match e {
        Expr::Mul(_, _) => {
            let mut facteurs: Vec<&Expr> = Vec::new();
            collecte_produit(e, &mut facteurs);
            let rendus: Vec<String> = facteurs.iter().map(|f| format_expr(f)).collect();
            rendus.join(" * ")
        }
        autre => format_expr(autre),
    }
}

fn format_somme(e: &Expr) -> String {
    let mut items: Vec<(bool, &Expr)> = Vec::new();
    collecte_somme(e, false, &mut items);

    // Sub(0, x) en tête (produit par la recomposition) : rendu "-x", pas "0 - x"
    if items.len() > 1 && !items[0].0 && est_zero(items[0].1) {
        items.remove(0);
    }

    if items.len() == 1 {
        let (negatif, x) = items[0];
        let s = format_terme(x);
        return if negatif { format!("-{s}") } else { s };
    }

    let mut out = String::from("(");
    for (i, (negatif, x)) in items.iter().enumerate() {
        let s = format_terme(x);
        if i == 0 {
            if *negatif {
                out.push('-');
            }
            out.push_str(&s);
        } else {
            out.push_str(if *negatif { " - " } else { " + " });
            out.push_str(&s);
        }
    }
    out.push(')');
    out
}

/* ------------------------ Produits (aplatis) ------------------------ */

fn collecte_produit<'a>(e: &'a Expr, out: &mut Vec<&'a Expr>) {
    use Expr::*;
    match e {
        Mul(a, b) => {
            collecte_produit(a, out);
            collecte_produit(b, out);
        }
        other => out.push(other),
    }
}

fn format_produit(e: &Expr) -> String {
    let mut facteurs: Vec<&Expr> = Vec::new();
    collecte_produit(e, &mut facteurs);

    let rendus: Vec<String> = facteurs.iter().map(|f| format_expr(f)).collect();
    format!("({})", rendus.join(" * "))
}
