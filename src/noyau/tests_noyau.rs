//! Tests noyau (campagne) : invariants + robustesse + limites contrôlées.
//!
//! But : couvrir le pipeline complet sans faire chauffer la machine.
//! - budget temps global
//! - tailles bornées (profondeur, exposants)
//!
//! Notes importantes (aligné avec l’état actuel du noyau) :
//! - La forme canonique trie degré décroissant, constante en dernier,
//!   et x² avant x·y avant y² à degré égal.
//! - La résolution n’accepte que le linéaire : tout terme où la cible
//!   apparaît ailleurs qu’en degré 1 est refusé (pas d’heuristiques).
//! - '^' lie plus fort que '/' : "x ^ 1/2" est (x^1)/2 ; la racine
//!   s’écrit "x ^ (1/2)".

use std::time::{Duration, Instant};

use super::{en_latex, resoudre, resoudre_detaille};

fn ok_exact(expr: &str) -> String {
    let (exact, _d) =
        resoudre_detaille(expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));
    exact
}

fn assert_exact_eq(expr: &str, attendu: &str) {
    assert_eq!(ok_exact(expr), attendu, "expr={expr:?}");
}

fn assert_erreur(expr: &str, fragment: &str) {
    let err = resoudre_detaille(expr).unwrap_err();
    assert!(
        err.contains(fragment),
        "expr={expr:?} : erreur {err:?} sans {fragment:?}"
    );
    assert_eq!(resoudre(expr), "Error", "expr={expr:?}");
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Rationnels exacts ------------------------ */

#[test]
fn noy_arithmetique_rationnelle() {
    assert_exact_eq("1/2 + 1/3", "5/6");
    assert_exact_eq("2/3 * 3/4", "1/2");
    assert_exact_eq("-(1/2) + 1", "1/2");
    assert_exact_eq("1/2 - 1/2", "0");
    assert_exact_eq("2 ^ 10", "1024");
    assert_exact_eq("0.5 + 0.25", "3/4");
}

#[test]
fn noy_moins_unaire_apres_operateur() {
    // le moins unaire lie plus fort que l’opérateur en attente
    assert_exact_eq("3 - -2", "5");
    assert_exact_eq("2 * -3", "-6");
    assert_exact_eq("2 ^ -2", "1/4");
    // et plus fort que '^' : (-2)^2, pas -(2^2)
    assert_exact_eq("-2 ^ 2", "4");
    assert_exact_eq("--5", "5");
}

#[test]
fn noy_exposant_hors_i64_reste_symbolique() {
    // l’opposé de cet exposant déborde i64 : pas de pliage, pas de panique
    assert_exact_eq(
        "2 ^ (-9223372036854775808)",
        "(2 ^ -9223372036854775808)",
    );
}

#[test]
fn noy_racines_exactes() {
    assert_exact_eq("9 ^ (1/2)", "3");
    assert_exact_eq("(1/4) ^ (1/2)", "1/2");
    // pas un carré parfait : la puissance reste symbolique
    assert_exact_eq("2 ^ (1/2)", "(2 ^ 1/2)");
}

/* ------------------------ Formes canoniques ------------------------ */

#[test]
fn noy_collecte_des_termes() {
    assert_exact_eq("2x + 3x", "(5 * x)");
    assert_exact_eq("x + x - 2x", "0");
    assert_exact_eq("-x + x", "0");
    assert_exact_eq("-(x + 1) + 1", "-x");
}

#[test]
fn noy_developpement() {
    assert_exact_eq("(x + 1)(x + 2)", "((x ^ 2) + 3 * x + 2)");
    assert_exact_eq("(x + 1) ^ 2", "((x ^ 2) + 2 * x + 1)");
    assert_exact_eq("(x + y) ^ 2", "((x ^ 2) + 2 * x * y + (y ^ 2))");
    assert_exact_eq("2(x + 3)", "(2 * x + 6)");
}

#[test]
fn noy_ordre_deterministe() {
    // même polynôme, deux écritures => même forme canonique
    let a = ok_exact("(x + y) ^ 2");
    let b = ok_exact("y ^ 2 + x ^ 2 + 2 x y");
    assert_eq!(a, b);
}

/* ------------------------ Équations ------------------------ */

#[test]
fn noy_equations_lineaires() {
    assert_exact_eq("2x + 1 = 5", "x = 2");
    assert_exact_eq("3x - 2 = x + 4", "x = 3");
    assert_exact_eq("2x = 3", "x = 3/2");
    assert_exact_eq("5 = x", "x = 5");
    // les termes carrés s’annulent : l’équation redevient linéaire
    assert_exact_eq("x ^ 2 + x = x ^ 2 + 4", "x = 4");
}

#[test]
fn noy_equation_cible_auto() {
    // première variable dans l’ordre lexicographique
    assert_exact_eq("y + 2 = 5", "y = 3");
    assert_exact_eq("x + y = 3", "x = (-y + 3)");
}

/* ------------------------ Erreurs attendues ------------------------ */

#[test]
fn noy_erreurs() {
    assert_erreur("2 +", "expression invalide");
    assert_erreur("(x + 1", "parenthèses non fermées");
    assert_erreur(") x", "fermante sans ouvrante");
    assert_erreur("3 @ 4", "caractère inattendu");
    assert_erreur("1/0", "division par zéro");
    // 0^-n est 1/0 : refusé par le même garde-fou
    assert_erreur("0 ^ (-2)", "division par zéro");
    assert_erreur("x * x = 4", "non linéaire");
    assert_erreur("x ^ 2 = 4", "non linéaire");
    assert_erreur("1 = 2 = 3", "plusieurs '='");
    assert_erreur("x + 1 =", "incomplète");
    assert_erreur("2 = 2", "aucun terme en x");
}

/* ------------------------ Intégration moteur -> LaTeX ------------------------ */

#[test]
fn noy_vers_latex() {
    assert_eq!(en_latex(&resoudre("2x = 3")), r"x = \frac{3}{2}");
    assert_eq!(en_latex(&resoudre("2 * x + 1")), "2x + 1");
    assert_eq!(en_latex(&resoudre("(x + 1)(x + 2)")), "(x ^ 2) + 3x + 2");
    assert_eq!(en_latex(&resoudre("")), "0");
    assert_eq!(en_latex(&resoudre("n’importe quoi §")), "Error");
}

/* ------------------------ Stress borné ------------------------ */

#[test]
fn noy_somme_longue_sous_budget() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    // 200 fois "x + " puis un 1 final : collecte en (200 * x) + 1
    let mut expr = String::new();
    for _ in 0..200 {
        expr.push_str("x + ");
    }
    expr.push('1');

    let exact = ok_exact(&expr);
    budget(t0, max);

    assert_eq!(exact, "(200 * x + 1)");
}

#[test]
fn noy_puissance_developpee_sous_budget() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    // (x + 1)^8 : 9 termes, coefficients binomiaux
    let exact = ok_exact("(x + 1) ^ 8");
    budget(t0, max);

    assert!(exact.contains("(x ^ 8)"), "exact={exact}");
    assert!(exact.contains("70 * (x ^ 4)"), "exact={exact}");
    assert!(exact.ends_with("+ 1)"), "exact={exact}");
}
