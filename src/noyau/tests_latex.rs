//! Tests du formateur LaTeX : sentinelles, étapes une à une, composition.
//!
//! Notes importantes (aligné avec le pipeline réel) :
//! - L’étape 1 tourne AVANT le pliage des racines : une racine qui englobe
//!   toute la chaîne perd d’abord sa paire externe, et c’est alors l’étape 3
//!   qui plie le "1/2" restant. Le pliage en \sqrt se vérifie donc sur une
//!   sous-expression, ou sur l’étape 2 isolée.
//! - La règle des fractions est volontairement étroite (chiffres ou lettre
//!   minuscule seule) : "ab/cd" ne devient pas une seule fraction.

use super::latex::{
    en_latex, nettoie_parentheses_redondantes, parentheses_equilibrees, plie_racines,
};

fn assert_latex(entree: &str, attendu: &str) {
    assert_eq!(en_latex(entree), attendu, "entrée={entree:?}");
}

/* ------------------------ Sentinelles ------------------------ */

#[test]
fn sentinelles_transmises_sans_reecriture() {
    assert_latex("", "");
    assert_latex("0", "0");
    assert_latex("Error", "Error");
}

/* ------------------------ Étape 1 : parenthèses externes ------------------------ */

#[test]
fn parentheses_externes_simples() {
    assert_latex("(x + 1)", "x + 1");
}

#[test]
fn parentheses_externes_point_fixe() {
    assert_latex("((x + 1))", "x + 1");
    assert_latex("(((x + 1)))", "x + 1");
}

#[test]
fn parentheses_non_englobantes_conservees() {
    // "(a)+(b)" : la paire externe n’englobe PAS toute la chaîne
    assert_latex("(a)+(b)", "(a)+(b)");
}

#[test]
fn equilibre_des_parentheses() {
    assert!(parentheses_equilibrees(""));
    assert!(parentheses_equilibrees("(a)(b)"));
    assert!(parentheses_equilibrees("((a + b))"));

    // plus de fermantes que d’ouvrantes à un instant donné => faux direct
    assert!(!parentheses_equilibrees(")("));
    assert!(!parentheses_equilibrees("a)+(b"));
    // jamais négatif mais non nul à la fin => faux aussi
    assert!(!parentheses_equilibrees("(()"));
}

/* ------------------------ Étape 2 : racines ------------------------ */

#[test]
fn racine_dans_une_sous_expression() {
    assert_latex("x + ((x + 1) ^ 1/2)", r"x + \sqrt{x + 1}");
}

#[test]
fn racine_etape_isolee() {
    // étape 2 seule (sans le retrait des parenthèses externes), puis nettoyage :
    // ((x + 1) ^ 1/2) => \sqrt{(x + 1)} => \sqrt{x + 1}
    let pliee = plie_racines("((x + 1) ^ 1/2)");
    assert_eq!(pliee, r"\sqrt{(x + 1)}");
    assert_eq!(nettoie_parentheses_redondantes(&pliee), r"\sqrt{x + 1}");
}

#[test]
fn racine_sans_parenthese_englobante() {
    // sans ")" final, l’étape 2 ne matche pas ; le 1/2 est plié par l’étape 3
    assert_latex("(x + 1) ^ 1/2", r"(x + 1) ^ \frac{1}{2}");
}

/* ------------------------ Étape 3 : fractions (règle étroite) ------------------------ */

#[test]
fn fraction_lettres_et_chiffres() {
    assert_latex("a/b", r"\frac{a}{b}");
    assert_latex("12/34", r"\frac{12}{34}");
    assert_latex("x = 3/2", r"x = \frac{3}{2}");
}

#[test]
fn fraction_jetons_etroits_seulement() {
    // "ab" n’est pas un jeton : seule la paire b/c (lettres seules) se plie
    assert_latex("ab/cd", r"a\frac{b}{c}d");
}

/* ------------------------ Étape 4 : multiplication ------------------------ */

#[test]
fn multiplication_elidee() {
    assert_latex("2 * x", "2x");
    assert_latex("a * b * c", "abc");
    assert_latex("(2 * x + 1)", "2x + 1");
}

/* ------------------------ Étape 5 + ordre des étapes ------------------------ */

#[test]
fn fraction_pliee_avant_nettoyage_racine() {
    // la fraction (étape 3) est pliée AVANT le nettoyage des parenthèses
    // redondantes (étape 5) : l’argument de la racine est déjà un \frac
    assert_latex("x + ((a/b) ^ 1/2)", r"x + \sqrt{\frac{a}{b}}");
}

#[test]
fn fraction_dans_une_racine_sans_parentheses() {
    // exemple littéral : l’étape 1 retire la paire externe, l’étape 2 ne
    // matche plus, l’étape 3 plie les deux quotients restants
    assert_latex("(a/b ^ 1/2)", r"\frac{a}{b} ^ \frac{1}{2}");
}

/* ------------------------ Totalité + point fixe global ------------------------ */

#[test]
fn entree_sans_correspondance_inchangee() {
    assert_latex("x + 1", "x + 1");
    assert_latex("indéchiffrable §§", "indéchiffrable §§");
}

#[test]
fn idempotence_sur_forme_reduite() {
    let entrees = [
        "(x + 1)",
        "((x + 1))",
        "x + ((x + 1) ^ 1/2)",
        "a/b",
        "12/34",
        "2 * x",
        "a * b * c",
        "(a/b ^ 1/2)",
        "x = 3/2",
        "(a)+(b)",
    ];

    for e in entrees {
        let une_fois = en_latex(e);
        assert_eq!(
            en_latex(&une_fois),
            une_fois,
            "en_latex non idempotent pour {e:?}"
        );
    }
}
