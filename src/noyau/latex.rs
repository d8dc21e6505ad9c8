// src/noyau/latex.rs
//
// Formateur d’expressions : sortie texte du moteur -> fragment LaTeX.
// Pipeline de réécritures, ORDRE FIXE, chaque étape travaille sur la sortie
// de la précédente ; une étape sans correspondance est un no-op.
//
// 1. parenthèses externes retirées jusqu’au point fixe (gardé par l’équilibre)
// 2. (expr ^ 1/2)  ->  \sqrt{expr}        (non glouton)
// 3. a/b           ->  \frac{a}{b}        (jeton = chiffres OU lettre minuscule seule)
// 4. " * "         ->  ""                 (multiplication implicite)
// 5. nettoyage littéral, UNE passe : \sqrt{(x)} et \frac{(a)}{(b)}
//
// La restriction de l’étape 3 à un jeton étroit est voulue (forme de sortie du
// moteur) : ne pas généraliser, "ab/cd" ne devient pas une seule fraction.
//
// Fonction TOTALE : jamais d’erreur, au pire la chaîne d’entrée inchangée.

use regex::Regex;
use std::sync::LazyLock;

// Compilées une fois, réutilisées à chaque appel
static RE_RACINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((.*?) \^ 1/2\)").expect("regex racine valide"));

static RE_FRACTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+|[a-z])/(\d+|[a-z])").expect("regex fraction valide"));

static RE_RACINE_PARENS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\sqrt\{\((.*?)\)\}").expect("regex nettoyage racine valide"));

static RE_FRAC_PARENS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\frac\{\((.*?)\)\}\{\((.*?)\)\}").expect("regex nettoyage fraction valide")
});

/// Sentinelles du moteur : transmises telles quelles, aucune réécriture.
const SENTINELLE_ZERO: &str = "0";
const SENTINELLE_ERREUR: &str = "Error";

/// Convertit la sortie texte du moteur en fragment LaTeX affichable.
/// Composition gauche -> droite des cinq étapes, dans l’ordre, sans retour.
pub fn en_latex(sortie_moteur: &str) -> String {
    if sortie_moteur.is_empty()
        || sortie_moteur == SENTINELLE_ZERO
        || sortie_moteur == SENTINELLE_ERREUR
    {
        return sortie_moteur.to_string();
    }

    let tex = retire_parentheses_externes(sortie_moteur.to_string());
    let tex = plie_racines(&tex);
    let tex = plie_fractions(&tex);
    let tex = retire_multiplications(&tex);
    nettoie_parentheses_redondantes(&tex)
}

/* ------------------------ Étapes (indépendantes, ordre préservé) ------------------------ */

/// 1. Parenthèses externes : on ne retire la paire que si l’intérieur reste
///    équilibré, sinon "(a)+(b)" serait corrompu. Jusqu’au point fixe.
pub(crate) fn retire_parentheses_externes(mut tex: String) -> String {
    while tex.starts_with('(')
        && tex.ends_with(')')
        && parentheses_equilibrees(&tex[1..tex.len() - 1])
    {
        tex = tex[1..tex.len() - 1].to_string();
    }
    tex
}

/// 2. Racines carrées : (N ^ 1/2) -> \sqrt{N}, plus petite portée d’abord.
pub(crate) fn plie_racines(tex: &str) -> String {
    RE_RACINE.replace_all(tex, r"\sqrt{$1}").into_owned()
}

/// 3. Fractions : a/b -> \frac{a}{b} (jetons étroits seulement).
pub(crate) fn plie_fractions(tex: &str) -> String {
    RE_FRACTION.replace_all(tex, r"\frac{$1}{$2}").into_owned()
}

/// 4. Multiplication : le moteur écrit " * ", l’algèbre visuelle l’omet.
pub(crate) fn retire_multiplications(tex: &str) -> String {
    tex.replace(" * ", "")
}

/// 5. Nettoyage final des parenthèses redondantes (une seule passe).
pub(crate) fn nettoie_parentheses_redondantes(tex: &str) -> String {
    let tex = RE_RACINE_PARENS.replace_all(tex, r"\sqrt{$1}").into_owned();
    RE_FRAC_PARENS.replace_all(&tex, r"\frac{$1}{$2}").into_owned()
}

/// Équilibre des parenthèses : compteur gauche->droite,
/// négatif => faux tout de suite ; vrai seulement si zéro à la fin.
/// Sert uniquement à garder l’étape 1.
pub fn parentheses_equilibrees(s: &str) -> bool {
    let mut profondeur: i64 = 0;
    for c in s.chars() {
        if c == '(' {
            profondeur += 1;
        } else if c == ')' {
            profondeur -= 1;
        }
        if profondeur < 0 {
            return false;
        }
    }
    profondeur == 0
}
