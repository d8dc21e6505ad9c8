//! Noyau — évaluation (pipeline réel)
//!
//! Expression : tokenize -> RPN -> Expr -> simplify -> développe/collecte -> texte
//! Équation   : découpe sur '=' -> unifie (gauche - droite) -> variable cible
//!           -> résolution linéaire -> "cible = forme"
//!
//! Surface publique (contrat des sentinelles) :
//! - entrée vide            => "0"
//! - toute erreur du noyau  => "Error"
//! Les messages détaillés (français) restent accessibles via resoudre_detaille.

use super::developpe::collecte;
use super::expr::Expr;
use super::format::format_expr;
use super::jetons::{format_tokens, tokenize, Tok};
use super::resolution::{resoud_lineaire, variables};
use super::rpn::{from_rpn, to_rpn};

use num_traits::{Signed, Zero};

/// Sentinelle renvoyée par la surface publique en cas d’échec du noyau.
const SORTIE_ERREUR: &str = "Error";

#[derive(Default, Clone, Debug)]
pub struct DemarcheNoyau {
    pub jetons: String,
    pub rpn: String,
    pub avant: String,
    pub apres: String,
    pub note: String,
}

/// Surface publique : sortie texte du moteur, prête pour `en_latex`.
/// Totale — jamais d’erreur levée, sentinelles "0" / "Error".
pub fn resoudre(entree: &str) -> String {
    if entree.trim().is_empty() {
        return "0".to_string();
    }
    match resoudre_detaille(entree) {
        Ok((exact, _d)) => exact,
        Err(_) => SORTIE_ERREUR.to_string(),
    }
}

/// API détaillée : évalue une expression ou résout une équation, et retourne:
/// - la forme texte finale (celle que consomme le formateur LaTeX)
/// - la démarche (jetons, rpn, avant/après)
pub fn resoudre_detaille(entree: &str) -> Result<(String, DemarcheNoyau), String> {
    let s = entree.trim();
    if s.is_empty() {
        return Err("Entrée vide".into());
    }

    // 1) Jetons
    let jetons = tokenize(s)?;
    let jetons_txt = format_tokens(&jetons);

    // Équation ou simple expression ?
    match jetons.iter().position(|t| matches!(t, Tok::Egal)) {
        Some(pos) => resoud_equation(&jetons, pos, jetons_txt),
        None => evalue_expression(&jetons, jetons_txt),
    }
}

/* ------------------------ Expression (sans '=') ------------------------ */

fn evalue_expression(
    jetons: &[Tok],
    jetons_txt: String,
) -> Result<(String, DemarcheNoyau), String> {
    // 2) RPN
    let rpn = to_rpn(jetons)?;
    let rpn_txt = format_tokens(&rpn);

    // 3) AST (Expr)
    let expr0 = from_rpn(&rpn)?;

    // 4) Simplification de base puis forme canonique (développe + collecte)
    let expr_s = expr0.clone().simplify();
    let expr_c = collecte(expr_s).simplify();

    // 5) Refus des quotients 1/0 restés symboliques
    if contient_div_zero(&expr_c) {
        return Err("division par zéro".into());
    }

    let exact = format_expr(&expr_c);

    let d = DemarcheNoyau {
        jetons: jetons_txt,
        rpn: rpn_txt,
        avant: format_expr(&expr0),
        apres: exact.clone(),
        note: "Pipeline: jetons → RPN → Expr → simplify → développe/collecte → texte.".into(),
    };

    Ok((exact, d))
}

/* ------------------------ Équation (avec '=') ------------------------ */

fn resoud_equation(
    jetons: &[Tok],
    pos: usize,
    jetons_txt: String,
) -> Result<(String, DemarcheNoyau), String> {
    let (gauche, reste) = jetons.split_at(pos);
    let droite = &reste[1..];

    if droite.iter().any(|t| matches!(t, Tok::Egal)) {
        return Err("plusieurs '=' dans l’équation".into());
    }
    if gauche.is_empty() || droite.is_empty() {
        return Err("équation incomplète autour de '='".into());
    }

    let rpn_g = to_rpn(gauche)?;
    let rpn_d = to_rpn(droite)?;
    let expr_g = from_rpn(&rpn_g)?;
    let expr_d = from_rpn(&rpn_d)?;

    let rpn_txt = format!("{} = {}", format_tokens(&rpn_g), format_tokens(&rpn_d));
    let avant = format!("{} = {}", format_expr(&expr_g), format_expr(&expr_d));

    // Unification : gauche - droite = 0
    let unifie = Expr::Sub(Box::new(expr_g), Box::new(expr_d)).simplify();

    // Auto-détection de la cible : première variable (ordre lexicographique),
    // "x" par défaut si l’équation n’en contient aucune.
    let vars = variables(&unifie);
    let cible = vars
        .iter()
        .next()
        .cloned()
        .unwrap_or_else(|| "x".to_string());

    let solution = resoud_lineaire(unifie, &cible)?;
    if contient_div_zero(&solution) {
        return Err("division par zéro".into());
    }

    let apres = format_expr(&solution);
    let exact = format!("{cible} = {apres}");

    let d = DemarcheNoyau {
        jetons: jetons_txt,
        rpn: rpn_txt,
        avant,
        apres: apres.clone(),
        note: "Pipeline: jetons → découpe '=' → unification (g - d) → développe/collecte → résolution linéaire.".into(),
    };

    Ok((exact, d))
}

/* ------------------------ Garde-fous ------------------------ */

/// Détecte une division par le rationnel 0 restée symbolique :
/// Div(·, 0) mais aussi Pow(0, e) avec e négatif (0^-n est 1/0).
fn contient_div_zero(e: &Expr) -> bool {
    use Expr::*;

    let mut pile: Vec<&Expr> = vec![e];
    while let Some(x) = pile.pop() {
        match x {
            Div(a, b) => {
                if matches!(b.as_ref(), Rat(r) if r.is_zero()) {
                    return true;
                }
                pile.push(a.as_ref());
                pile.push(b.as_ref());
            }
            Pow(a, b) => {
                if matches!(a.as_ref(), Rat(r) if r.is_zero())
                    && matches!(b.as_ref(), Rat(e) if e.is_negative())
                {
                    return true;
                }
                pile.push(a.as_ref());
                pile.push(b.as_ref());
            }
            Add(a, b) | Sub(a, b) | Mul(a, b) => {
                pile.push(a.as_ref());
                pile.push(b.as_ref());
            }
            Rat(_) | Var(_) => {}
        }
    }
    false
}

/* ------------------------ Exports compagnons (parité wasm) ------------------------ */

/// Nombre de jetons d’une entrée (0 si la tokenisation échoue).
pub fn compter_jetons(entree: &str) -> usize {
    tokenize(entree.trim()).map(|v| v.len()).unwrap_or(0)
}

/// Vue texte de l’AST d’un énoncé : "G: <gauche> | D: <droite>".
/// Sans '=', la droite vaut 0 (convention de l’énoncé). "Error" si le parse échoue.
pub fn ast_visuel(entree: &str) -> String {
    let s = entree.trim();
    if s.is_empty() {
        return String::new();
    }

    let visu = || -> Result<String, String> {
        let jetons = tokenize(s)?;

        let (gauche, droite) = match jetons.iter().position(|t| matches!(t, Tok::Egal)) {
            Some(pos) => {
                let (g, reste) = jetons.split_at(pos);
                let d = &reste[1..];
                if d.iter().any(|t| matches!(t, Tok::Egal)) {
                    return Err("plusieurs '='".into());
                }
                let eg = from_rpn(&to_rpn(g)?)?;
                let ed = from_rpn(&to_rpn(d)?)?;
                (eg, ed)
            }
            None => {
                let eg = from_rpn(&to_rpn(&jetons)?)?;
                (eg, Expr::rat_i64(0))
            }
        };

        Ok(format!(
            "G: {} | D: {}",
            format_expr(&gauche),
            format_expr(&droite)
        ))
    };

    visu().unwrap_or_else(|_| SORTIE_ERREUR.to_string())
}
