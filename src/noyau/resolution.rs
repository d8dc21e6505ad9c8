// src/noyau/resolution.rs
//
// Résolution linéaire sur la forme unifiée `gauche - droite = 0` :
// - détection des variables (ensemble ordonné => cible déterministe)
// - coefficient de la cible extrait des termes collectés
// - tout terme non linéaire en la cible => erreur (le moteur reste honnête)
//
// SAFE: aucun “canal toutes valeurs” : coefficient nul => erreur.

use num_rational::BigRational;
use num_traits::{One, Zero};

use std::collections::BTreeSet;

use super::developpe::{developpe, mention_var, recompose, termes_collectes, Terme};
use super::expr::Expr;

/// Ensemble ordonné des variables d’une expression (itératif, sans récursion).
pub fn variables(e: &Expr) -> BTreeSet<String> {
    use Expr::*;

    let mut vus = BTreeSet::new();
    let mut pile: Vec<&Expr> = vec![e];

    while let Some(x) = pile.pop() {
        match x {
            Var(s) => {
                vus.insert(s.clone());
            }
            Rat(_) => {}
            Add(a, b) | Sub(a, b) | Mul(a, b) | Div(a, b) | Pow(a, b) => {
                pile.push(a.as_ref());
                pile.push(b.as_ref());
            }
        }
    }

    vus
}

/// Résout `unifie = 0` pour `var`, si l’équation est linéaire en `var`.
///
/// Termes acceptés :
/// - coeff · var            (degré 1, sans autre occurrence de var)
/// - termes libres de var   (le “reste”, symbolique autorisé)
///
/// Solution : -reste / coeff, recollectée pour un affichage propre.
pub fn resoud_lineaire(unifie: Expr, var: &str) -> Result<Expr, String> {
    let termes = termes_collectes(developpe(unifie));

    let mut coeff = BigRational::zero();
    let mut reste: Vec<Terme> = Vec::new();

    for t in termes {
        let deg_var = t.vars.get(var).copied().unwrap_or(0);
        let var_dans_opaque = t.opaques.iter().any(|o| mention_var(o, var));

        if deg_var == 1 && t.vars.len() == 1 && t.opaques.is_empty() {
            coeff += t.coeff;
        } else if deg_var == 0 && !var_dans_opaque {
            reste.push(t);
        } else {
            return Err(format!("équation non linéaire en {var}"));
        }
    }

    if coeff.is_zero() {
        return Err(format!("aucun terme en {var}"));
    }

    // -reste / coeff : on re-scalarise chaque terme du reste (affichage déjà trié)
    let facteur = -(BigRational::one() / coeff);
    for t in &mut reste {
        t.coeff *= facteur.clone();
    }

    Ok(recompose(&reste).simplify())
}
