//! Noyau exact du moteur d’algèbre
//!
//! Organisation interne :
//! - expr.rs       : AST exact + simplify
//! - jetons.rs     : tokenisation
//! - rpn.rs        : shunting-yard + construction Expr
//! - developpe.rs  : développement + regroupement des termes
//! - resolution.rs : variables + résolution linéaire
//! - format.rs     : sortie texte du moteur
//! - latex.rs      : sortie texte -> fragment LaTeX
//! - eval.rs       : pipeline complet + démarche

pub mod developpe;
pub mod eval;
pub mod expr;
pub mod format;
pub mod jetons;
pub mod latex;
pub mod resolution;
pub mod rpn;

#[cfg(test)]
mod tests_noyau;

#[cfg(test)]
mod tests_latex;


// API publique minimale
pub use eval::{ast_visuel, compter_jetons, resoudre, resoudre_detaille, DemarcheNoyau};
pub use latex::en_latex;
