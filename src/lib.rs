// src/lib.rs
//
// Moteur Algèbre — noyau exact + formateur LaTeX
// ----------------------------------------------
// But:
// - NOYAU : rationnels exacts (jamais de flottants), simplification,
//   développement, résolution linéaire
// - FORMATEUR : sortie texte du moteur -> fragment LaTeX (en_latex)
// - WEB (wasm32) : exports #[wasm_bindgen] consommés par la page
//
// Contrat des sentinelles (surface publique) :
// - entrée vide  => "0"
// - échec noyau  => "Error"
// Les deux traversent en_latex sans aucune réécriture.

pub mod noyau;

pub use noyau::{
    ast_visuel, compter_jetons, en_latex, resoudre, resoudre_detaille, DemarcheNoyau,
};

/* ------------------------ Exports WEB (WASM) ------------------------ */

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::prelude::wasm_bindgen;

    /// Évalue/résout une entrée et retourne la forme texte du moteur.
    #[wasm_bindgen]
    pub fn resoudre(entree: &str) -> String {
        crate::noyau::resoudre(entree)
    }

    /// Convertit une sortie du moteur en fragment LaTeX.
    #[wasm_bindgen]
    pub fn en_latex(sortie_moteur: &str) -> String {
        crate::noyau::en_latex(sortie_moteur)
    }

    /// Nombre de jetons reconnus dans l’entrée.
    #[wasm_bindgen]
    pub fn compter_jetons(entree: &str) -> usize {
        crate::noyau::compter_jetons(entree)
    }

    /// Vue texte de l’AST : "G: <gauche> | D: <droite>".
    #[wasm_bindgen]
    pub fn ast_visuel(entree: &str) -> String {
        crate::noyau::ast_visuel(entree)
    }
}
