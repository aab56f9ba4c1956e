// src/lib.rs
//
// Calculatrice scientifique — noyau d'évaluation flottant
// --------------------------------------------------------
// But:
// - Évaluer une expression infixe (texte) en un résultat affichable (texte)
// - Pipeline pur, sans état entre appels : texte -> jetons -> RPN -> f64 -> texte
// - Le front (boutons, écran, mode DEG/RAD) vit AILLEURS : il nous passe la
//   chaîne affichée plus le mode angulaire, et affiche la chaîne retournée.
//
// IMPORTANT (structure projet):
// - Tout le noyau vit dans src/noyau/ ; ici seulement les re-exports publics.

pub mod noyau;

pub use noyau::{eval_expression, evaluer, ErreurNoyau, ModeAngle};
