//! Noyau d'évaluation flottant
//!
//! Organisation interne :
//! - jetons.rs  : tokenisation (nombres, opérateurs, fonctions scientifiques)
//! - rpn.rs     : shunting-yard (infixe -> postfixe)
//! - eval.rs    : machine à pile + fonctions scientifiques + façade
//! - format.rs  : rendu du résultat ("14", "0.25", "NaN", "Infinity")
//! - erreurs.rs : erreurs structurées par étage (absorbées par la façade)

pub mod erreurs;
pub mod eval;
pub mod format;
pub mod jetons;
pub mod rpn;


#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreurs::ErreurNoyau;
pub use eval::{eval_expression, evaluer, ModeAngle};
