// src/noyau/erreurs.rs

use thiserror::Error;

/// Erreurs internes du noyau, une variante par étage du pipeline.
///
/// La façade `evaluer` les absorbe TOUTES en `"Error"` ; les étages internes
/// retournent la variante précise pour que les tests puissent l'asserter.
///
/// NOTE: les erreurs de domaine mathématique (log d'un négatif, division par
/// zéro, arcsin hors [-1,1]) ne passent PAS par ici — elles se propagent en
/// NaN/Infinity IEEE dans le pipeline numérique et sortent en "NaN"/"Infinity".
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ErreurNoyau {
    /// Caractère inconnu, ou littéral numérique qui ne parse pas en f64.
    #[error("erreur lexicale: {0}")]
    Lexique(String),

    /// Parenthèses non appariées.
    #[error("erreur de syntaxe: {0}")]
    Syntaxe(String),

    /// Opérande manquante, factorielle invalide, jeton hors-place en RPN.
    #[error("erreur d'évaluation: {0}")]
    Evaluation(String),

    /// La pile ne contient pas exactement une valeur en fin d'évaluation.
    #[error("état final invalide: {0}")]
    Etat(String),
}
