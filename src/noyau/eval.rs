//! Noyau — évaluation (pipeline réel)
//!
//! normalisation '/' -> '÷' -> tokenize -> RPN -> machine à pile -> f64
//!
//! L'évaluation est PURE : aucun état ne survit à un appel, le mode angulaire
//! est un paramètre. Les erreurs de domaine mathématique (log d'un négatif,
//! division par zéro, arcsin hors [-1,1]) ne sont PAS des erreurs : elles
//! circulent en NaN/Infinity IEEE jusqu'au rendu.

use tracing::{debug, trace};

use super::erreurs::ErreurNoyau;
use super::format::format_resultat;
use super::jetons::{format_tokens, tokenize, Fonction, Tok};
use super::rpn::to_rpn;

/// Mode angulaire des fonctions trigonométriques.
/// - Degres : sin/cos/tan convertissent leur ENTRÉE degrés -> radians ;
///   arcsin/arccos/arctan convertissent leur SORTIE radians -> degrés.
/// - Radians : aucune conversion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModeAngle {
    #[default]
    Degres,
    Radians,
}

impl ModeAngle {
    fn entree_en_radians(self, v: f64) -> f64 {
        match self {
            ModeAngle::Degres => v.to_radians(),
            ModeAngle::Radians => v,
        }
    }

    fn sortie_depuis_radians(self, v: f64) -> f64 {
        match self {
            ModeAngle::Degres => v.to_degrees(),
            ModeAngle::Radians => v,
        }
    }
}

/// Factorielle sur f64 : refuse négatif et non-entier (NaN/Infinity compris),
/// sinon produit itératif 1·2·…·v.
fn factorielle(v: f64) -> Result<f64, ErreurNoyau> {
    if v < 0.0 {
        return Err(ErreurNoyau::Evaluation(format!(
            "factorielle d'un nombre négatif: {v}"
        )));
    }
    if v.fract() != 0.0 {
        return Err(ErreurNoyau::Evaluation(format!(
            "factorielle d'un non-entier: {v}"
        )));
    }

    let n = v as u64;
    let mut acc = 1.0_f64;
    for k in 1..=n {
        acc *= k as f64;
        if acc.is_infinite() {
            // garde-fou : saturé en f64, les facteurs suivants ne changent rien
            break;
        }
    }
    Ok(acc)
}

fn applique_binaire(tok: &Tok, a: f64, b: f64) -> f64 {
    match tok {
        Tok::Plus => a + b,
        Tok::Moins => a - b,
        Tok::Fois => a * b,
        Tok::Division => a / b, // IEEE : b == 0 donne ±Infinity ou NaN
        Tok::Puissance => a.powf(b),
        _ => unreachable!("jeton non binaire"),
    }
}

fn applique_fonction(f: Fonction, v: f64, mode: ModeAngle) -> f64 {
    match f {
        Fonction::Sqrt => v.sqrt(),
        Fonction::Log => v.log10(),
        Fonction::Ln => v.ln(),

        Fonction::Sin => mode.entree_en_radians(v).sin(),
        Fonction::Cos => mode.entree_en_radians(v).cos(),
        Fonction::Tan => mode.entree_en_radians(v).tan(),

        Fonction::ArcSin => mode.sortie_depuis_radians(v.asin()),
        Fonction::ArcCos => mode.sortie_depuis_radians(v.acos()),
        Fonction::ArcTan => mode.sortie_depuis_radians(v.atan()),

        Fonction::Inverse => 1.0 / v, // 1/0 donne Infinity, pas une erreur
    }
}

fn depiler(pile: &mut Vec<f64>) -> Result<f64, ErreurNoyau> {
    pile.pop()
        .ok_or_else(|| ErreurNoyau::Evaluation("opérande manquante".into()))
}

/// Évalue une RPN avec une pile de f64.
///
/// - Nombre : empilé.
/// - '%' (unaire) : v -> v/100. '!' (unaire) : v -> v!.
/// - Opérateur binaire : premier dépilé = opérande DROITE, second = GAUCHE.
/// - Fonction : un argument dépilé, mode angulaire appliqué.
///
/// À la fin, exactement UNE valeur doit rester sur la pile.
pub fn eval_rpn(rpn: &[Tok], mode: ModeAngle) -> Result<f64, ErreurNoyau> {
    let mut pile: Vec<f64> = Vec::new();

    for tok in rpn.iter().copied() {
        match tok {
            Tok::Num(v) => pile.push(v),

            Tok::Pourcent => {
                let v = depiler(&mut pile)?;
                pile.push(v / 100.0);
            }

            Tok::Factorielle => {
                let v = depiler(&mut pile)?;
                pile.push(factorielle(v)?);
            }

            Tok::Plus | Tok::Moins | Tok::Fois | Tok::Division | Tok::Puissance => {
                let b = depiler(&mut pile)?;
                let a = depiler(&mut pile)?;
                pile.push(applique_binaire(&tok, a, b));
            }

            Tok::Fonction(f) => {
                let v = depiler(&mut pile)?;
                pile.push(applique_fonction(f, v, mode));
            }

            Tok::LPar | Tok::RPar => {
                return Err(ErreurNoyau::Evaluation(
                    "parenthèse inattendue en RPN".into(),
                ))
            }
        }
    }

    if pile.len() != 1 {
        return Err(ErreurNoyau::Etat(format!(
            "expression invalide: {} valeur(s) restante(s)",
            pile.len()
        )));
    }
    Ok(pile.pop().unwrap())
}

/// Pipeline structuré : retourne le f64 ou l'erreur PRÉCISE de l'étage fautif.
/// Voir `evaluer` pour la façade qui absorbe tout en "Error".
pub fn eval_expression(expression: &str, mode: ModeAngle) -> Result<f64, ErreurNoyau> {
    // '/' est un alias d'affichage de '÷' : substitution textuelle AVANT le
    // scan. Conséquence assumée : le nom de fonction "1/x" n'est atteignable
    // qu'en appelant tokenize directement.
    let normalise = expression.replace('/', "÷");

    let jetons = tokenize(&normalise)?;
    trace!(jetons = %format_tokens(&jetons), "tokenisation");

    let rpn = to_rpn(&jetons)?;
    trace!(rpn = %format_tokens(&rpn), "conversion postfixe");

    eval_rpn(&rpn, mode)
}

/// Façade : évalue et rend TOUJOURS une chaîne affichable.
///
/// - succès fini, partie fractionnaire nulle : rendu entier ("14")
/// - succès fini sinon : rendu f64 par défaut ("0.25")
/// - NaN / ±Infinity : "NaN" / "Infinity"
/// - tout échec interne (lexique, syntaxe, évaluation, état) : "Error"
pub fn evaluer(expression: &str, mode: ModeAngle) -> String {
    match eval_expression(expression, mode) {
        Ok(v) => format_resultat(v),
        Err(e) => {
            debug!(erreur = %e, "évaluation échouée");
            "Error".to_string()
        }
    }
}
