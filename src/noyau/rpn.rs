// src/noyau/rpn.rs
//
// Shunting-yard -> RPN (postfixe)
// Règles:
// - Nombre : sortie directe.
// - Fonction : empilée ; elle ressortira collée à son argument (après la
//   parenthèse fermante du groupe, ou en fin d'entrée).
// - Opérateur : dépile tant que le sommet est un opérateur de précédence >=.
//   TOUS les opérateurs sont traités associatifs à GAUCHE, '^' compris :
//   2^3^2 == (2^3)^2 == 64. Comportement volontairement conservé (pinné par
//   test), ne pas "corriger" sans le vouloir explicitement.
// - Parenthèses : '(' empilée ; ')' dépile jusqu'à '(' (jetée), et sort la
//   fonction éventuelle restée au sommet.
//
// NOTE: pas de moins unaire ici — le tokenizer produit directement des
// littéraux négatifs (voir jetons.rs).

use super::erreurs::ErreurNoyau;
use super::jetons::Tok;

/// Table de précédence (plus haut = lie plus fort).
/// + -  =1 ; × ÷ =2 ; ^ =3 ; % =4 ; ! =5 ; tout le reste 0.
pub fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Moins => 1,
        Tok::Fois | Tok::Division => 2,
        Tok::Puissance => 3,
        Tok::Pourcent => 4,
        Tok::Factorielle => 5,
        _ => 0,
    }
}

fn est_operateur(t: &Tok) -> bool {
    matches!(
        t,
        Tok::Plus
            | Tok::Moins
            | Tok::Fois
            | Tok::Division
            | Tok::Puissance
            | Tok::Pourcent
            | Tok::Factorielle
    )
}

/// Convertit une suite de jetons infixe en RPN (notation polonaise inversée).
///
/// Exemple:
///   jetons: [Fonction(Sin), LPar, Num(90), RPar]
///   rpn:    [Num(90), Fonction(Sin)]
///
/// Invariant de sortie : évaluée de gauche à droite avec une pile, la RPN doit
/// laisser exactement UNE valeur — sinon l'entrée était mal formée (c'est
/// l'évaluateur qui le constate, pas nous).
pub fn to_rpn(jetons: &[Tok]) -> Result<Vec<Tok>, ErreurNoyau> {
    let mut out: Vec<Tok> = Vec::new();
    let mut ops: Vec<Tok> = Vec::new();

    for tok in jetons.iter().copied() {
        match tok {
            Tok::Num(_) => out.push(tok),

            // fonction : on la garde sur la pile (elle sortira après son argument)
            Tok::Fonction(_) => ops.push(tok),

            Tok::LPar => ops.push(tok),

            Tok::RPar => {
                // dépile jusqu'à '(' ; si la pile se vide avant, la fermante
                // est orpheline
                let mut ouvrante_trouvee = false;
                while let Some(top) = ops.pop() {
                    if matches!(top, Tok::LPar) {
                        ouvrante_trouvee = true;
                        break;
                    }
                    out.push(top);
                }
                if !ouvrante_trouvee {
                    return Err(ErreurNoyau::Syntaxe(
                        "parenthèse fermante sans ouvrante".into(),
                    ));
                }

                // si une fonction est au sommet, elle s'applique au groupe
                // qu'on vient de fermer : on la sort aussi
                if let Some(Tok::Fonction(_)) = ops.last() {
                    out.push(ops.pop().unwrap());
                }
            }

            Tok::Plus
            | Tok::Moins
            | Tok::Fois
            | Tok::Division
            | Tok::Puissance
            | Tok::Pourcent
            | Tok::Factorielle => {
                // dépile tant que:
                // - le sommet est un opérateur (ni '(' ni fonction)
                // - et sa précédence est >= (associativité gauche pour tous)
                while let Some(top) = ops.last() {
                    if !est_operateur(top) {
                        break;
                    }
                    if precedence(top) >= precedence(&tok) {
                        let top = ops.pop().unwrap();
                        out.push(top);
                    } else {
                        break;
                    }
                }
                ops.push(tok);
            }
        }
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar) {
            return Err(ErreurNoyau::Syntaxe("parenthèses non fermées".into()));
        }
        out.push(op);
    }

    Ok(out)
}
