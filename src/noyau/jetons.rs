// src/noyau/jetons.rs

use super::erreurs::ErreurNoyau;

/// Fonctions scientifiques unaires (touches du clavier scientifique).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sqrt,
    Log, // base 10
    Ln,  // base e
    Sin,
    Cos,
    Tan,
    ArcSin,
    ArcCos,
    ArcTan,
    Inverse, // touche "1/x"
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tok {
    Num(f64),

    Plus,
    Moins,
    Fois,        // ×
    Division,    // ÷
    Puissance,   // ^
    Pourcent,    // % (unaire)
    Factorielle, // ! (unaire)

    Fonction(Fonction),

    LPar,
    RPar,
}

/// Table des noms de fonctions, candidats les PLUS LONGS d'abord :
/// "arcsin" doit être tenté avant "sin" (sinon match partiel).
const FONCTIONS: &[(&str, Fonction)] = &[
    ("arcsin", Fonction::ArcSin),
    ("arccos", Fonction::ArcCos),
    ("arctan", Fonction::ArcTan),
    ("sqrt", Fonction::Sqrt),
    ("1/x", Fonction::Inverse),
    ("log", Fonction::Log),
    ("sin", Fonction::Sin),
    ("cos", Fonction::Cos),
    ("tan", Fonction::Tan),
    ("ln", Fonction::Ln),
];

pub fn nom_fonction(f: Fonction) -> &'static str {
    match f {
        Fonction::Sqrt => "sqrt",
        Fonction::Log => "log",
        Fonction::Ln => "ln",
        Fonction::Sin => "sin",
        Fonction::Cos => "cos",
        Fonction::Tan => "tan",
        Fonction::ArcSin => "arcsin",
        Fonction::ArcCos => "arccos",
        Fonction::ArcTan => "arctan",
        Fonction::Inverse => "1/x",
    }
}

/// `lit` est-il présent tel quel à la position `i` ?
fn commence_par(chars: &[char], i: usize, lit: &str) -> bool {
    lit.chars()
        .enumerate()
        .all(|(k, c)| chars.get(i + k) == Some(&c))
}

fn match_fonction(chars: &[char], i: usize) -> Option<(&'static str, Fonction)> {
    FONCTIONS
        .iter()
        .copied()
        .find(|(nom, _)| commence_par(chars, i, nom))
}

/// Glyphes d'opérateurs au sens du contexte "moins unaire".
fn est_symbole_operateur(c: char) -> bool {
    matches!(c, '+' | '-' | '×' | '÷' | '^' | '%' | '!')
}

/// Un '-' à la position `i` est unaire si rien ne le précède, ou si le
/// caractère précédent est '(' ou un opérateur.
fn moins_unaire(chars: &[char], i: usize) -> bool {
    if i == 0 {
        return true;
    }
    let prev = chars[i - 1];
    prev == '(' || est_symbole_operateur(prev)
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - nombres décimaux (ex: 12, 3.5), moins unaire inclus (ex: -4 en début,
///   après '(' ou après un opérateur)
/// - opérateurs + - × ÷ ^ % !
/// - parenthèses ( )
/// - fonctions scientifiques : sqrt log ln sin cos tan arcsin arccos arctan 1/x
///
/// ATTENTION: pas de blancs ici — tout caractère hors alphabet est une erreur
/// lexicale. L'alias '/' pour '÷' est une substitution textuelle faite par la
/// façade AVANT le scan (voir eval.rs).
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurNoyau> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        // 1) Noms de fonctions (les plus longs d'abord)
        if let Some((nom, f)) = match_fonction(&chars, i) {
            out.push(Tok::Fonction(f));
            i += nom.chars().count();
            continue;
        }

        // 2) Nombre : chiffre, '.', ou moins unaire — on consomme au plus un
        //    '-' de tête puis une plage maximale de chiffres/'.'. Les littéraux
        //    mal formés ("2..3", "-" seul) échouent au parse f64.
        if c.is_ascii_digit() || c == '.' || (c == '-' && moins_unaire(&chars, i)) {
            let debut = i;
            if c == '-' {
                i += 1;
            }
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            let litteral: String = chars[debut..i].iter().collect();
            let v: f64 = litteral
                .parse()
                .map_err(|_| ErreurNoyau::Lexique(format!("nombre invalide: {litteral}")))?;
            out.push(Tok::Num(v));
            continue;
        }

        // 3) Opérateurs et parenthèses (un caractère)
        //    NOTE: '-' ici est forcément un moins BINAIRE (le cas unaire est
        //    absorbé par la branche nombre ci-dessus).
        let tok = match c {
            '+' => Tok::Plus,
            '-' => Tok::Moins,
            '×' => Tok::Fois,
            '÷' => Tok::Division,
            '^' => Tok::Puissance,
            '%' => Tok::Pourcent,
            '!' => Tok::Factorielle,
            '(' => Tok::LPar,
            ')' => Tok::RPar,
            _ => return Err(ErreurNoyau::Lexique(format!("caractère inattendu: '{c}'"))),
        };
        out.push(tok);
        i += 1;
    }

    Ok(out)
}

/// Format utilitaire (traces/tests) : liste de jetons en texte.
pub fn format_tokens(jetons: &[Tok]) -> String {
    let mut out = Vec::new();
    for t in jetons {
        let s = match t {
            Tok::Num(v) => format!("{v}"),
            Tok::Fonction(f) => nom_fonction(*f).to_string(),

            Tok::Plus => "+".to_string(),
            Tok::Moins => "-".to_string(),
            Tok::Fois => "×".to_string(),
            Tok::Division => "÷".to_string(),
            Tok::Puissance => "^".to_string(),
            Tok::Pourcent => "%".to_string(),
            Tok::Factorielle => "!".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
