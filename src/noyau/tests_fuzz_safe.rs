//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - générateur d'expressions TOUJOURS bien parenthésées : la seule erreur
//!   admise est alors la factorielle (négatif / non-entier) ; tout le reste
//!   doit circuler en valeurs IEEE
//! - invariant clé : la façade ne rend que "Error", "NaN", "Infinity" ou un
//!   nombre re-parsable, et concorde avec l'étage structuré

use std::time::{Duration, Instant};

use super::{eval_expression, evaluer, ErreurNoyau, ModeAngle};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d'expressions (bornée) ------------------------ */

fn gen_atome(rng: &mut Rng) -> String {
    // petits entiers, décimaux, littéraux négatifs (le moins unaire du
    // tokenizer ne s'applique qu'aux littéraux, jamais à un groupe)
    match rng.pick(7) {
        0 => "0".to_string(),
        1 => "1".to_string(),
        2 => "2".to_string(),
        3 => "7".to_string(),
        4 => "0.5".to_string(),
        5 => "3.5".to_string(),
        _ => {
            if rng.coin() {
                "-2".to_string()
            } else {
                "-0.5".to_string()
            }
        }
    }
}

fn gen_expr(rng: &mut Rng, depth: usize, avec_trig: bool) -> String {
    if depth == 0 {
        return gen_atome(rng);
    }

    match rng.pick(9) {
        0 => gen_atome(rng),
        1 => format!(
            "({}+{})",
            gen_expr(rng, depth - 1, avec_trig),
            gen_expr(rng, depth - 1, avec_trig)
        ),
        2 => format!(
            "({}-{})",
            gen_expr(rng, depth - 1, avec_trig),
            gen_expr(rng, depth - 1, avec_trig)
        ),
        3 => format!(
            "({}×{})",
            gen_expr(rng, depth - 1, avec_trig),
            gen_expr(rng, depth - 1, avec_trig)
        ),
        4 => format!(
            "({}÷{})",
            gen_expr(rng, depth - 1, avec_trig),
            gen_expr(rng, depth - 1, avec_trig)
        ),
        5 => format!(
            "({}^{})",
            gen_expr(rng, depth - 1, avec_trig),
            gen_expr(rng, depth - 1, avec_trig)
        ),
        6 => {
            let fns: &[&str] = if avec_trig {
                &[
                    "sin", "cos", "tan", "arcsin", "arccos", "arctan", "sqrt", "log", "ln",
                ]
            } else {
                &["sqrt", "log", "ln"]
            };
            let f = fns[rng.pick(fns.len() as u32) as usize];
            format!("{f}({})", gen_expr(rng, depth - 1, avec_trig))
        }
        7 => format!("({})!", gen_expr(rng, depth - 1, avec_trig)),
        _ => format!("({})%", gen_expr(rng, depth - 1, avec_trig)),
    }
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Invariants ------------------------ */

fn sortie_admissible(s: &str) -> bool {
    s == "Error" || s == "NaN" || s == "Infinity" || s.parse::<f64>().is_ok()
}

fn check_facade_et_etage(expr: &str, mode: ModeAngle) {
    let facade = evaluer(expr, mode);
    assert!(
        sortie_admissible(&facade),
        "sortie hors contrat: expr={expr:?} sortie={facade:?}"
    );

    // même entrée, même sortie (fonction pure)
    assert_eq!(facade, evaluer(expr, mode), "non déterministe: {expr:?}");

    match eval_expression(expr, mode) {
        Ok(_) => assert_ne!(facade, "Error", "étage Ok mais façade Error: {expr:?}"),
        Err(e) => {
            assert_eq!(facade, "Error", "étage Err mais façade {facade:?}: {expr:?}");
            // expressions bien parenthésées : seule la factorielle peut échouer
            assert!(
                matches!(e, ErreurNoyau::Evaluation(_)) && expr.contains('!'),
                "erreur non attendue: expr={expr:?} err={e}"
            );
        }
    }
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_determinisme_et_facade() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    // Même seed => mêmes expressions => mêmes sorties (déterminisme)
    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..150 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4, true);
        check_facade_et_etage(&expr, ModeAngle::Degres);

        if evaluer(&expr, ModeAngle::Degres) == "Error" {
            seen_err += 1;
        } else {
            seen_ok += 1;
        }
    }

    // On veut voir un mix, sinon le fuzz ne "balaye" rien.
    assert!(seen_ok > 20, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop sage");
}

#[test]
fn fuzz_safe_mode_radians_aussi() {
    let t0 = Instant::now();
    let max = Duration::from_millis(400);

    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..100 {
        budget(t0, max);
        let expr = gen_expr(&mut rng, 4, true);
        check_facade_et_etage(&expr, ModeAngle::Radians);
    }
}

#[test]
fn fuzz_safe_mode_indifferent_sans_trig() {
    let t0 = Instant::now();
    let max = Duration::from_millis(400);

    let mut rng = Rng::new(0xFACADE_u64);

    for _ in 0..100 {
        budget(t0, max);
        let expr = gen_expr(&mut rng, 4, false);
        assert_eq!(
            evaluer(&expr, ModeAngle::Degres),
            evaluer(&expr, ModeAngle::Radians),
            "le mode angulaire a fui hors trig: {expr:?}"
        );
    }
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let expr = somme_balancee("1", 800);
    budget(t0, max);
    assert_eq!(evaluer(&expr, ModeAngle::Degres), "800");

    // somme plate : la pile RPN reste à deux valeurs maximum
    let plate = vec!["1"; 500].join("+");
    budget(t0, max);
    assert_eq!(evaluer(&plate, ModeAngle::Degres), "500");
}

#[test]
fn fuzz_safe_entrees_retorses() {
    // mal formées : toutes doivent sortir "Error", sans panique
    for s in [
        "", "(", ")", "()", "+", "!", "%", "((", "))", "2+", "+2", "2××3", "1..2", "sin()",
        "sqrt(", "pi", "-(3)", "2^", "÷2",
    ] {
        assert_eq!(evaluer(s, ModeAngle::Degres), "Error", "expr={s:?}");
    }

    // valides mais extrêmes : jamais de panique, sortie dans le contrat
    for s in ["5!!", "9^9^9", "0^0", "171!×0", "(1÷0)!"] {
        let sortie = evaluer(s, ModeAngle::Degres);
        assert!(sortie_admissible(&sortie), "expr={s:?} sortie={sortie:?}");
    }
}

#[test]
fn fuzz_safe_soupe_de_caracteres() {
    let t0 = Instant::now();
    let max = Duration::from_millis(400);

    let pool: Vec<char> = "0123456789.+-×÷^%!()sincostanqrlgx/ ".chars().collect();
    let mut rng = Rng::new(0xDEAD_BEEF_u64);

    for _ in 0..300 {
        budget(t0, max);

        let longueur = 1 + rng.pick(30) as usize;
        let expr: String = (0..longueur)
            .map(|_| pool[rng.pick(pool.len() as u32) as usize])
            .collect();

        // ne doit JAMAIS paniquer ; la sortie reste dans le contrat
        let sortie = evaluer(&expr, ModeAngle::Degres);
        assert!(sortie_admissible(&sortie), "expr={expr:?} sortie={sortie:?}");
    }
}
