// src/noyau/format.rs

/// Rendu du résultat numérique en chaîne affichable.
///
/// - NaN -> "NaN"
/// - ±Infinity -> "Infinity" (le signe n'est pas distingué)
/// - fini à partie fractionnaire nulle -> rendu entier ("14", jamais "14.0" ;
///   "-0" est normalisé en "0")
/// - fini sinon -> rendu f64 par défaut (forme la plus courte qui re-parse
///   à l'identique, sans notation exponentielle)
pub fn format_resultat(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return "Infinity".to_string();
    }
    if v.fract() == 0.0 && v >= i64::MIN as f64 && v <= i64::MAX as f64 {
        return format!("{}", v as i64);
    }
    v.to_string()
}
