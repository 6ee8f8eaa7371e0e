// src/noyau/format.rs
//
// Affichage du résultat (f64 -> texte de réponse).
// - entier         : "7" (pas de ".0")
// - décimal        : arrondi à `chiffres` décimales, zéros finaux retirés ("3.5")
// - très grand     : notation scientifique ("1.5e20")
// - presque nul    : notation scientifique plutôt que "0" ("1e-12")

/// Au-delà, l’écriture décimale complète devient illisible.
const SEUIL_SCIENTIFIQUE: f64 = 1e15;

/* ------------------------ Helpers texte ------------------------ */

/// "3.5000" -> "3.5" ; "7.000" -> "7" ; "12" -> "12"
fn retirer_zeros_finaux(s: &str) -> &str {
    if !s.contains('.') {
        return s;
    }
    s.trim_end_matches('0').trim_end_matches('.')
}

fn format_scientifique(v: f64, chiffres: usize) -> String {
    let brut = format!("{:.*e}", chiffres, v);
    match brut.split_once('e') {
        Some((mantisse, exposant)) => format!("{}e{exposant}", retirer_zeros_finaux(mantisse)),
        None => brut,
    }
}

/* ------------------------ Résultat ------------------------ */

/// Formate un résultat fini pour la réponse de `calculate`.
pub fn format_resultat(v: f64, chiffres: usize) -> String {
    // couvre aussi -0
    if v == 0.0 {
        return "0".to_string();
    }

    if v.abs() >= SEUIL_SCIENTIFIQUE {
        return format_scientifique(v, chiffres);
    }

    // non nul mais arrondi à zéro : l’écriture fixe mentirait
    let fixe = format!("{:.*}", chiffres, v);
    match retirer_zeros_finaux(&fixe) {
        "0" | "-0" => format_scientifique(v, chiffres),
        s => s.to_string(),
    }
}
