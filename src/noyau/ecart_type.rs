// src/noyau/ecart_type.rs
//
// Écart-type d’échantillon exprimé comme UNE expression du noyau.
// Sert de charge réaliste (longues sommes, puissances, racine) et de commande console.
//
//   m = (x1+x2+...+xN)/N
//   s = √(((x1-m)^2+(x2-m)^2+...+(xN-m)^2)/(N-1))
//
// Deux passes (moyenne puis écarts) : la somme des carrés reste >= 0,
// donc pas de racine d’un négatif sur un échantillon constant.

use super::erreurs::EvalError;
use super::eval::evaluate_with;
use super::reglages::Reglages;

/// "(x1+x2+...+xN)/N"
pub fn expression_moyenne(nombres: &[&str]) -> String {
    let mut e = String::with_capacity(nombres.iter().map(|x| x.len() + 1).sum::<usize>() + 8);
    e.push('(');
    e.push_str(&nombres.join("+"));
    e.push_str(")/");
    e.push_str(&nombres.len().to_string());
    e
}

/// "√(((x1-m)^2+...+(xN-m)^2)/(N-1))" pour une moyenne `m` déjà connue.
pub fn expression_ecart_type(nombres: &[&str], moyenne: f64) -> String {
    // Display de f64 : jamais d’exposant, relecture exacte
    let m = moyenne.to_string();

    let mut e = String::with_capacity(nombres.len() * (m.len() + 12) + 16);
    e.push_str("√((");
    for x in nombres {
        e.push('(');
        e.push_str(x);
        e.push('-');
        e.push_str(&m);
        e.push_str(")^2+");
    }
    e.pop();
    e.push_str(")/");
    e.push_str(&(nombres.len() - 1).to_string());
    e.push(')');
    e
}

/// Prépare l’expression d’écart-type pour des nombres séparés par des espaces.
/// Évalue d’abord la moyenne (mêmes règles, mêmes erreurs que `evaluate`).
pub fn preparer(nombres: &str, reglages: &Reglages) -> Result<String, EvalError> {
    let xs: Vec<&str> = nombres.split_whitespace().collect();
    match xs.len() {
        0 => return Err(EvalError::EmptyInput),
        1 => {
            return Err(EvalError::Domain {
                position: 0,
                message: "écart-type : il faut au moins deux nombres",
            })
        }
        _ => {}
    }

    let moyenne = evaluate_with(&expression_moyenne(&xs), reglages)?;
    Ok(expression_ecart_type(&xs, moyenne))
}

/// Écart-type d’échantillon (N-1) via le noyau.
pub fn calculer(nombres: &str, reglages: &Reglages) -> Result<f64, EvalError> {
    let expr = preparer(nombres, reglages)?;
    tracing::debug!(longueur = expr.len(), "écart-type : expression prête");
    evaluate_with(&expr, reglages)
}
