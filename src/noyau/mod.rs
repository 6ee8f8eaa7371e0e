//! Noyau flottant (commande “calculate”)
//!
//! Organisation interne :
//! - jetons.rs     : tokenisation paresseuse (Token, Lexeme, Tokenizer)
//! - eval.rs       : descente récursive + calcul à la volée, API publique
//! - erreurs.rs    : LexError / EvalError
//! - format.rs     : f64 -> texte de réponse
//! - reglages.rs   : précision d’affichage + garde-fou d’imbrication
//! - ecart_type.rs : écart-type d’échantillon exprimé en une expression

pub mod ecart_type;
pub mod erreurs;
pub mod eval;
pub mod format;
pub mod jetons;
pub mod reglages;

#[cfg(test)]
mod tests_scientifiques;


#[cfg(test)]
mod tests_proprietes;

// API publique minimale
pub use erreurs::{EvalError, LexError};
pub use eval::{calculate, calculate_with, evaluate, evaluate_with};
pub use reglages::Reglages;
