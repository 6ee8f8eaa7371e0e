// src/noyau/erreurs.rs
//
// Erreurs du noyau.
// - LexError  : caractère non reconnu par la tokenisation
// - EvalError : tout ce qui peut échouer pendant `evaluate`
//
// Les positions sont des indices de caractères (0 = premier caractère),
// pas des indices d’octets : "√2" a son '2' en position 1.

use thiserror::Error;

use super::jetons::Token;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("caractère inattendu '{character}' à la position {position}")]
pub struct LexError {
    pub position: usize,
    pub character: char,
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum EvalError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("entrée vide")]
    EmptyInput,

    #[error("attendu {expected}, trouvé {found} à la position {position}")]
    UnexpectedToken {
        expected: &'static str,
        found: Token,
        position: usize,
    },

    #[error("division par zéro à la position {position}")]
    DivisionByZero { position: usize },

    #[error("entrée en trop à la position {position}")]
    TrailingInput { position: usize },

    /// Résultat intermédiaire non fini (dépassement de f64).
    #[error("résultat hors limites à la position {position}")]
    Overflow { position: usize },

    #[error("{message} à la position {position}")]
    Domain {
        position: usize,
        message: &'static str,
    },

    #[error("imbrication trop profonde à la position {position} (limite {limite})")]
    TooDeep { position: usize, limite: usize },
}

impl EvalError {
    /// Position fautive dans l’entrée (None pour une entrée vide).
    pub fn position(&self) -> Option<usize> {
        match self {
            EvalError::EmptyInput => None,
            EvalError::Lex(e) => Some(e.position),
            EvalError::UnexpectedToken { position, .. }
            | EvalError::DivisionByZero { position }
            | EvalError::TrailingInput { position }
            | EvalError::Overflow { position }
            | EvalError::Domain { position, .. }
            | EvalError::TooDeep { position, .. } => Some(*position),
        }
    }
}
