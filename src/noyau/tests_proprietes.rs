//! Tests de propriétés (proptest) du noyau.
//!
//! 1. **Jamais de panique** : toute chaîne donne Ok(fini) ou une erreur typée
//! 2. **Un seul End, en dernier** : la tokenisation se termine toujours par End
//! 3. **Positions croissantes** : les lexèmes sont dans l’ordre de l’entrée
//! 4. **Déterminisme** : même entrée, même résultat
//! 5. **Entiers** : sommes et produits de petits entiers sont exacts

use proptest::prelude::*;

use super::jetons::{tokenize, Token};
use super::{calculate, evaluate, EvalError};

// ============================================================================
// Générateurs
// ============================================================================

/// Chaînes proches d’une expression (alphabet de la calculatrice + espaces).
fn presque_expression() -> impl Strategy<Value = String> {
    proptest::string::string_regex(r"[0-9+\-*/^!√(). ]{0,48}").unwrap()
}

// ============================================================================
// Propriétés
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn jamais_de_panique(s in any::<String>()) {
        match evaluate(&s) {
            Ok(v) => prop_assert!(v.is_finite()),
            Err(EvalError::EmptyInput) => prop_assert!(s.trim().is_empty()),
            Err(e) => prop_assert!(e.position().is_some()),
        }
    }

    #[test]
    fn jamais_de_panique_alphabet(s in presque_expression()) {
        if let Ok(v) = evaluate(&s) {
            prop_assert!(v.is_finite());
        }
    }

    #[test]
    fn end_unique_et_final(s in presque_expression()) {
        if let Ok(lx) = tokenize(&s) {
            let ends = lx.iter().filter(|l| l.token == Token::End).count();
            prop_assert_eq!(ends, 1);
            prop_assert_eq!(lx.last().map(|l| l.token), Some(Token::End));
            prop_assert_eq!(lx.last().map(|l| l.position), Some(s.chars().count()));
        }
    }

    #[test]
    fn positions_croissantes(s in presque_expression()) {
        if let Ok(lx) = tokenize(&s) {
            for paire in lx.windows(2) {
                prop_assert!(paire[0].position < paire[1].position
                    || paire[1].token == Token::End);
            }
        }
    }

    #[test]
    fn deterministe(s in presque_expression()) {
        prop_assert_eq!(evaluate(&s), evaluate(&s));
        prop_assert_eq!(calculate(&s), calculate(&s));
    }

    #[test]
    fn somme_et_produit_entiers(a in -1000i32..1000, b in -1000i32..1000, c in -1000i32..1000) {
        let (fa, fb, fc) = (f64::from(a), f64::from(b), f64::from(c));
        prop_assert_eq!(evaluate(&format!("{a} + {b} * {c}")), Ok(fa + fb * fc));
        prop_assert_eq!(evaluate(&format!("({a} + {b}) * {c}")), Ok((fa + fb) * fc));
        prop_assert_eq!(evaluate(&format!("{a} - {b} - {c}")), Ok(fa - fb - fc));
    }

    #[test]
    fn division_par_zero_toujours_signalee(a in -1000i32..1000) {
        prop_assert!(
            matches!(evaluate(&format!("{a} / 0")), Err(EvalError::DivisionByZero { .. })),
            "division par zéro non signalée pour {}", a
        );
        prop_assert!(
            matches!(evaluate(&format!("{a} / (1 - 1)")), Err(EvalError::DivisionByZero { .. })),
            "division par zéro non signalée pour {}", a
        );
    }
}
