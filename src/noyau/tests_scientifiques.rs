//! Tests scientifiques (campagne) : invariants + robustesse + limites contrôlées.
//!
//! But : trouver les limites sans faire chauffer la machine.
//! - budget temps global
//! - tailles bornées (profondeur, longueur)
//! - positions d’erreur vérifiées au caractère près

use std::time::{Duration, Instant};

use super::{calculate, evaluate, evaluate_with, EvalError, Reglages};

fn eval_ok(expr: &str) -> f64 {
    evaluate(expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn assert_texte(expr: &str, attendu: &str) {
    let sortie = calculate(expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));
    assert_eq!(sortie, attendu, "expr={expr:?}");
}

/// Budget global anti-gel (scientifique + safe).
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Identités arithmétiques ------------------------ */

#[test]
fn sci_neutres_et_absorbants() {
    for x in ["0", "1", "2.5", "-7", "1234.5678"] {
        let v = eval_ok(x);
        assert_eq!(eval_ok(&format!("{x} + 0")), v);
        assert_eq!(eval_ok(&format!("{x} * 1")), v);
        assert_eq!(eval_ok(&format!("{x} / 1")), v);
        assert_eq!(eval_ok(&format!("{x} * 0")), 0.0);
        assert_eq!(eval_ok(&format!("{x} - ({x})")), 0.0);
    }
}

#[test]
fn sci_distributivite_sur_entiers() {
    // exact en f64 tant qu’on reste sur de petits entiers
    for (a, b, c) in [(2, 3, 4), (-5, 7, 11), (12, -3, 9)] {
        let gauche = eval_ok(&format!("{a} * ({b} + {c})"));
        let droite = eval_ok(&format!("{a} * {b} + {a} * {c}"));
        assert_eq!(gauche, droite, "a={a} b={b} c={c}");
    }
}

#[test]
fn sci_parentheses_superflues() {
    assert_eq!(eval_ok("((((2))))"), 2.0);
    assert_eq!(eval_ok("(1 + (2 * (3 + (4))))"), 15.0);
    assert_eq!(eval_ok("  ( 1+2 )*( 3+4 )  "), 21.0);
}

/* ------------------------ Texte de réponse ------------------------ */

#[test]
fn sci_reponses_texte() {
    assert_texte("2+2", "4");
    assert_texte("1/4", "0.25");
    assert_texte("1/3", "0.3333333333");
    assert_texte("-(1/2)", "-0.5");
    assert_texte("2^60", "1.1529215046e18");
    assert_texte("10^-12", "1e-12");
}

#[test]
fn sci_precision_reglable() {
    let mut r = Reglages::default();
    r.set_chiffres(3);
    assert_eq!(super::calculate_with("2/3", &r).as_deref(), Ok("0.667"));
    r.set_chiffres(0);
    assert_eq!(super::calculate_with("7/2", &r).as_deref(), Ok("4"));
}

/* ------------------------ Erreurs : positions exactes ------------------------ */

#[test]
fn sci_positions_erreurs() {
    let cas: &[(&str, usize)] = &[
        ("1 + 2 * (3 / 0)", 11),
        ("4 4", 2),
        ("(1 + 2", 6),
        ("1 $ 2", 2),
        ("√√-1", 1),
    ];
    for (expr, pos) in cas {
        let e = evaluate(expr).expect_err(expr);
        assert_eq!(e.position(), Some(*pos), "expr={expr:?} err={e}");
    }
}

#[test]
fn sci_position_en_caracteres_pas_en_octets() {
    // '√' fait 3 octets mais compte pour 1 position
    match evaluate("√4 + é") {
        Err(EvalError::Lex(e)) => assert_eq!((e.position, e.character), (5, 'é')),
        autre => panic!("attendu Lex, obtenu {autre:?}"),
    }
}

/* ------------------------ Stress contrôlé (sans brûler) ------------------------ */

#[test]
fn sci_stress_longue_somme() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    // 50 000 termes à plat : itératif, pas de récursion
    let expr = vec!["1"; 50_000].join("+");
    budget(t0, max);
    assert_eq!(eval_ok(&expr), 50_000.0);
    budget(t0, max);
}

#[test]
fn sci_stress_imbrication_limite() {
    let t0 = Instant::now();
    let max = Duration::from_secs(1);

    let r = Reglages::default();
    let n = r.profondeur_max;

    // pile tout juste dans la limite
    let ok = format!("{}1{}", "(".repeat(n), ")".repeat(n));
    assert_eq!(evaluate_with(&ok, &r), Ok(1.0));

    // un cran de trop
    let ko = format!("{}1{}", "(".repeat(n + 1), ")".repeat(n + 1));
    assert!(matches!(
        evaluate_with(&ko, &r),
        Err(EvalError::TooDeep { .. })
    ));

    // même garde-fou pour les préfixes et les puissances
    let moins = format!("{}1", "- ".repeat(10_000));
    assert!(matches!(evaluate(&moins), Err(EvalError::TooDeep { .. })));
    let tour = vec!["1"; 10_000].join("^");
    assert!(matches!(evaluate(&tour), Err(EvalError::TooDeep { .. })));

    budget(t0, max);
}
