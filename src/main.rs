// src/main.rs
//
// Calculatrice — point d’entrée console
// -------------------------------------
// - Journalisation : tracing + EnvFilter (RUST_LOG), sur stderr
// - Réglages       : défauts + CALCULATRICE_CHIFFRES / CALCULATRICE_PROFONDEUR
// - Console        : une ligne = un appel au noyau

use calculatrice_flottante::app::{console, AppCalc};
use calculatrice_flottante::noyau::reglages::PILE_MIN;
use calculatrice_flottante::noyau::Reglages;
use tracing_subscriber::EnvFilter;

/// Filtre par défaut si RUST_LOG est absent ou invalide.
const FILTRE_DEFAUT: &str = "calculatrice_flottante=warn";

fn main() -> rustyline::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(FILTRE_DEFAUT)),
        )
        // stdout est réservé aux réponses de la console
        .with_writer(std::io::stderr)
        .init();

    let reglages = Reglages::depuis_env();

    // pile connue, quelle que soit celle du thread principal
    let fil = std::thread::Builder::new()
        .name("console".into())
        .stack_size(PILE_MIN)
        .spawn(move || console::lancer(&mut AppCalc::new(reglages)))?;

    fil
        .join()
        .unwrap_or_else(|_| Err(std::io::Error::other("console interrompue").into()))
}
