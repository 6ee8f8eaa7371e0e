// src/app.rs
//
// Calculatrice — module App (racine)
// ----------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + console.rs)
// - Ré-exporter AppCalc (pour main.rs: use calculatrice_flottante::app::AppCalc;)
//
// Important:
// - L’état ne calcule rien ; seule la console appelle le noyau (`calculate_with`).

pub mod console;
pub mod etat;

// Ré-export pratique : `use crate::app::AppCalc;`
pub use etat::AppCalc;
