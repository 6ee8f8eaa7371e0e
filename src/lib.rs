//! Calculatrice flottante
//!
//! - `noyau` : commande “calculate” (tokenisation, évaluation, formatage), sans état
//! - `app`   : état UI + console qui appelle le noyau, une ligne = une requête

pub mod app;
pub mod noyau;
