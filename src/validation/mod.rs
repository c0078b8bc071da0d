/*!
 * Validation module for translation fidelity checks.
 *
 * This module compares a sanitized source utterance with its final
 * translation and produces advisory warnings:
 * - Dosage validation (numbers with units must survive unchanged)
 * - Anatomical term validation (body parts must still be named)
 * - Unit validation (units outside an allow-list)
 *
 * # Architecture
 *
 * - `dosage`: Extracts and compares dosage sequences
 * - `anatomy`: Checks anatomical vocabulary against the glossary
 * - `units`: Detects units outside the allow-list
 * - `service`: Orchestrates all checks
 */

pub mod anatomy;
pub mod dosage;
pub mod service;
pub mod units;

// Re-export main types
pub use service::{ValidationConfig, ValidationWarning, Validator};
