// ============================================================================
// NUTRITION - Cálculos de presentación (anillo de calorías, macros, agua)
// ============================================================================

use crate::models::{MacroProgress, WaterProgress};

/// Geometría del anillo SVG de calorías
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingGeometry {
    pub radius: f64,
    pub circumference: f64,
    /// `stroke-dashoffset` para el porcentaje dado
    pub dash_offset: f64,
    /// Porcentaje ya limitado a 0..=100
    pub percent: f64,
    pub over_target: bool,
}

/// Porcentaje consumido sobre objetivo, sin límite superior.
/// Objetivo 0 → 0 para no dividir por cero.
pub fn percent_of(consumed: f64, target: f64) -> f64 {
    if target <= 0.0 {
        return 0.0;
    }
    (consumed / target * 100.0).max(0.0)
}

pub fn clamp_percent(percent: f64) -> f64 {
    percent.clamp(0.0, 100.0)
}

pub fn ring_geometry(consumed: f64, target: f64, radius: f64) -> RingGeometry {
    let raw = percent_of(consumed, target);
    let percent = clamp_percent(raw);
    let circumference = 2.0 * std::f64::consts::PI * radius;
    RingGeometry {
        radius,
        circumference,
        dash_offset: circumference * (1.0 - percent / 100.0),
        percent,
        over_target: target > 0.0 && consumed > target,
    }
}

/// Calorías restantes (negativo si se pasó del objetivo)
pub fn remaining(progress: &MacroProgress) -> f64 {
    progress.target - progress.consumed
}

pub fn macro_percent(progress: &MacroProgress) -> f64 {
    clamp_percent(percent_of(progress.consumed, progress.target))
}

pub fn water_percent(water: &WaterProgress) -> f64 {
    clamp_percent(percent_of(
        f64::from(water.consumed_ml),
        f64::from(water.goal_ml),
    ))
}

/// Número de vasos de 250 ml (para el contador de agua)
pub fn water_glasses(ml: u32) -> u32 {
    ml / 250
}
