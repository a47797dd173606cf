// ============================================================================
// UNITS - Conversión imperial/métrico
// ============================================================================
// El backend guarda siempre kg y cm; las conversiones son de presentación y
// de entrada de formularios.
// ============================================================================

use crate::models::UnitSystem;

pub const LB_PER_KG: f64 = 2.204_622_6;
pub const CM_PER_INCH: f64 = 2.54;
const INCHES_PER_FOOT: f64 = 12.0;

pub fn kg_to_lb(kg: f64) -> f64 {
    kg * LB_PER_KG
}

pub fn lb_to_kg(lb: f64) -> f64 {
    lb / LB_PER_KG
}

/// Altura en cm a (pies, pulgadas), redondeando pulgadas
pub fn cm_to_feet_inches(cm: f64) -> (u32, u32) {
    let total_inches = (cm / CM_PER_INCH).round() as u32;
    (total_inches / 12, total_inches % 12)
}

pub fn feet_inches_to_cm(feet: f64, inches: f64) -> f64 {
    (feet * INCHES_PER_FOOT + inches) * CM_PER_INCH
}

/// Peso introducido por el usuario en sus unidades → kg
pub fn weight_input_to_kg(value: f64, units: UnitSystem) -> f64 {
    match units {
        UnitSystem::Metric => value,
        UnitSystem::Imperial => lb_to_kg(value),
    }
}

/// kg → valor en las unidades del usuario
pub fn weight_for_display(kg: f64, units: UnitSystem) -> f64 {
    match units {
        UnitSystem::Metric => kg,
        UnitSystem::Imperial => kg_to_lb(kg),
    }
}

/// Rango aceptado en formularios de peso, en las unidades del usuario
pub fn weight_input_range(units: UnitSystem) -> (f64, f64) {
    match units {
        UnitSystem::Metric => (30.0, 300.0),
        UnitSystem::Imperial => (66.0, 660.0),
    }
}

pub fn weight_unit_label(units: UnitSystem) -> &'static str {
    match units {
        UnitSystem::Metric => "kg",
        UnitSystem::Imperial => "lb",
    }
}

pub fn format_weight(kg: f64, units: UnitSystem) -> String {
    format!(
        "{:.1} {}",
        weight_for_display(kg, units),
        weight_unit_label(units)
    )
}

/// Diferencia de peso con signo, p. ej. "-1.2 lb"
pub fn format_weight_change(delta_kg: f64, units: UnitSystem) -> String {
    let value = weight_for_display(delta_kg, units);
    let sign = if value > 0.0 { "+" } else { "" };
    format!("{}{:.1} {}", sign, value, weight_unit_label(units))
}

pub fn format_height(cm: f64, units: UnitSystem) -> String {
    match units {
        UnitSystem::Metric => format!("{:.0} cm", cm),
        UnitSystem::Imperial => {
            let (feet, inches) = cm_to_feet_inches(cm);
            format!("{}' {}\"", feet, inches)
        }
    }
}

/// Redondeo a 1 decimal para lo que se envía al backend
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_conversions_are_inverse() {
        let kg = 70.0;
        assert!((lb_to_kg(kg_to_lb(kg)) - kg).abs() < 1e-9);
        assert_eq!(round1(kg_to_lb(70.0)), 154.3);
        assert_eq!(weight_input_to_kg(70.0, UnitSystem::Metric), 70.0);
    }

    #[test]
    fn height_conversions() {
        assert_eq!(cm_to_feet_inches(175.26), (5, 9));
        assert!((feet_inches_to_cm(5.0, 9.0) - 175.26).abs() < 1e-9);
        assert_eq!(format_height(175.26, UnitSystem::Imperial), "5' 9\"");
        assert_eq!(format_height(175.26, UnitSystem::Metric), "175 cm");
    }

    #[test]
    fn formats_weights_in_user_units() {
        assert_eq!(format_weight(70.0, UnitSystem::Metric), "70.0 kg");
        assert_eq!(format_weight(70.0, UnitSystem::Imperial), "154.3 lb");
        assert_eq!(format_weight_change(-1.0, UnitSystem::Metric), "-1.0 kg");
        assert_eq!(format_weight_change(0.5, UnitSystem::Metric), "+0.5 kg");
    }
}
