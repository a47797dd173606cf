// ============================================================================
// CHART - Proyección de series a coordenadas SVG (gráficos de progreso)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
    pub value: f64,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartArea {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Default for ChartArea {
    fn default() -> Self {
        Self {
            width: 320.0,
            height: 160.0,
            padding: 16.0,
        }
    }
}

/// Proyecta una serie cronológica de (etiqueta, valor) en el área.
/// Una serie plana queda centrada verticalmente; un solo punto, centrado en x.
pub fn project_series(series: &[(String, f64)], area: ChartArea) -> Vec<ChartPoint> {
    if series.is_empty() {
        return Vec::new();
    }

    let min = series.iter().map(|(_, v)| *v).fold(f64::INFINITY, f64::min);
    let max = series.iter().map(|(_, v)| *v).fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;

    let inner_width = (area.width - 2.0 * area.padding).max(0.0);
    let inner_height = (area.height - 2.0 * area.padding).max(0.0);
    let step = if series.len() > 1 {
        inner_width / (series.len() - 1) as f64
    } else {
        0.0
    };

    series
        .iter()
        .enumerate()
        .map(|(index, (label, value))| {
            let x = if series.len() == 1 {
                area.width / 2.0
            } else {
                area.padding + step * index as f64
            };
            let ratio = if span > 0.0 { (value - min) / span } else { 0.5 };
            // SVG crece hacia abajo: el máximo va arriba
            let y = area.padding + inner_height * (1.0 - ratio);
            ChartPoint {
                x,
                y,
                value: *value,
                label: label.clone(),
            }
        })
        .collect()
}

/// Atributo `points` de un `<polyline>`
pub fn polyline_points(points: &[ChartPoint]) -> String {
    points
        .iter()
        .map(|point| format!("{:.1},{:.1}", point.x, point.y))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Altura de cada barra relativa al máximo de la serie
pub fn bar_heights(values: &[f64], max_height: f64) -> Vec<f64> {
    let max = values.iter().copied().fold(0.0, f64::max);
    values
        .iter()
        .map(|value| {
            if max > 0.0 {
                (value / max * max_height).max(0.0)
            } else {
                0.0
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(values: &[f64]) -> Vec<(String, f64)> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| (format!("d{i}"), *v))
            .collect()
    }

    #[test]
    fn projects_min_to_bottom_and_max_to_top() {
        let area = ChartArea { width: 120.0, height: 100.0, padding: 10.0 };
        let points = project_series(&series(&[80.0, 78.0, 79.0]), area);

        assert_eq!(points.len(), 3);
        assert_eq!(points[0].x, 10.0);
        assert_eq!(points[2].x, 110.0);
        assert_eq!(points[0].y, 10.0);
        assert_eq!(points[1].y, 90.0);
        assert_eq!(points[2].y, 50.0);
        assert_eq!(polyline_points(&points), "10.0,10.0 60.0,90.0 110.0,50.0");
    }

    #[test]
    fn single_and_flat_series_are_centered() {
        let area = ChartArea { width: 100.0, height: 100.0, padding: 10.0 };
        let single = project_series(&series(&[70.0]), area);
        assert_eq!((single[0].x, single[0].y), (50.0, 50.0));

        let flat = project_series(&series(&[70.0, 70.0]), area);
        assert!(flat.iter().all(|point| point.y == 50.0));
        assert!(project_series(&[], area).is_empty());
    }

    #[test]
    fn bars_scale_against_the_maximum() {
        assert_eq!(bar_heights(&[0.0, 500.0, 1000.0], 80.0), vec![0.0, 40.0, 80.0]);
        assert_eq!(bar_heights(&[0.0, 0.0], 80.0), vec![0.0, 0.0]);
    }
}
