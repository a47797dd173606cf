// ============================================================================
// CALORIE RING - Anillo SVG de calorías consumidas / objetivo
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::ElementBuilder;
use crate::utils::nutrition::ring_geometry;

const RING_RADIUS: f64 = 54.0;
const RING_SIZE: f64 = 128.0;

pub fn render_calorie_ring(consumed: f64, target: f64) -> Result<Element, JsValue> {
    let ring = ring_geometry(consumed, target, RING_RADIUS);
    let center = format!("{}", RING_SIZE / 2.0);
    let radius = format!("{}", ring.radius);

    let track = ElementBuilder::svg("circle")?
        .class("ring-track")?
        .attr("cx", &center)?
        .attr("cy", &center)?
        .attr("r", &radius)?
        .build();
    let progress_class = if ring.over_target {
        "ring-progress ring-over"
    } else {
        "ring-progress"
    };
    let progress = ElementBuilder::svg("circle")?
        .class(progress_class)?
        .attr("cx", &center)?
        .attr("cy", &center)?
        .attr("r", &radius)?
        .attr("stroke-dasharray", &format!("{:.2}", ring.circumference))?
        .attr("stroke-dashoffset", &format!("{:.2}", ring.dash_offset))?
        .attr("transform", &format!("rotate(-90 {c} {c})", c = center))?
        .build();

    let svg = ElementBuilder::svg("svg")?
        .attr("viewBox", &format!("0 0 {s} {s}", s = RING_SIZE))?
        .class("calorie-ring")?
        .child(track)?
        .child(progress)?
        .build();

    let remaining = target - consumed;
    let (value, caption) = if remaining >= 0.0 {
        (format!("{:.0}", remaining), "kcal left")
    } else {
        (format!("{:.0}", -remaining), "kcal over")
    };

    Ok(ElementBuilder::new("div")?
        .class("calorie-ring-wrap")?
        .child(svg)?
        .child(
            ElementBuilder::new("div")?
                .class("calorie-ring-label")?
                .child(ElementBuilder::new("strong")?.text(&value).build())?
                .child(ElementBuilder::new("span")?.text(caption).build())?
                .build(),
        )?
        .build())
}
