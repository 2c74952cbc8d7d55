//! Chart Component
//!
//! Mood charts drawn by Chart.js, which the page loads as a global script.
//! The library may still be loading when the dashboard mounts; the
//! dashboard controller decides when to try again.

use aitherapist::dashboard::{
    tooltip_label, ChartError, ChartKind, ChartMount, ChartSpec, ChartSurface, EmptyState,
};
use leptos::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Canvas mount for one chart
#[component]
pub fn MoodChart(mount: ChartMount) -> impl IntoView {
    view! {
        <div class="card shadow-sm h-100">
            <div class="card-header bg-white">
                <h5 class="mb-0">{mount.title()}</h5>
            </div>
            <div class="card-body chart-body" style="height: 300px; position: relative;">
                <canvas id=mount.element_id()></canvas>
            </div>
        </div>
    }
}

/// Draws into the page's canvases through the global `Chart` constructor
#[derive(Default)]
pub struct ChartJsSurface;

fn chart_constructor() -> Option<js_sys::Function> {
    let target: &JsValue = window().as_ref();
    js_sys::Reflect::get(target, &JsValue::from_str("Chart"))
        .ok()
        .and_then(|ctor| ctor.dyn_into::<js_sys::Function>().ok())
}

fn canvas(mount: ChartMount) -> Option<web_sys::HtmlCanvasElement> {
    document()
        .get_element_by_id(mount.element_id())
        .and_then(|el| el.dyn_into::<web_sys::HtmlCanvasElement>().ok())
}

impl ChartSurface for ChartJsSurface {
    fn library_available(&self) -> bool {
        chart_constructor().is_some()
    }

    fn has_mount(&self, mount: ChartMount) -> bool {
        canvas(mount).is_some()
    }

    fn draw(&mut self, mount: ChartMount, spec: &ChartSpec) -> Result<(), ChartError> {
        let ctor = chart_constructor().ok_or(ChartError::LibraryMissing)?;
        let canvas = canvas(mount).ok_or(ChartError::MountMissing(mount.element_id()))?;

        let json = serde_json::to_string(spec).map_err(|e| ChartError::Draw(e.to_string()))?;
        let config = js_sys::JSON::parse(&json).map_err(|e| ChartError::Draw(format!("{:?}", e)))?;

        if spec.kind == ChartKind::Doughnut {
            let label = Closure::<dyn Fn(JsValue) -> JsValue>::new(doughnut_tooltip);
            set_path(
                &config,
                &["options", "plugins", "tooltip", "callbacks", "label"],
                &label.into_js_value(),
            );
        }

        let args = js_sys::Array::of2(canvas.as_ref(), &config);
        js_sys::Reflect::construct(&ctor, &args)
            .map_err(|e| ChartError::Draw(format!("{:?}", e)))?;
        Ok(())
    }

    fn show_empty(&mut self, empty: &EmptyState) {
        let Some(body) = canvas(empty.mount).and_then(|c| c.parent_element()) else {
            return;
        };

        let lines = empty.lines().collect::<Vec<_>>().join("<br>");
        body.set_inner_html(&format!(
            r#"<div class="text-center text-muted py-5"><i class="bi {} fs-1 d-block mb-3"></i><p>{}</p></div>"#,
            empty.icon, lines
        ));
    }
}

/// Chart.js tooltip label callback: `"Positive: 3 (60.0%)"`
fn doughnut_tooltip(context: JsValue) -> JsValue {
    let get = |target: &JsValue, key: &str| {
        js_sys::Reflect::get(target, &JsValue::from_str(key)).unwrap_or(JsValue::UNDEFINED)
    };

    let label = get(&context, "label").as_string().unwrap_or_default();
    let value = get(&context, "parsed").as_f64().unwrap_or(0.0) as u32;
    let total = js_sys::Array::from(&get(&get(&context, "dataset"), "data"))
        .iter()
        .filter_map(|v| v.as_f64())
        .sum::<f64>() as u64;

    JsValue::from_str(&tooltip_label(&label, value, total))
}

/// Set `value` at a nested property path, creating objects on the way
fn set_path(root: &JsValue, path: &[&str], value: &JsValue) {
    let Some((last, parents)) = path.split_last() else {
        return;
    };

    let mut current = root.clone();
    for key in parents {
        let key = JsValue::from_str(key);
        let next = js_sys::Reflect::get(&current, &key).unwrap_or(JsValue::UNDEFINED);
        let next = if next.is_object() {
            next
        } else {
            let obj: JsValue = js_sys::Object::new().into();
            let _ = js_sys::Reflect::set(&current, &key, &obj);
            obj
        };
        current = next;
    }
    let _ = js_sys::Reflect::set(&current, &JsValue::from_str(last), value);
}
