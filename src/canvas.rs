use crate::constants::{WAVEFORM_LINE_WIDTH, WAVEFORM_STROKE};
use crate::dom;
use crate::engine::RenderSurface;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// 2D canvas that receives the waveform polyline.
pub struct CanvasSurface {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: web::HtmlCanvasElement) -> anyhow::Result<Self> {
        dom::sync_canvas_backing_size(&canvas);
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("getContext error: {:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        Ok(Self { canvas, ctx })
    }
}

impl RenderSurface for CanvasSurface {
    fn size(&self) -> (f32, f32) {
        (self.canvas.width() as f32, self.canvas.height() as f32)
    }

    fn draw_polyline(&mut self, points: &[(f32, f32)]) {
        let (w, h) = self.size();
        self.ctx.clear_rect(0.0, 0.0, w as f64, h as f64);
        #[allow(deprecated)]
        self.ctx.set_stroke_style(&JsValue::from_str(WAVEFORM_STROKE));
        self.ctx.set_line_width(WAVEFORM_LINE_WIDTH);
        self.ctx.begin_path();
        for (i, &(x, y)) in points.iter().enumerate() {
            if i == 0 {
                self.ctx.move_to(x as f64, y as f64);
            } else {
                self.ctx.line_to(x as f64, y as f64);
            }
        }
        self.ctx.stroke();
    }

    fn clear(&mut self) {
        let (w, h) = self.size();
        self.ctx.clear_rect(0.0, 0.0, w as f64, h as f64);
    }
}
