use macroquad::prelude::*;

/// Sink for renderer draw requests.
///
/// A request is a texture, a source rectangle, a destination rectangle and
/// a tiling flag. When tiling is requested the source rectangle may be
/// wider than the texture; the backend must wrap the texture so the
/// repeated image appears seamless.
pub trait RenderBackend {
    /// Texture handle type this backend draws from.
    type Texture;

    /// Submit one draw request.
    fn draw(&mut self, texture: &Self::Texture, src: Rect, dest: Rect, tiling: bool);
}

/// Backend that issues `draw_texture_ex` calls against the current
/// macroquad context.
pub struct MacroquadBackend;

impl RenderBackend for MacroquadBackend {
    type Texture = Texture2D;

    fn draw(&mut self, texture: &Texture2D, src: Rect, dest: Rect, tiling: bool) {
        if !tiling {
            draw_texture_ex(
                texture,
                dest.x,
                dest.y,
                WHITE,
                DrawTextureParams {
                    source: Some(src),
                    dest_size: Some(vec2(dest.w, dest.h)),
                    ..Default::default()
                },
            );
            return;
        }

        // The default pipeline has no repeat addressing, so wrap by
        // blitting texture-sized chunks until the destination is covered.
        let tex_w = texture.width();
        let tex_h = texture.height();
        let mut out_y = dest.y;
        let mut src_y = src.y.rem_euclid(tex_h);
        while out_y < dest.y + dest.h {
            let copy_h = (tex_h - src_y).min(dest.y + dest.h - out_y);
            let mut out_x = dest.x;
            let mut src_x = src.x.rem_euclid(tex_w);
            while out_x < dest.x + dest.w {
                let copy_w = (tex_w - src_x).min(dest.x + dest.w - out_x);
                draw_texture_ex(
                    texture,
                    out_x,
                    out_y,
                    WHITE,
                    DrawTextureParams {
                        source: Some(Rect::new(src_x, src_y, copy_w, copy_h)),
                        dest_size: Some(vec2(copy_w, copy_h)),
                        ..Default::default()
                    },
                );
                out_x += copy_w;
                src_x = 0.0;
            }
            out_y += copy_h;
            src_y = 0.0;
        }
    }
}

/// One recorded draw request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawRequest {
    /// Source rectangle in texture pixels.
    pub src: Rect,
    /// Destination rectangle in screen pixels.
    pub dest: Rect,
    /// Whether the backend was asked to wrap the texture.
    pub tiling: bool,
}

/// Backend that records draw requests instead of drawing.
///
/// Uses `()` as its texture type, so a full render pass can run headless;
/// handy for tests and draw-call inspection.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    /// Requests in submission order.
    pub requests: Vec<DrawRequest>,
}

impl RenderBackend for RecordingBackend {
    type Texture = ();

    fn draw(&mut self, _texture: &(), src: Rect, dest: Rect, tiling: bool) {
        self.requests.push(DrawRequest { src, dest, tiling });
    }
}
