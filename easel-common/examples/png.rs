//! Paint a small scene with the default backend and save it as a PNG.

use std::f64::consts::PI;

use easel_common::kurbo::Rect;
use easel_common::*;

fn main() -> Result<(), Error> {
    env_logger::init();

    let mut device = Device::new()?;
    let mut text = AttributedText::new(
        device.text(),
        "Hello from easel",
        None,
        &UiDefaults::default(),
    )?;
    text.set_color_for(Color::RED, 6..10);

    let mut bitmap = device.bitmap_target(640, 480, 2.0)?;
    {
        let mut p = bitmap.painter()?;
        p.set_fill_color(Color::WHITE);
        p.fill_rect(Rect::new(0.0, 0.0, 320.0, 240.0));

        p.save();
        p.clip_rect(Rect::new(20.0, 20.0, 300.0, 120.0));
        p.set_fill_color(Color::rgb8(0x00, 0x00, 0x80));
        p.begin_path();
        p.arc((160.0, 120.0), 80.0, 0.0, 0.0);
        p.fill();
        p.restore();

        p.set_color(Color::rgb8(0x80, 0x00, 0x00));
        p.set_line_width(3.0);
        p.begin_path();
        p.arc((160.0, 120.0), 90.0, PI, 1.5 * PI);
        p.line_to((250.0, 30.0));
        p.stroke();

        p.draw_attributed_text(&text, Rect::new(20.0, 180.0, 300.0, 230.0));
        p.draw_focus_rect(Rect::new(15.5, 175.5, 304.5, 234.5));

        if p.end_draw() {
            log::warn!("surface lost while drawing");
        }
    }
    bitmap.save_to_file("temp-image.png")
}
