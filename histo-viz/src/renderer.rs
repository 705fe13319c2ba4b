use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::{Point, Size},
    pixelcolor::Rgb888,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
};

use crate::color_strategy::{ColorContext, ColorStrategy};
use crate::config::MAX_PADDING;

/// Horizontal extent of one bar, relative to the left edge of the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarSlot {
    pub x: i32,
    pub width: u32,
}

/// Splits `width` pixels into `num_bins` equal slots and centres a bar
/// covering `1 - padding` of each slot. Bars are at least one pixel wide.
pub fn bar_slots(width: u32, num_bins: usize, padding: f32) -> impl Iterator<Item = BarSlot> {
    let slot = if num_bins == 0 {
        0.0
    } else {
        width as f32 / num_bins as f32
    };
    let padding = if padding.is_finite() {
        padding.clamp(0.0, MAX_PADDING)
    } else {
        0.0
    };
    let bar = slot * (1.0 - padding);

    (0..num_bins).map(move |i| {
        let left = i as f32 * slot + (slot - bar) / 2.0;
        let x = left as i32;
        let right = ((left + bar) as i32).max(x + 1);
        BarSlot {
            x,
            width: (right - x) as u32,
        }
    })
}

pub trait Renderer {
    fn draw<D: DrawTarget<Color = Rgb888>>(
        &mut self,
        target: &mut D,
        heights: &[f32],
        padding: f32,
    ) -> Result<(), D::Error>;
}

/// Draws one filled bar per bin, growing up from the bottom edge.
/// Heights are in pixels and clipped to the display.
pub struct BarGraphRenderer<C> {
    color: C,
}

impl<C: ColorStrategy> BarGraphRenderer<C> {
    pub fn new(color: C) -> Self {
        Self { color }
    }
}

impl<C: ColorStrategy> Renderer for BarGraphRenderer<C> {
    fn draw<D>(&mut self, target: &mut D, heights: &[f32], padding: f32) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
    {
        let area = target.bounding_box();
        let screen_height = area.size.height;

        for (i, (slot, &height)) in bar_slots(area.size.width, heights.len(), padding)
            .zip(heights)
            .enumerate()
        {
            let bar_height = height.max(0.0).min(screen_height as f32) as u32;
            if bar_height == 0 {
                continue;
            }
            let color = self.color.get_color(&ColorContext {
                element_index: i,
                num_elements: heights.len(),
                element_height: height,
                max_element_height: screen_height as f32,
            });
            let top_left = area.top_left + Point::new(slot.x, (screen_height - bar_height) as i32);
            Rectangle::new(top_left, Size::new(slot.width, bar_height))
                .intersection(&area)
                .into_styled(PrimitiveStyle::with_fill(color))
                .draw(target)?;
        }
        Ok(())
    }
}
