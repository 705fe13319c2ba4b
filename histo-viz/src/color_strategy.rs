use embedded_graphics::{pixelcolor::Rgb888, prelude::*};

pub struct ColorContext {
    pub element_index: usize,
    pub num_elements: usize,
    pub element_height: f32,
    pub max_element_height: f32,
}

pub trait ColorStrategy {
    fn get_color(&mut self, context: &ColorContext) -> Rgb888;
}

fn map_position_to_rgb_on_wheel(pos: u8) -> Rgb888 {
    let pos = pos % 255;
    if pos < 85 {
        Rgb888::new(
            pos.saturating_mul(3),
            255u8.saturating_sub(pos.saturating_mul(3)),
            0,
        )
    } else if pos < 170 {
        let pos = pos.saturating_sub(85);
        Rgb888::new(
            255u8.saturating_sub(pos.saturating_mul(3)),
            0,
            pos.saturating_mul(3),
        )
    } else {
        let pos = pos.saturating_sub(170);
        Rgb888::new(
            0,
            pos.saturating_mul(3),
            255u8.saturating_sub(pos.saturating_mul(3)),
        )
    }
}

/// Spreads the colour wheel across the bins, low frequencies first.
pub struct SpectrumColor;
impl ColorStrategy for SpectrumColor {
    fn get_color(&mut self, context: &ColorContext) -> Rgb888 {
        if context.num_elements == 0 {
            return Rgb888::BLACK;
        }
        let color_position = ((context.element_index as u32 * 255
            / (context.num_elements as u32))
            % 255) as u8;
        map_position_to_rgb_on_wheel(color_position)
    }
}

/// Grey level proportional to the bar's share of the display height.
pub struct GradientColor;
impl ColorStrategy for GradientColor {
    fn get_color(&mut self, context: &ColorContext) -> Rgb888 {
        if !(context.max_element_height > 0.0) {
            return Rgb888::BLACK;
        }
        let intensity = (context.element_height / context.max_element_height * 255.0)
            .clamp(0.0, 255.0) as u8;
        Rgb888::new(intensity, intensity, intensity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(index: usize, height: f32) -> ColorContext {
        ColorContext {
            element_index: index,
            num_elements: 3,
            element_height: height,
            max_element_height: 10.0,
        }
    }

    #[test]
    fn test_spectrum_color_walks_the_wheel() {
        let mut strategy = SpectrumColor;
        assert_eq!(strategy.get_color(&context(0, 1.0)), Rgb888::new(0, 255, 0));
        assert_eq!(strategy.get_color(&context(1, 1.0)), Rgb888::new(255, 0, 0));
        assert_eq!(strategy.get_color(&context(2, 1.0)), Rgb888::new(0, 0, 255));
    }

    #[test]
    fn test_gradient_color_follows_height() {
        let mut strategy = GradientColor;
        assert_eq!(strategy.get_color(&context(0, 0.0)), Rgb888::new(0, 0, 0));
        assert_eq!(strategy.get_color(&context(0, 10.0)), Rgb888::new(255, 255, 255));
        assert_eq!(strategy.get_color(&context(0, 50.0)), Rgb888::new(255, 255, 255));
    }
}
