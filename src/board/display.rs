//! ILI9486-class TFT over SPIM, drawn with embedded-graphics.
//!
//! Icon bitmaps are not bundled; each icon is drawn as an outlined box
//! of its real size with a short label, and the drum animation as a dot
//! orbiting a circle.

use embassy_nrf::gpio::Output;
use embassy_nrf::peripherals::SPI3;
use embassy_nrf::spim::Spim;
use embassy_time::Delay;
use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10, FONT_9X15_BOLD};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};
use embedded_hal_bus::spi::ExclusiveDevice;
use mipidsi::interface::SpiInterface;
use mipidsi::models::ILI9486Rgb565;
use mipidsi::options::{ColorOrder, Orientation};
use mipidsi::Builder as DisplayBuilder;

use wash_panel::config::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use wash_panel::render::{Color, Font, Icon, PanelDisplay};
use wash_panel::Error;

pub type Tft = mipidsi::Display<
    SpiInterface<'static, ExclusiveDevice<Spim<'static, SPI3>, Output<'static>, Delay>, Output<'static>>,
    ILI9486Rgb565,
    Output<'static>,
>;

/// Reset and initialise the panel in portrait orientation.
pub fn init(
    spi: Spim<'static, SPI3>,
    cs: Output<'static>,
    dc: Output<'static>,
    rst: Output<'static>,
    buffer: &'static mut [u8],
) -> Result<Tft, Error> {
    let spi_dev = ExclusiveDevice::new(spi, cs, Delay).map_err(|_| Error::Display)?;
    let di = SpiInterface::new(spi_dev, dc, buffer);

    DisplayBuilder::new(ILI9486Rgb565, di)
        .display_size(DISPLAY_WIDTH, DISPLAY_HEIGHT)
        .orientation(Orientation::new())
        .color_order(ColorOrder::Bgr)
        .reset_pin(rst)
        .init(&mut Delay)
        .map_err(|_| Error::Display)
}

const GRAY: Rgb565 = Rgb565::new(16, 32, 16);

const fn rgb(color: Color) -> Rgb565 {
    match color {
        Color::White => Rgb565::WHITE,
        Color::Gray => GRAY,
        Color::Black => Rgb565::BLACK,
        Color::Red => Rgb565::RED,
    }
}

const fn mono_font(font: Font) -> &'static MonoFont<'static> {
    match font {
        Font::Body => &FONT_10X20,
        Font::Heading => &FONT_9X15_BOLD,
    }
}

/// Label and outline colour of the placeholder for `icon`.
fn icon_face(icon: Icon) -> (&'static str, Rgb565) {
    match icon {
        Icon::Clock => ("QUICK", Rgb565::BLUE),
        Icon::Day => ("DAILY", Rgb565::BLUE),
        Icon::Anvil => ("HEAVY", Rgb565::BLUE),
        Icon::Water => ("RINSE", Rgb565::BLUE),
        Icon::Vortex => ("SPIN", Rgb565::BLUE),
        Icon::Gear => ("CONFIG", Rgb565::BLUE),
        Icon::Plus => ("+", GRAY),
        Icon::Wash => ("WASH", Rgb565::GREEN),
        Icon::Mode => ("MODE", Rgb565::BLACK),
        Icon::Configure => ("CONFIGURE", Rgb565::BLACK),
        Icon::Back => ("BACK", Rgb565::BLACK),
        Icon::Cancel => ("CANCEL", Rgb565::RED),
        Icon::Unlocked => ("OPEN", Rgb565::BLACK),
        Icon::LockedGray => ("HOLD", GRAY),
        Icon::LockedRed => ("LOCK", Rgb565::RED),
        Icon::LockedGreen => ("FREE", Rgb565::GREEN),
        Icon::AnimationFrame(_) => ("", Rgb565::BLUE),
    }
}

/// Dot offsets around the drum, one per animation frame (20 deg apart).
const DRUM_ORBIT: [(i32, i32); 18] = [
    (50, 0),
    (47, 17),
    (38, 32),
    (25, 43),
    (9, 49),
    (-9, 49),
    (-25, 43),
    (-38, 32),
    (-47, 17),
    (-50, 0),
    (-47, -17),
    (-38, -32),
    (-25, -43),
    (-9, -49),
    (9, -49),
    (25, -43),
    (38, -32),
    (47, -17),
];

/// [`PanelDisplay`] on any RGB565 embedded-graphics target.
pub struct GraphicsPanel<D> {
    target: D,
}

impl<D> GraphicsPanel<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    pub fn new(target: D) -> Self {
        Self { target }
    }

    fn draw_drum(&mut self, x: u16, y: u16, frame: u8) -> Result<(), Error> {
        let (w, h) = Icon::AnimationFrame(frame).size();
        let corner = Point::new(i32::from(x), i32::from(y));
        let center = corner + Point::new(i32::from(w) / 2, i32::from(h) / 2);

        Rectangle::new(corner, Size::new(u32::from(w), u32::from(h)))
            .into_styled(PrimitiveStyle::with_fill(Rgb565::WHITE))
            .draw(&mut self.target)
            .map_err(|_| Error::Display)?;
        Circle::with_center(center, 112)
            .into_styled(PrimitiveStyle::with_stroke(Rgb565::BLUE, 3))
            .draw(&mut self.target)
            .map_err(|_| Error::Display)?;

        let (dx, dy) = DRUM_ORBIT[usize::from(frame) % DRUM_ORBIT.len()];
        Circle::with_center(center + Point::new(dx, dy), 14)
            .into_styled(PrimitiveStyle::with_fill(Rgb565::BLUE))
            .draw(&mut self.target)
            .map_err(|_| Error::Display)?;
        Ok(())
    }
}

impl<D> PanelDisplay for GraphicsPanel<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    type Error = Error;

    fn draw_icon(&mut self, x: u16, y: u16, icon: Icon) -> Result<(), Error> {
        if let Icon::AnimationFrame(frame) = icon {
            return self.draw_drum(x, y, frame);
        }

        let (w, h) = icon.size();
        let (label, color) = icon_face(icon);
        let rect = Rectangle::new(
            Point::new(i32::from(x), i32::from(y)),
            Size::new(u32::from(w), u32::from(h)),
        );
        rect.into_styled(PrimitiveStyle::with_stroke(color, 3))
            .draw(&mut self.target)
            .map_err(|_| Error::Display)?;

        let font = if w < 100 { &FONT_6X10 } else { &FONT_10X20 };
        let style = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Middle)
            .build();
        Text::with_text_style(label, rect.center(), MonoTextStyle::new(font, color), style)
            .draw(&mut self.target)
            .map_err(|_| Error::Display)?;
        Ok(())
    }

    fn fill_rect(&mut self, x0: u16, y0: u16, x1: u16, y1: u16, color: Color) -> Result<(), Error> {
        let top_left = Point::new(i32::from(x0), i32::from(y0));
        let bottom_right = Point::new(i32::from(x1), i32::from(y1));
        Rectangle::with_corners(top_left, bottom_right)
            .into_styled(PrimitiveStyle::with_fill(rgb(color)))
            .draw(&mut self.target)
            .map_err(|_| Error::Display)
    }

    fn draw_text(&mut self, font: Font, text: &str, x: u16, y: u16, _spacing: u16) -> Result<(), Error> {
        // Mono fonts carry their own advance.
        let style = MonoTextStyle::new(mono_font(font), Rgb565::BLACK);
        Text::with_baseline(text, Point::new(i32::from(x), i32::from(y)), style, Baseline::Top)
            .draw(&mut self.target)
            .map_err(|_| Error::Display)?;
        Ok(())
    }
}
