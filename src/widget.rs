use iced::widget::{canvas, row, text};
use iced::{Color, Element, Pixels};

pub fn logo<'a, Message: 'a>(size: impl Into<Pixels>) -> Element<'a, Message> {
    let size = size.into();

    row![
        text("Poké").size(size).color(Color::from_rgb8(0xEE, 0x15, 0x15)),
        text("Cards").size(size),
    ]
    .into()
}

/// A poké ball drawn on a canvas, shown while a sprite is on its way.
pub fn pokeball<'a, Message: 'a>(size: impl Into<Pixels>) -> Element<'a, Message> {
    use iced::mouse;
    use iced::widget::canvas::path;
    use iced::{Point, Radians, Rectangle, Renderer, Size, Theme};
    use std::f32::consts::PI;

    struct Pokeball;

    impl<Message> canvas::Program<Message> for Pokeball {
        type State = canvas::Cache;

        fn draw(
            &self,
            cache: &Self::State,
            renderer: &Renderer,
            theme: &Theme,
            bounds: Rectangle,
            _cursor: mouse::Cursor,
        ) -> Vec<canvas::Geometry> {
            let pokeball = cache.draw(renderer, bounds.size(), |frame| {
                const RADIUS: f32 = 100.0;
                const BAND: f32 = 16.0;

                let palette = theme.palette();
                let center = Point::new(RADIUS, RADIUS);

                let lower_half = canvas::Path::new(|builder| {
                    builder.arc(path::Arc {
                        center,
                        radius: RADIUS,
                        start_angle: Radians(0.0),
                        end_angle: Radians(PI),
                    });
                    builder.close();
                });

                let band = Rectangle::new(
                    Point::new(0.0, RADIUS - BAND / 2.0),
                    Size::new(2.0 * RADIUS, BAND),
                );

                frame.scale((bounds.width - 0.5) / (2.0 * RADIUS));

                frame.fill(
                    &canvas::Path::circle(center, RADIUS),
                    palette.danger.scale_alpha(0.6),
                );
                frame.fill(&lower_half, palette.text.scale_alpha(0.6));
                frame.fill_rectangle(band.position(), band.size(), palette.background);
                frame.fill(&canvas::Path::circle(center, RADIUS / 3.0), palette.background);
                frame.fill(&canvas::Path::circle(center, RADIUS / 5.0), palette.text);
            });

            vec![pokeball]
        }
    }

    let size = size.into();

    canvas(Pokeball).width(size).height(size).into()
}
