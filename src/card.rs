use crate::palette;
use crate::pokebase::Pokemon;
use crate::pokebase::pokemon::Stat;
use crate::widget::pokeball;

use iced::border;
use iced::widget::{button, center, column, container, image, progress_bar, right, row, text};
use iced::{Center, Color, ContentFit, Element, Fill, Theme};

/// What a card displays, formatted from a single record.
#[derive(Debug, Clone, PartialEq)]
pub struct Content<'a> {
    pub name: String,
    pub sprite: &'a str,
    pub types: Vec<&'a str>,
    pub height: String,
    pub weight: String,
    pub stats: Vec<String>,
}

impl<'a> Content<'a> {
    /// Returns `None` until the record has a sprite to show.
    pub fn new(pokemon: &'a Pokemon) -> Option<Self> {
        let sprite = pokemon.sprites.front_default()?;

        Some(Self {
            name: pokemon.name.to_uppercase(),
            sprite,
            types: pokemon
                .types
                .iter()
                .map(|kind| kind.name.as_str())
                .collect(),
            height: format!("{}m", pokemon.height_in_meters()),
            weight: format!("{}kg", pokemon.weight_in_kilograms()),
            stats: pokemon
                .stats
                .iter()
                .map(|stat| format!("{}: {}", stat.name, stat.base_value))
                .collect(),
        })
    }
}

pub fn view<'a, Message: Clone + 'a>(
    pokemon: &'a Pokemon,
    sprite: Option<&'a image::Handle>,
    on_press: Message,
) -> Element<'a, Message> {
    let Some(content) = Content::new(pokemon) else {
        return clickable(slot(center(pokeball(40.0))), on_press);
    };

    let stats = row(content
        .stats
        .into_iter()
        .map(|stat| text(stat).size(10).into()))
    .spacing(8)
    .wrap();

    let card = column![
        picture(sprite, 120),
        text(content.name).size(18),
        badges(&content.types),
        text!("{} · {}", content.height, content.weight).size(12),
        stats,
    ]
    .spacing(8)
    .align_x(Center);

    clickable(
        container(card)
            .padding(20)
            .width(Fill)
            .style(|theme| container::bordered_box(theme).border(border::rounded(15))),
        on_press,
    )
}

fn clickable<'a, Message: Clone + 'a>(
    content: impl Into<Element<'a, Message>>,
    on_press: Message,
) -> Element<'a, Message> {
    button(content)
        .on_press(on_press)
        .padding(0)
        .style(button::text)
        .into()
}

pub fn details<'a, Message: Clone + 'a>(
    pokemon: &'a Pokemon,
    sprite: Option<&'a image::Handle>,
    on_close: Message,
) -> Element<'a, Message> {
    let close = right(
        button(text("×").size(24))
            .on_press(on_close)
            .padding([0, 8])
            .style(button::text),
    );

    let types: Vec<_> = pokemon
        .types
        .iter()
        .map(|kind| kind.name.as_str())
        .collect();

    let header = column![
        picture(sprite, 180),
        text(pokemon.name.to_uppercase()).size(28),
        badges(&types),
    ]
    .spacing(10)
    .align_x(Center);

    let info = container(
        text!(
            "Height: {}m | Weight: {}kg",
            pokemon.height_in_meters(),
            pokemon.weight_in_kilograms()
        )
        .size(14),
    )
    .padding(10)
    .center_x(Fill)
    .style(container::dark);

    let abilities = row(pokemon.abilities.iter().map(|ability| {
        let label = if ability.is_hidden {
            format!("{} (hidden)", ability.name)
        } else {
            ability.name.clone()
        };

        text(label).size(12).into()
    }))
    .spacing(15);

    let stats = column![
        text("Base Stats").size(18),
        column(pokemon.stats.iter().map(stat)).spacing(10),
    ]
    .spacing(15);

    container(
        column![
            close,
            header,
            info,
            center_x_row(abilities),
            container(stats).padding(20).style(container::dark),
        ]
        .spacing(20),
    )
    .padding(30)
    .max_width(500)
    .style(|theme: &Theme| {
        let palette = theme.extended_palette();

        container::Style::default()
            .background(palette.background.base.color)
            .border(border::rounded(20))
    })
    .into()
}

fn stat<'a, Message: 'a>(stat: &'a Stat) -> Element<'a, Message> {
    row![
        text(stat.name.as_str()).size(12).width(120),
        progress_bar(0.0..=100.0, stat.percentage()),
        text!("{}", stat.base_value).size(12).width(30),
    ]
    .spacing(15)
    .align_y(Center)
    .into()
}

fn center_x_row<'a, Message: 'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    container(content).center_x(Fill).into()
}

fn picture<'a, Message: 'a>(sprite: Option<&'a image::Handle>, size: u32) -> Element<'a, Message> {
    match sprite {
        Some(handle) => image(handle)
            .width(size as f32)
            .height(size as f32)
            .content_fit(ContentFit::Contain)
            .into(),
        None => center(pokeball(size as f32 / 2.0))
            .width(size as f32)
            .height(size as f32)
            .into(),
    }
}

fn badges<'a, Message: 'a>(types: &[&'a str]) -> Element<'a, Message> {
    row(types.iter().map(|&kind| badge(kind)))
        .spacing(4)
        .into()
}

fn badge<'a, Message: 'a>(kind: &'a str) -> Element<'a, Message> {
    let color = palette::type_color(kind);

    container(text(kind).size(12).color(Color::WHITE))
        .padding([2, 8])
        .style(move |_theme| {
            container::Style::default()
                .background(color)
                .border(border::rounded(12))
        })
        .into()
}

fn slot<'a, Message: 'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    container(content)
        .width(Fill)
        .height(Fill)
        .style(|theme| container::dark(theme).border(border::rounded(15)))
        .into()
}
