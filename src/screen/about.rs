use crate::config::Config;
use crate::widget::{logo, pokeball};

use iced::widget::{bottom_center, center, column, container, stack, text};
use iced::{Center, Element, Fill};

pub fn view<'a, Message: 'a>(config: &'a Config) -> Element<'a, Message> {
    let about = container(
        column![
            text(
                "Every visit to the Pokédex draws a handful of random Pokémon \
                from PokéAPI. Pick a card to see its base stats.",
            ),
            text!(
                "Source: {api_url}\nBatch: {batch_size} Pokémon out of #1 to #{max_id}",
                api_url = config.api_url,
                batch_size = config.batch_size,
                max_id = config.max_id,
            )
            .size(12),
        ]
        .spacing(10),
    )
    .width(Fill)
    .padding(10)
    .style(container::bordered_box);

    stack![
        center(
            column![pokeball(60), logo(40), about]
                .spacing(20)
                .align_x(Center)
                .max_width(480),
        )
        .padding(20),
        legal_disclaimer()
    ]
    .into()
}

fn legal_disclaimer<'a, Message: 'a>() -> Element<'a, Message> {
    bottom_center(
        text(
            "This application is not affiliated with, endorsed, sponsored, or \
            approved by Nintendo, Game Freak or The Pokémon Company.\n\
            Pokémon data and sprites are provided by PokéAPI.",
        )
        .center()
        .width(Fill)
        .size(8),
    )
    .padding(10)
    .into()
}
