use crate::card;
use crate::config::Config;
use crate::pokebase::pokemon::{self, Pokemon};
use crate::pokebase::{self, Session};
use crate::sprite::Sprite;

use iced::keyboard;
use iced::task;
use iced::widget::{
    center, column, container, grid, image, mouse_area, opaque, scrollable, stack, text,
};
use iced::{Color, Element, Fill, Subscription, Task};

use function::Binary;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{self, AtomicU64};

pub struct Pokedex {
    pokemons: Vec<Pokemon>,
    is_loading: bool,
    failed: bool,
    selected: Option<Pokemon>,
    generation: Generation,
    load: Option<task::Handle>,
    images: HashMap<pokemon::Id, Image>,
}

enum Image {
    Loading,
    Loaded(image::Handle),
    Errored,
}

#[derive(Debug, Clone)]
pub enum Message {
    Loaded(Generation, Result<Vec<Pokemon>, pokebase::Error>),
    SpriteFetched(pokemon::Id, Result<Sprite, anywho::Error>),
    Reload,
    CardClicked(pokemon::Id),
    Dismiss,
}

/// What the Pokédex shows below the overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase<'a> {
    Loading,
    Failed,
    Empty,
    Loaded(&'a [Pokemon]),
}

impl Pokedex {
    pub fn new(session: &Session, config: &Config) -> (Self, Task<Message>) {
        let mut pokedex = Self {
            pokemons: Vec::new(),
            is_loading: true,
            failed: false,
            selected: None,
            generation: Generation::default(),
            load: None,
            images: HashMap::new(),
        };

        let task = pokedex.load(session, config);

        (pokedex, task)
    }

    /// Starts a new batch load, superseding any load in flight.
    pub fn load(&mut self, session: &Session, config: &Config) -> Task<Message> {
        let generation = Generation::next();
        let ids = pokemon::random_ids(config.batch_size, config.max_id);

        log::info!(
            "Loading {} Pokémon (generation {generation}): {ids:?}",
            ids.len()
        );

        let session = session.clone();

        let (task, handle) = Task::perform(
            async move { session.fetch_batch(&ids).await },
            Message::Loaded.with(generation),
        )
        .abortable();

        self.is_loading = true;
        self.generation = generation;
        self.load = Some(handle.abort_on_drop());

        task
    }

    pub fn update(&mut self, message: Message, session: &Session, config: &Config) -> Task<Message> {
        match message {
            Message::Loaded(generation, result) => {
                if generation != self.generation {
                    log::warn!(
                        "Discarding batch of generation {generation} (latest is {})",
                        self.generation
                    );

                    return Task::none();
                }

                self.is_loading = false;
                self.load = None;

                match result {
                    Ok(pokemons) => {
                        log::info!("Loaded {} Pokémon", pokemons.len());

                        let selected = self.selected.as_ref().map(|pokemon| pokemon.id);

                        self.failed = false;
                        self.pokemons = pokemons;
                        self.images.retain(|id, _| Some(*id) == selected);

                        self.fetch_sprites(session)
                    }
                    Err(error) => {
                        log::error!("Error loading Pokémon: {error}");

                        self.failed = true;

                        Task::none()
                    }
                }
            }
            Message::SpriteFetched(id, Ok(sprite)) => {
                if self.is_shown(id) {
                    let _ = self.images.insert(
                        id,
                        Image::Loaded(image::Handle::from_rgba(
                            sprite.width,
                            sprite.height,
                            sprite.rgba,
                        )),
                    );
                }

                Task::none()
            }
            Message::Reload => self.load(session, config),
            Message::CardClicked(id) => {
                self.select(id);

                Task::none()
            }
            Message::Dismiss => {
                self.selected = None;

                Task::none()
            }
            Message::SpriteFetched(id, Err(error)) => {
                log::error!("Error fetching sprite of #{id}: {error}");

                if self.is_shown(id) {
                    let _ = self.images.insert(id, Image::Errored);
                }

                Task::none()
            }
        }
    }

    /// Selects the listed record with the given id, or clears the selection.
    pub fn select(&mut self, id: pokemon::Id) {
        self.selected = self
            .pokemons
            .iter()
            .find(|pokemon| pokemon.id == id)
            .cloned();
    }

    pub fn phase(&self) -> Phase<'_> {
        if self.is_loading {
            Phase::Loading
        } else if self.pokemons.is_empty() {
            if self.failed {
                Phase::Failed
            } else {
                Phase::Empty
            }
        } else {
            Phase::Loaded(&self.pokemons)
        }
    }

    pub fn pokemons(&self) -> &[Pokemon] {
        &self.pokemons
    }

    pub fn selected(&self) -> Option<&Pokemon> {
        self.selected.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn has_failed(&self) -> bool {
        self.failed
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn view(&self) -> Element<'_, Message> {
        let content: Element<_> = match self.phase() {
            Phase::Loading => center(text("Loading Pokémon...").size(20)).into(),
            Phase::Failed => center(
                container(text(
                    "Something went wrong while catching Pokémon. \
                    Press R to try again.",
                ))
                .padding(20)
                .style(container::bordered_box),
            )
            .into(),
            Phase::Empty => center(text("No Pokémon found. Please try again.")).into(),
            Phase::Loaded(pokemons) => {
                let cards = scrollable(
                    grid(pokemons.iter().map(|pokemon| {
                        card::view(
                            pokemon,
                            self.sprite(pokemon.id),
                            Message::CardClicked(pokemon.id),
                        )
                    }))
                    .fluid(250)
                    .height(grid::aspect_ratio(3, 4))
                    .spacing(20),
                )
                .width(Fill)
                .height(Fill);

                // A failed reload keeps the previous batch on screen
                let notice = self.has_failed().then(|| {
                    container(
                        text("Could not catch a new batch. Press R to try again.").size(14),
                    )
                    .padding(10)
                    .width(Fill)
                    .style(container::bordered_box)
                });

                column![].push(notice).push(cards).spacing(10).into()
            }
        };

        let content = container(content).padding(20);

        match &self.selected {
            Some(pokemon) => modal(
                content,
                card::details(pokemon, self.sprite(pokemon.id), Message::Dismiss),
                Message::Dismiss,
            ),
            None => content.into(),
        }
    }

    pub fn subscription(&self) -> Subscription<Message> {
        keyboard::listen().filter_map(|event| {
            use keyboard::key::{Key, Named};

            let keyboard::Event::KeyPressed { key, modifiers, .. } = event else {
                return None;
            };

            Some(match key.as_ref() {
                Key::Named(Named::Escape) => Message::Dismiss,
                Key::Character("r") if modifiers.is_empty() => Message::Reload,
                _ => None?,
            })
        })
    }

    fn fetch_sprites(&mut self, session: &Session) -> Task<Message> {
        let mut tasks = Vec::new();

        for pokemon in &self.pokemons {
            let Some(url) = pokemon.sprites.front_default() else {
                continue;
            };

            // Duplicate ids share one download
            if self.images.contains_key(&pokemon.id) {
                continue;
            }

            let _ = self.images.insert(pokemon.id, Image::Loading);

            tasks.push(Task::perform(
                Sprite::fetch(url, session),
                Message::SpriteFetched.with(pokemon.id),
            ));
        }

        Task::batch(tasks)
    }

    fn sprite(&self, id: pokemon::Id) -> Option<&image::Handle> {
        match self.images.get(&id)? {
            Image::Loaded(handle) => Some(handle),
            Image::Loading | Image::Errored => None,
        }
    }

    /// Whether the record is listed or open in the overlay.
    fn is_shown(&self, id: pokemon::Id) -> bool {
        self.selected.as_ref().is_some_and(|pokemon| pokemon.id == id)
            || self.pokemons.iter().any(|pokemon| pokemon.id == id)
    }
}

/// Identifies a single batch load across every mounted Pokédex.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Generation(u64);

impl Generation {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);

        Self(NEXT.fetch_add(1, atomic::Ordering::Relaxed))
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn modal<'a>(
    base: impl Into<Element<'a, Message>>,
    content: impl Into<Element<'a, Message>>,
    on_blur: Message,
) -> Element<'a, Message> {
    stack![
        base.into(),
        opaque(
            mouse_area(center(opaque(content)).style(|_theme| {
                container::Style::default().background(Color::BLACK.scale_alpha(0.7))
            }))
            .on_press(on_blur)
        )
    ]
    .into()
}
