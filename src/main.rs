use pokebase;

mod card;
mod config;
mod palette;
mod screen;
mod sprite;
mod widget;

use crate::config::Config;
use crate::pokebase::Session;
use crate::screen::Screen;
use crate::screen::about;
use crate::screen::pokedex;
use crate::widget::logo;

use iced::widget::{button, center, column, container, row, space, text};
use iced::{Center, Element, Fill, Font, Subscription, Task, Theme};

pub fn main() -> iced::Result {
    tracing_subscriber::fmt::init();

    iced::application(Pokecards::new, Pokecards::update, Pokecards::view)
        .subscription(Pokecards::subscription)
        .theme(Pokecards::theme)
        .default_font(Font::MONOSPACE)
        .window_size((1280.0, 860.0))
        .run()
}

struct Pokecards {
    state: State,
}

enum State {
    Loading,
    Ready {
        config: Config,
        session: Session,
        screen: Screen,
    },
}

#[derive(Debug, Clone)]
enum Message {
    Loaded(Result<Config, anywho::Error>),
    Pokedex(pokedex::Message),
    OpenPokedex,
    OpenAbout,
}

impl Pokecards {
    fn new() -> (Self, Task<Message>) {
        (
            Self {
                state: State::Loading,
            },
            Task::perform(Config::load(), Message::Loaded),
        )
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Loaded(result) => {
                let config = result.unwrap_or_else(|error| {
                    log::error!("Invalid configuration, using defaults: {error}");

                    Config::default().with_env()
                });

                let session = Session::new(&config.api_url);
                let (pokedex, task) = screen::Pokedex::new(&session, &config);

                self.state = State::Ready {
                    config,
                    session,
                    screen: Screen::Pokedex(pokedex),
                };

                task.map(Message::Pokedex)
            }
            Message::Pokedex(message) => {
                // Results of an unmounted Pokédex land here and are dropped
                let State::Ready {
                    config,
                    session,
                    screen: Screen::Pokedex(pokedex),
                } = &mut self.state
                else {
                    return Task::none();
                };

                pokedex
                    .update(message, session, config)
                    .map(Message::Pokedex)
            }
            Message::OpenPokedex => {
                let State::Ready {
                    config,
                    session,
                    screen,
                } = &mut self.state
                else {
                    return Task::none();
                };

                if let Screen::Pokedex(_) = screen {
                    return Task::none();
                }

                let (pokedex, task) = screen::Pokedex::new(session, config);
                *screen = Screen::Pokedex(pokedex);

                task.map(Message::Pokedex)
            }
            Message::OpenAbout => {
                let State::Ready { screen, .. } = &mut self.state else {
                    return Task::none();
                };

                *screen = Screen::About;

                Task::none()
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        match &self.state {
            State::Loading => center(text("Loading...")).into(),
            State::Ready { config, screen, .. } => {
                let tabs = [
                    (
                        "Pokédex",
                        Message::OpenPokedex,
                        matches!(screen, Screen::Pokedex(_)),
                    ),
                    ("About", Message::OpenAbout, matches!(screen, Screen::About)),
                ]
                .into_iter()
                .map(|(label, on_click, is_active)| {
                    button(text(label).size(14))
                        .style(move |theme: &Theme, status| {
                            if is_active {
                                let palette = theme.extended_palette();

                                button::Style {
                                    background: Some(palette.background.base.color.into()),
                                    text_color: palette.background.base.text,
                                    ..button::text(theme, status)
                                }
                            } else {
                                button::text(theme, status)
                            }
                        })
                        .padding([8, 15])
                        .on_press(on_click)
                        .into()
                });

                let shuffle = matches!(screen, Screen::Pokedex(_)).then(|| {
                    button(text("Shuffle").size(14))
                        .padding([4, 12])
                        .on_press(Message::Pokedex(pokedex::Message::Reload))
                });

                let navbar = container(
                    row![logo(14), row(tabs), space::horizontal()]
                        .push(shuffle)
                        .spacing(10)
                        .width(Fill)
                        .align_y(Center),
                )
                .padding([0, 10])
                .style(container::dark);

                let screen = match screen {
                    Screen::Pokedex(pokedex) => pokedex.view().map(Message::Pokedex),
                    Screen::About => about::view(config),
                };

                column![container(screen).height(Fill), navbar].into()
            }
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        let State::Ready { screen, .. } = &self.state else {
            return Subscription::none();
        };

        match screen {
            Screen::Pokedex(pokedex) => pokedex.subscription().map(Message::Pokedex),
            Screen::About => Subscription::none(),
        }
    }

    fn theme(&self) -> Theme {
        Theme::CatppuccinMocha
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready(screen: Screen) -> Pokecards {
        Pokecards {
            state: State::Ready {
                config: Config::default(),
                session: Session::default(),
                screen,
            },
        }
    }

    fn mounted(pokecards: &Pokecards) -> Option<&screen::Pokedex> {
        match &pokecards.state {
            State::Ready {
                screen: Screen::Pokedex(pokedex),
                ..
            } => Some(pokedex),
            _ => None,
        }
    }

    #[test]
    fn pokedex_results_without_a_pokedex_are_dropped() {
        let mut pokecards = ready(Screen::About);

        let _ = pokecards.update(Message::Pokedex(pokedex::Message::Loaded(
            pokedex::Generation::default(),
            Ok(Vec::new()),
        )));
        let _ = pokecards.update(Message::Pokedex(pokedex::Message::Reload));

        assert!(matches!(
            pokecards.state,
            State::Ready {
                screen: Screen::About,
                ..
            }
        ));
    }

    #[test]
    fn late_results_never_reach_a_remounted_pokedex() {
        let mut pokecards = ready(Screen::About);

        let _ = pokecards.update(Message::OpenPokedex);
        let first = mounted(&pokecards).map(screen::Pokedex::generation);
        assert!(first.is_some());

        let _ = pokecards.update(Message::OpenAbout);
        assert!(mounted(&pokecards).is_none());

        let _ = pokecards.update(Message::OpenPokedex);
        let second = mounted(&pokecards).map(screen::Pokedex::generation);
        assert_ne!(first, second);

        if let Some(first) = first {
            let _ = pokecards.update(Message::Pokedex(pokedex::Message::Loaded(
                first,
                Ok(Vec::new()),
            )));
        }

        let pokedex = mounted(&pokecards).unwrap();
        assert!(pokedex.is_loading());
        assert_eq!(pokedex.phase(), pokedex::Phase::Loading);
    }

    #[test]
    fn nothing_is_routed_before_the_configuration_loads() {
        let mut pokecards = Pokecards {
            state: State::Loading,
        };

        let _ = pokecards.update(Message::Pokedex(pokedex::Message::Reload));
        let _ = pokecards.update(Message::OpenPokedex);
        let _ = pokecards.update(Message::OpenAbout);

        assert!(matches!(pokecards.state, State::Loading));
    }
}
